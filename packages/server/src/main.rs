#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the SBTE results server.
//!
//! Configuration comes from the environment; see
//! [`sbte_results_server::ServerConfig::from_env`].

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    sbte_results_server::run_server(sbte_results_server::ServerConfig::from_env()).await
}
