//! HTTP handler functions for the results API.

use actix_web::{HttpResponse, web};
use sbte_results_codec::payload::render_payload;
use sbte_results_server_models::{ApiHealth, ApiRefresh, PayloadQueryParams, StudentQueryParams};

use crate::{AppState, query};

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Scraper is running")
}

/// `GET /students-data`
///
/// The whole dataset as a JSON array, in the requested or default payload
/// format.
pub async fn students_data(
    state: web::Data<AppState>,
    params: web::Query<PayloadQueryParams>,
) -> HttpResponse {
    let format = params.format.unwrap_or(state.default_format);
    let results = state.results.read().await;

    match render_payload(&results, format) {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => {
            log::error!("Failed to render {format} payload: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to render students data"
            }))
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        students: state.results.read().await.len(),
    })
}

/// `GET /api/students`
///
/// Filtered, sorted and paginated full results.
pub async fn students(
    state: web::Data<AppState>,
    params: web::Query<StudentQueryParams>,
) -> HttpResponse {
    let results = state.results.read().await;
    HttpResponse::Ok().json(query::query_students(&results, &params))
}

/// `GET /api/options`
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(query::options(&state.results.read().await))
}

/// `GET /api/summary`
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(query::summary(&state.results.read().await))
}

/// `POST /api/refresh`
///
/// Re-runs the orchestrator and swaps in the new dataset. Only one refresh
/// runs at a time; concurrent requests get `409 Conflict`.
#[allow(clippy::future_not_send)]
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    let Ok(_guard) = state.refreshing.try_lock() else {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "A refresh is already running"
        }));
    };

    let before = state.results.read().await.len();

    match state.load_dataset().await {
        Ok(fresh) => {
            let students = fresh.len();
            *state.results.write().await = fresh;
            log::info!("Refreshed dataset: {before} -> {students} students");

            #[allow(clippy::cast_possible_wrap)]
            let added = students as i64 - before as i64;
            HttpResponse::Ok().json(ApiRefresh { students, added })
        }
        Err(e) => {
            log::error!("Failed to refresh dataset: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to refresh dataset"
            }))
        }
    }
}
