//! Polytechnic colleges affiliated to the State Board of Technical
//! Education, Bihar.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A polytechnic college, identified by its short label.
///
/// The short label is the wire and display form (e.g. `"NGP Patna-13"`);
/// [`CollegeName::full_name`] gives the official name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CollegeName {
    #[serde(rename = "GP Barauni")]
    #[strum(serialize = "GP Barauni")]
    GpBarauni,
    #[serde(rename = "GP Bhagalpur")]
    #[strum(serialize = "GP Bhagalpur")]
    GpBhagalpur,
    #[serde(rename = "GP Chhapra")]
    #[strum(serialize = "GP Chhapra")]
    GpChhapra,
    #[serde(rename = "GP Darbhanga")]
    #[strum(serialize = "GP Darbhanga")]
    GpDarbhanga,
    #[serde(rename = "GP Gaya")]
    #[strum(serialize = "GP Gaya")]
    GpGaya,
    #[serde(rename = "GP Gopalganj")]
    #[strum(serialize = "GP Gopalganj")]
    GpGopalganj,
    #[serde(rename = "GP Muzaffarpur")]
    #[strum(serialize = "GP Muzaffarpur")]
    GpMuzaffarpur,
    #[serde(rename = "GP Patna-7")]
    #[strum(serialize = "GP Patna-7")]
    GpPatna7,
    #[serde(rename = "GP Purnea")]
    #[strum(serialize = "GP Purnea")]
    GpPurnea,
    #[serde(rename = "GP Saharsa")]
    #[strum(serialize = "GP Saharsa")]
    GpSaharsa,
    #[serde(rename = "NGP Patna-13")]
    #[strum(serialize = "NGP Patna-13")]
    NgpPatna13,
    #[serde(rename = "GWP Muzaffarpur")]
    #[strum(serialize = "GWP Muzaffarpur")]
    GwpMuzaffarpur,
    #[serde(rename = "GWP Patna")]
    #[strum(serialize = "GWP Patna")]
    GwpPatna,
    #[serde(rename = "GP Katihar")]
    #[strum(serialize = "GP Katihar")]
    GpKatihar,
    #[serde(rename = "GP Vaishali")]
    #[strum(serialize = "GP Vaishali")]
    GpVaishali,
    #[serde(rename = "GP Lakhisarai")]
    #[strum(serialize = "GP Lakhisarai")]
    GpLakhisarai,
    #[serde(rename = "GP Dehrionsone")]
    #[strum(serialize = "GP Dehrionsone")]
    GpDehrionsone,
    #[serde(rename = "GP Asthawan, Nalanda")]
    #[strum(serialize = "GP Asthawan, Nalanda")]
    GpAsthawanNalanda,
    #[serde(rename = "GP Sheohar")]
    #[strum(serialize = "GP Sheohar")]
    GpSheohar,
    #[serde(rename = "GP Motihari")]
    #[strum(serialize = "GP Motihari")]
    GpMotihari,
    #[serde(rename = "GP Madhubani")]
    #[strum(serialize = "GP Madhubani")]
    GpMadhubani,
    #[serde(rename = "BKPI Sitamarhi")]
    #[strum(serialize = "BKPI Sitamarhi")]
    BkpiSitamarhi,
    #[serde(rename = "GP Madhepura")]
    #[strum(serialize = "GP Madhepura")]
    GpMadhepura,
    #[serde(rename = "GP Raghopur, Supaul")]
    #[strum(serialize = "GP Raghopur, Supaul")]
    GpRaghopurSupaul,
    #[serde(rename = "KNSGP Samastipur")]
    #[strum(serialize = "KNSGP Samastipur")]
    KnsgpSamastipur,
    #[serde(rename = "BKNSGP Gopalganj")]
    #[strum(serialize = "BKNSGP Gopalganj")]
    BknsgpGopalganj,
    #[serde(rename = "GP Munger")]
    #[strum(serialize = "GP Munger")]
    GpMunger,
    #[serde(rename = "GP Sheikhpura")]
    #[strum(serialize = "GP Sheikhpura")]
    GpSheikhpura,
    #[serde(rename = "GP Jamui")]
    #[strum(serialize = "GP Jamui")]
    GpJamui,
    #[serde(rename = "GP Banka")]
    #[strum(serialize = "GP Banka")]
    GpBanka,
    #[serde(rename = "GP Tekari, Gaya")]
    #[strum(serialize = "GP Tekari, Gaya")]
    GpTekariGaya,
    #[serde(rename = "GP Kaimur")]
    #[strum(serialize = "GP Kaimur")]
    GpKaimur,
    #[serde(rename = "GP Buxar")]
    #[strum(serialize = "GP Buxar")]
    GpBuxar,
    #[serde(rename = "GP Sitamarhi")]
    #[strum(serialize = "GP Sitamarhi")]
    GpSitamarhi,
    #[serde(rename = "GP West Champaran")]
    #[strum(serialize = "GP West Champaran")]
    GpWestChamparan,
    #[serde(rename = "GP Kishanganj")]
    #[strum(serialize = "GP Kishanganj")]
    GpKishanganj,
    #[serde(rename = "GP Araria")]
    #[strum(serialize = "GP Araria")]
    GpAraria,
    #[serde(rename = "GP Nawada")]
    #[strum(serialize = "GP Nawada")]
    GpNawada,
    #[serde(rename = "GP Siwan")]
    #[strum(serialize = "GP Siwan")]
    GpSiwan,
    #[serde(rename = "GP Arwal")]
    #[strum(serialize = "GP Arwal")]
    GpArwal,
    #[serde(rename = "GP Aurangabad")]
    #[strum(serialize = "GP Aurangabad")]
    GpAurangabad,
    #[serde(rename = "GP Bhojpur")]
    #[strum(serialize = "GP Bhojpur")]
    GpBhojpur,
    #[serde(rename = "GP Jehanabad")]
    #[strum(serialize = "GP Jehanabad")]
    GpJehanabad,
    #[serde(rename = "GP Khagaria")]
    #[strum(serialize = "GP Khagaria")]
    GpKhagaria,
    #[serde(rename = "GP Barh")]
    #[strum(serialize = "GP Barh")]
    GpBarh,
    #[serde(rename = "GPTT Bhagalpur")]
    #[strum(serialize = "GPTT Bhagalpur")]
    GpttBhagalpur,
    #[serde(rename = "Unknown College")]
    #[strum(serialize = "Unknown College")]
    Unknown,
}

impl CollegeName {
    /// Returns every known college (excluding [`CollegeName::Unknown`]),
    /// ordered by board code.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GpBarauni,
            Self::GpBhagalpur,
            Self::GpChhapra,
            Self::GpDarbhanga,
            Self::GpGaya,
            Self::GpGopalganj,
            Self::GpMuzaffarpur,
            Self::GpPatna7,
            Self::GpPurnea,
            Self::GpSaharsa,
            Self::NgpPatna13,
            Self::GwpMuzaffarpur,
            Self::GwpPatna,
            Self::GpKatihar,
            Self::GpVaishali,
            Self::GpLakhisarai,
            Self::GpDehrionsone,
            Self::GpAsthawanNalanda,
            Self::GpSheohar,
            Self::GpMotihari,
            Self::GpMadhubani,
            Self::BkpiSitamarhi,
            Self::GpMadhepura,
            Self::GpRaghopurSupaul,
            Self::KnsgpSamastipur,
            Self::BknsgpGopalganj,
            Self::GpMunger,
            Self::GpSheikhpura,
            Self::GpJamui,
            Self::GpBanka,
            Self::GpTekariGaya,
            Self::GpKaimur,
            Self::GpBuxar,
            Self::GpSitamarhi,
            Self::GpWestChamparan,
            Self::GpKishanganj,
            Self::GpAraria,
            Self::GpNawada,
            Self::GpSiwan,
            Self::GpArwal,
            Self::GpAurangabad,
            Self::GpBhojpur,
            Self::GpJehanabad,
            Self::GpKhagaria,
            Self::GpBarh,
            Self::GpttBhagalpur,
        ]
    }

    /// Official full name of the college.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::GpBarauni => "Government Polytechnic, Barauni",
            Self::GpBhagalpur => "Government Polytechnic, Bhagalpur",
            Self::GpChhapra => "Government Polytechnic, Chapra",
            Self::GpDarbhanga => "Government Polytechnic, Darbhanga",
            Self::GpGaya => "Government Polytechnic, Gaya",
            Self::GpGopalganj => "Government Polytechnic, Gopalganj",
            Self::GpMuzaffarpur => "Government Polytechnic, Muzaffarpur",
            Self::GpPatna7 => "Government Polytechnic, Patna - 7",
            Self::GpPurnea => "Government Polytechnic, Purnea",
            Self::GpSaharsa => "Government Polytechnic, Saharsa",
            Self::NgpPatna13 => "New Government Polytechnic, Patna - 13",
            Self::GwpMuzaffarpur => "Government Women's Polytechnic, Muzaffarpur",
            Self::GwpPatna => "Government Women's Polytechnic, Patna",
            Self::GpKatihar => "Government Polytechnic, Katihar",
            Self::GpVaishali => "Government Polytechnic, Vaishali",
            Self::GpLakhisarai => "Government Polytechnic, Lakhisarai",
            Self::GpDehrionsone => "Government Polytechnic, Dehrionsone",
            Self::GpAsthawanNalanda => "Government Polytechnic, Asthawan, Nalanda",
            Self::GpSheohar => "Government Polytechnic, Sheohar",
            Self::GpMotihari => "Government Polytechnic, Motihari",
            Self::GpMadhubani => "Government Polytechnic, Madhubani",
            Self::BkpiSitamarhi => "Baddiuzama Khan Polytechnic Institute, Sitamarhi",
            Self::GpMadhepura => "Government Polytechnic, Madhepura",
            Self::GpRaghopurSupaul => "Government Polytechnic, Raghopur, Supaul",
            Self::KnsgpSamastipur => "Kameshwar Narayan Singh Government Polytechnic, Samastipur",
            Self::BknsgpGopalganj => "Braj Kishor Narayan Singh Government Polytechnic, Gopalganj",
            Self::GpMunger => "Government Polytechnic, Munger",
            Self::GpSheikhpura => "Government Polytechnic, Sheikhpura",
            Self::GpJamui => "Government Polytechnic, Jamui",
            Self::GpBanka => "Government Polytechnic, Banka",
            Self::GpTekariGaya => "Government Polytechnic, Tekari, Gaya",
            Self::GpKaimur => "Government Polytechnic, Kaimur",
            Self::GpBuxar => "Government Polytechnic, Buxar",
            Self::GpSitamarhi => "Government Polytechnic, Sitamarhi",
            Self::GpWestChamparan => "Government Polytechnic, West Champaran",
            Self::GpKishanganj => "Government Polytechnic, Kishanganj",
            Self::GpAraria => "Government Polytechnic, Araria",
            Self::GpNawada => "Government Polytechnic, Nawada",
            Self::GpSiwan => "Government Polytechnic, Siwan",
            Self::GpArwal => "Government Polytechnic, Arwal",
            Self::GpAurangabad => "Government Polytechnic, Aurangabad",
            Self::GpBhojpur => "Government Polytechnic, Bhojpur",
            Self::GpJehanabad => "Government Polytechnic, Jehanabad",
            Self::GpKhagaria => "Government Polytechnic, Khagaria",
            Self::GpBarh => "Government Polytechnic, Barh",
            Self::GpttBhagalpur => "Government Textile Technology Institute, Bhagalpur",
            Self::Unknown => "Unknown College",
        }
    }
}

/// Board codes for every known college, as they appear at roll-number
/// positions 2..5.
pub(crate) const STANDARD_COLLEGE_CODES: &[(CollegeName, u32)] = &[
    (CollegeName::GpBarauni, 111),
    (CollegeName::GpBhagalpur, 112),
    (CollegeName::GpChhapra, 113),
    (CollegeName::GpDarbhanga, 114),
    (CollegeName::GpGaya, 115),
    (CollegeName::GpGopalganj, 116),
    (CollegeName::GpMuzaffarpur, 117),
    (CollegeName::GpPatna7, 118),
    (CollegeName::GpPurnea, 119),
    (CollegeName::GpSaharsa, 120),
    (CollegeName::NgpPatna13, 121),
    (CollegeName::GwpMuzaffarpur, 122),
    (CollegeName::GwpPatna, 123),
    (CollegeName::GpKatihar, 124),
    (CollegeName::GpVaishali, 125),
    (CollegeName::GpLakhisarai, 126),
    (CollegeName::GpDehrionsone, 127),
    (CollegeName::GpAsthawanNalanda, 128),
    (CollegeName::GpSheohar, 129),
    (CollegeName::GpMotihari, 130),
    (CollegeName::GpMadhubani, 131),
    (CollegeName::BkpiSitamarhi, 132),
    (CollegeName::GpMadhepura, 133),
    (CollegeName::GpRaghopurSupaul, 134),
    (CollegeName::KnsgpSamastipur, 135),
    (CollegeName::BknsgpGopalganj, 136),
    (CollegeName::GpMunger, 137),
    (CollegeName::GpSheikhpura, 138),
    (CollegeName::GpJamui, 139),
    (CollegeName::GpBanka, 140),
    (CollegeName::GpTekariGaya, 141),
    (CollegeName::GpKaimur, 142),
    (CollegeName::GpBuxar, 143),
    (CollegeName::GpSitamarhi, 144),
    (CollegeName::GpWestChamparan, 145),
    (CollegeName::GpKishanganj, 146),
    (CollegeName::GpAraria, 147),
    (CollegeName::GpNawada, 148),
    (CollegeName::GpSiwan, 149),
    (CollegeName::GpArwal, 150),
    (CollegeName::GpAurangabad, 151),
    (CollegeName::GpBhojpur, 152),
    (CollegeName::GpJehanabad, 153),
    (CollegeName::GpKhagaria, 154),
    (CollegeName::GpBarh, 155),
    (CollegeName::GpttBhagalpur, 156),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_college_has_a_standard_code() {
        for college in CollegeName::all() {
            assert!(
                STANDARD_COLLEGE_CODES.iter().any(|(c, _)| c == college),
                "{college} has no code"
            );
        }
        assert_eq!(STANDARD_COLLEGE_CODES.len(), CollegeName::all().len());
    }

    #[test]
    fn labels_and_full_names() {
        assert_eq!(CollegeName::NgpPatna13.to_string(), "NGP Patna-13");
        assert_eq!(
            CollegeName::NgpPatna13.full_name(),
            "New Government Polytechnic, Patna - 13"
        );
        assert_eq!(CollegeName::Unknown.to_string(), "Unknown College");
        assert_eq!(
            "GP Raghopur, Supaul".parse::<CollegeName>().unwrap(),
            CollegeName::GpRaghopurSupaul
        );
    }
}
