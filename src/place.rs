// Copyright: Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Removal of the attribution is not allowed, as covered under the AGPL license

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A place row as the registry stores it.
///
/// Coordinates stay as the text the registry keeps them in; they are only
/// parsed when the record is considered for the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: i64,
    #[serde(rename = "placeId")]
    pub place_id: String,
    #[serde(rename = "placeName")]
    pub name: String,
    #[serde(rename = "placeAddress")]
    pub address: Option<String>,
    #[serde(rename = "placeDistrict")]
    pub district: Option<String>,
    #[serde(rename = "placeLatitude")]
    pub latitude: String,
    #[serde(rename = "placeLongitude")]
    pub longitude: String,
    #[serde(rename = "placeCategory")]
    pub category: String,
    #[serde(rename = "placeBusinessStatus")]
    pub business_status: Option<String>,
    pub description: Option<String>,
    #[serde(
        rename = "isCurrent",
        default = "default_is_current",
        deserialize_with = "deserialize_flag"
    )]
    pub is_current: bool,
}

fn default_is_current() -> bool {
    true
}

// the registry exports booleans as 1/0 as often as true/false
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid isCurrent flag: {}",
            other
        ))),
    }
}

impl PlaceRecord {
    pub fn category(&self) -> PlaceCategory {
        PlaceCategory::from(self.category.clone())
    }

    pub fn business_status(&self) -> Option<BusinessStatus> {
        match self.business_status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(status) => Some(BusinessStatus::from(status.to_string())),
        }
    }

    /// Parses the stored coordinate text.
    ///
    /// Returns `None` when either value is blank, unparseable or not finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude.trim().parse::<f64>().ok()?;
        let longitude = self.longitude.trim().parse::<f64>().ok()?;

        if latitude.is_finite() && longitude.is_finite() {
            Some((latitude, longitude))
        } else {
            None
        }
    }
}

/// KBLI sections, the Indonesian standard industrial classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
}

impl CategoryCode {
    pub const ALL: [CategoryCode; 21] = [
        CategoryCode::A,
        CategoryCode::B,
        CategoryCode::C,
        CategoryCode::D,
        CategoryCode::E,
        CategoryCode::F,
        CategoryCode::G,
        CategoryCode::H,
        CategoryCode::I,
        CategoryCode::J,
        CategoryCode::K,
        CategoryCode::L,
        CategoryCode::M,
        CategoryCode::N,
        CategoryCode::O,
        CategoryCode::P,
        CategoryCode::Q,
        CategoryCode::R,
        CategoryCode::S,
        CategoryCode::T,
        CategoryCode::U,
    ];

    pub fn from_letter(letter: char) -> Option<CategoryCode> {
        let index = (letter.to_ascii_uppercase() as u32).checked_sub('A' as u32)?;
        CategoryCode::ALL.get(index as usize).copied()
    }

    pub fn letter(&self) -> &'static str {
        match self {
            CategoryCode::A => "A",
            CategoryCode::B => "B",
            CategoryCode::C => "C",
            CategoryCode::D => "D",
            CategoryCode::E => "E",
            CategoryCode::F => "F",
            CategoryCode::G => "G",
            CategoryCode::H => "H",
            CategoryCode::I => "I",
            CategoryCode::J => "J",
            CategoryCode::K => "K",
            CategoryCode::L => "L",
            CategoryCode::M => "M",
            CategoryCode::N => "N",
            CategoryCode::O => "O",
            CategoryCode::P => "P",
            CategoryCode::Q => "Q",
            CategoryCode::R => "R",
            CategoryCode::S => "S",
            CategoryCode::T => "T",
            CategoryCode::U => "U",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryCode::A => "Pertanian, Kehutanan dan Perikanan",
            CategoryCode::B => "Pertambangan dan Penggalian",
            CategoryCode::C => "Industri Pengolahan",
            CategoryCode::D => "Pengadaan Listrik, Gas, Uap/Air Panas dan Udara Dingin",
            CategoryCode::E => {
                "Treatment Air, Treatment Air Limbah, Treatment dan Pemulihan Material Sampah"
            }
            CategoryCode::F => "Konstruksi",
            CategoryCode::G => {
                "Perdagangan Besar dan Eceran, Reparasi dan Perawatan Mobil dan Sepeda Motor"
            }
            CategoryCode::H => "Pengangkutan dan Pergudangan",
            CategoryCode::I => "Penyediaan Akomodasi dan Penyediaan Makan Minum",
            CategoryCode::J => "Informasi dan Komunikasi",
            CategoryCode::K => "Aktivitas Keuangan dan Asuransi",
            CategoryCode::L => "Real Estat",
            CategoryCode::M => "Aktivitas Profesional, Ilmiah dan Teknis",
            CategoryCode::N => "Aktivitas Penyewaan dan Sewa Guna Usaha",
            CategoryCode::O => "Administrasi Pemerintahan, Pertahanan dan Jaminan Sosial Wajib",
            CategoryCode::P => "Pendidikan",
            CategoryCode::Q => "Aktivitas Kesehatan Manusia dan Aktivitas Sosial",
            CategoryCode::R => "Kesenian, Hiburan dan Rekreasi",
            CategoryCode::S => "Aktivitas Jasa Lainnya",
            CategoryCode::T => "Aktivitas Rumah Tangga sebagai Pemberi Kerja",
            CategoryCode::U => {
                "Aktivitas Badan Internasional dan Badan Ekstra Internasional Lainnya"
            }
        }
    }

    /// Marker colour used by the map viewer.
    pub fn marker_color(&self) -> &'static str {
        match self {
            CategoryCode::A => "#4CAF50",
            CategoryCode::B => "#795548",
            CategoryCode::C => "#FF5722",
            CategoryCode::D => "#FFC107",
            CategoryCode::E => "#2196F3",
            CategoryCode::F => "#9E9E9E",
            CategoryCode::G => "#E91E63",
            CategoryCode::H => "#3F51B5",
            CategoryCode::I => "#9C27B0",
            CategoryCode::J => "#00BCD4",
            CategoryCode::K => "#FFEB3B",
            CategoryCode::L => "#FF9800",
            CategoryCode::M => "#8BC34A",
            CategoryCode::N => "#03A9F4",
            CategoryCode::O => "#F44336",
            CategoryCode::P => "#673AB7",
            CategoryCode::Q => "#4CAF50",
            CategoryCode::R => "#FF9800",
            CategoryCode::S => "#2196F3",
            CategoryCode::T => "#9C27B0",
            CategoryCode::U => "#607D8B",
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// A place category as found in the registry.
///
/// Either a bare section letter (`"O"`) or the long form the registry
/// import uses (`"Kategori O: Administrasi Pemerintahan..."`) resolves to a
/// [`CategoryCode`]. Anything else is carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlaceCategory {
    Kbli(CategoryCode),
    Unrecognised(String),
}

impl PlaceCategory {
    pub fn code(&self) -> Option<CategoryCode> {
        match self {
            PlaceCategory::Kbli(code) => Some(*code),
            PlaceCategory::Unrecognised(_) => None,
        }
    }

    pub fn is_any_of(&self, codes: &[CategoryCode]) -> bool {
        self.code().is_some_and(|code| codes.contains(&code))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlaceCategory::Kbli(code) => code.letter(),
            PlaceCategory::Unrecognised(raw) => raw.as_str(),
        }
    }
}

fn parse_category_code(raw: &str) -> Option<CategoryCode> {
    let trimmed = raw.trim();

    let letter_part = match trimmed.strip_prefix("Kategori ") {
        Some(rest) => rest.split(':').next().unwrap_or_default().trim(),
        None => trimmed,
    };

    let mut chars = letter_part.chars();

    match (chars.next(), chars.next()) {
        (Some(letter), None) => CategoryCode::from_letter(letter),
        _ => None,
    }
}

impl From<String> for PlaceCategory {
    fn from(raw: String) -> Self {
        match parse_category_code(&raw) {
            Some(code) => PlaceCategory::Kbli(code),
            None => PlaceCategory::Unrecognised(raw),
        }
    }
}

impl From<PlaceCategory> for String {
    fn from(category: PlaceCategory) -> Self {
        match category {
            PlaceCategory::Kbli(code) => code.letter().to_string(),
            PlaceCategory::Unrecognised(raw) => raw,
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    Other(String),
}

impl BusinessStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BusinessStatus::Operational => "OPERATIONAL",
            BusinessStatus::ClosedTemporarily => "CLOSED_TEMPORARILY",
            BusinessStatus::ClosedPermanently => "CLOSED_PERMANENTLY",
            BusinessStatus::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for BusinessStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OPERATIONAL" => BusinessStatus::Operational,
            "CLOSED_TEMPORARILY" => BusinessStatus::ClosedTemporarily,
            "CLOSED_PERMANENTLY" => BusinessStatus::ClosedPermanently,
            _ => BusinessStatus::Other(raw),
        }
    }
}

impl From<BusinessStatus> for String {
    fn from(status: BusinessStatus) -> Self {
        match status {
            BusinessStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}
