//! Zoom-dependent visibility policy.
//!
//! Zoomed out views only carry administratively significant places; each
//! band further in admits more of the registry.

use crate::place::{BusinessStatus, CategoryCode, PlaceCategory};

const GOVERNMENT: [CategoryCode; 1] = [CategoryCode::O];

const PUBLIC_SERVICES: [CategoryCode; 3] = [CategoryCode::O, CategoryCode::P, CategoryCode::Q];

const MAJOR_SERVICES: [CategoryCode; 7] = [
    CategoryCode::O,
    CategoryCode::P,
    CategoryCode::Q,
    CategoryCode::J,
    CategoryCode::K,
    CategoryCode::L,
    CategoryCode::R,
];

// household activities and other services
const MINOR_SERVICES: [CategoryCode; 2] = [CategoryCode::T, CategoryCode::S];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailBand {
    /// z < 8
    Region,
    /// 8 <= z < 10
    City,
    /// 10 <= z < 12
    District,
    /// 12 <= z < 14
    Neighbourhood,
    /// z >= 14
    Street,
}

impl DetailBand {
    pub fn for_zoom(zoom: i32) -> DetailBand {
        match zoom {
            z if z < 8 => DetailBand::Region,
            z if z < 10 => DetailBand::City,
            z if z < 12 => DetailBand::District,
            z if z < 14 => DetailBand::Neighbourhood,
            _ => DetailBand::Street,
        }
    }

    pub fn admits(&self, category: &PlaceCategory, status: Option<&BusinessStatus>) -> bool {
        match self {
            DetailBand::Region => category.is_any_of(&GOVERNMENT),
            DetailBand::City => {
                category.is_any_of(&PUBLIC_SERVICES)
                    || matches!(status, Some(BusinessStatus::Operational))
            }
            DetailBand::District => category.is_any_of(&MAJOR_SERVICES),
            DetailBand::Neighbourhood => !category.is_any_of(&MINOR_SERVICES) || status.is_some(),
            DetailBand::Street => true,
        }
    }
}

pub fn is_visible_at_zoom(
    zoom: i32,
    category: &PlaceCategory,
    status: Option<&BusinessStatus>,
) -> bool {
    DetailBand::for_zoom(zoom).admits(category, status)
}
