use crate::place::{BusinessStatus, PlaceCategory};
use serde::Serialize;

/// A place as drawn on the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub id: i64,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: PlaceCategory,
    pub business_status: Option<BusinessStatus>,
    pub description: Option<String>,
}

/// Two or more nearby places merged into one marker.
///
/// The marker sits on the seed point, not on the group's centroid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCluster {
    pub id: String,
    pub is_cluster: bool,
    pub count: usize,
    pub categories: Vec<PlaceCategory>,
    pub primary_category: PlaceCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub member_points: Vec<MapPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MapFeature {
    Cluster(PlaceCluster),
    Point(MapPoint),
}

impl MapFeature {
    /// Every place this feature stands for.
    pub fn points(&self) -> &[MapPoint] {
        match self {
            MapFeature::Cluster(cluster) => &cluster.member_points,
            MapFeature::Point(point) => std::slice::from_ref(point),
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, MapFeature::Cluster(_))
    }
}
