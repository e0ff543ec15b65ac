//! Greedy proximity clustering of map points.
//!
//! Single pass, O(n²) in the candidate count. Candidate lists are capped
//! upstream at a few hundred rows, which is what keeps this affordable.

use crate::distance::haversine_km;
use crate::map_features::{MapFeature, MapPoint, PlaceCluster};
use crate::place::PlaceCategory;

/// At and above this zoom every point is drawn on its own.
pub const CLUSTERING_MAX_ZOOM: i32 = 18;

/// (zoom at or below, merge radius in km)
const PROXIMITY_THRESHOLDS_KM: [(i32, f64); 7] = [
    (6, 10.0),
    (8, 5.0),
    (10, 2.0),
    (12, 1.0),
    (14, 0.5),
    (16, 0.2),
    (18, 0.1),
];

const FALLBACK_THRESHOLD_KM: f64 = 0.1;

pub fn proximity_threshold_km(zoom: i32) -> f64 {
    PROXIMITY_THRESHOLDS_KM
        .iter()
        .find(|(max_zoom, _)| zoom <= *max_zoom)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(FALLBACK_THRESHOLD_KM)
}

/// Groups points lying within the zoom's merge radius of a seed point.
///
/// Seeds are taken in input order, so the caller's ordering decides which
/// point anchors each cluster. Groups of one come back as plain points.
pub fn cluster_points(points: Vec<MapPoint>, zoom: i32) -> Vec<MapFeature> {
    if zoom >= CLUSTERING_MAX_ZOOM {
        return points.into_iter().map(MapFeature::Point).collect();
    }

    let threshold = proximity_threshold_km(zoom);
    let mut processed = vec![false; points.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for i in 0..points.len() {
        if processed[i] {
            continue;
        }

        processed[i] = true;
        let seed = &points[i];
        let mut group = vec![i];

        // everything before i is already in a group
        for j in (i + 1)..points.len() {
            if processed[j] {
                continue;
            }

            let other = &points[j];
            let distance = haversine_km(
                seed.latitude,
                seed.longitude,
                other.latitude,
                other.longitude,
            );

            if distance <= threshold {
                processed[j] = true;
                group.push(j);
            }
        }

        groups.push(group);
    }

    let mut slots: Vec<Option<MapPoint>> = points.into_iter().map(Some).collect();

    groups
        .into_iter()
        .map(|group| {
            let seed_index = group[0];
            let members: Vec<MapPoint> = group
                .iter()
                .filter_map(|index| slots[*index].take())
                .collect();

            build_feature(seed_index, members)
        })
        .collect()
}

fn build_feature(seed_index: usize, mut members: Vec<MapPoint>) -> MapFeature {
    if members.len() == 1 {
        return MapFeature::Point(members.remove(0));
    }

    let mut categories: Vec<PlaceCategory> = Vec::new();
    for member in &members {
        if !categories.contains(&member.category) {
            categories.push(member.category.clone());
        }
    }

    let seed = &members[0];

    MapFeature::Cluster(PlaceCluster {
        id: format!("cluster-{}", seed_index),
        is_cluster: true,
        count: members.len(),
        categories,
        primary_category: seed.category.clone(),
        latitude: seed.latitude,
        longitude: seed.longitude,
        member_points: members,
    })
}
