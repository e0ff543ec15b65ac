use crate::level_of_detail::DetailBand;
use crate::map_features::MapPoint;
use crate::place::PlaceRecord;
use crate::viewport::Viewport;
use itertools::Itertools;
use tracing::warn;

/// How many places a viewport at this zoom may carry.
///
/// Zoomed out past 10 nothing is drawn at all.
pub fn row_limit_for_zoom(zoom: i32) -> usize {
    match zoom {
        z if z < 10 => 0,
        z if z <= 12 => 200,
        z if z <= 17 => 400,
        _ => 800,
    }
}

/// Turns the store's current records into the ordered, capped candidate
/// list for one viewport. Ties on category and name are broken by id, so
/// the result does not depend on the order the store returned rows in.
///
/// Records that are blank or whose coordinates do not parse to finite
/// numbers are logged and skipped rather than failing the viewport.
pub fn select_candidates(records: Vec<PlaceRecord>, viewport: &Viewport) -> Vec<MapPoint> {
    let limit = row_limit_for_zoom(viewport.zoom);

    if limit == 0 {
        return Vec::new();
    }

    visible_points(records, viewport)
        .sorted_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        })
        .take(limit)
        .collect()
}

/// Bounding box and level-of-detail filtering, without ordering or the cap.
pub fn visible_points<'a>(
    records: Vec<PlaceRecord>,
    viewport: &'a Viewport,
) -> impl Iterator<Item = MapPoint> + 'a {
    let band = DetailBand::for_zoom(viewport.zoom);

    records
        .into_iter()
        .filter(|record| record.is_current)
        .filter_map(project)
        .filter(move |point| viewport.contains(point.latitude, point.longitude))
        .filter(move |point| band.admits(&point.category, point.business_status.as_ref()))
}

fn project(record: PlaceRecord) -> Option<MapPoint> {
    if record.name.trim().is_empty() {
        warn!(id = record.id, place_id = %record.place_id, "skipping place without a name");
        return None;
    }

    let Some((latitude, longitude)) = record.coordinates() else {
        warn!(
            id = record.id,
            place_id = %record.place_id,
            latitude = %record.latitude,
            longitude = %record.longitude,
            "skipping place with malformed coordinates"
        );
        return None;
    };

    let category = record.category();
    let business_status = record.business_status();

    Some(MapPoint {
        id: record.id,
        place_id: record.place_id,
        name: record.name,
        address: record.address,
        latitude,
        longitude,
        category,
        business_status,
        description: record.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::cluster_points;
    use crate::level_of_detail::is_visible_at_zoom;
    use crate::viewport::Bounds;

    fn record(id: i64, name: &str, category: &str, latitude: &str, longitude: &str) -> PlaceRecord {
        PlaceRecord {
            id,
            place_id: format!("P-{}", id),
            name: name.to_string(),
            address: None,
            district: Some("Tampan".to_string()),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            category: category.to_string(),
            business_status: None,
            description: None,
            is_current: true,
        }
    }

    #[test]
    fn row_limits() {
        assert_eq!(row_limit_for_zoom(-1), 0);
        assert_eq!(row_limit_for_zoom(9), 0);
        assert_eq!(row_limit_for_zoom(10), 200);
        assert_eq!(row_limit_for_zoom(12), 200);
        assert_eq!(row_limit_for_zoom(13), 400);
        assert_eq!(row_limit_for_zoom(17), 400);
        assert_eq!(row_limit_for_zoom(18), 800);
        assert_eq!(row_limit_for_zoom(22), 800);
    }

    #[test]
    fn orders_by_category_then_name() {
        let records = vec![
            record(1, "Warung B", "I", "0.50", "101.44"),
            record(2, "Kantor Camat", "O", "0.51", "101.44"),
            record(3, "Warung A", "I", "0.52", "101.44"),
            record(4, "Apotek", "Q", "0.53", "101.44"),
        ];

        let points = select_candidates(records, &Viewport::new(None, 16));
        let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn same_name_ties_do_not_depend_on_store_order() {
        // two minimarts of the same chain about 0.44 km apart
        let a = record(1, "Indomaret", "G", "0.5000", "101.44");
        let b = record(2, "Indomaret", "G", "0.5040", "101.44");

        let viewport = Viewport::new(None, 12);
        let render = |records: Vec<PlaceRecord>| {
            let features = cluster_points(select_candidates(records, &viewport), viewport.zoom);
            serde_json::to_string(&features).unwrap()
        };

        let forward = render(vec![a.clone(), b.clone()]);
        let reversed = render(vec![b, a]);

        assert_eq!(forward, reversed);

        let features: serde_json::Value = serde_json::from_str(&forward).unwrap();
        assert_eq!(features[0]["count"], 2);
        assert_eq!(features[0]["latitude"], 0.5);
        assert_eq!(features[0]["memberPoints"][0]["id"], 1);
    }

    #[test]
    fn cap_keeps_lowest_ids_among_ties() {
        let records: Vec<PlaceRecord> = (0..250)
            .rev()
            .map(|i| record(i, "Indomaret", "G", "0.5", "101.4"))
            .collect();

        let points = select_candidates(records, &Viewport::new(None, 12));
        let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..200).collect::<Vec<i64>>());
    }

    #[test]
    fn truncates_after_ordering() {
        let records: Vec<PlaceRecord> = (0..450)
            .rev()
            .map(|i| record(i, &format!("Toko {:03}", i), "G", "0.5", "101.4"))
            .collect();

        let points = select_candidates(records, &Viewport::new(None, 13));
        assert_eq!(points.len(), 400);
        assert_eq!(points[0].name, "Toko 000");
        assert_eq!(points[399].name, "Toko 399");
    }

    #[test]
    fn nothing_below_zoom_10() {
        let records = vec![record(1, "Kantor Gubernur", "O", "0.5", "101.4")];
        let points = select_candidates(records, &Viewport::new(None, 9));
        assert!(points.is_empty());
    }

    #[test]
    fn skips_malformed_and_historical_records() {
        let mut old_version = record(4, "Kantor Lama", "O", "0.5", "101.4");
        old_version.is_current = false;

        let records = vec![
            record(1, "Kantor Walikota", "O", "0.5", "101.4"),
            record(2, "Kantor Rusak", "O", "utara", "101.4"),
            record(3, "", "O", "0.5", "101.4"),
            old_version,
            record(5, "Kantor Kosong", "O", "", ""),
        ];

        let points = select_candidates(records, &Viewport::new(None, 15));
        let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn bounds_filter() {
        let bounds = Bounds {
            north: 0.55,
            south: 0.45,
            east: 101.5,
            west: 101.4,
        };

        let records = vec![
            record(1, "Dalam", "O", "0.50", "101.45"),
            record(2, "Utara", "O", "0.60", "101.45"),
            record(3, "Barat", "O", "0.50", "101.30"),
            record(4, "Tepi", "O", "0.55", "101.50"),
        ];

        let points = select_candidates(records, &Viewport::new(Some(bounds), 15));
        let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn every_candidate_satisfies_detail_band() {
        let categories = ["A", "G", "I", "J", "O", "P", "Q", "S", "T", "Kategori R"];
        let statuses = [None, Some("OPERATIONAL"), Some("CLOSED_TEMPORARILY")];

        let mut records = Vec::new();
        let mut id = 0;
        for category in categories {
            for status in statuses {
                id += 1;
                let mut r = record(id, &format!("Tempat {}", id), category, "0.5", "101.4");
                r.business_status = status.map(str::to_string);
                records.push(r);
            }
        }

        for zoom in 10..20 {
            let points = select_candidates(records.clone(), &Viewport::new(None, zoom));
            assert!(!points.is_empty());
            for point in points {
                assert!(is_visible_at_zoom(
                    zoom,
                    &point.category,
                    point.business_status.as_ref()
                ));
            }
        }
    }

    #[test]
    fn government_only_when_zoomed_out() {
        let mut records: Vec<PlaceRecord> = (0..8)
            .map(|i| record(i, &format!("Toko {}", i), "G", "0.5", "101.4"))
            .collect();
        records.push(record(100, "Kantor Gubernur Riau", "O", "0.51", "101.44"));
        records.push(record(101, "Kantor Walikota", "O", "0.53", "101.45"));

        let viewport = Viewport::new(None, 5);
        let mut ids: Vec<i64> = visible_points(records, &viewport).map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![100, 101]);
    }
}
