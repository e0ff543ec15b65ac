use actix_web::{HttpRequest, HttpResponse, Responder, web};
use placemap::MapService;
use placemap::place::CategoryCode;
use placemap::place_store::AnyPlaceStore;
use placemap::viewport::{Bounds, Viewport, parse_edge, parse_zoom};
use qstring::QString;
use serde::Serialize;
use serde_json::json;

pub type MapServiceData = web::Data<MapService<AnyPlaceStore>>;

/// Reads `zoom` and the four bounds edges from a query string.
///
/// The map viewer sends edges as `bounds[north]=..`; plain `north=..` is
/// accepted too. Bounds only apply when all four edges are present.
pub fn viewport_from_query(query_string: &str) -> Viewport {
    let qs = QString::from(query_string);

    let edge = |name: &str| {
        let bracketed = format!("bounds[{}]", name);
        parse_edge(qs.get(&bracketed).or_else(|| qs.get(name)))
    };

    let bounds = Bounds::from_edges(edge("north"), edge("south"), edge("east"), edge("west"));

    Viewport::new(bounds, parse_zoom(qs.get("zoom")))
}

#[actix_web::get("/places")]
#[tracing::instrument(name = "map_places", skip(req, map_service), fields(zoom))]
pub async fn map_places(req: HttpRequest, map_service: MapServiceData) -> impl Responder {
    let viewport = viewport_from_query(req.query_string());
    tracing::Span::current().record("zoom", viewport.zoom);

    match map_service.features_for_viewport(&viewport).await {
        Ok(features) => HttpResponse::Ok()
            .insert_header(("Cache-Control", "max-age=60, public"))
            .json(features.as_ref()),
        Err(err) => {
            tracing::error!("Error fetching map places: {}", err);
            let message = format!("Database error occurred: {}", err);
            HttpResponse::InternalServerError()
                .insert_header(("Cache-Control", "no-cache"))
                .json(json!({ "error": message }))
        }
    }
}

#[derive(Serialize)]
struct CategoryLegendEntry {
    code: &'static str,
    label: &'static str,
    color: &'static str,
}

#[actix_web::get("/categories")]
pub async fn categories() -> impl Responder {
    let legend = CategoryCode::ALL
        .iter()
        .map(|code| CategoryLegendEntry {
            code: code.letter(),
            label: code.label(),
            color: code.marker_color(),
        })
        .collect::<Vec<CategoryLegendEntry>>();

    HttpResponse::Ok()
        .insert_header(("Cache-Control", "max-age=3600, public"))
        .json(legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use placemap::place::PlaceRecord;
    use placemap::place_store::InMemoryPlaceStore;
    use placemap::result_cache::{DEFAULT_TTL, MapResultCache};

    fn record(id: i64, name: &str, category: &str, latitude: &str, longitude: &str) -> PlaceRecord {
        PlaceRecord {
            id,
            place_id: format!("P-{}", id),
            name: name.to_string(),
            address: Some("Jalan Jenderal Sudirman".to_string()),
            district: Some("Sukajadi".to_string()),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            category: category.to_string(),
            business_status: Some("OPERATIONAL".to_string()),
            description: None,
            is_current: true,
        }
    }

    fn service(records: Vec<PlaceRecord>) -> MapServiceData {
        web::Data::new(MapService::new(
            AnyPlaceStore::InMemory(InMemoryPlaceStore::new(records)),
            Some(MapResultCache::new(DEFAULT_TTL, 64)),
        ))
    }

    #[::core::prelude::v1::test]
    fn query_parsing() {
        let viewport = viewport_from_query(
            "zoom=14&bounds[north]=0.6&bounds[south]=0.4&bounds[east]=101.5&bounds[west]=101.3",
        );
        assert_eq!(viewport.zoom, 14);
        assert_eq!(
            viewport.bounds,
            Some(Bounds {
                north: 0.6,
                south: 0.4,
                east: 101.5,
                west: 101.3,
            })
        );

        let flat = viewport_from_query("north=0.6&south=0.4&east=101.5&west=101.3");
        assert_eq!(flat.zoom, 13);
        assert_eq!(flat.bounds, viewport.bounds);

        let encoded = viewport_from_query(
            "zoom=14&bounds%5Bnorth%5D=0.6&bounds%5Bsouth%5D=0.4&bounds%5Beast%5D=101.5&bounds%5Bwest%5D=101.3",
        );
        assert_eq!(encoded.bounds, viewport.bounds);

        let partial = viewport_from_query("zoom=12&bounds[north]=0.6&bounds[south]=0.4");
        assert_eq!(partial.bounds, None);
        assert_eq!(partial.zoom, 12);

        assert_eq!(viewport_from_query("zoom=banyak").zoom, 0);
        assert_eq!(viewport_from_query("zoom=12abc").zoom, 12);
        assert_eq!(viewport_from_query("").zoom, 13);
    }

    #[actix_web::test]
    async fn returns_bare_array_of_points_and_clusters() {
        let map_service = service(vec![
            record(1, "Kantor Camat Sukajadi", "O", "0.5200", "101.4400"),
            record(2, "Puskesmas Sukajadi", "Q", "0.5227", "101.4400"),
            record(3, "SMA Negeri 1", "P", "0.6000", "101.5000"),
        ]);
        let app = App::new().app_data(map_service).service(map_places);
        let app = test::init_service(app).await;

        let req = test::TestRequest::get().uri("/places?zoom=12").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        let features = body.as_array().unwrap();
        assert_eq!(features.len(), 2);

        assert_eq!(features[0]["isCluster"], true);
        assert_eq!(features[0]["count"], 2);
        assert_eq!(features[0]["primaryCategory"], "O");

        assert_eq!(features[1]["id"], 3);
        assert_eq!(features[1]["name"], "SMA Negeri 1");
        assert_eq!(features[1]["latitude"], 0.6);
        assert!(features[1].get("isCluster").is_none());
    }

    #[actix_web::test]
    async fn bounds_outside_all_places_give_empty_array() {
        let map_service = service(vec![record(1, "Kantor Camat", "O", "0.52", "101.44")]);
        let app = App::new().app_data(map_service).service(map_places);
        let app = test::init_service(app).await;

        for zoom in [9, 15] {
            let uri = format!(
                "/places?zoom={}&bounds%5Bnorth%5D=-6.1&bounds%5Bsouth%5D=-6.3&bounds%5Beast%5D=106.9&bounds%5Bwest%5D=106.7",
                zoom
            );
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body, json!([]));
        }
    }

    #[actix_web::test]
    async fn unreachable_database_is_a_500() {
        use actix_web::http::StatusCode;
        use diesel_async::pooled_connection::AsyncDieselConnectionManager;
        use placemap::place_store::PostgresPlaceStore;
        use std::sync::Arc;
        use std::time::Duration;

        let manager = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(
            "postgres://placemap@127.0.0.1:1/placemap",
        );
        let pool = bb8::Pool::builder()
            .connection_timeout(Duration::from_millis(250))
            .build_unchecked(manager);

        let map_service = web::Data::new(MapService::new(
            AnyPlaceStore::Postgres(PostgresPlaceStore::new(Arc::new(pool))),
            Some(MapResultCache::new(DEFAULT_TTL, 64)),
        ));

        let app = App::new().app_data(map_service.clone()).service(map_places);
        let app = test::init_service(app).await;

        let req = test::TestRequest::get().uri("/places?zoom=15").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Database error occurred"));
        assert!(map_service.cache().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn category_legend_lists_all_sections() {
        let app = test::init_service(App::new().service(categories)).await;

        let req = test::TestRequest::get().uri("/categories").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let legend = body.as_array().unwrap();

        assert_eq!(legend.len(), 21);
        assert_eq!(legend[14]["code"], "O");
        assert_eq!(legend[14]["color"], "#F44336");
    }
}
