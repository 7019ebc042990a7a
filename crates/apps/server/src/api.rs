use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog::{ArchiveStore, InMemoryArchive, PhotoRecord};
use compute::{MetricSchema, ReductionKind, PHOTOGRAPHER_SCHEMA};
use foundation::{GeoGrid, PARIS_DEFAULT_CENTER, PARIS_VIEWPORT};
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// The archive is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub archive: Arc<InMemoryArchive>,
    pub schema: MetricSchema,
}

impl AppState {
    pub fn new(archive: InMemoryArchive) -> Self {
        Self {
            archive: Arc::new(archive),
            schema: PHOTOGRAPHER_SCHEMA,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/map/", get(get_map_config))
        .route("/api/all_photographers/", get(list_photographers))
        .route("/api/photographer/:number/", get(get_photographer))
        .route(
            "/api/photographer/:number/analysis/",
            get(get_photographer_analysis),
        )
        .route("/api/map_square/:number/", get(get_map_square))
        .route("/api/photo/:map_square/:number/", get(get_photo))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn archive_failure(context: &str, err: catalog::CatalogError) -> Response {
    error!("{context}: {err}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "archive error").into_response()
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[derive(Debug, Serialize)]
struct MapConfig {
    /// `[[south, west], [north, east]]`
    bounds: [[f64; 2]; 2],
    min_zoom: u8,
    center: [f64; 2],
    cell_width: f64,
    cell_height: f64,
    rows: u32,
    cols: u32,
}

async fn get_map_config() -> Response {
    let grid = GeoGrid::paris();
    let cell = grid.cell_size();
    Json(MapConfig {
        bounds: PARIS_VIEWPORT.bounds().as_corner_array(),
        min_zoom: PARIS_VIEWPORT.min_zoom(),
        center: [PARIS_DEFAULT_CENTER.lat, PARIS_DEFAULT_CENTER.lng],
        cell_width: cell.width(),
        cell_height: cell.height(),
        rows: grid.rows(),
        cols: grid.cols(),
    })
    .into_response()
}

async fn list_photographers(State(state): State<AppState>) -> Response {
    match state.archive.photographers() {
        Ok(records) => Json(records).into_response(),
        Err(err) => archive_failure("photographer listing failed", err),
    }
}

async fn get_photographer(
    State(state): State<AppState>,
    AxumPath(number): AxumPath<u32>,
) -> Response {
    match state.archive.photographer(number) {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => api_error(
            StatusCode::NOT_FOUND,
            format!("photographer {number} is not in the archive"),
        )
        .into_response(),
        Err(err) => archive_failure("photographer lookup failed", err),
    }
}

#[derive(Debug, Serialize)]
struct MetricRow {
    name: &'static str,
    display_name: &'static str,
    kind: ReductionKind,
    /// `null` when the reduction is undefined (no photos, malformed results).
    value: f64,
}

#[derive(Debug, Serialize)]
struct PhotographerAnalysis {
    number: u32,
    photo_count: usize,
    metrics: Vec<MetricRow>,
}

async fn get_photographer_analysis(
    State(state): State<AppState>,
    AxumPath(number): AxumPath<u32>,
) -> Response {
    let record = match state.archive.photographer(number) {
        Ok(Some(record)) => record,
        Ok(None) => {
            return api_error(
                StatusCode::NOT_FOUND,
                format!("photographer {number} is not in the archive"),
            )
            .into_response()
        }
        Err(err) => return archive_failure("photographer lookup failed", err),
    };

    let summary = record.summarize(&state.schema);
    let metrics = summary
        .values()
        .iter()
        .map(|v| MetricRow {
            name: v.metric.name,
            display_name: v.metric.display_name,
            kind: v.metric.kind,
            value: v.value,
        })
        .collect();

    Json(PhotographerAnalysis {
        number,
        photo_count: record.photos.len(),
        metrics,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
struct MapSquarePhotos {
    number: u32,
    photos: Vec<PhotoRecord>,
}

async fn get_map_square(
    State(state): State<AppState>,
    AxumPath(number): AxumPath<u32>,
) -> Response {
    match state.archive.map_square_photos(number) {
        Ok(photos) if photos.is_empty() => api_error(
            StatusCode::NOT_FOUND,
            format!("map square {number} has no photos"),
        )
        .into_response(),
        Ok(photos) => Json(MapSquarePhotos { number, photos }).into_response(),
        Err(err) => archive_failure("map square lookup failed", err),
    }
}

async fn get_photo(
    State(state): State<AppState>,
    AxumPath((map_square, number)): AxumPath<(u32, u32)>,
) -> Response {
    match state.archive.photo(map_square, number) {
        Ok(Some(photo)) => Json(photo).into_response(),
        Ok(None) => api_error(
            StatusCode::NOT_FOUND,
            format!("photo {number} is not filed under map square {map_square}"),
        )
        .into_response(),
        Err(err) => archive_failure("photo lookup failed", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARCHIVE: &str = r#"{
        "photographers": [
            {
                "name": "Eugène Atget",
                "number": 1,
                "map_square": {"number": 77},
                "photos": [
                    {"map_square_number": 77, "number": 3, "analyses": [
                        {"name": "whitespace_percentage", "result": "10"},
                        {"name": "portrait_detection", "result": "True"}
                    ]},
                    {"map_square_number": 77, "number": 1, "analyses": [
                        {"name": "whitespace_percentage", "result": "30"},
                        {"name": "mean_detail", "result": "oops"}
                    ]}
                ]
            },
            {
                "name": "Empty Hands",
                "number": 2,
                "map_square": null,
                "photos": []
            }
        ]
    }"#;

    fn state() -> AppState {
        AppState::new(InMemoryArchive::from_json_str(ARCHIVE).unwrap())
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn router_builds() {
        let _router = router(state());
    }

    #[tokio::test]
    async fn map_config_exposes_fixed_geometry() {
        let resp = get_map_config().await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["bounds"], json!([[48.8030, 2.1330], [48.9608, 2.6193]]));
        assert_eq!(body["min_zoom"], json!(12));
        assert_eq!(body["cell_width"], json!(0.00340325568));
        assert_eq!(body["cell_height"], json!(0.0022358));
    }

    #[tokio::test]
    async fn photographer_found() {
        let resp = get_photographer(State(state()), AxumPath(1)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["name"], json!("Eugène Atget"));
        assert_eq!(body["map_square"]["number"], json!(77));
        assert_eq!(body["photos"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn photographers_are_listed_in_number_order() {
        let resp = list_photographers(State(state())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Eugène Atget", "Empty Hands"]);
    }

    #[tokio::test]
    async fn photo_resolves_by_map_square_and_number() {
        let resp = get_photo(State(state()), AxumPath((77, 3))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["map_square_number"], json!(77));
        assert_eq!(body["number"], json!(3));
        assert_eq!(body["analyses"][0]["result"], json!("10"));
    }

    #[tokio::test]
    async fn photo_outside_its_square_is_404() {
        let resp = get_photo(State(state()), AxumPath((78, 3))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("map square 78"));
    }

    #[tokio::test]
    async fn photographer_missing_is_404() {
        let resp = get_photographer(State(state()), AxumPath(404)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn analysis_rows_follow_schema_order() {
        let resp = get_photographer_analysis(State(state()), AxumPath(1)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["photo_count"], json!(2));
        assert_eq!(
            body["metrics"],
            json!([
                {"name": "whitespace_percentage", "display_name": "Average Whitespace Percentage",
                 "kind": "average", "value": 20.0},
                {"name": "portrait_detection", "display_name": "Percentage of Portraits",
                 "kind": "count", "value": 1.0},
                // "oops" parses to NaN and serializes as null.
                {"name": "mean_detail", "display_name": "Average Mean Detail",
                 "kind": "average", "value": null}
            ])
        );
    }

    #[tokio::test]
    async fn analysis_of_photographer_without_photos_is_null_averages() {
        let resp = get_photographer_analysis(State(state()), AxumPath(2)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["metrics"][0]["value"], Value::Null);
        assert_eq!(body["metrics"][1]["value"], json!(0.0));
    }

    #[tokio::test]
    async fn map_square_lists_photos_by_number() {
        let resp = get_map_square(State(state()), AxumPath(77)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let numbers: Vec<u64> = body["photos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["number"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 3]);

        let resp = get_map_square(State(state()), AxumPath(5)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
