//! HTTP API for partners and their coverage areas.

mod error;
mod extract;

pub use error::ApiError;
use extract::{ApiJson, ApiQuery};

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use geo::Point;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::coverage::{check_point, coverage_exterior, normalize, ExteriorRings};
use crate::models::Partner;
use crate::store::PartnerStore;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn PartnerStore>,
}

/// Build the router over a partner store
pub fn router(store: Arc<dyn PartnerStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(health_handler))
        .route("/partners", get(list_handler).post(create_handler))
        .route(
            "/partners/{id}",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/partners/{id}/coverage", get(coverage_handler))
        .route("/partners/{id}/coverage/contains", get(contains_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    partners: usize,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        partners: state.store.count(),
    })
}

#[derive(Deserialize)]
struct ListParams {
    skip: Option<usize>,
    limit: Option<usize>,
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Json<Vec<Partner>> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    Json(state.store.list(skip, limit))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Partner>, ApiError> {
    Ok(Json(state.store.find_by_id(&id)?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(partner): ApiJson<Partner>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    normalize(&partner.coverage_area).map_err(ApiError::invalid_input)?;

    let partner = state.store.insert(partner)?;
    info!("Created partner {}", partner.id);
    Ok((StatusCode::CREATED, Json(partner)))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(partner): ApiJson<Partner>,
) -> Result<Json<Partner>, ApiError> {
    normalize(&partner.coverage_area).map_err(ApiError::invalid_input)?;

    let partner = state.store.update(&id, partner)?;
    info!("Updated partner {}", id);
    Ok(Json(partner))
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.delete(&id)?;
    info!("Deleted partner {}", id);
    Ok(Json(DeleteResponse { success: true }))
}

/// Exterior ring(s) of a partner's coverage area
async fn coverage_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ExteriorRings>, ApiError> {
    let partner = state.store.find_by_id(&id)?;
    let rings =
        coverage_exterior(&partner.coverage_area).map_err(|e| ApiError::invalid_stored(&id, e))?;
    Ok(Json(rings))
}

#[derive(Deserialize)]
struct ContainsParams {
    lon: f64,
    lat: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainsResponse {
    partner_id: String,
    contains: bool,
}

/// Check whether a point is served by a partner
async fn contains_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ContainsParams>,
) -> Result<Json<ContainsResponse>, ApiError> {
    let partner = state.store.find_by_id(&id)?;
    let inside = check_point(&partner.coverage_area, Point::new(params.lon, params.lat))
        .map_err(|e| ApiError::invalid_stored(&id, e))?;

    Ok(Json(ContainsResponse {
        partner_id: partner.id,
        contains: inside,
    }))
}
