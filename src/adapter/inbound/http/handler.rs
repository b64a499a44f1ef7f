//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::info;

use super::dto::{
    HealthResponse, IncrementRequest, LapsAddedResponse, LapsRequest, SetDistanceRequest,
    StatsResponse, ViewResponse, WindowRequest, WindowResponse,
};
use super::error::ApiError;
use super::router::AppState;
use crate::domain::error::ValidationError;
use crate::domain::race::validate_laps;
use crate::domain::timestamp::Timestamp;

type ApiResult<T> = Result<Json<T>, ApiError>;

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let record = state.tracker.record().await?;
    Ok(Json(StatsResponse::from(&record)))
}

pub async fn get_window(State(state): State<AppState>) -> ApiResult<WindowResponse> {
    let window = state.tracker.window().await?;
    Ok(Json(WindowResponse::from(&window)))
}

pub async fn post_window(
    State(state): State<AppState>,
    body: Result<Json<WindowRequest>, JsonRejection>,
) -> ApiResult<WindowResponse> {
    let Json(body) = body?;
    let race_start = Timestamp::parse_field("race_start", body.race_start.as_deref())?;
    let race_end = Timestamp::parse_field("race_end", body.race_end.as_deref())?;
    let window = state.tracker.set_window(race_start, race_end).await?;
    Ok(Json(WindowResponse::from(&window)))
}

pub async fn put_distance(
    State(state): State<AppState>,
    body: Result<Json<SetDistanceRequest>, JsonRejection>,
) -> ApiResult<StatsResponse> {
    let Json(body) = body?;
    let total_km = required("total_km", body.total_km)?;
    let record = state.tracker.set_total_km(total_km).await?;
    Ok(Json(StatsResponse::from(&record)))
}

pub async fn increment_distance(
    State(state): State<AppState>,
    body: Result<Json<IncrementRequest>, JsonRejection>,
) -> ApiResult<StatsResponse> {
    let Json(body) = body?;
    let delta_km = required("delta_km", body.delta_km)?;
    let record = state.tracker.increment_km(delta_km).await?;
    Ok(Json(StatsResponse::from(&record)))
}

pub async fn add_laps(
    State(state): State<AppState>,
    body: Result<Json<LapsRequest>, JsonRejection>,
) -> ApiResult<LapsAddedResponse> {
    let Json(body) = body?;
    let laps = validate_laps(required("laps", body.laps)?, false)?;
    let record = state.tracker.add_laps(laps).await?;
    info!(added_laps = laps, "Laps added");
    Ok(Json(LapsAddedResponse {
        stats: StatsResponse::from(&record),
        added_laps: laps,
    }))
}

pub async fn put_laps(
    State(state): State<AppState>,
    body: Result<Json<LapsRequest>, JsonRejection>,
) -> ApiResult<StatsResponse> {
    let Json(body) = body?;
    let laps = validate_laps(required("laps", body.laps)?, true)?;
    let record = state.tracker.set_laps(laps).await?;
    Ok(Json(StatsResponse::from(&record)))
}

pub async fn reset(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let record = state.tracker.reset().await?;
    Ok(Json(StatsResponse::from(&record)))
}

pub async fn get_view(State(state): State<AppState>) -> ApiResult<ViewResponse> {
    let snapshot = state.tracker.snapshot(Utc::now()).await?;
    Ok(Json(ViewResponse::from(&snapshot)))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        store: state.tracker.store_name().to_string(),
    })
}
