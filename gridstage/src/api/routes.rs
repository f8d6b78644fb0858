use axum::{
    routing::get,
    Router,
    extract::{State, Query},
    Json
};
use std::sync::Arc;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::services::staging::StagingService;
use super::models::{ApiResponse, FreeParams, SelectParams, StageParams};
use crate::services::AppError;

pub async fn select_objects(
    Query(params): Query<SelectParams>,
    State(service): State<Arc<StagingService>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    if params.download {
        // bulk object download was never built; fail loudly instead of
        // returning a placeholder
        return Err(AppError(common::Error::NotImplemented(
            "bulk object download is not available".to_string(),
        )));
    }

    let query = params.to_query()?;
    let objects = service.select_objects(&query).await?;

    Ok(Json(ApiResponse::success(json!({
        "total": objects.len(),
        "objects": objects,
    }))))
}

pub async fn select_metadata(
    Query(params): Query<SelectParams>,
    State(service): State<Arc<StagingService>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let query = params.to_query()?;
    let records = service.select_metadata(&query).await?;

    Ok(Json(ApiResponse::success(json!({
        "total": records.len(),
        "records": records,
    }))))
}

pub async fn list_zones(
    State(service): State<Arc<StagingService>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let zones = service.list_staging_zones().await?;
    Ok(Json(ApiResponse::success(json!({ "zones": zones }))))
}

pub async fn stage_objects(
    Query(params): Query<StageParams>,
    State(service): State<Arc<StagingService>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let query = params.to_query()?;
    let report = service.stage_objects(&query, &params.endpoint).await?;
    Ok(Json(ApiResponse::success(json!(report))))
}

pub async fn free_collection(
    Query(params): Query<FreeParams>,
    State(service): State<Arc<StagingService>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    service
        .free_staged_collection(&params.remote_coll_id)
        .await?;
    Ok(Json(ApiResponse::success(json!({ "freed": params.remote_coll_id }))))
}

// Define all API routes
pub fn routes(service: Arc<StagingService>) -> Router {
    Router::new()
        .route("/api/objects", get(select_objects))
        .route("/api/objects/meta", get(select_metadata))
        .route("/api/zones", get(list_zones))
        .route("/api/stage", get(stage_objects))
        .route("/api/free", get(free_collection))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
