use axum::{extract::State, Json};

use service::catalog::{self, RatingView, ServiceView};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/services/", tag = "catalog",
    responses((status = 200, description = "All services in id order", body = [crate::openapi::ServiceDoc])))]
pub async fn list_services(State(state): State<ServerState>) -> Result<Json<Vec<ServiceView>>, ApiError> {
    Ok(Json(catalog::list_services(&state.db).await?))
}

#[utoipa::path(get, path = "/api/ratings/", tag = "catalog",
    responses((status = 200, description = "The rating scale", body = [crate::openapi::RatingDoc])))]
pub async fn list_ratings(State(state): State<ServerState>) -> Result<Json<Vec<RatingView>>, ApiError> {
    Ok(Json(catalog::list_ratings(&state.db).await?))
}
