use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Extension, Json};

use service::review_service::{self, ReviewCreateInput, ReviewView};

use crate::errors::ApiError;
use crate::routes::auth::{CurrentUser, ServerState};

#[utoipa::path(get, path = "/api/reviews/", tag = "reviews",
    responses((status = 200, description = "All reviews, newest first", body = [crate::openapi::ReviewDoc])))]
pub async fn list_reviews(State(state): State<ServerState>) -> Result<Json<Vec<ReviewView>>, ApiError> {
    Ok(Json(review_service::list_reviews(&state.db).await?))
}

#[utoipa::path(post, path = "/api/reviews/create/", tag = "reviews", security(("token" = [])),
    request_body = crate::openapi::ReviewCreateRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ReviewDoc),
        (status = 400, description = "Field errors"),
        (status = 401, description = "Unauthenticated")
    ))]
pub async fn create_review(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<ReviewCreateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewView>), ApiError> {
    let Json(input) = payload?;
    let view = review_service::create_review(&state.db, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}
