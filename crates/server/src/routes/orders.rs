use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;

use service::order_service::{self, OrderCreateInput, OrderFilter, OrderStatusInput, OrderView};

use crate::errors::ApiError;
use crate::routes::auth::{CurrentUser, ServerState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManagerQuery {
    /// One of pending, confirmed, in_progress, completed, cancelled.
    pub status: Option<String>,
    /// Substring of username, email, first/last name or address.
    pub search: Option<String>,
}

#[utoipa::path(post, path = "/api/orders/create/", tag = "orders", security(("token" = [])),
    request_body = crate::openapi::OrderCreateRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::OrderDoc),
        (status = 400, description = "Field errors"),
        (status = 401, description = "Unauthenticated")
    ))]
pub async fn create_order(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<OrderCreateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let Json(input) = payload?;
    let view = order_service::create_order(&state.db, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(get, path = "/api/orders/", tag = "orders", security(("token" = [])),
    responses((status = 200, description = "Caller's orders, newest first", body = [crate::openapi::OrderDoc]), (status = 401, description = "Unauthenticated")))]
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(Json(order_service::list_user_orders(&state.db, user.id).await?))
}

#[utoipa::path(get, path = "/api/manager/", tag = "manager", security(("token" = [])), params(ManagerQuery),
    responses(
        (status = 200, description = "All orders, newest first", body = [crate::openapi::OrderDoc]),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Not staff")
    ))]
pub async fn all_orders(
    State(state): State<ServerState>,
    Query(q): Query<ManagerQuery>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let filter = OrderFilter::from_query(q.status.as_deref(), q.search.as_deref())?;
    let orders = order_service::list_all_orders(&state.db, &filter).await?;
    info!(count = orders.len(), status = ?filter.status, search = ?filter.search, "manager listing");
    Ok(Json(orders))
}

#[utoipa::path(put, path = "/api/orders/{order_id}/", tag = "manager", security(("token" = [])),
    params(("order_id" = i32, Path, description = "Order id")),
    request_body = crate::openapi::OrderStatusRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::OrderDoc),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Not staff"),
        (status = 404, description = "Unknown order")
    ))]
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(CurrentUser(staff)): Extension<CurrentUser>,
    order_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<OrderStatusInput>, JsonRejection>,
) -> Result<Json<OrderView>, ApiError> {
    let Path(order_id) = order_id.map_err(|_| ApiError::NotFound)?;
    let Json(input) = payload?;
    let view = order_service::update_order_status(&state.db, order_id, input).await?;
    info!(order_id, staff_id = staff.id, status = view.status.as_str(), "order status updated");
    Ok(Json(view))
}
