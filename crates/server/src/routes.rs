pub mod auth;
pub mod catalog;
pub mod reviews;
pub mod orders;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use self::auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the full application router: public, token-protected and staff routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/register/", post(auth::register))
        .route("/api/login/", post(auth::login))
        .route("/api/services/", get(catalog::list_services))
        .route("/api/reviews/", get(reviews::list_reviews))
        .route("/api/ratings/", get(catalog::list_ratings));

    // Token-protected routes
    let protected = Router::new()
        .route("/api/logout/", post(auth::logout))
        .route("/api/profile/", get(auth::profile))
        .route("/api/reviews/create/", post(reviews::create_review))
        .route("/api/orders/create/", post(orders::create_order))
        .route("/api/orders/", get(orders::my_orders))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    // Staff routes; require_staff runs after require_token
    let staff = Router::new()
        .route("/api/manager/", get(orders::all_orders))
        .route("/api/orders/:order_id/", put(orders::update_status).patch(orders::update_status))
        .route_layer(middleware::from_fn(auth::require_staff))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    // Compose
    public
        .merge(protected)
        .merge(staff)
        .fallback(not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx surface at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
