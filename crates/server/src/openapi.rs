use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub email: String, pub password: String, pub first_name: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub user: UserDoc, pub token: String }

#[derive(ToSchema)]
pub struct ServiceDoc { pub id: i32, pub name: String, pub picture: Option<String>, pub price: i32, pub description: String }

#[derive(ToSchema)]
pub struct RatingDoc { pub id: i32, pub name: String, pub value: f64 }

#[derive(ToSchema)]
pub struct ReviewCreateRequest { pub service: i32, pub rating: i32, pub description: Option<String> }

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub id: i32,
    pub user: i32,
    pub user_first_name: String,
    pub user_username: String,
    pub service: i32,
    pub service_name: String,
    pub rating: i32,
    pub rating_value: f64,
    #[schema(value_type = String, format = Date)]
    pub date: String,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct OrderCreateRequest {
    /// Service ids; unknown ids are ignored.
    pub services: Vec<i32>,
    pub address: String,
    pub total_cost: i32,
}

#[derive(ToSchema)]
pub struct OrderStatusRequest {
    /// pending | confirmed | in_progress | completed | cancelled
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct ServiceDetailDoc { pub id: i32, pub name: String, pub price: i32, pub description: String }

#[derive(ToSchema)]
pub struct OrderDoc {
    pub id: i32,
    pub user: i32,
    pub user_name: String,
    pub user_full_name: String,
    pub user_email: String,
    pub services_details: Vec<ServiceDetailDoc>,
    pub address: String,
    pub total_cost: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    pub status: String,
    pub status_display: String,
}

/// `Authorization: Token <key>`
pub struct TokenAuth;

impl Modify for TokenAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::profile,
        crate::routes::catalog::list_services,
        crate::routes::catalog::list_ratings,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::create_review,
        crate::routes::orders::create_order,
        crate::routes::orders::my_orders,
        crate::routes::orders::all_orders,
        crate::routes::orders::update_status,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            RegisterRequest,
            LoginRequest,
            UserDoc,
            LoginResponseDoc,
            ServiceDoc,
            RatingDoc,
            ReviewCreateRequest,
            ReviewDoc,
            OrderCreateRequest,
            OrderStatusRequest,
            ServiceDetailDoc,
            OrderDoc,
        )
    ),
    modifiers(&TokenAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "reviews"),
        (name = "orders"),
        (name = "manager")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/register/", "/api/login/", "/api/manager/", "/api/orders/{order_id}/"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("token"));
    }
}
