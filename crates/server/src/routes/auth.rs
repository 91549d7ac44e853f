use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use common::types::MessageBody;
use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::errors::{ApiError, NOT_PROVIDED};

#[derive(Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl From<&configs::AuthConfig> for CookieSettings {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { name: cfg.cookie_name.clone(), secure: cfg.cookie_secure }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub cookie: CookieSettings,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth_cfg: &configs::AuthConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let auth = Arc::new(AuthService::new(repo, AuthConfig::default()));
        Self { db, auth, cookie: CookieSettings::from(auth_cfg) }
    }
}

/// Authenticated caller, inserted by [`require_token`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[utoipa::path(post, path = "/api/register/", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered", body = crate::openapi::MessageDoc), (status = 400, description = "Field errors")))]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let Json(input) = payload?;
    state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(MessageBody::new("Registration successful."))))
}

#[utoipa::path(post, path = "/api/login/", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponseDoc), (status = 400, description = "Field errors")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    let cookie = Cookie::build((state.cookie.name.clone(), session.token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie.secure)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

#[utoipa::path(post, path = "/api/logout/", tag = "auth", security(("token" = [])),
    responses((status = 200, description = "Logged out", body = crate::openapi::MessageDoc), (status = 401, description = "Unauthenticated")))]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageBody>), ApiError> {
    state.auth.logout(user.id).await?;
    let mut removal = Cookie::build((state.cookie.name.clone(), "")).path("/").build();
    removal.make_removal();
    let jar = jar.add(removal);
    Ok((jar, Json(MessageBody::new("Successfully logged out."))))
}

#[utoipa::path(get, path = "/api/profile/", tag = "auth", security(("token" = [])),
    responses((status = 200, description = "Caller", body = crate::openapi::UserDoc), (status = 401, description = "Unauthenticated")))]
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<AuthUser> {
    Json(user)
}

/// Token from `Authorization: Token <key>` / `Bearer <key>`, else from the auth cookie.
/// `Some("")` means a scheme was sent without a key.
fn presented_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let authz = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    if let Some(h) = authz {
        let mut parts = h.split_whitespace();
        if let Some(scheme) = parts.next() {
            if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
                return Some(parts.next().unwrap_or_default().to_string());
            }
        }
    }
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the caller's token and attach [`CurrentUser`]; 401 otherwise.
pub async fn require_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = presented_token(req.headers(), &state.cookie.name) else {
        warn!(path = %path, "missing Authorization header and auth cookie");
        return Err(ApiError::Unauthorized(NOT_PROVIDED));
    };
    if token.is_empty() {
        return Err(ApiError::Unauthorized(crate::errors::INVALID_TOKEN));
    }
    let user = state.auth.authenticate(&token).await.map_err(|e| {
        warn!(path = %path, code = e.code(), "token rejected");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Must run inside [`require_token`]; 403 unless the caller is staff.
pub async fn require_staff(req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(CurrentUser(user)) = req.extensions().get::<CurrentUser>() else {
        return Err(ApiError::Unauthorized(NOT_PROVIDED));
    };
    if !user.is_staff {
        info!(user_id = user.id, path = %req.uri().path(), "staff route denied");
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}
