#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, auth::ServerState};
use service::auth::domain::StaffInput;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

pub async fn build_app() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let state = ServerState::new(db, &configs::AuthConfig::default());
    let app = routes::build_router(state.clone(), tower_http::cors::CorsLayer::very_permissive());
    Ok(TestApp { app, state })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let resp = self.app.clone().oneshot(req).await?;
        read(resp).await
    }

    pub async fn raw(&self, req: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.app.clone().oneshot(req).await?)
    }

    pub async fn register(&self, username: &str, password: &str) -> anyhow::Result<StatusCode> {
        let body = json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
            "first_name": "Test",
        });
        let (status, _) = self.send(post_json("/api/register/", &body, None)).await?;
        Ok(status)
    }

    /// Register (if needed) and log in; returns `(user id, token)`.
    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<(i64, String)> {
        let (status, body) = self
            .send(post_json("/api/login/", &json!({"username": username, "password": password}), None))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {status} {body}");
        let id = body["user"]["id"].as_i64().unwrap_or_default();
        let token = body["token"].as_str().unwrap_or_default().to_string();
        Ok((id, token))
    }

    pub async fn user_token(&self, username: &str) -> anyhow::Result<(i64, String)> {
        self.register(username, "Abcdef12").await?;
        self.login(username, "Abcdef12").await
    }

    pub async fn staff_token(&self, username: &str) -> anyhow::Result<(i64, String)> {
        self.state
            .auth
            .create_staff(StaffInput {
                username: username.into(),
                email: format!("{}@staff.example.com", username),
                password: "Manager99".into(),
                ..Default::default()
            })
            .await?;
        self.login(username, "Manager99").await
    }

    pub async fn seed_service(&self, name: &str, price: i32) -> anyhow::Result<i32> {
        let created = service::catalog::create_service(
            &self.state.db,
            service::catalog::ServiceInput {
                name: name.into(),
                price,
                description: format!("{} description", name),
                picture: None,
            },
        )
        .await?;
        Ok(created.id)
    }
}

pub async fn read(resp: Response<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let status = resp.status();
    let bytes = resp.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

pub fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    with_body("POST", uri, body, token)
}

pub fn with_body(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Token {}", t));
    }
    b.body(Body::from(body.to_string())).expect("request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Token {}", t));
    }
    b.body(Body::empty()).expect("request")
}
