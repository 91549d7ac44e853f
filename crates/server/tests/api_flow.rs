mod support;

use axum::http::{header, StatusCode};
use serde_json::json;

use support::{build_app, get, post_json};

#[tokio::test]
async fn test_register_login_profile_flow() -> anyhow::Result<()> {
    let t = build_app().await?;

    let body = json!({"username": "bob", "email": "b@x.com", "password": "Abcdef12", "first_name": "Bob"});
    let (status, resp) = t.send(post_json("/api/register/", &body, None)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(resp["message"].is_string());

    let resp = t.raw(post_json("/api/login/", &json!({"username": "bob", "password": "Abcdef12"}), None)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="), "cookie: {cookie}");
    assert!(cookie.contains("HttpOnly"));
    let (_, login) = support::read(resp).await?;
    let token = login["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 40);
    assert_eq!(login["user"]["username"], "bob");
    assert!(login["user"].get("is_active").is_none());

    let (status, me) = t.send(get("/api/profile/", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "bob");
    assert_eq!(me["email"], "b@x.com");
    assert_eq!(me["first_name"], "Bob");
    assert_eq!(me["is_staff"], false);

    // second login reuses the token
    let (again, _) = t.login("bob", "Abcdef12").await?;
    assert_eq!(again, login["user"]["id"].as_i64().unwrap());
    let (_, token2) = t.login("bob", "Abcdef12").await?;
    assert_eq!(token2, token);
    Ok(())
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_password() -> anyhow::Result<()> {
    let t = build_app().await?;
    assert_eq!(t.register("bob", "Abcdef12").await?, StatusCode::CREATED);

    let body = json!({"username": "bob", "email": "bob@example.com", "password": "Abcdef12", "first_name": "B"});
    let (status, errors) = t.send(post_json("/api/register/", &body, None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["username"][0], "A user with that username already exists.");
    assert_eq!(errors["email"][0], "A user with that email already exists.");

    let body = json!({"username": "amy", "email": "amy@x.com", "password": "abcdefgh", "first_name": "Amy"});
    let (status, errors) = t.send(post_json("/api/register/", &body, None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["password"].as_array().map(Vec::len), Some(2));

    let (status, errors) = t.send(post_json("/api/register/", &json!({}), None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["username", "email", "password", "first_name"] {
        assert_eq!(errors[field][0], "This field is required.", "{field}");
    }
    Ok(())
}

#[tokio::test]
async fn test_login_errors() -> anyhow::Result<()> {
    let t = build_app().await?;
    t.register("bob", "Abcdef12").await?;

    let (status, wrong) = t.send(post_json("/api/login/", &json!({"username": "bob", "password": "Nope1234"}), None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, unknown) = t.send(post_json("/api/login/", &json!({"username": "ghost", "password": "Abcdef12"}), None)).await?;
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["non_field_errors"][0], "Unable to log in with provided credentials.");

    let bob = models::user::find_by_username(&t.state.db, "bob").await?.unwrap();
    models::user::set_active(&t.state.db, bob.id, false).await?;
    let (status, disabled) = t.send(post_json("/api/login/", &json!({"username": "bob", "password": "Abcdef12"}), None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(disabled["non_field_errors"][0], "User account is disabled.");

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/login/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, body) = t.send(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_auth_required_and_logout() -> anyhow::Result<()> {
    let t = build_app().await?;

    let (status, body) = t.send(get("/api/profile/", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication credentials were not provided.");

    let (status, body) = t.send(get("/api/profile/", Some("0000000000000000000000000000000000000000"))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token.");

    let (id, token) = t.user_token("bob").await?;

    // cookie is accepted in place of the header
    let req = axum::http::Request::builder()
        .uri("/api/profile/")
        .header(header::COOKIE, format!("auth_token={}", token))
        .body(axum::body::Body::empty())?;
    let (status, me) = t.send(req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id);

    // Bearer scheme works too
    let req = axum::http::Request::builder()
        .uri("/api/profile/")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(axum::body::Body::empty())?;
    assert_eq!(t.send(req).await?.0, StatusCode::OK);

    let resp = t.raw(post_json("/api/logout/", &json!({}), Some(&token))).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cleared.starts_with("auth_token="), "cookie: {cleared}");

    let (status, body) = t.send(get("/api/profile/", Some(&token))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token.");

    // a disabled owner makes an otherwise valid token fail
    let (id, token) = t.user_token("eve").await?;
    models::user::set_active(&t.state.db, id as i32, false).await?;
    let (status, body) = t.send(get("/api/profile/", Some(&token))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "User inactive or deleted.");
    Ok(())
}

#[tokio::test]
async fn test_catalog_and_reviews() -> anyhow::Result<()> {
    let t = build_app().await?;
    let cleaning = t.seed_service("Cleaning", 500).await?;
    let repair = t.seed_service("Repair", 900).await?;

    let (status, services) = t.send(get("/api/services/", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(services.as_array().map(Vec::len), Some(2));
    assert_eq!(services[0]["id"], cleaning);
    assert_eq!(services[0]["picture"], serde_json::Value::Null);
    assert_eq!(services[1]["price"], 900);

    let (_, ratings) = t.send(get("/api/ratings/", None)).await?;
    assert_eq!(ratings.as_array().map(Vec::len), Some(9));
    assert_eq!(ratings[8]["value"], 5.0);

    let review = json!({"service": repair, "rating": 9, "description": "Fast", "user": 999, "date": "2001-01-01"});
    let (status, _) = t.send(post_json("/api/reviews/create/", &review, None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (uid, token) = t.user_token("bob").await?;
    let (status, created) = t.send(post_json("/api/reviews/create/", &review, Some(&token))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user"], uid);
    assert_eq!(created["user_username"], "bob");
    assert_eq!(created["service_name"], "Repair");
    assert_eq!(created["rating_value"], 5.0);
    assert_ne!(created["date"], "2001-01-01");

    let second = json!({"service": cleaning, "rating": 1});
    let (status, newest) = t.send(post_json("/api/reviews/create/", &second, Some(&token))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(newest["description"], serde_json::Value::Null);

    let (status, errors) = t.send(post_json("/api/reviews/create/", &json!({"service": 4242, "rating": 1}), Some(&token))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["service"][0], "Invalid pk \"4242\" - object does not exist.");

    let (_, list) = t.send(get("/api/reviews/", None)).await?;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    assert_eq!(list[0]["id"], newest["id"]);
    assert_eq!(list[1]["id"], created["id"]);
    Ok(())
}

#[tokio::test]
async fn test_health_docs_and_unknown_route() -> anyhow::Result<()> {
    let t = build_app().await?;
    let (status, body) = t.send(get("/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = t.send(get("/api-docs/openapi.json", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/orders/create/"].is_object());

    let (status, body) = t.send(get("/api/nothing-here/", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
    Ok(())
}
