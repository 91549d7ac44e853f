#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::user::{self, NewUser};

/// Fresh migrated database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seed_user(db: &DatabaseConnection, username: &str, first: &str, last: &str) -> anyhow::Result<user::Model> {
    let new = NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    };
    Ok(user::create(db, new).await?)
}

pub async fn seed_service(db: &DatabaseConnection, name: &str, price: i32) -> anyhow::Result<models::service::Model> {
    Ok(models::service::create(db, name, price, &format!("{} description", name), None).await?)
}
