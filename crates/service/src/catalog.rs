//! Read side of services and ratings, plus operator service creation.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::errors::ServiceError;
use crate::validation::{required_text, FieldErrors};

pub const SERVICE_NAME_MAX: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceView {
    pub id: i32,
    pub name: String,
    pub picture: Option<String>,
    pub price: i32,
    pub description: String,
}

impl From<models::service::Model> for ServiceView {
    fn from(m: models::service::Model) -> Self {
        Self { id: m.id, name: m.name, picture: m.picture, price: m.price, description: m.description }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    pub id: i32,
    pub name: String,
    pub value: f64,
}

impl From<models::rating::Model> for RatingView {
    fn from(m: models::rating::Model) -> Self {
        Self { id: m.id, name: m.name, value: m.value }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceInput {
    pub name: String,
    pub price: i32,
    pub description: String,
    pub picture: Option<String>,
}

pub async fn list_services(db: &DatabaseConnection) -> Result<Vec<ServiceView>, ServiceError> {
    let rows = models::service::list(db).await?;
    Ok(rows.into_iter().map(ServiceView::from).collect())
}

pub async fn list_ratings(db: &DatabaseConnection) -> Result<Vec<RatingView>, ServiceError> {
    let rows = models::rating::list(db).await?;
    Ok(rows.into_iter().map(RatingView::from).collect())
}

pub async fn create_service(db: &DatabaseConnection, input: ServiceInput) -> Result<ServiceView, ServiceError> {
    let mut errors = FieldErrors::new();
    let name = required_text(&mut errors, "name", Some(&input.name), Some(SERVICE_NAME_MAX));
    let description = required_text(&mut errors, "description", Some(&input.description), None);
    if input.price < 0 {
        errors.add("price", "Ensure this value is greater than or equal to 0.");
    }
    let (Some(name), Some(description)) = (name, description) else {
        return Err(ServiceError::Validation(errors));
    };
    errors.into_result()?;

    let created = models::service::create(db, &name, input.price, &description, input.picture.as_deref()).await?;
    info!(service_id = created.id, name = %created.name, "service_created");
    Ok(created.into())
}
