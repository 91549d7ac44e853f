use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use models::{rating, review, service, user};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::batch::find_in;
use crate::errors::ServiceError;
use crate::validation::{required, FieldErrors};

/// Client-writable review fields. Author and date are never taken from input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewCreateInput {
    pub service: Option<i32>,
    pub rating: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewView {
    pub id: i32,
    pub user: i32,
    pub user_first_name: String,
    pub user_username: String,
    pub service: i32,
    pub service_name: String,
    pub rating: i32,
    pub rating_value: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

pub fn invalid_pk(id: i32) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

fn project(r: review::Model, u: &user::Model, s: &service::Model, rt: &rating::Model) -> ReviewView {
    ReviewView {
        id: r.id,
        user: u.id,
        user_first_name: u.first_name.clone(),
        user_username: u.username.clone(),
        service: s.id,
        service_name: s.name.clone(),
        rating: rt.id,
        rating_value: rt.value,
        date: r.date,
        description: r.description,
    }
}

fn ids<T>(rows: &[review::Model], key: impl Fn(&review::Model) -> T) -> Vec<T>
where
    T: std::hash::Hash + Eq + Copy,
{
    let set: HashSet<T> = rows.iter().map(key).collect();
    set.into_iter().collect()
}

async fn project_all(db: &DatabaseConnection, rows: Vec<review::Model>) -> Result<Vec<ReviewView>, ServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let users: HashMap<i32, user::Model> = find_in::<user::Entity, _>(db, user::Column::Id, &ids(&rows, |r| r.user_id))
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let services: HashMap<i32, service::Model> = find_in::<service::Entity, _>(db, service::Column::Id, &ids(&rows, |r| r.service_id))
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let ratings: HashMap<i32, rating::Model> = find_in::<rating::Entity, _>(db, rating::Column::Id, &ids(&rows, |r| r.rating_id))
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    rows.into_iter()
        .map(|r| {
            let id = r.id;
            match (users.get(&r.user_id), services.get(&r.service_id), ratings.get(&r.rating_id)) {
                (Some(u), Some(s), Some(rt)) => Ok(project(r, u, s, rt)),
                _ => Err(ServiceError::Db(format!("review {} references a missing row", id))),
            }
        })
        .collect()
}

/// All reviews, newest first.
pub async fn list_reviews(db: &DatabaseConnection) -> Result<Vec<ReviewView>, ServiceError> {
    let rows = review::Entity::find()
        .order_by_desc(review::Column::Date)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

/// Create a review by `user_id`, dated today.
#[instrument(skip(db, input))]
pub async fn create_review(db: &DatabaseConnection, user_id: i32, input: ReviewCreateInput) -> Result<ReviewView, ServiceError> {
    let mut errors = FieldErrors::new();
    let service_id = required(&mut errors, "service", input.service);
    let rating_id = required(&mut errors, "rating", input.rating);

    let svc = match service_id {
        Some(id) => service::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    if let (Some(id), None) = (service_id, &svc) {
        errors.add("service", invalid_pk(id));
    }
    let rt = match rating_id {
        Some(id) => rating::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    if let (Some(id), None) = (rating_id, &rt) {
        errors.add("rating", invalid_pk(id));
    }
    let (Some(svc), Some(rt)) = (svc, rt) else {
        return Err(ServiceError::Validation(errors));
    };
    let owner = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let description = input.description.map(|d| d.trim().to_string());
    let today = Utc::now().date_naive();
    let created = review::create(db, owner.id, svc.id, rt.id, today, description).await?;
    info!(review_id = created.id, user_id, service_id = svc.id, rating = rt.value, "review_created");
    Ok(project(created, &owner, &svc, &rt))
}
