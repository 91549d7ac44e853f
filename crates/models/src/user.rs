use sea_orm::{entity::prelude::*, Set, ConnectionTrait, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
    Token,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(crate::user_credentials::Entity).into(),
            Relation::Token => Entity::has_one(crate::auth_token::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// "first last" when both are set, else the first name, else the username.
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            _ => self.username.clone(),
        }
    }
}

/// Fields of a user row that callers choose.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, errors::ModelError> {
    if new.username.trim().is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if !new.email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    let am = ActiveModel {
        username: Set(new.username),
        email: Set(new.email),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        is_staff: Set(new.is_staff),
        is_superuser: Set(new.is_superuser),
        is_active: Set(true),
        date_joined: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn set_active(db: &DatabaseConnection, id: i32, active: bool) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::Validation("user not found".into()))?
        .into();
    am.is_active = Set(active);
    Ok(am.update(db).await?)
}
