//! Opaque API tokens; one row per user at most.
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into() }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}

/// Return the user's existing token, or store `fresh_key` as a new one.
/// Losing a concurrent insert for the same user yields the winner's row.
pub async fn get_or_create(db: &DatabaseConnection, user_id: i32, fresh_key: String) -> Result<(Model, bool), errors::ModelError> {
    if let Some(existing) = find_by_user(db, user_id).await? {
        return Ok((existing, false));
    }
    if fresh_key.len() != 40 { return Err(errors::ModelError::Validation("token key must be 40 chars".into())); }
    let am = ActiveModel {
        key: Set(fresh_key),
        user_id: Set(user_id),
        created_at: Set(Utc::now().into()),
    };
    match am.insert(db).await.map_err(errors::ModelError::from) {
        Ok(created) => Ok((created, true)),
        Err(errors::ModelError::Conflict(msg)) => match find_by_user(db, user_id).await? {
            Some(existing) => Ok((existing, false)),
            None => Err(errors::ModelError::Conflict(msg)),
        },
        Err(e) => Err(e),
    }
}

/// Resolve a token key to its owner.
pub async fn find_user(db: &DatabaseConnection, key: &str) -> Result<Option<user::Model>, errors::ModelError> {
    let found = Entity::find_by_id(key.to_string())
        .find_also_related(user::Entity)
        .one(db)
        .await?;
    Ok(found.and_then(|(_, u)| u))
}

/// Delete the user's token; returns whether one existed.
pub async fn delete_for_user(db: &DatabaseConnection, user_id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many().filter(Column::UserId.eq(user_id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}
