use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, ColumnTrait, QueryFilter, ActiveModelTrait, Set, ConnectionTrait, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn upsert_password<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, crate::errors::ModelError> {
    if password_hash.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    if let Some(existing) = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await? {
        let mut am: ActiveModel = existing.into();
        am.password_hash = Set(password_hash);
        am.password_algorithm = Set(algorithm.to_string());
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        let am = ActiveModel {
            user_id: Set(user_id),
            password_hash: Set(password_hash),
            password_algorithm: Set(algorithm.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(db).await?)
    }
}

pub async fn find_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Option<Model>, crate::errors::ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}
