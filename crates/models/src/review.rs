use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{rating, service, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub service_id: i32,
    pub rating_id: i32,
    pub date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Service,
    Rating,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Service => Entity::belongs_to(service::Entity).from(Column::ServiceId).to(service::Column::Id).into(),
            Relation::Rating => Entity::belongs_to(rating::Entity).from(Column::RatingId).to(rating::Column::Id).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rating.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a review dated `date`. Foreign keys are checked by the caller.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    service_id: i32,
    rating_id: i32,
    date: NaiveDate,
    description: Option<String>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        user_id: Set(user_id),
        service_id: Set(service_id),
        rating_id: Set(rating_id),
        date: Set(date),
        description: Set(description),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
