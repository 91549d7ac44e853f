use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Every value a rating may take: 1.0 to 5.0 in half steps.
pub const RATING_SCALE: [f64; 9] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

pub fn is_valid_value(value: f64) -> bool {
    RATING_SCALE.iter().any(|v| (v - value).abs() < f64::EPSILON)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, value: f64) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if !is_valid_value(value) {
        return Err(errors::ModelError::Validation(format!("{} is not on the rating scale", value)));
    }
    let am = ActiveModel {
        name: Set(name.to_string()),
        value: Set(value),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
