//! Bookable services offered to customers.
use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Relative path of the uploaded image, if any.
    pub picture: Option<String>,
    pub price: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    price: i32,
    description: &str,
    picture: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let name = name.trim();
    if name.is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.chars().count() > 200 { return Err(errors::ModelError::Validation("name too long (<=200)".into())); }
    if description.trim().is_empty() { return Err(errors::ModelError::Validation("description required".into())); }
    let am = ActiveModel {
        name: Set(name.to_string()),
        picture: Set(picture.map(str::to_string).filter(|p| !p.trim().is_empty())),
        price: Set(price),
        description: Set(description.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
