//! Join rows linking an order to the services it covers.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{order, service};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    Service,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity).from(Column::OrderId).to(order::Column::Id).into(),
            Relation::Service => Entity::belongs_to(service::Entity).from(Column::ServiceId).to(service::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
