use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

/// Lifecycle of an order. Only staff move an order past `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Wire value, e.g. `in_progress`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl Default for OrderStatus {
    fn default() -> Self { OrderStatus::Pending }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub total_cost: i32,
    pub created_at: DateTimeWithTimeZone,
    pub status: OrderStatus,
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

/// Insert a pending order stamped with the current time.
pub async fn create<C: ConnectionTrait>(db: &C, user_id: i32, address: &str, total_cost: i32) -> Result<Model, errors::ModelError> {
    if address.trim().is_empty() { return Err(errors::ModelError::Validation("address required".into())); }
    let am = ActiveModel {
        user_id: Set(user_id),
        address: Set(address.to_string()),
        total_cost: Set(total_cost),
        created_at: Set(Utc::now().into()),
        status: Set(OrderStatus::Pending),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Link `order_id` to each of `service_ids`; ids are expected to exist and be distinct.
pub async fn attach_services<C: ConnectionTrait>(db: &C, order_id: i32, service_ids: &[i32]) -> Result<(), errors::ModelError> {
    if service_ids.is_empty() {
        return Ok(());
    }
    for chunk in service_ids.chunks(1000) {
        let rows = chunk.iter().map(|sid| crate::order_service::ActiveModel {
            order_id: Set(order_id),
            service_id: Set(*sid),
        });
        crate::order_service::Entity::insert_many(rows).exec_without_returning(db).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::OrderStatus;

    #[test]
    fn status_parse_matches_wire_values() {
        for s in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("Pending"), None);
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::InProgress.label(), "In progress");
    }
}
