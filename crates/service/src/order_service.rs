//! Order placement, listing and the staff status workflow.

use std::collections::HashMap;

use models::{order, order_service as link, service, user, OrderStatus};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::batch::find_in;
use crate::errors::ServiceError;
use crate::validation::{required, required_text, FieldErrors};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderCreateInput {
    pub services: Option<Vec<i32>>,
    pub address: Option<String>,
    pub total_cost: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusInput {
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDetail {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub user: i32,
    pub user_name: String,
    pub user_full_name: String,
    pub user_email: String,
    pub services_details: Vec<ServiceDetail>,
    pub address: String,
    pub total_cost: i32,
    pub created_at: DateTimeWithTimeZone,
    pub status: OrderStatus,
    pub status_display: String,
}

/// Manager listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

fn invalid_choice(value: &str) -> String {
    format!("\"{}\" is not a valid choice.", value)
}

impl OrderFilter {
    /// Build from raw query values; blank values mean "no filter".
    pub fn from_query(status: Option<&str>, search: Option<&str>) -> Result<Self, ServiceError> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                OrderStatus::parse(raw)
                    .ok_or_else(|| ServiceError::Validation(FieldErrors::single("status", invalid_choice(raw))))?,
            ),
            None => None,
        };
        let search = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Ok(Self { status, search })
    }
}

async fn project_all(db: &DatabaseConnection, rows: Vec<order::Model>) -> Result<Vec<OrderView>, ServiceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let order_ids: Vec<i32> = rows.iter().map(|o| o.id).collect();
    let mut user_ids: Vec<i32> = rows.iter().map(|o| o.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<i32, user::Model> = find_in::<user::Entity, _>(db, user::Column::Id, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let links = find_in::<link::Entity, _>(db, link::Column::OrderId, &order_ids).await?;
    let mut service_ids: Vec<i32> = links.iter().map(|l| l.service_id).collect();
    service_ids.sort_unstable();
    service_ids.dedup();
    let services: HashMap<i32, service::Model> = find_in::<service::Entity, _>(db, service::Column::Id, &service_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut per_order: HashMap<i32, Vec<ServiceDetail>> = HashMap::new();
    for l in links {
        if let Some(s) = services.get(&l.service_id) {
            per_order.entry(l.order_id).or_default().push(ServiceDetail {
                id: s.id,
                name: s.name.clone(),
                price: s.price,
                description: s.description.clone(),
            });
        }
    }

    rows.into_iter()
        .map(|o| {
            let u = users
                .get(&o.user_id)
                .ok_or_else(|| ServiceError::Db(format!("order {} references a missing user", o.id)))?;
            let mut services_details = per_order.remove(&o.id).unwrap_or_default();
            services_details.sort_by_key(|d| d.id);
            Ok(OrderView {
                id: o.id,
                user: u.id,
                user_name: u.username.clone(),
                user_full_name: u.full_name(),
                user_email: u.email.clone(),
                services_details,
                address: o.address,
                total_cost: o.total_cost,
                created_at: o.created_at,
                status: o.status,
                status_display: o.status.label().to_string(),
            })
        })
        .collect()
}

async fn project_one(db: &DatabaseConnection, row: order::Model) -> Result<OrderView, ServiceError> {
    project_all(db, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("order"))
}

/// Place an order for `user_id`. Unknown service ids are dropped, duplicates collapse.
#[instrument(skip(db, input))]
pub async fn create_order(db: &DatabaseConnection, user_id: i32, input: OrderCreateInput) -> Result<OrderView, ServiceError> {
    let mut errors = FieldErrors::new();
    let requested = required(&mut errors, "services", input.services);
    let address = required_text(&mut errors, "address", input.address.as_deref(), None);
    let total_cost = required(&mut errors, "total_cost", input.total_cost);
    let (Some(mut requested), Some(address), Some(total_cost)) = (requested, address, total_cost) else {
        return Err(ServiceError::Validation(errors));
    };
    requested.sort_unstable();
    requested.dedup();

    let txn = db.begin().await?;
    let created = order::create(&txn, user_id, &address, total_cost).await?;
    let mut existing: Vec<i32> = find_in::<service::Entity, _>(&txn, service::Column::Id, &requested)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    existing.sort_unstable();
    order::attach_services(&txn, created.id, &existing).await?;
    txn.commit().await?;

    info!(
        order_id = created.id,
        user_id,
        requested = requested.len(),
        attached = existing.len(),
        total_cost,
        "order_created"
    );
    project_one(db, created).await
}

/// The caller's own orders, newest first.
pub async fn list_user_orders(db: &DatabaseConnection, user_id: i32) -> Result<Vec<OrderView>, ServiceError> {
    let rows = order::Entity::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    project_all(db, rows).await
}

/// Every order, newest first, narrowed by `filter`.
pub async fn list_all_orders(db: &DatabaseConnection, filter: &OrderFilter) -> Result<Vec<OrderView>, ServiceError> {
    let mut query = order::Entity::find()
        .join(JoinType::InnerJoin, order::Relation::User.def())
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id);
    if let Some(status) = filter.status {
        query = query.filter(order::Column::Status.eq(status));
    }
    if let Some(term) = &filter.search {
        query = query.filter(
            Condition::any()
                .add(user::Column::Username.contains(term))
                .add(user::Column::Email.contains(term))
                .add(user::Column::FirstName.contains(term))
                .add(user::Column::LastName.contains(term))
                .add(order::Column::Address.contains(term)),
        );
    }
    let rows = query.all(db).await?;
    project_all(db, rows).await
}

/// Apply a staff status change. A missing `status` leaves the order untouched.
#[instrument(skip(db, input))]
pub async fn update_order_status(db: &DatabaseConnection, order_id: i32, input: OrderStatusInput) -> Result<OrderView, ServiceError> {
    let found = order::Entity::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("order"))?;

    let Some(raw) = input.status else {
        return project_one(db, found).await;
    };
    let next = OrderStatus::parse(&raw)
        .ok_or_else(|| ServiceError::Validation(FieldErrors::single("status", invalid_choice(&raw))))?;

    let previous = found.status;
    let mut am: order::ActiveModel = found.into();
    am.status = Set(next);
    let updated = am.update(db).await?;
    info!(order_id, from = previous.as_str(), to = next.as_str(), "order_status_changed");
    project_one(db, updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_service, seed_user};

    fn input(services: Vec<i32>, address: &str, total_cost: i32) -> OrderCreateInput {
        OrderCreateInput { services: Some(services), address: Some(address.into()), total_cost: Some(total_cost) }
    }

    #[tokio::test]
    async fn create_keeps_existing_distinct_services() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "Bob", "Builder").await?;
        let a = seed_service(&db, "Cleaning", 100).await?;
        let b = seed_service(&db, "Repair", 250).await?;

        let view = create_order(&db, bob.id, input(vec![b.id, 404, a.id, b.id], "1 Main St", 7)).await?;
        assert_eq!(view.services_details.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a.id, b.id]);
        assert_eq!(view.total_cost, 7, "total is taken as supplied");
        assert_eq!(view.status, OrderStatus::Pending);
        assert_eq!(view.status_display, "Pending");
        assert_eq!(view.user_full_name, "Bob Builder");
        assert_eq!(view.user_email, "bob@example.com");

        let empty = create_order(&db, bob.id, input(vec![], "2 Main St", 0)).await?;
        assert!(empty.services_details.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_required_fields() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "", "").await?;
        let err = create_order(&db, bob.id, OrderCreateInput { address: Some("   ".into()), ..Default::default() })
            .await
            .unwrap_err();
        let ServiceError::Validation(errors) = err else { panic!("expected validation error") };
        assert_eq!(errors.get("address"), Some(&[crate::validation::BLANK.to_string()][..]));
        assert!(errors.has("services") && errors.has("total_cost"));
        assert!(list_user_orders(&db, bob.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn user_listing_is_scoped_and_newest_first() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "", "").await?;
        let eve = seed_user(&db, "eve", "Eve", "").await?;
        let first = create_order(&db, bob.id, input(vec![], "a", 1)).await?;
        let _theirs = create_order(&db, eve.id, input(vec![], "b", 2)).await?;
        let second = create_order(&db, bob.id, input(vec![], "c", 3)).await?;

        let mine = list_user_orders(&db, bob.id).await?;
        assert_eq!(mine.iter().map(|o| o.id).collect::<Vec<_>>(), vec![second.id, first.id]);
        assert!(mine.iter().all(|o| o.user == bob.id && o.user_full_name == "bob"));
        Ok(())
    }

    #[tokio::test]
    async fn listings_exceed_bind_parameter_limit() -> anyhow::Result<()> {
        // more orders than SQLite accepts as bound parameters in one statement
        const BULK: usize = 33_000;
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "", "").await?;
        let svc = seed_service(&db, "Cleaning", 100).await?;

        let past = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00")?;
        for _ in 0..BULK / 1000 {
            let rows = (0..1000).map(|_| order::ActiveModel {
                user_id: Set(bob.id),
                address: Set("bulk".into()),
                total_cost: Set(1),
                created_at: Set(past),
                status: Set(OrderStatus::Pending),
                ..Default::default()
            });
            order::Entity::insert_many(rows).exec_without_returning(&db).await?;
        }
        let latest = create_order(&db, bob.id, input(vec![svc.id], "latest", 100)).await?;

        let mine = list_user_orders(&db, bob.id).await?;
        assert_eq!(mine.len(), BULK + 1);
        assert_eq!(mine[0].id, latest.id);
        assert_eq!(mine[0].services_details.len(), 1);
        assert!(mine[1..].iter().all(|o| o.services_details.is_empty()));

        let all = list_all_orders(&db, &OrderFilter::default()).await?;
        assert_eq!(all.len(), BULK + 1);
        Ok(())
    }

    #[tokio::test]
    async fn manager_filters_by_status_and_search() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "Robert", "Smith").await?;
        let eve = seed_user(&db, "eve", "Eve", "Jones").await?;
        let o1 = create_order(&db, bob.id, input(vec![], "Baker street", 1)).await?;
        let o2 = create_order(&db, eve.id, input(vec![], "Elm road", 2)).await?;
        update_order_status(&db, o2.id, OrderStatusInput { status: Some("confirmed".into()) }).await?;

        let all = list_all_orders(&db, &OrderFilter::default()).await?;
        assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o2.id, o1.id]);

        let confirmed = list_all_orders(&db, &OrderFilter::from_query(Some("confirmed"), None)?).await?;
        assert_eq!(confirmed.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o2.id]);

        let by_name = list_all_orders(&db, &OrderFilter::from_query(None, Some("Smith"))?).await?;
        assert_eq!(by_name.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o1.id]);
        let by_address = list_all_orders(&db, &OrderFilter::from_query(Some(""), Some("Elm"))?).await?;
        assert_eq!(by_address.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o2.id]);
        let by_email = list_all_orders(&db, &OrderFilter::from_query(None, Some("eve@"))?).await?;
        assert_eq!(by_email.len(), 1);

        assert!(matches!(OrderFilter::from_query(Some("shipped"), None), Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn status_update_paths() -> anyhow::Result<()> {
        let db = get_db().await?;
        let bob = seed_user(&db, "bob", "", "").await?;
        let o = create_order(&db, bob.id, input(vec![], "a", 1)).await?;

        let moved = update_order_status(&db, o.id, OrderStatusInput { status: Some("in_progress".into()) }).await?;
        assert_eq!(moved.status, OrderStatus::InProgress);
        assert_eq!(moved.status_display, "In progress");

        let unchanged = update_order_status(&db, o.id, OrderStatusInput::default()).await?;
        assert_eq!(unchanged.status, OrderStatus::InProgress);

        let err = update_order_status(&db, o.id, OrderStatusInput { status: Some("lost".into()) }).await.unwrap_err();
        let ServiceError::Validation(errors) = err else { panic!("expected validation error") };
        assert_eq!(errors.get("status").unwrap()[0], "\"lost\" is not a valid choice.");

        let missing = update_order_status(&db, 9999, OrderStatusInput::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
