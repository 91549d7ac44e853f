use crate::db::connect_in_memory;
use crate::{order, order_service, service, user};
use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

#[tokio::test]
async fn test_order_rollback_discards_links() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, user::NewUser { username: "henry".into(), email: "h@example.com".into(), ..Default::default() }).await?;
    let s = service::create(&db, "Delivery", 500, "Fast", None).await?;

    let txn = db.begin().await?;
    let o = order::create(&txn, u.id, "2 Side St", 500).await?;
    order::attach_services(&txn, o.id, &[s.id]).await?;
    txn.rollback().await?;

    assert_eq!(order::Entity::find().count(&db).await?, 0);
    assert_eq!(order_service::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_order_commit_persists_links() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, user::NewUser { username: "iris".into(), email: "i@example.com".into(), ..Default::default() }).await?;
    let s = service::create(&db, "Setup", 700, "Install", None).await?;

    let txn = db.begin().await?;
    let o = order::create(&txn, u.id, "3 High St", 700).await?;
    order::attach_services(&txn, o.id, &[s.id]).await?;
    txn.commit().await?;

    assert!(order::Entity::find_by_id(o.id).one(&db).await?.is_some());
    assert_eq!(order_service::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_join_row_rejects_unknown_service() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, user::NewUser { username: "jack".into(), email: "j@example.com".into(), ..Default::default() }).await?;
    let o = order::create(&db, u.id, "4 Low St", 10).await?;
    assert!(order::attach_services(&db, o.id, &[9999]).await.is_err());
    Ok(())
}
