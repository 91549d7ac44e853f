//! Bounded `IN (...)` lookups.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Ids bound per query; well under the SQLite and Postgres parameter limits.
pub(crate) const IN_CHUNK: usize = 500;

/// Fetch every row of `E` whose `column` is one of `ids`, one query per chunk.
pub(crate) async fn find_in<E, C>(db: &C, column: E::Column, ids: &[i32]) -> Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut rows = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(IN_CHUNK) {
        rows.extend(E::find().filter(column.is_in(chunk.iter().copied())).all(db).await?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_service};
    use models::service;

    #[tokio::test]
    async fn lookups_span_chunks() -> anyhow::Result<()> {
        let db = get_db().await?;
        let first = seed_service(&db, "First", 10).await?;
        let last = seed_service(&db, "Last", 20).await?;

        let mut ids: Vec<i32> = (1000..1000 + IN_CHUNK as i32 * 2).collect();
        ids.insert(0, first.id);
        ids.push(last.id);
        let mut found: Vec<i32> = find_in::<service::Entity, _>(&db, service::Column::Id, &ids)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        found.sort_unstable();
        assert_eq!(found, vec![first.id, last.id]);

        assert!(find_in::<service::Entity, _>(&db, service::Column::Id, &[]).await?.is_empty());
        Ok(())
    }
}
