use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::future::Future;

use crate::models::Child;
use crate::services::StoreError;

/// Lookup of child records by their `_id`
pub trait ChildRepository {
    fn get_children_by_ids(
        &self,
        ids: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Child>, StoreError>> + Send;
}

/// Child records stored as JSON documents in the `children` table
#[derive(Clone)]
pub struct SqliteChildRepository {
    pool: SqlitePool,
}

impl SqliteChildRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_or_update(&self, child: &Child) -> Result<(), StoreError> {
        let id = child
            .id()
            .ok_or_else(|| StoreError::InvalidRecord("child has no _id".to_string()))?;

        let query = r#"
            INSERT INTO children (id, content)
            VALUES (?, ?)
            ON CONFLICT (id)
            DO UPDATE SET content = excluded.content
        "#;

        sqlx::query(query)
            .bind(&id)
            .bind(child.to_json_string())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Saved child {}", id);

        Ok(())
    }

    pub async fn size(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM children")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }
}

impl ChildRepository for SqliteChildRepository {
    async fn get_children_by_ids(&self, ids: Vec<String>) -> Result<Vec<Child>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT content FROM children WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in &ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");

        let rows = builder.build().fetch_all(&self.pool).await?;

        let children = rows
            .iter()
            .map(|row| -> Result<Child, StoreError> {
                let content: String = row.try_get("content")?;
                Ok(Child::from_json(&content)?)
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        tracing::debug!("Resolved {} of {} children", children.len(), ids.len());

        Ok(children)
    }
}
