use sqlx::{Row, SqlitePool};
use validator::Validate;

use crate::database::{EnquiryColumn, PrimitiveType, ENQUIRY_TABLE};
use crate::models::base::{as_flag, coerce_string};
use crate::models::{Enquiry, ModelError, NewEnquiry};
use crate::services::StoreError;

/// Persistence for enquiries in the `enquiries` table
///
/// Rows are written from [`Enquiry::values`] and read back through
/// [`Enquiry::from_cursor`], so the column schema is the only mapping.
#[derive(Clone)]
pub struct EnquiryRepository {
    pool: SqlitePool,
}

impl EnquiryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn upsert_sql() -> String {
        let columns: Vec<&str> = EnquiryColumn::column_names().collect();
        format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
            ENQUIRY_TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        )
    }

    /// Insert or replace an enquiry, keyed by its unique identifier
    ///
    /// Enquiries without an enquirer name are rejected. The `criteria` column
    /// is written from [`Enquiry::criteria`], so top-level search fields of
    /// older records are folded into it.
    pub async fn create_or_update(&self, enquiry: &Enquiry) -> Result<(), StoreError> {
        let unique_id = enquiry
            .unique_id()
            .ok_or_else(|| StoreError::InvalidRecord("enquiry has no unique identifier".to_string()))?;

        if !enquiry.is_valid() {
            return Err(StoreError::InvalidRecord(format!(
                "enquiry {} has no enquirer name",
                unique_id
            )));
        }

        let sql = Self::upsert_sql();
        let values = enquiry.values();
        let mut query = sqlx::query(&sql);
        for column in EnquiryColumn::ALL {
            let value = values.get(column.column_name());
            query = match (column, column.primitive_type()) {
                // Legacy records keep their search fields at the top level
                (EnquiryColumn::Criteria, _) => query.bind(Some(enquiry.criteria())),
                (_, PrimitiveType::Boolean) => query.bind(i64::from(as_flag(value))),
                (_, PrimitiveType::Text) => query.bind(value.map(coerce_string)),
            };
        }
        query.execute(&self.pool).await?;

        tracing::debug!("Saved enquiry {}", unique_id);

        Ok(())
    }

    /// Validate a request, build the enquiry and persist it
    pub async fn create(&self, request: NewEnquiry) -> Result<Enquiry, StoreError> {
        request.validate()?;

        let enquiry = Enquiry::with_fields(
            &request.created_by,
            &request.enquirer_name,
            &request.criteria,
        );
        self.create_or_update(&enquiry).await?;

        Ok(enquiry)
    }

    pub async fn get(&self, unique_id: &str) -> Result<Option<Enquiry>, StoreError> {
        let query = r#"
            SELECT *
            FROM enquiries
            WHERE unique_identifier = ?
        "#;

        let row = sqlx::query(query)
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Enquiry::from_cursor).transpose()?)
    }

    pub async fn all(&self) -> Result<Vec<Enquiry>, StoreError> {
        let query = r#"
            SELECT *
            FROM enquiries
            ORDER BY rowid
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let enquiries = rows
            .iter()
            .map(Enquiry::from_cursor)
            .collect::<Result<Vec<_>, ModelError>>()?;

        tracing::debug!("Loaded {} enquiries", enquiries.len());

        Ok(enquiries)
    }

    /// Enquiries changed locally since the last sync
    pub async fn to_be_synced(&self) -> Result<Vec<Enquiry>, StoreError> {
        let query = r#"
            SELECT *
            FROM enquiries
            WHERE synced = 0
            ORDER BY rowid
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let enquiries = rows
            .iter()
            .map(Enquiry::from_cursor)
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok(enquiries)
    }

    pub async fn size(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM enquiries")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_sql_lists_every_column() {
        let sql = EnquiryRepository::upsert_sql();
        for name in EnquiryColumn::column_names() {
            assert!(sql.contains(name), "{} missing from {}", name, sql);
        }
        assert_eq!(sql.matches('?').count(), EnquiryColumn::ALL.len());
    }
}
