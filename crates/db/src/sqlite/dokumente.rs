//! SQLite-Implementierung des DokumentRepository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::DokumentRecord;
use crate::repository::DokumentRepository;
use crate::sqlite::pool::SqliteDb;

impl DokumentRepository for SqliteDb {
    async fn list(&self, domain_id: &str) -> DbResult<Vec<DokumentRecord>> {
        let rows = sqlx::query(
            "SELECT id, domain_id, filename, size, uploaded_at
             FROM dokumente WHERE domain_id = ? ORDER BY uploaded_at DESC",
        )
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_zu_dokument).collect()
    }

    async fn create(&self, dokument: &DokumentRecord) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO dokumente (id, domain_id, filename, size, uploaded_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(dokument.id.to_string())
        .bind(&dokument.domain_id)
        .bind(&dokument.filename)
        .bind(dokument.size)
        .bind(dokument.uploaded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, domain_id: &str, id: Uuid) -> DbResult<Option<DokumentRecord>> {
        let row = sqlx::query(
            "SELECT id, domain_id, filename, size, uploaded_at
             FROM dokumente WHERE id = ? AND domain_id = ?",
        )
        .bind(id.to_string())
        .bind(domain_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_zu_dokument).transpose()
    }

    async fn delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM dokumente WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_zu_dokument(row: &SqliteRow) -> DbResult<DokumentRecord> {
    let id_str: String = row.try_get("id")?;
    let uploaded_str: String = row.try_get("uploaded_at")?;

    Ok(DokumentRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DbError::intern(format!("Ungueltige Dokument-ID: {e}")))?,
        domain_id: row.try_get("domain_id")?,
        filename: row.try_get("filename")?,
        size: row.try_get("size")?,
        uploaded_at: DateTime::parse_from_rfc3339(&uploaded_str)
            .map_err(|e| DbError::intern(format!("Ungueltiger Zeitstempel: {e}")))?
            .with_timezone(&Utc),
    })
}
