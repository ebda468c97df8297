//! SQLite-Implementierung des BenutzerRepository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::BenutzerRepository;
use crate::sqlite::pool::SqliteDb;

impl BenutzerRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO benutzer (id, email, password_hash, created_at, is_active)
             VALUES (?, ?, ?, ?, 1)",
        )
        .bind(id.to_string())
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits registriert", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id,
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            created_at: now,
            is_active: true,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at, is_active
             FROM benutzer WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_zu_benutzer(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at, is_active
             FROM benutzer WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_zu_benutzer(&r)).transpose()
    }
}

fn row_zu_benutzer(row: &SqliteRow) -> DbResult<BenutzerRecord> {
    let id_str: String = row.try_get("id")?;
    let created_str: String = row.try_get("created_at")?;

    Ok(BenutzerRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DbError::intern(format!("Ungueltige Benutzer-ID: {e}")))?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| DbError::intern(format!("Ungueltiger Zeitstempel: {e}")))?
            .with_timezone(&Utc),
        is_active: row.try_get::<i64, _>("is_active")? != 0,
    })
}
