//! SQLite-Implementierung des DomainRepository

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::{DbError, DbResult};
use crate::models::{DomainRecord, DomainUpdate};
use crate::repository::DomainRepository;
use crate::sqlite::pool::SqliteDb;

const DOMAIN_SPALTEN: &str =
    "id, alias, description, dialect, secret, schema_name, retriever_top_k, is_active";

impl DomainRepository for SqliteDb {
    async fn list(&self) -> DbResult<Vec<DomainRecord>> {
        let rows = sqlx::query(&format!("SELECT {DOMAIN_SPALTEN} FROM domains ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_zu_domain).collect()
    }

    async fn get(&self, id: &str) -> DbResult<Option<DomainRecord>> {
        let row = sqlx::query(&format!("SELECT {DOMAIN_SPALTEN} FROM domains WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_zu_domain).transpose()
    }

    async fn create(&self, domain: &DomainRecord) -> DbResult<DomainRecord> {
        sqlx::query(
            "INSERT INTO domains (id, alias, description, dialect, secret, schema_name, retriever_top_k, is_active)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&domain.id)
        .bind(&domain.alias)
        .bind(&domain.description)
        .bind(&domain.dialect)
        .bind(&domain.secret)
        .bind(&domain.schema_name)
        .bind(domain.retriever_top_k)
        .bind(domain.is_active as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("Domain '{}' existiert bereits", domain.id))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(domain.clone())
    }

    async fn update(&self, id: &str, update: DomainUpdate) -> DbResult<DomainRecord> {
        if update.ist_leer() {
            return Err(DbError::UngueltigeDaten("Keine Felder zum Aktualisieren".into()));
        }

        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if update.alias.is_some() {
            sets.push("alias = ?");
        }
        if update.description.is_some() {
            sets.push("description = ?");
        }
        if update.dialect.is_some() {
            sets.push("dialect = ?");
        }
        if update.secret.is_some() {
            sets.push("secret = ?");
        }
        if update.schema_name.is_some() {
            sets.push("schema_name = ?");
        }
        if update.retriever_top_k.is_some() {
            sets.push("retriever_top_k = ?");
        }
        if update.is_active.is_some() {
            sets.push("is_active = ?");
        }

        let sql = format!("UPDATE domains SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = update.alias {
            q = q.bind(v);
        }
        if let Some(ref v) = update.description {
            q = q.bind(v);
        }
        if let Some(ref v) = update.dialect {
            q = q.bind(v);
        }
        if let Some(ref v) = update.secret {
            q = q.bind(v);
        }
        if let Some(ref v) = update.schema_name {
            q = q.bind(v);
        }
        if let Some(v) = update.retriever_top_k {
            q = q.bind(v);
        }
        if let Some(v) = update.is_active {
            q = q.bind(v as i64);
        }
        q = q.bind(id);

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Domain {id}")));
        }

        self.get(id)
            .await?
            .ok_or_else(|| DbError::intern("Domain nach Update nicht gefunden"))
    }
}

fn row_zu_domain(row: &SqliteRow) -> DbResult<DomainRecord> {
    Ok(DomainRecord {
        id: row.try_get("id")?,
        alias: row.try_get("alias")?,
        description: row.try_get("description")?,
        dialect: row.try_get("dialect")?,
        secret: row.try_get("secret")?,
        schema_name: row.try_get("schema_name")?,
        retriever_top_k: row.try_get("retriever_top_k")?,
        is_active: row.try_get::<i64, _>("is_active")? != 0,
    })
}
