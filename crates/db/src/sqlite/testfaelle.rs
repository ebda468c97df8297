//! SQLite-Implementierung des TestfallRepository

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use pruefstand_core::types::{PruefStatus, Schwierigkeit};

use crate::error::{DbError, DbResult};
use crate::models::{NeuerTestfall, TestfallRecord};
use crate::repository::TestfallRepository;
use crate::sqlite::pool::SqliteDb;

const TESTFALL_SPALTEN: &str = "id, domain_id, question, ground_truth, difficulty, last_status";

impl TestfallRepository for SqliteDb {
    async fn list(&self, domain_id: &str) -> DbResult<Vec<TestfallRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {TESTFALL_SPALTEN} FROM test_sets WHERE domain_id = ?"
        ))
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_zu_testfall).collect()
    }

    async fn list_alle(&self) -> DbResult<Vec<TestfallRecord>> {
        let rows = sqlx::query(&format!("SELECT {TESTFALL_SPALTEN} FROM test_sets"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_zu_testfall).collect()
    }

    async fn list_neueste(&self, limit: i64) -> DbResult<Vec<TestfallRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {TESTFALL_SPALTEN} FROM test_sets ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_zu_testfall).collect()
    }

    async fn create(&self, data: NeuerTestfall<'_>) -> DbResult<TestfallRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO test_sets (id, domain_id, question, ground_truth, difficulty, last_status, created_at)
             VALUES (?, ?, ?, ?, ?, NULL, ?)",
        )
        .bind(id.to_string())
        .bind(data.domain_id)
        .bind(data.question)
        .bind(data.ground_truth)
        .bind(data.difficulty.als_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(TestfallRecord {
            id,
            domain_id: data.domain_id.to_string(),
            question: data.question.to_string(),
            ground_truth: data.ground_truth.to_string(),
            difficulty: data.difficulty,
            last_status: None,
        })
    }

    async fn delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM test_sets WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn set_status(&self, id: Uuid, status: PruefStatus) -> DbResult<()> {
        let affected = sqlx::query("UPDATE test_sets SET last_status = ? WHERE id = ?")
            .bind(status.als_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Testfall {id}")));
        }
        Ok(())
    }
}

fn row_zu_testfall(row: &SqliteRow) -> DbResult<TestfallRecord> {
    let id_str: String = row.try_get("id")?;
    let difficulty_str: String = row.try_get("difficulty")?;
    let status_str: Option<String> = row.try_get("last_status")?;

    let last_status = match status_str {
        None => None,
        Some(s) => Some(
            PruefStatus::aus_str(&s)
                .ok_or_else(|| DbError::intern(format!("Unbekannter Status '{s}'")))?,
        ),
    };

    Ok(TestfallRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DbError::intern(format!("Ungueltige Testfall-ID: {e}")))?,
        domain_id: row.try_get("domain_id")?,
        question: row.try_get("question")?,
        ground_truth: row.try_get("ground_truth")?,
        difficulty: Schwierigkeit::aus_str(&difficulty_str)
            .ok_or_else(|| DbError::intern(format!("Unbekannte Schwierigkeit '{difficulty_str}'")))?,
        last_status,
    })
}
