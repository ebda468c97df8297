//! SQLite-Implementierung des KontextRepository
//!
//! Vier kleine Tabellen mit identischem Zuschnitt (domain-gescopte
//! Assets). Loeschungen matchen immer auf (id, domain_id), damit ein
//! Asset nicht ueber eine fremde Domain entfernt werden kann.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{AgentIoRecord, PromptRecord, PromptUpdate, TrainingsBeispielRecord, UserStoryRecord};
use crate::repository::KontextRepository;
use crate::sqlite::pool::SqliteDb;

impl KontextRepository for SqliteDb {
    // --- Agent-I/O ---

    async fn agent_io_list(&self, domain_id: &str) -> DbResult<Vec<AgentIoRecord>> {
        let rows = sqlx::query("SELECT id, domain_id, input, output FROM agent_io WHERE domain_id = ?")
            .bind(domain_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| {
                Ok(AgentIoRecord {
                    id: id_parsen(r)?,
                    domain_id: r.try_get("domain_id")?,
                    input: r.try_get("input")?,
                    output: r.try_get("output")?,
                })
            })
            .collect()
    }

    async fn agent_io_create(
        &self,
        domain_id: &str,
        input: &str,
        output: &str,
    ) -> DbResult<AgentIoRecord> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO agent_io (id, domain_id, input, output) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(domain_id)
            .bind(input)
            .bind(output)
            .execute(&self.pool)
            .await?;

        Ok(AgentIoRecord {
            id,
            domain_id: domain_id.to_string(),
            input: input.to_string(),
            output: output.to_string(),
        })
    }

    async fn agent_io_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM agent_io WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    // --- User Stories ---

    async fn story_list(&self, domain_id: &str) -> DbResult<Vec<UserStoryRecord>> {
        let rows = sqlx::query("SELECT id, domain_id, story FROM user_stories WHERE domain_id = ?")
            .bind(domain_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| {
                Ok(UserStoryRecord {
                    id: id_parsen(r)?,
                    domain_id: r.try_get("domain_id")?,
                    story: r.try_get("story")?,
                })
            })
            .collect()
    }

    async fn story_create(&self, domain_id: &str, story: &str) -> DbResult<UserStoryRecord> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO user_stories (id, domain_id, story) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(domain_id)
            .bind(story)
            .execute(&self.pool)
            .await?;

        Ok(UserStoryRecord {
            id,
            domain_id: domain_id.to_string(),
            story: story.to_string(),
        })
    }

    async fn story_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM user_stories WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    // --- Prompts ---

    async fn prompt_list(&self, domain_id: &str) -> DbResult<Vec<PromptRecord>> {
        let rows =
            sqlx::query("SELECT id, domain_id, key, type, content FROM prompts WHERE domain_id = ?")
                .bind(domain_id)
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_zu_prompt).collect()
    }

    async fn prompt_create(
        &self,
        domain_id: &str,
        key: &str,
        typ: &str,
        content: &str,
    ) -> DbResult<PromptRecord> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO prompts (id, domain_id, key, type, content) VALUES (?, ?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(domain_id)
            .bind(key)
            .bind(typ)
            .bind(content)
            .execute(&self.pool)
            .await?;

        Ok(PromptRecord {
            id,
            domain_id: domain_id.to_string(),
            key: key.to_string(),
            typ: typ.to_string(),
            content: content.to_string(),
        })
    }

    async fn prompt_update(
        &self,
        domain_id: &str,
        id: Uuid,
        update: PromptUpdate,
    ) -> DbResult<PromptRecord> {
        if update.ist_leer() {
            return Err(DbError::UngueltigeDaten("Keine Felder zum Aktualisieren".into()));
        }

        let mut sets: Vec<&str> = Vec::new();
        if update.key.is_some() {
            sets.push("key = ?");
        }
        if update.typ.is_some() {
            sets.push("type = ?");
        }
        if update.content.is_some() {
            sets.push("content = ?");
        }

        let sql = format!(
            "UPDATE prompts SET {} WHERE id = ? AND domain_id = ?",
            sets.join(", ")
        );
        let mut q = sqlx::query(&sql);
        if let Some(ref v) = update.key {
            q = q.bind(v);
        }
        if let Some(ref v) = update.typ {
            q = q.bind(v);
        }
        if let Some(ref v) = update.content {
            q = q.bind(v);
        }
        q = q.bind(id.to_string()).bind(domain_id);

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Prompt {id}")));
        }

        let row =
            sqlx::query("SELECT id, domain_id, key, type, content FROM prompts WHERE id = ?")
                .bind(id.to_string())
                .fetch_one(&self.pool)
                .await?;
        row_zu_prompt(&row)
    }

    async fn prompt_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM prompts WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    // --- Trainingsbeispiele ---

    async fn beispiel_list(&self, domain_id: &str) -> DbResult<Vec<TrainingsBeispielRecord>> {
        let rows = sqlx::query(
            "SELECT id, domain_id, question, type, tables FROM training_examples WHERE domain_id = ?",
        )
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| {
                let tables_json: String = r.try_get("tables")?;
                Ok(TrainingsBeispielRecord {
                    id: id_parsen(r)?,
                    domain_id: r.try_get("domain_id")?,
                    question: r.try_get("question")?,
                    typ: r.try_get("type")?,
                    tables: serde_json::from_str(&tables_json)?,
                })
            })
            .collect()
    }

    async fn beispiel_create(
        &self,
        domain_id: &str,
        question: &str,
        typ: &str,
        tables: &[String],
    ) -> DbResult<TrainingsBeispielRecord> {
        let id = Uuid::new_v4();
        let tables_json = serde_json::to_string(tables)?;

        sqlx::query(
            "INSERT INTO training_examples (id, domain_id, question, type, tables)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(domain_id)
        .bind(question)
        .bind(typ)
        .bind(&tables_json)
        .execute(&self.pool)
        .await?;

        Ok(TrainingsBeispielRecord {
            id,
            domain_id: domain_id.to_string(),
            question: question.to_string(),
            typ: typ.to_string(),
            tables: tables.to_vec(),
        })
    }

    async fn beispiel_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM training_examples WHERE id = ? AND domain_id = ?")
            .bind(id.to_string())
            .bind(domain_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn id_parsen(row: &SqliteRow) -> DbResult<Uuid> {
    let id_str: String = row.try_get("id")?;
    Uuid::parse_str(&id_str).map_err(|e| DbError::intern(format!("Ungueltige ID: {e}")))
}

fn row_zu_prompt(row: &SqliteRow) -> DbResult<PromptRecord> {
    Ok(PromptRecord {
        id: id_parsen(row)?,
        domain_id: row.try_get("domain_id")?,
        key: row.try_get("key")?,
        typ: row.try_get("type")?,
        content: row.try_get("content")?,
    })
}
