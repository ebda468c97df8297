//! Integration-Tests fuer KontextRepository (In-Memory SQLite)

use uuid::Uuid;

use pruefstand_db::{models::PromptUpdate, DbError, KontextRepository, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

#[tokio::test]
async fn agent_io_lebenszyklus() {
    let db = db().await;

    let sample = db
        .agent_io_create("maps", r#"{"frage": "Umsatz?"}"#, r#"{"sql": "SELECT 1"}"#)
        .await
        .expect("create fehlgeschlagen");

    let liste = db.agent_io_list("maps").await.unwrap();
    assert_eq!(liste.len(), 1);
    assert_eq!(liste[0].id, sample.id);

    // Andere Domain sieht nichts
    assert!(db.agent_io_list("billing").await.unwrap().is_empty());

    let geloescht = db.agent_io_delete("maps", sample.id).await.unwrap();
    assert!(geloescht);
    assert!(db.agent_io_list("maps").await.unwrap().is_empty());
}

#[tokio::test]
async fn agent_io_loeschen_ueber_fremde_domain_schlaegt_fehl() {
    let db = db().await;
    let sample = db.agent_io_create("maps", "in", "out").await.unwrap();

    // Loeschung matcht auf (id, domain_id)
    let geloescht = db.agent_io_delete("billing", sample.id).await.unwrap();
    assert!(!geloescht);
    assert_eq!(db.agent_io_list("maps").await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_story_lebenszyklus() {
    let db = db().await;

    let story = db
        .story_create("maps", "Als Analystin moechte ich Umsaetze sehen.")
        .await
        .unwrap();

    let liste = db.story_list("maps").await.unwrap();
    assert_eq!(liste.len(), 1);
    assert_eq!(liste[0].story, "Als Analystin moechte ich Umsaetze sehen.");

    assert!(db.story_delete("maps", story.id).await.unwrap());
    assert!(!db.story_delete("maps", story.id).await.unwrap());
}

#[tokio::test]
async fn prompt_aktualisieren() {
    let db = db().await;

    let prompt = db
        .prompt_create("maps", "system", "system", "Du bist ein SQL-Agent.")
        .await
        .unwrap();

    let aktualisiert = db
        .prompt_update(
            "maps",
            prompt.id,
            PromptUpdate {
                content: Some("Du bist ein vorsichtiger SQL-Agent.".into()),
                ..Default::default()
            },
        )
        .await
        .expect("update fehlgeschlagen");

    assert_eq!(aktualisiert.content, "Du bist ein vorsichtiger SQL-Agent.");
    assert_eq!(aktualisiert.key, "system");
}

#[tokio::test]
async fn prompt_leeres_update_abgelehnt() {
    let db = db().await;
    let prompt = db.prompt_create("maps", "k", "t", "c").await.unwrap();

    let ergebnis = db
        .prompt_update("maps", prompt.id, PromptUpdate::default())
        .await;
    assert!(matches!(ergebnis, Err(DbError::UngueltigeDaten(_))));
}

#[tokio::test]
async fn prompt_update_unbekannter_id() {
    let db = db().await;

    let ergebnis = db
        .prompt_update(
            "maps",
            Uuid::new_v4(),
            PromptUpdate {
                key: Some("x".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(ergebnis, Err(DbError::NichtGefunden(_))));
}

#[tokio::test]
async fn trainingsbeispiel_mit_tabellen_roundtrip() {
    let db = db().await;

    let tables = vec!["fact_umsatz".to_string(), "dim_kunde".to_string()];
    let beispiel = db
        .beispiel_create("maps", "Wie viele Kunden?", "aggregation", &tables)
        .await
        .unwrap();

    let liste = db.beispiel_list("maps").await.unwrap();
    assert_eq!(liste.len(), 1);
    assert_eq!(liste[0].id, beispiel.id);
    assert_eq!(liste[0].tables, tables);
    assert_eq!(liste[0].typ, "aggregation");

    assert!(db.beispiel_delete("maps", beispiel.id).await.unwrap());
}
