//! Integration-Tests fuer DomainRepository (In-Memory SQLite)

use pruefstand_db::{
    models::{DomainRecord, DomainUpdate},
    DbError, DomainRepository, SqliteDb,
};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn maps_domain() -> DomainRecord {
    DomainRecord {
        id: "maps".into(),
        alias: "Advertising Insights".into(),
        description: "Werbeplattform-Services".into(),
        dialect: "Snowflake".into(),
        secret: "snowflake".into(),
        schema_name: "maps.derived".into(),
        retriever_top_k: 10,
        is_active: true,
    }
}

#[tokio::test]
async fn domain_erstellen_und_laden() {
    let db = db().await;

    let erstellt = db.create(&maps_domain()).await.expect("create fehlgeschlagen");
    assert_eq!(erstellt.id, "maps");

    let geladen = db
        .get("maps")
        .await
        .unwrap()
        .expect("Domain sollte gefunden werden");
    assert_eq!(geladen.alias, "Advertising Insights");
    assert_eq!(geladen.retriever_top_k, 10);
    assert!(geladen.is_active);
}

#[tokio::test]
async fn doppelte_domain_id_abgelehnt() {
    let db = db().await;

    db.create(&maps_domain()).await.unwrap();
    let ergebnis = db.create(&maps_domain()).await;
    assert!(matches!(ergebnis, Err(DbError::Eindeutigkeit(_))));
}

#[tokio::test]
async fn domains_auflisten() {
    let db = db().await;

    db.create(&maps_domain()).await.unwrap();
    db.create(&DomainRecord {
        id: "billing".into(),
        alias: "Billing".into(),
        ..maps_domain()
    })
    .await
    .unwrap();

    let alle = db.list().await.unwrap();
    assert_eq!(alle.len(), 2);
    // Sortiert nach ID
    assert_eq!(alle[0].id, "billing");
    assert_eq!(alle[1].id, "maps");
}

#[tokio::test]
async fn domain_teilweise_aktualisieren() {
    let db = db().await;
    db.create(&maps_domain()).await.unwrap();

    let aktualisiert = db
        .update(
            "maps",
            DomainUpdate {
                alias: Some("Ads Insights".into()),
                retriever_top_k: Some(20),
                ..Default::default()
            },
        )
        .await
        .expect("update fehlgeschlagen");

    assert_eq!(aktualisiert.alias, "Ads Insights");
    assert_eq!(aktualisiert.retriever_top_k, 20);
    // Nicht gesetzte Felder bleiben unveraendert
    assert_eq!(aktualisiert.dialect, "Snowflake");
}

#[tokio::test]
async fn leeres_update_abgelehnt() {
    let db = db().await;
    db.create(&maps_domain()).await.unwrap();

    let ergebnis = db.update("maps", DomainUpdate::default()).await;
    assert!(matches!(ergebnis, Err(DbError::UngueltigeDaten(_))));
}

#[tokio::test]
async fn update_unbekannter_domain_gibt_nicht_gefunden() {
    let db = db().await;

    let ergebnis = db
        .update(
            "gibt-es-nicht",
            DomainUpdate {
                alias: Some("x".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(ergebnis, Err(DbError::NichtGefunden(_))));
}
