//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die SQLite-Implementierung liegt im
//! `sqlite`-Modul; Tests koennen eigene In-Memory-Implementierungen
//! bereitstellen.

use uuid::Uuid;

use pruefstand_core::types::PruefStatus;

use crate::error::DbResult;
use crate::models::{
    AgentIoRecord, BenutzerRecord, DokumentRecord, DomainRecord, DomainUpdate, NeuerBenutzer,
    NeuerTestfall, PromptRecord, PromptUpdate, TestfallRecord, TrainingsBeispielRecord,
    UserStoryRecord,
};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pruefstand.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pruefstand.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
///
/// Die E-Mail-Adresse ist der eindeutige Schluessel; das Einfuegen eines
/// Duplikats schlaegt mit `DbError::Eindeutigkeit` fehl. Darauf verlaesst
/// sich der Auth-Service beim Schutz gegen parallele Registrierungen.
#[allow(async_fn_in_trait)]
pub trait BenutzerRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seiner E-Mail laden (exakter Vergleich)
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;
}

/// Repository fuer Domain-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait DomainRepository: Send + Sync {
    /// Alle Domains laden
    async fn list(&self) -> DbResult<Vec<DomainRecord>>;

    /// Eine Domain anhand ihrer ID laden
    async fn get(&self, id: &str) -> DbResult<Option<DomainRecord>>;

    /// Eine neue Domain anlegen (ID vom Client vergeben)
    async fn create(&self, domain: &DomainRecord) -> DbResult<DomainRecord>;

    /// Eine Domain teilweise aktualisieren
    async fn update(&self, id: &str, update: DomainUpdate) -> DbResult<DomainRecord>;
}

/// Repository fuer Kontext-Assets (Agent-I/O, User Stories, Prompts,
/// Trainingsbeispiele) – alle jeweils auf eine Domain gescopet
#[allow(async_fn_in_trait)]
pub trait KontextRepository: Send + Sync {
    // --- Agent-I/O ---
    async fn agent_io_list(&self, domain_id: &str) -> DbResult<Vec<AgentIoRecord>>;
    async fn agent_io_create(
        &self,
        domain_id: &str,
        input: &str,
        output: &str,
    ) -> DbResult<AgentIoRecord>;
    async fn agent_io_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;

    // --- User Stories ---
    async fn story_list(&self, domain_id: &str) -> DbResult<Vec<UserStoryRecord>>;
    async fn story_create(&self, domain_id: &str, story: &str) -> DbResult<UserStoryRecord>;
    async fn story_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;

    // --- Prompts ---
    async fn prompt_list(&self, domain_id: &str) -> DbResult<Vec<PromptRecord>>;
    async fn prompt_create(
        &self,
        domain_id: &str,
        key: &str,
        typ: &str,
        content: &str,
    ) -> DbResult<PromptRecord>;
    async fn prompt_update(
        &self,
        domain_id: &str,
        id: Uuid,
        update: PromptUpdate,
    ) -> DbResult<PromptRecord>;
    async fn prompt_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;

    // --- Trainingsbeispiele ---
    async fn beispiel_list(&self, domain_id: &str) -> DbResult<Vec<TrainingsBeispielRecord>>;
    async fn beispiel_create(
        &self,
        domain_id: &str,
        question: &str,
        typ: &str,
        tables: &[String],
    ) -> DbResult<TrainingsBeispielRecord>;
    async fn beispiel_delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;
}

/// Repository fuer Dokument-Metadaten
#[allow(async_fn_in_trait)]
pub trait DokumentRepository: Send + Sync {
    async fn list(&self, domain_id: &str) -> DbResult<Vec<DokumentRecord>>;
    async fn create(&self, dokument: &DokumentRecord) -> DbResult<()>;
    async fn get(&self, domain_id: &str, id: Uuid) -> DbResult<Option<DokumentRecord>>;
    async fn delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;
}

/// Repository fuer Testfaelle
#[allow(async_fn_in_trait)]
pub trait TestfallRepository: Send + Sync {
    /// Alle Testfaelle einer Domain laden
    async fn list(&self, domain_id: &str) -> DbResult<Vec<TestfallRecord>>;

    /// Alle Testfaelle ueber alle Domains laden (Dashboard-Aggregation)
    async fn list_alle(&self) -> DbResult<Vec<TestfallRecord>>;

    /// Die zuletzt angelegten Testfaelle laden (Dashboard)
    async fn list_neueste(&self, limit: i64) -> DbResult<Vec<TestfallRecord>>;

    /// Einen neuen Testfall anlegen (last_status = None)
    async fn create(&self, data: NeuerTestfall<'_>) -> DbResult<TestfallRecord>;

    /// Einen Testfall loeschen
    async fn delete(&self, domain_id: &str, id: Uuid) -> DbResult<bool>;

    /// Den Ergebnis-Status eines Testfalls setzen
    async fn set_status(&self, id: Uuid, status: PruefStatus) -> DbResult<()>;
}
