//! Datenbankmodelle fuer Pruefstand
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den API-Typen getrennt und dienen als reine
//! Datenuebertragungsobjekte. Feldnamen folgen dem Wire-Format der API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pruefstand_core::types::{PruefStatus, Schwierigkeit};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
///
/// Enthaelt den Passwort-Hash und darf deshalb niemals direkt
/// serialisiert nach aussen gegeben werden – dafuer gibt es die
/// passwortfreie Identitaets-Sicht im Auth-Crate.
#[derive(Debug, Clone)]
pub struct BenutzerRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Domains
// ---------------------------------------------------------------------------

/// Domain-Datensatz – ein konfigurierter Agenten-Kontext
///
/// Die ID ist ein vom Client vergebener Kurzname (z.B. "maps"),
/// keine generierte UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    pub alias: String,
    pub description: String,
    pub dialect: String,
    pub secret: String,
    pub schema_name: String,
    pub retriever_top_k: i64,
    pub is_active: bool,
}

/// Teilaktualisierung einer Domain – nur gesetzte Felder werden geaendert
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainUpdate {
    pub alias: Option<String>,
    pub description: Option<String>,
    pub dialect: Option<String>,
    pub secret: Option<String>,
    pub schema_name: Option<String>,
    pub retriever_top_k: Option<i64>,
    pub is_active: Option<bool>,
}

impl DomainUpdate {
    /// Gibt true zurueck wenn kein einziges Feld gesetzt ist
    pub fn ist_leer(&self) -> bool {
        self.alias.is_none()
            && self.description.is_none()
            && self.dialect.is_none()
            && self.secret.is_none()
            && self.schema_name.is_none()
            && self.retriever_top_k.is_none()
            && self.is_active.is_none()
    }
}

// ---------------------------------------------------------------------------
// Kontext-Assets
// ---------------------------------------------------------------------------

/// Agent-I/O-Beispiel (Eingabe/Ausgabe-Paar, jeweils JSON-Strings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentIoRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub input: String,
    pub output: String,
}

/// User Story einer Domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStoryRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub story: String,
}

/// Prompt-Datensatz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub key: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub content: String,
}

/// Teilaktualisierung eines Prompts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptUpdate {
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub content: Option<String>,
}

impl PromptUpdate {
    pub fn ist_leer(&self) -> bool {
        self.key.is_none() && self.typ.is_none() && self.content.is_none()
    }
}

/// Trainingsbeispiel (Frage mit Typ und beteiligten Tabellen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingsBeispielRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub tables: Vec<String>,
}

// ---------------------------------------------------------------------------
// Dokumente
// ---------------------------------------------------------------------------

/// Metadaten eines hochgeladenen RAG-Dokuments
///
/// Der Dateiinhalt liegt auf der Platte, hier nur die Metadaten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DokumentRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub filename: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Testfaelle
// ---------------------------------------------------------------------------

/// Testfall einer Domain mit dem Ergebnis des letzten Evaluationslaufs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestfallRecord {
    pub id: Uuid,
    pub domain_id: String,
    pub question: String,
    pub ground_truth: String,
    pub difficulty: Schwierigkeit,
    pub last_status: Option<PruefStatus>,
}

/// Daten zum Erstellen eines neuen Testfalls
#[derive(Debug, Clone)]
pub struct NeuerTestfall<'a> {
    pub domain_id: &'a str,
    pub question: &'a str,
    pub ground_truth: &'a str,
    pub difficulty: Schwierigkeit,
}
