//! Fehlertypen fuer den Auth-Service
//!
//! Die interne Unterscheidung der Token-Fehler (abgelaufen, manipuliert,
//! missgebildet) existiert nur fuers Logging – nach aussen werden alle
//! drei identisch als generisches 401 beantwortet.

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingaben ---
    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    // --- Registrierung ---
    #[error("E-Mail bereits registriert: {0}")]
    EmailVergeben(String),

    // --- Authentifizierung ---
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Token ---
    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    #[error("Token-Signatur ungueltig")]
    TokenManipuliert,

    #[error("Token nicht parsbar")]
    TokenMissgebildet,

    #[error("Token-Subjekt existiert nicht mehr")]
    BenutzerNichtGefunden,

    // --- Intern ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Token-Ausstellung fehlgeschlagen: {0}")]
    TokenAusstellung(String),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pruefstand_db::DbError),
}

impl AuthError {
    /// Gibt true zurueck wenn der Fehler nach aussen ein 401 ist
    /// (alle Varianten die fuer den Client ununterscheidbar sein muessen)
    pub fn ist_unautorisiert(&self) -> bool {
        matches!(
            self,
            Self::UngueltigeAnmeldedaten
                | Self::TokenAbgelaufen
                | Self::TokenManipuliert
                | Self::TokenMissgebildet
                | Self::BenutzerNichtGefunden
        )
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
