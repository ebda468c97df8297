//! Auth-Service fuer Pruefstand
//!
//! Zentraler Service fuer Registrierung, Login und Session-Aufloesung.
//! Nutzt das Benutzer-Repository und den TokenDienst.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use pruefstand_db::{
    models::{BenutzerRecord, NeuerBenutzer},
    repository::BenutzerRepository,
};

use crate::{
    email::email_gueltig,
    error::{AuthError, AuthResult},
    password::{blind_verifizieren, passwort_hashen, passwort_verifizieren},
    token::TokenDienst,
};

/// Minimale Passwortlaenge bei der Registrierung
const MIN_PASSWORT_LAENGE: usize = 8;

/// Passwortfreie Sicht auf einen Benutzer
///
/// Die einzige Benutzer-Darstellung die den Auth-Kern verlaesst.
/// Lebt nur fuer die Dauer eines Requests und wird nie gecacht.
#[derive(Debug, Clone, Serialize)]
pub struct Identitaet {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BenutzerRecord> for Identitaet {
    fn from(benutzer: BenutzerRecord) -> Self {
        Self {
            id: benutzer.id,
            email: benutzer.email,
            is_active: benutzer.is_active,
            created_at: benutzer.created_at,
        }
    }
}

/// Antwort auf einen erfolgreichen Login
#[derive(Debug, Clone, Serialize)]
pub struct TokenAntwort {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<B: BenutzerRepository> {
    benutzer_repo: Arc<B>,
    token_dienst: TokenDienst,
}

impl<B: BenutzerRepository> AuthService<B> {
    /// Erstellt einen neuen AuthService
    pub fn neu(benutzer_repo: Arc<B>, token_dienst: TokenDienst) -> Self {
        Self {
            benutzer_repo,
            token_dienst,
        }
    }

    /// Registriert einen neuen Benutzer
    ///
    /// Die E-Mail wird vor jedem Storage-Zugriff syntaktisch geprueft.
    /// Gegen parallele Registrierungen mit derselben Adresse schuetzt
    /// zusaetzlich die UNIQUE-Bedingung der Datenbank.
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<Identitaet> {
        if !email_gueltig(email) {
            return Err(AuthError::UngueltigeEingabe(
                "Ungueltige E-Mail-Adresse".into(),
            ));
        }
        if passwort.chars().count() < MIN_PASSWORT_LAENGE {
            return Err(AuthError::UngueltigeEingabe(format!(
                "Passwort muss mindestens {MIN_PASSWORT_LAENGE} Zeichen haben"
            )));
        }

        // Pruefen ob die E-Mail bereits vergeben ist (exakter Vergleich)
        if self.benutzer_repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email.to_string()));
        }

        let passwort_hash = passwort_hashen(passwort)?;

        let benutzer = self
            .benutzer_repo
            .create(NeuerBenutzer {
                email,
                password_hash: &passwort_hash,
            })
            .await
            .map_err(|e| {
                // Verlierer des Insert-Rennens: wie "bereits registriert" behandeln
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben(email.to_string())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        tracing::info!(
            user_id = %benutzer.id,
            email = %benutzer.email,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer.into())
    }

    /// Meldet einen Benutzer an und stellt ein Session-Token aus
    ///
    /// Unbekannte E-Mail und falsches Passwort ergeben dieselbe Antwort –
    /// die beiden Faelle duerfen fuer den Aufrufer nicht unterscheidbar sein.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<TokenAntwort> {
        let Some(benutzer) = self.benutzer_repo.get_by_email(email).await? else {
            // Aufwand angleichen: der unbekannte Fall rechnet genauso
            blind_verifizieren(passwort);
            tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        };

        if !passwort_verifizieren(passwort, &benutzer.password_hash) {
            tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let access_token = self.token_dienst.ausstellen(&benutzer.email)?;

        tracing::info!(user_id = %benutzer.id, email = %benutzer.email, "Benutzer angemeldet");

        Ok(TokenAntwort {
            access_token,
            token_type: "bearer",
        })
    }

    /// Loest ein Session-Token zur aktuellen Identitaet auf
    ///
    /// Das Token-Subjekt wird immer gegen den aktuellen Directory-Zustand
    /// aufgeloest: ein gueltig signiertes Token fuer einen inzwischen
    /// geloeschten Account ist wertlos.
    pub async fn session_aufloesen(&self, token: &str) -> AuthResult<Identitaet> {
        let subjekt = self.token_dienst.validieren(token).map_err(|e| {
            tracing::debug!(fehler = %e, "Token-Validierung fehlgeschlagen");
            e
        })?;

        let benutzer = self
            .benutzer_repo
            .get_by_email(&subjekt)
            .await?
            .ok_or(AuthError::BenutzerNichtGefunden)?;

        Ok(benutzer.into())
    }
}
