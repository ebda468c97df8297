//! Hilfsfunktionen fuer Auth-Pruefung und Fehlerantworten
//!
//! Jede 401-Antwort ist generisch und traegt `WWW-Authenticate: Bearer`.
//! Die interne Fehlerursache (abgelaufen, manipuliert, missgebildet,
//! Subjekt geloescht) landet nur im Log, nie in der Antwort.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use pruefstand_auth::{AuthError, Identitaet};
use pruefstand_db::DbError;

use crate::ApiState;

/// Extrahiert das Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Fehlerantwort fuer die REST-API
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": nachricht
            }
        })),
    )
        .into_response()
}

/// Generische 401-Antwort mit WWW-Authenticate-Header
pub fn unautorisiert_antwort() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({
            "error": {
                "code": 401,
                "message": "Nicht authentifiziert"
            }
        })),
    )
        .into_response()
}

/// Bildet einen AuthError auf die passende HTTP-Antwort ab
pub fn auth_fehler_antwort(fehler: AuthError) -> Response {
    if fehler.ist_unautorisiert() {
        // Variante nur intern unterscheiden, Antwort bleibt generisch
        tracing::debug!(fehler = %fehler, "Authentifizierung abgelehnt");
        return unautorisiert_antwort();
    }

    match fehler {
        AuthError::UngueltigeEingabe(nachricht) => {
            fehler_antwort(StatusCode::BAD_REQUEST, &nachricht)
        }
        AuthError::EmailVergeben(_) => {
            fehler_antwort(StatusCode::BAD_REQUEST, "E-Mail bereits registriert")
        }
        fehler => {
            tracing::error!(fehler = %fehler, "Interner Fehler im Auth-Pfad");
            fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "Interner Serverfehler")
        }
    }
}

/// Bildet einen DbError auf die passende HTTP-Antwort ab
pub fn db_fehler_antwort(fehler: DbError) -> Response {
    match fehler {
        DbError::NichtGefunden(nachricht) => fehler_antwort(StatusCode::NOT_FOUND, &nachricht),
        DbError::Eindeutigkeit(nachricht) => fehler_antwort(StatusCode::CONFLICT, &nachricht),
        DbError::UngueltigeDaten(nachricht) => fehler_antwort(StatusCode::BAD_REQUEST, &nachricht),
        fehler => {
            tracing::error!(fehler = %fehler, "Datenbankfehler");
            fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "Interner Serverfehler")
        }
    }
}

/// Loest die Identitaet des Aufrufers aus den Request-Headern auf
///
/// Laeuft als erster Schritt in jedem geschuetzten Handler. Fehlender
/// Header, kaputtes Token und geloeschtes Subjekt ergeben alle dieselbe
/// generische 401-Antwort.
pub async fn identitaet_ermitteln(
    headers: &HeaderMap,
    state: &ApiState,
) -> Result<Identitaet, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err(unautorisiert_antwort());
    };

    state
        .auth
        .session_aufloesen(token)
        .await
        .map_err(auth_fehler_antwort)
}
