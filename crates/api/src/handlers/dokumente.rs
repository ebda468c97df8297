//! REST-Handler fuer RAG-Dokumente
//!
//! Der Dateiinhalt liegt unter `<upload_dir>/<domain_id>/<filename>`,
//! in der Datenbank nur die Metadaten. Beim Loeschen wird die Datei
//! best-effort entfernt; massgeblich ist der Metadaten-Datensatz.

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use pruefstand_db::{models::DokumentRecord, DokumentRepository};

use crate::middleware::{db_fehler_antwort, fehler_antwort, identitaet_ermitteln};
use crate::ApiState;

/// GET /api/v1/domains/:domain_id/documents
pub async fn list_documents(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match DokumentRepository::list(state.db.as_ref(), &domain_id).await {
        Ok(dokumente) => (StatusCode::OK, Json(dokumente)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// POST /api/v1/domains/:domain_id/documents (multipart, Feld "file")
pub async fn upload_document(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }

    // Erstes Feld namens "file" mit Dateinamen verwenden
    let (filename, daten) = loop {
        match multipart.next_field().await {
            Ok(Some(feld)) => {
                if feld.name() != Some("file") {
                    continue;
                }
                let Some(filename) = feld.file_name().map(String::from) else {
                    return fehler_antwort(StatusCode::BAD_REQUEST, "Dateiname fehlt");
                };
                match feld.bytes().await {
                    Ok(daten) => break (filename, daten),
                    Err(e) => {
                        return fehler_antwort(
                            StatusCode::BAD_REQUEST,
                            &format!("Upload unvollstaendig: {e}"),
                        )
                    }
                }
            }
            Ok(None) => {
                return fehler_antwort(StatusCode::BAD_REQUEST, "Multipart-Feld 'file' fehlt")
            }
            Err(e) => {
                return fehler_antwort(StatusCode::BAD_REQUEST, &format!("Ungueltiger Upload: {e}"))
            }
        }
    };

    // Pfadbestandteile im Dateinamen ablehnen
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return fehler_antwort(StatusCode::BAD_REQUEST, "Ungueltiger Dateiname");
    }

    let verzeichnis = state.upload_dir.join(&domain_id);
    if let Err(e) = tokio::fs::create_dir_all(&verzeichnis).await {
        tracing::error!(fehler = %e, verzeichnis = %verzeichnis.display(), "Upload-Verzeichnis nicht anlegbar");
        return fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "Interner Serverfehler");
    }

    let pfad = verzeichnis.join(&filename);
    if let Err(e) = tokio::fs::write(&pfad, &daten).await {
        tracing::error!(fehler = %e, pfad = %pfad.display(), "Datei nicht speicherbar");
        return fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "Interner Serverfehler");
    }

    let dokument = DokumentRecord {
        id: Uuid::new_v4(),
        domain_id,
        filename,
        size: daten.len() as i64,
        uploaded_at: Utc::now(),
    };

    if let Err(e) = DokumentRepository::create(state.db.as_ref(), &dokument).await {
        // Datei wieder entfernen wenn die Metadaten nicht geschrieben wurden
        let _ = tokio::fs::remove_file(&pfad).await;
        return db_fehler_antwort(e);
    }

    tracing::info!(
        dokument_id = %dokument.id,
        domain_id = %dokument.domain_id,
        filename = %dokument.filename,
        size = dokument.size,
        "Dokument hochgeladen"
    );

    (StatusCode::CREATED, Json(dokument)).into_response()
}

/// DELETE /api/v1/domains/:domain_id/documents/:id
pub async fn delete_document(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }

    let dokument = match DokumentRepository::get(state.db.as_ref(), &domain_id, id).await {
        Ok(Some(dokument)) => dokument,
        Ok(None) => return fehler_antwort(StatusCode::NOT_FOUND, "Dokument nicht gefunden"),
        Err(e) => return db_fehler_antwort(e),
    };

    // Datei best-effort entfernen, massgeblich sind die Metadaten
    let pfad = state.upload_dir.join(&domain_id).join(&dokument.filename);
    if let Err(e) = tokio::fs::remove_file(&pfad).await {
        tracing::warn!(fehler = %e, pfad = %pfad.display(), "Datei nicht loeschbar");
    }

    match DokumentRepository::delete(state.db.as_ref(), &domain_id, id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "Dokument geloescht" })),
        )
            .into_response(),
        Ok(false) => fehler_antwort(StatusCode::NOT_FOUND, "Dokument nicht gefunden"),
        Err(e) => db_fehler_antwort(e),
    }
}
