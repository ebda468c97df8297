//! REST-Handler fuer Domain-Endpunkte

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use pruefstand_db::{
    models::{DomainRecord, DomainUpdate},
    DomainRepository,
};

use crate::middleware::{db_fehler_antwort, fehler_antwort, identitaet_ermitteln};
use crate::ApiState;

/// GET /api/v1/domains
pub async fn list_domains(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match DomainRepository::list(state.db.as_ref()).await {
        Ok(domains) => (StatusCode::OK, Json(domains)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DomainErstellenBody {
    pub id: String,
    pub alias: String,
    pub description: String,
    pub dialect: String,
    pub secret: String,
    pub schema_name: String,
    #[serde(default = "standard_top_k")]
    pub retriever_top_k: i64,
    #[serde(default = "standard_aktiv")]
    pub is_active: bool,
}

fn standard_top_k() -> i64 {
    10
}

fn standard_aktiv() -> bool {
    true
}

/// POST /api/v1/domains
pub async fn create_domain(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<DomainErstellenBody>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    if body.id.trim().is_empty() {
        return fehler_antwort(StatusCode::BAD_REQUEST, "Domain-ID darf nicht leer sein");
    }

    let domain = DomainRecord {
        id: body.id,
        alias: body.alias,
        description: body.description,
        dialect: body.dialect,
        secret: body.secret,
        schema_name: body.schema_name,
        retriever_top_k: body.retriever_top_k,
        is_active: body.is_active,
    };

    match DomainRepository::create(state.db.as_ref(), &domain).await {
        Ok(domain) => (StatusCode::CREATED, Json(domain)).into_response(),
        Err(e) if e.ist_eindeutigkeit() => fehler_antwort(
            StatusCode::CONFLICT,
            &format!("Domain '{}' existiert bereits", domain.id),
        ),
        Err(e) => db_fehler_antwort(e),
    }
}

/// GET /api/v1/domains/:id
pub async fn get_domain(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match DomainRepository::get(state.db.as_ref(), &id).await {
        Ok(Some(domain)) => (StatusCode::OK, Json(domain)).into_response(),
        Ok(None) => fehler_antwort(
            StatusCode::NOT_FOUND,
            &format!("Domain '{id}' nicht gefunden"),
        ),
        Err(e) => db_fehler_antwort(e),
    }
}

/// PUT /api/v1/domains/:id
pub async fn update_domain(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(update): Json<DomainUpdate>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match DomainRepository::update(state.db.as_ref(), &id, update).await {
        Ok(domain) => (StatusCode::OK, Json(domain)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}
