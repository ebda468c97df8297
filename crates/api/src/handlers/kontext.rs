//! REST-Handler fuer Kontext-Assets (Agent-I/O, User Stories, Prompts,
//! Trainingsbeispiele)
//!
//! Alle Endpunkte sind auf eine Domain gescopet; Loeschungen pruefen
//! (id, domain_id) gemeinsam, damit ein Asset nicht ueber eine fremde
//! Domain-URL entfernt werden kann.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use pruefstand_db::{models::PromptUpdate, KontextRepository};

use crate::middleware::{db_fehler_antwort, fehler_antwort, identitaet_ermitteln};
use crate::ApiState;

fn geloescht_antwort(geloescht: bool, was: &str) -> Response {
    if geloescht {
        (
            StatusCode::OK,
            Json(json!({ "message": format!("{was} geloescht") })),
        )
            .into_response()
    } else {
        fehler_antwort(StatusCode::NOT_FOUND, &format!("{was} nicht gefunden"))
    }
}

// ---------------------------------------------------------------------------
// Agent-I/O
// ---------------------------------------------------------------------------

/// GET /api/v1/domains/:domain_id/agent-io
pub async fn list_agent_io(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.agent_io_list(&domain_id).await {
        Ok(samples) => (StatusCode::OK, Json(samples)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AgentIoBody {
    pub input: String,
    pub output: String,
}

/// POST /api/v1/domains/:domain_id/agent-io
pub async fn create_agent_io(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AgentIoBody>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state
        .db
        .agent_io_create(&domain_id, &body.input, &body.output)
        .await
    {
        Ok(sample) => (StatusCode::CREATED, Json(sample)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// DELETE /api/v1/domains/:domain_id/agent-io/:id
pub async fn delete_agent_io(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.agent_io_delete(&domain_id, id).await {
        Ok(geloescht) => geloescht_antwort(geloescht, "Agent-I/O-Beispiel"),
        Err(e) => db_fehler_antwort(e),
    }
}

// ---------------------------------------------------------------------------
// User Stories
// ---------------------------------------------------------------------------

/// GET /api/v1/domains/:domain_id/user-stories
pub async fn list_stories(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.story_list(&domain_id).await {
        Ok(stories) => (StatusCode::OK, Json(stories)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct StoryBody {
    pub story: String,
}

/// POST /api/v1/domains/:domain_id/user-stories
pub async fn create_story(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<StoryBody>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.story_create(&domain_id, &body.story).await {
        Ok(story) => (StatusCode::CREATED, Json(story)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// DELETE /api/v1/domains/:domain_id/user-stories/:id
pub async fn delete_story(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.story_delete(&domain_id, id).await {
        Ok(geloescht) => geloescht_antwort(geloescht, "User Story"),
        Err(e) => db_fehler_antwort(e),
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// GET /api/v1/domains/:domain_id/prompts
pub async fn list_prompts(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.prompt_list(&domain_id).await {
        Ok(prompts) => (StatusCode::OK, Json(prompts)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct PromptBody {
    pub key: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub content: String,
}

/// POST /api/v1/domains/:domain_id/prompts
pub async fn create_prompt(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<PromptBody>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state
        .db
        .prompt_create(&domain_id, &body.key, &body.typ, &body.content)
        .await
    {
        Ok(prompt) => (StatusCode::CREATED, Json(prompt)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// PUT /api/v1/domains/:domain_id/prompts/:id
pub async fn update_prompt(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Json(update): Json<PromptUpdate>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.prompt_update(&domain_id, id, update).await {
        Ok(prompt) => (StatusCode::OK, Json(prompt)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// DELETE /api/v1/domains/:domain_id/prompts/:id
pub async fn delete_prompt(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.prompt_delete(&domain_id, id).await {
        Ok(geloescht) => geloescht_antwort(geloescht, "Prompt"),
        Err(e) => db_fehler_antwort(e),
    }
}

// ---------------------------------------------------------------------------
// Trainingsbeispiele
// ---------------------------------------------------------------------------

/// GET /api/v1/domains/:domain_id/training-examples
pub async fn list_beispiele(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.beispiel_list(&domain_id).await {
        Ok(beispiele) => (StatusCode::OK, Json(beispiele)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct BeispielBody {
    pub question: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub tables: Vec<String>,
}

/// POST /api/v1/domains/:domain_id/training-examples
pub async fn create_beispiel(
    State(state): State<ApiState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<BeispielBody>,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state
        .db
        .beispiel_create(&domain_id, &body.question, &body.typ, &body.tables)
        .await
    {
        Ok(beispiel) => (StatusCode::CREATED, Json(beispiel)).into_response(),
        Err(e) => db_fehler_antwort(e),
    }
}

/// DELETE /api/v1/domains/:domain_id/training-examples/:id
pub async fn delete_beispiel(
    State(state): State<ApiState>,
    Path((domain_id, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    if let Err(antwort) = identitaet_ermitteln(&headers, &state).await {
        return antwort;
    }
    match state.db.beispiel_delete(&domain_id, id).await {
        Ok(geloescht) => geloescht_antwort(geloescht, "Trainingsbeispiel"),
        Err(e) => db_fehler_antwort(e),
    }
}
