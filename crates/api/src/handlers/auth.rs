//! REST-Handler fuer Signup, Login und /me

use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::middleware::{auth_fehler_antwort, identitaet_ermitteln};
use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(State(state): State<ApiState>, Json(body): Json<SignupBody>) -> Response {
    match state.auth.registrieren(&body.email, &body.password).await {
        Ok(identitaet) => (StatusCode::CREATED, Json(identitaet)).into_response(),
        Err(e) => auth_fehler_antwort(e),
    }
}

/// Login-Formular im OAuth2-Password-Stil: das Feld heisst `username`,
/// enthaelt aber die E-Mail-Adresse
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/login (form-encoded)
pub async fn login(State(state): State<ApiState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth.anmelden(&form.username, &form.password).await {
        Ok(antwort) => (StatusCode::OK, Json(antwort)).into_response(),
        Err(e) => auth_fehler_antwort(e),
    }
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    match identitaet_ermitteln(&headers, &state).await {
        Ok(identitaet) => (StatusCode::OK, Json(identitaet)).into_response(),
        Err(antwort) => antwort,
    }
}
