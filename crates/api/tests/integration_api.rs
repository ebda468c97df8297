//! Integrationstests fuer die REST-API gegen eine In-Memory-Datenbank
//!
//! Die Requests laufen per `tower::ServiceExt::oneshot` direkt gegen den
//! Router, ohne echten Listener.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pruefstand_api::{api_router, ApiState};
use pruefstand_auth::{AuthService, TokenDienst};
use pruefstand_core::{Bewertung, Evaluator, PruefStatus};
use pruefstand_db::SqliteDb;

/// Evaluator mit festem Ergebnis, damit die Tests deterministisch sind
struct FesterEvaluator(PruefStatus);

impl Evaluator for FesterEvaluator {
    fn bewerten(&self, _frage: &str, _ground_truth: &str, _kandidat: &str) -> Bewertung {
        Bewertung {
            status: self.0,
            begruendung: "fest".into(),
            konfidenz: 1.0,
        }
    }
}

async fn test_app(evaluator: Arc<dyn Evaluator>) -> (Router, tempfile::TempDir) {
    let db = Arc::new(
        SqliteDb::in_memory()
            .await
            .expect("In-Memory-DB nicht erstellbar"),
    );
    let auth = Arc::new(AuthService::neu(
        Arc::clone(&db),
        TokenDienst::mit_standard_ttl("test-geheimnis"),
    ));
    let upload_dir = tempfile::tempdir().expect("Temp-Verzeichnis nicht erstellbar");
    let state = ApiState::neu(db, auth, evaluator, upload_dir.path().to_path_buf());
    (api_router().with_state(state), upload_dir)
}

async fn app() -> (Router, tempfile::TempDir) {
    test_app(Arc::new(FesterEvaluator(PruefStatus::Bestanden))).await
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body nicht lesbar")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Antwort ist kein JSON")
}

fn json_request(methode: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(methode)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Request nicht baubar")
}

fn auth_json_request(methode: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(methode)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("Request nicht baubar")
}

fn auth_request(methode: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(methode)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("Request nicht baubar")
}

/// Registriert einen Benutzer und gibt sein Access-Token zurueck
async fn einloggen(app: &Router) -> String {
    let antwort = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            json!({ "email": "tester@example.com", "password": "passwort1" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);

    let antwort = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=tester%40example.com&password=passwort1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);

    let body = json_body(antwort).await;
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

/// Legt eine Domain an und gibt ihre ID zurueck
async fn domain_anlegen(app: &Router, token: &str, id: &str) {
    let antwort = app
        .clone()
        .oneshot(auth_json_request(
            "POST",
            "/api/v1/domains",
            token,
            json!({
                "id": id,
                "alias": format!("Agent {id}"),
                "description": "Testdomain",
                "dialect": "PostgreSQL",
                "secret": "geheim",
                "schema_name": "public"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn healthz_ist_offen() {
    let (app, _dir) = app().await;
    let antwort = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    assert_eq!(json_body(antwort).await["status"], "ok");
}

#[tokio::test]
async fn signup_login_me_ablauf() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;

    let antwort = app
        .clone()
        .oneshot(auth_request("GET", "/api/v1/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);

    let body = json_body(antwort).await;
    assert_eq!(body["email"], "tester@example.com");
    // Der Hash darf die API niemals verlassen
    assert!(body.get("password_hash").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn doppelter_signup_gibt_400() {
    let (app, _dir) = app().await;
    einloggen(&app).await;

    let antwort = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            json!({ "email": "tester@example.com", "password": "anderes_pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_fehler_sind_ununterscheidbar() {
    let (app, _dir) = app().await;
    einloggen(&app).await;

    let falsches_pw = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=tester%40example.com&password=falsch123"))
                .unwrap(),
        )
        .await
        .unwrap();
    let unbekannt = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=niemand%40example.com&password=egal1234"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(falsches_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unbekannt.status(), StatusCode::UNAUTHORIZED);

    let body_a = json_body(falsches_pw).await;
    let body_b = json_body(unbekannt).await;
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn geschuetzte_route_ohne_token_gibt_401_mit_header() {
    let (app, _dir) = app().await;
    let antwort = app
        .oneshot(Request::get("/api/v1/domains").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        antwort
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn kaputtes_token_gibt_401() {
    let (app, _dir) = app().await;
    let antwort = app
        .oneshot(auth_request("GET", "/api/v1/auth/me", "kein.echtes.token"))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn domain_anlegen_und_lesen() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let antwort = app
        .clone()
        .oneshot(auth_request("GET", "/api/v1/domains/maps", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = json_body(antwort).await;
    assert_eq!(body["id"], "maps");
    assert_eq!(body["retriever_top_k"], 10);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn doppelte_domain_gibt_409() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let antwort = app
        .oneshot(auth_json_request(
            "POST",
            "/api/v1/domains",
            &token,
            json!({
                "id": "maps",
                "alias": "Doppelt",
                "description": "",
                "dialect": "PostgreSQL",
                "secret": "",
                "schema_name": ""
            }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn domain_teilupdate() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let antwort = app
        .clone()
        .oneshot(auth_json_request(
            "PUT",
            "/api/v1/domains/maps",
            &token,
            json!({ "alias": "Karten-Agent" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = json_body(antwort).await;
    assert_eq!(body["alias"], "Karten-Agent");
    // Nicht gesetzte Felder bleiben unveraendert
    assert_eq!(body["dialect"], "PostgreSQL");

    // Leeres Update wird abgelehnt
    let antwort = app
        .oneshot(auth_json_request(
            "PUT",
            "/api/v1/domains/maps",
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unbekannte_domain_gibt_404() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;

    let antwort = app
        .oneshot(auth_request("GET", "/api/v1/domains/fehlt", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn prompt_lebenszyklus() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let antwort = app
        .clone()
        .oneshot(auth_json_request(
            "POST",
            "/api/v1/domains/maps/prompts",
            &token,
            json!({ "key": "system", "type": "system", "content": "Du bist ein SQL-Agent." }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);
    let prompt = json_body(antwort).await;
    let prompt_id = prompt["id"].as_str().unwrap().to_string();
    assert_eq!(prompt["type"], "system");

    // Teilupdate nur am Content
    let antwort = app
        .clone()
        .oneshot(auth_json_request(
            "PUT",
            &format!("/api/v1/domains/maps/prompts/{prompt_id}"),
            &token,
            json!({ "content": "Neuer Inhalt" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = json_body(antwort).await;
    assert_eq!(body["content"], "Neuer Inhalt");
    assert_eq!(body["key"], "system");

    // Loeschen, danach 404
    let antwort = app
        .clone()
        .oneshot(auth_request(
            "DELETE",
            &format!("/api/v1/domains/maps/prompts/{prompt_id}"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);

    let antwort = app
        .oneshot(auth_request(
            "DELETE",
            &format!("/api/v1/domains/maps/prompts/{prompt_id}"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn run_eval_setzt_status_und_braucht_testfaelle() {
    let (app, _dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    // Ohne Testfaelle: 400
    let antwort = app
        .clone()
        .oneshot(auth_request("POST", "/api/v1/domains/maps/run-eval", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);

    // Zwei Testfaelle anlegen
    for frage in ["Wie viele Nutzer?", "Umsatz pro Monat?"] {
        let antwort = app
            .clone()
            .oneshot(auth_json_request(
                "POST",
                "/api/v1/domains/maps/test-sets",
                &token,
                json!({ "question": frage, "ground_truth": "SELECT ...", "difficulty": "easy" }),
            ))
            .await
            .unwrap();
        assert_eq!(antwort.status(), StatusCode::CREATED);
        let body = json_body(antwort).await;
        assert!(body["last_status"].is_null());
    }

    // Lauf: der feste Evaluator setzt alles auf "pass"
    let antwort = app
        .clone()
        .oneshot(auth_request("POST", "/api/v1/domains/maps/run-eval", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = json_body(antwort).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["test_sets_evaluated"], 2);

    let antwort = app
        .clone()
        .oneshot(auth_request("GET", "/api/v1/domains/maps/test-sets", &token))
        .await
        .unwrap();
    let body = json_body(antwort).await;
    for testfall in body.as_array().unwrap() {
        assert_eq!(testfall["last_status"], "pass");
    }

    // Metriken: alles bestanden
    let antwort = app
        .oneshot(auth_request("GET", "/api/v1/domains/maps/metrics", &token))
        .await
        .unwrap();
    let body = json_body(antwort).await;
    assert_eq!(body["pass_rate"], 100.0);
    assert_eq!(body["hallucination_rate"], 0.0);
}

#[tokio::test]
async fn dashboard_meldet_hochrisiko_domain() {
    // Evaluator der alles durchfallen laesst
    let (app, _dir) = test_app(Arc::new(FesterEvaluator(PruefStatus::Durchgefallen))).await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let antwort = app
        .clone()
        .oneshot(auth_json_request(
            "POST",
            "/api/v1/domains/maps/test-sets",
            &token,
            json!({ "question": "F?", "ground_truth": "42", "difficulty": "hard" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);

    let antwort = app
        .clone()
        .oneshot(auth_request("POST", "/api/v1/domains/maps/run-eval", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);

    let antwort = app
        .clone()
        .oneshot(auth_request("GET", "/api/v1/dashboard/stats", &token))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = json_body(antwort).await;
    assert_eq!(body["total_agents"], 1);
    assert_eq!(body["active_agents"], 1);
    assert_eq!(body["pass_rate"], 0.0);
    assert_eq!(body["high_risk_agents"], 1);

    let antwort = app
        .clone()
        .oneshot(auth_request("GET", "/api/v1/dashboard/high-risk-agents", &token))
        .await
        .unwrap();
    let body = json_body(antwort).await;
    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["id"], "maps");
    assert_eq!(agents[0]["risk"], "High");

    let antwort = app
        .oneshot(auth_request(
            "GET",
            "/api/v1/dashboard/recent-evaluations?limit=5",
            &token,
        ))
        .await
        .unwrap();
    let body = json_body(antwort).await;
    let evaluations = body.as_array().unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0]["name"], "Agent maps");
    assert_eq!(evaluations[0]["status"], "Failed");
}

#[tokio::test]
async fn dokument_upload_und_loeschen() {
    let (app, upload_dir) = app().await;
    let token = einloggen(&app).await;
    domain_anlegen(&app, &token, "maps").await;

    let grenze = "test-grenze";
    let inhalt = format!(
        "--{grenze}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"schema.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         CREATE TABLE nutzer (id INTEGER);\r\n\
         --{grenze}--\r\n"
    );

    let antwort = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/domains/maps/documents")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={grenze}"),
                )
                .body(Body::from(inhalt))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);
    let body = json_body(antwort).await;
    let dokument_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["filename"], "schema.txt");

    // Datei liegt auf der Platte
    let pfad = upload_dir.path().join("maps").join("schema.txt");
    assert!(pfad.exists());

    let antwort = app
        .clone()
        .oneshot(auth_request(
            "DELETE",
            &format!("/api/v1/domains/maps/documents/{dokument_id}"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    assert!(!pfad.exists());

    // Liste ist danach leer
    let antwort = app
        .oneshot(auth_request("GET", "/api/v1/domains/maps/documents", &token))
        .await
        .unwrap();
    let body = json_body(antwort).await;
    assert!(body.as_array().unwrap().is_empty());
}
