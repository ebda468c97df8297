//! pruefstand-api – REST-Interface fuer Pruefstand
//!
//! Axum-Router unter `/api/v1` plus Health- und Root-Endpunkt.
//! Alle geschuetzten Handler loesen zuerst die Identitaet ueber den
//! Auth-Service auf; erst danach passiert irgendein Datenzugriff.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use std::path::PathBuf;
use std::sync::Arc;

use pruefstand_auth::AuthService;
use pruefstand_core::Evaluator;
use pruefstand_db::SqliteDb;

/// Axum-State fuer den REST-Server
///
/// Alles Arc-geteilt: der State wird pro Request geklont.
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SqliteDb>,
    pub auth: Arc<AuthService<SqliteDb>>,
    pub evaluator: Arc<dyn Evaluator>,
    /// Basisverzeichnis fuer hochgeladene Dokumente
    pub upload_dir: PathBuf,
}

impl ApiState {
    pub fn neu(
        db: Arc<SqliteDb>,
        auth: Arc<AuthService<SqliteDb>>,
        evaluator: Arc<dyn Evaluator>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            auth,
            evaluator,
            upload_dir,
        }
    }
}

pub use routes::api_router;
pub use server::{RestServer, RestServerKonfig};
