//! pruefstand-server – Bibliotheks-Root
//!
//! Verdrahtet Datenbank, Auth-Service und REST-API zum lauffaehigen
//! Server. Der oeffentliche Einstiegspunkt dient auch Integrationstests.

pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use pruefstand_api::{ApiState, RestServer, RestServerKonfig};
use pruefstand_auth::{AuthService, TokenDienst};
use pruefstand_core::ZufallsEvaluator;
use pruefstand_db::{
    models::DomainRecord, repository::DatabaseConfig, DomainRepository, SqliteDb,
};

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen + Migrationen
    /// 2. Standard-Domain seeden falls noch keine existiert
    /// 3. Auth-Service und API-State aufbauen
    /// 4. REST-API starten
    /// 5. Auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        tracing::info!(
            server_name = %self.config.server.name,
            api = %self.config.api_bind_adresse(),
            "Server startet"
        );

        if self.config.hat_unsicheres_geheimnis() {
            tracing::warn!(
                "Unsicheres Standard-JWT-Geheimnis aktiv; fuer den Betrieb \
                 [auth].jwt_secret setzen oder PRUEFSTAND_JWT_SECRET exportieren"
            );
        }

        let db = Arc::new(
            SqliteDb::oeffnen(&DatabaseConfig {
                url: self.config.datenbank.url.clone(),
                max_verbindungen: self.config.datenbank.max_verbindungen,
                sqlite_wal: self.config.datenbank.sqlite_wal,
            })
            .await?,
        );

        standard_domain_seeden(db.as_ref()).await;

        let token_dienst = TokenDienst::neu(
            &self.config.auth.jwt_secret,
            chrono::Duration::minutes(self.config.auth.token_ttl_minuten),
        );
        let auth = Arc::new(AuthService::neu(Arc::clone(&db), token_dienst));

        let state = ApiState::neu(
            db,
            auth,
            Arc::new(ZufallsEvaluator),
            PathBuf::from(&self.config.uploads.verzeichnis),
        );

        let rest = RestServer::neu(RestServerKonfig {
            bind_addr: self.config.api_bind_adresse().parse()?,
            cors_origins: self.config.netzwerk.cors_origins.clone(),
        });

        tokio::select! {
            ergebnis = rest.starten(state) => {
                ergebnis?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            }
        }

        Ok(())
    }
}

/// Legt die Standard-Domain "maps" an wenn noch keine Domain existiert
///
/// Fehler beim Seeden sind nicht fatal; der Server startet trotzdem.
async fn standard_domain_seeden(db: &SqliteDb) {
    let domains = match DomainRepository::list(db).await {
        Ok(domains) => domains,
        Err(e) => {
            tracing::warn!(fehler = %e, "Domain-Liste fuer das Seeding nicht lesbar");
            return;
        }
    };
    if !domains.is_empty() {
        return;
    }

    let standard = DomainRecord {
        id: "maps".into(),
        alias: "Advertising Insights".into(),
        description: "Commercial Aviation Mobility Advertising Platform Services".into(),
        dialect: "Snowflake".into(),
        secret: "snowflake".into(),
        schema_name: "maps.derived".into(),
        retriever_top_k: 10,
        is_active: true,
    };

    match DomainRepository::create(db, &standard).await {
        Ok(_) => tracing::info!(domain_id = "maps", "Standard-Domain angelegt"),
        Err(e) => tracing::warn!(fehler = %e, "Standard-Domain nicht anlegbar"),
    }
}
