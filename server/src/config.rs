//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Das JWT-Geheimnis kann zusaetzlich per
//! `PRUEFSTAND_JWT_SECRET` ueberschrieben werden.

use serde::{Deserialize, Serialize};

/// Unsicheres Standard-Geheimnis – nur fuer die lokale Entwicklung.
/// Der Server warnt beim Start wenn es nicht ersetzt wurde.
pub const UNSICHERES_STANDARD_GEHEIMNIS: &str = "pruefstand-dev-geheimnis-bitte-ersetzen";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Auth-Einstellungen (Token-Geheimnis und -Lebensdauer)
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Upload-Einstellungen
    pub uploads: UploadEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Pruefstand Server".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub api_port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            api_port: 8000,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://pruefstand.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Geheimnis fuer die Token-Signatur (HS256)
    pub jwt_secret: String,
    /// Token-Lebensdauer in Minuten
    pub token_ttl_minuten: i64,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            jwt_secret: UNSICHERES_STANDARD_GEHEIMNIS.into(),
            token_ttl_minuten: pruefstand_auth::STANDARD_TTL_MINUTEN,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Upload-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadEinstellungen {
    /// Basisverzeichnis fuer hochgeladene Dokumente
    pub verzeichnis: String,
}

impl Default for UploadEinstellungen {
    fn default() -> Self {
        Self {
            verzeichnis: "uploads".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    /// `PRUEFSTAND_JWT_SECRET` ueberschreibt das Geheimnis aus der Datei.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };

        if let Ok(geheimnis) = std::env::var("PRUEFSTAND_JWT_SECRET") {
            if !geheimnis.is_empty() {
                config.auth.jwt_secret = geheimnis;
            }
        }

        Ok(config)
    }

    /// Gibt die Bind-Adresse fuer die REST-API zurueck
    pub fn api_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.api_port)
    }

    /// Gibt true zurueck wenn noch das unsichere Standard-Geheimnis aktiv ist
    pub fn hat_unsicheres_geheimnis(&self) -> bool {
        self.auth.jwt_secret == UNSICHERES_STANDARD_GEHEIMNIS
    }
}
