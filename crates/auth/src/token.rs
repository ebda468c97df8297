//! Signierte Session-Tokens fuer Pruefstand
//!
//! Zustandslose, zeitlich begrenzte Bearer-Tokens (JWT, HS256).
//! Ausstellung und Pruefung passieren in derselben Vertrauensdomaene,
//! deshalb reicht ein symmetrisches Server-Geheimnis.
//!
//! Es gibt keinen Widerruf: ein Token bleibt bis zu seinem natuerlichen
//! Ablauf gueltig, auch wenn der Account danach deaktiviert wird. Wer
//! Widerruf braucht, muss eine serverseitige Denylist ergaenzen oder auf
//! kurze TTLs mit Refresh-Flow wechseln.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Standard-Lebensdauer eines Session-Tokens: 30 Minuten
pub const STANDARD_TTL_MINUTEN: i64 = 30;

/// Claims eines Session-Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subjekt: die E-Mail des Benutzers
    pub sub: String,
    /// Absoluter Ablaufzeitpunkt (Unix-Sekunden)
    pub exp: i64,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
}

/// Dienst zum Ausstellen und Pruefen von Session-Tokens
pub struct TokenDienst {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenDienst {
    /// Erstellt einen neuen TokenDienst mit dem gegebenen Geheimnis und TTL
    pub fn neu(geheimnis: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding_key: DecodingKey::from_secret(geheimnis.as_bytes()),
            ttl,
        }
    }

    /// Erstellt einen TokenDienst mit der Standard-TTL (30 Minuten)
    pub fn mit_standard_ttl(geheimnis: &str) -> Self {
        Self::neu(geheimnis, Duration::minutes(STANDARD_TTL_MINUTEN))
    }

    /// Stellt ein signiertes Token fuer das gegebene Subjekt aus
    ///
    /// Der Ablauf ist absolut: jetzt + TTL. Die TTL ist pro Deployment
    /// fest und nicht pro Ausstellung waehlbar.
    pub fn ausstellen(&self, subjekt: &str) -> Result<String, AuthError> {
        let jetzt = Utc::now();
        let claims = Claims {
            sub: subjekt.to_string(),
            exp: (jetzt + self.ttl).timestamp(),
            iat: jetzt.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenAusstellung(e.to_string()))
    }

    /// Prueft Signatur und Ablauf eines Tokens und gibt das Subjekt zurueck
    ///
    /// Unterscheidet intern drei Fehlerarten (fuers Logging); nach aussen
    /// muessen alle drei auf dieselbe generische 401-Antwort abgebildet
    /// werden, damit kein Orakel entsteht.
    pub fn validieren(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Kein Schlupf: abgelaufen ist abgelaufen
        validation.leeway = 0;

        let daten = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenAbgelaufen,
                ErrorKind::InvalidSignature => AuthError::TokenManipuliert,
                _ => AuthError::TokenMissgebildet,
            }
        })?;

        Ok(daten.claims.sub)
    }
}
