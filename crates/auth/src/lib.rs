//! Authentifizierung fuer Pruefstand
//!
//! E-Mail/Passwort-Registrierung, Login und zustandslose Bearer-Tokens.
//!
//! - Passwort-Hashing mit Argon2id (OWASP-Parameter)
//! - Signierte, zeitlich begrenzte Session-Tokens (JWT, HS256)
//! - AuthService als zentraler Einstiegspunkt ueber dem Benutzer-Repository

pub mod email;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use email::email_gueltig;
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::{AuthService, Identitaet, TokenAntwort};
pub use token::{Claims, TokenDienst, STANDARD_TTL_MINUTEN};
