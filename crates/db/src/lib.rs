//! pruefstand-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit, das den
//! Dokumentenspeicher (SQLite) hinter einheitlichen Schnittstellen
//! abstrahiert. Der Auth-Service und die REST-Handler kennen nur die
//! Traits aus `repository`; die konkrete SQLite-Implementierung liegt
//! im `sqlite`-Modul.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use repository::{
    BenutzerRepository, DatabaseConfig, DokumentRepository, DomainRepository, KontextRepository,
    TestfallRepository,
};
pub use sqlite::SqliteDb;
