//! SQLite-Implementierung der Repository-Traits

mod benutzer;
mod dokumente;
mod domains;
mod kontext;
mod pool;
mod testfaelle;

pub use pool::SqliteDb;
