//! REST-Handler, gruppiert nach Ressource

pub mod auth;
pub mod dashboard;
pub mod dokumente;
pub mod domains;
pub mod evaluation;
pub mod kontext;
