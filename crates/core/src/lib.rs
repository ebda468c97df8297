//! pruefstand-core – Gemeinsame Typen und Traits
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Pruefstand-Crates gemeinsam genutzt werden.

pub mod evaluator;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use evaluator::{Bewertung, Evaluator, ZufallsEvaluator};
pub use types::{PruefStatus, Schwierigkeit};
