//! Evaluator-Schnittstelle fuer Pruefstand
//!
//! Die eigentliche Bewertung von Agenten-Antworten ist austauschbar:
//! der Server kennt nur diesen Trait. Mitgeliefert wird ein
//! Demo-Evaluator der zufaellige Ergebnisse erzeugt – eine echte
//! Scoring-Engine kann ihn ersetzen ohne dass sich am Server etwas
//! aendert.

use serde::{Deserialize, Serialize};

use crate::types::PruefStatus;

/// Ergebnis einer einzelnen Bewertung
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bewertung {
    /// Ergebnis-Status (pass/fail/warn)
    pub status: PruefStatus,
    /// Begruendung der Entscheidung
    pub begruendung: String,
    /// Konfidenz der Bewertung (0.0 bis 1.0)
    pub konfidenz: f64,
}

/// Austauschbare Bewertungs-Engine
///
/// Implementierungen muessen `Send + Sync` sein, da der Evaluator
/// prozessweit geteilt und aus beliebigen Request-Handlern aufgerufen wird.
pub trait Evaluator: Send + Sync {
    /// Bewertet eine Kandidaten-Antwort gegen die Ground Truth
    fn bewerten(&self, frage: &str, ground_truth: &str, kandidat: &str) -> Bewertung;
}

/// Demo-Evaluator mit zufaelligen Ergebnissen
///
/// Kein echtes Scoring – dient nur dazu, die Evaluations-Pipeline
/// durchgaengig testbar zu machen, bis eine echte Engine angebunden ist.
#[derive(Debug, Default)]
pub struct ZufallsEvaluator;

impl Evaluator for ZufallsEvaluator {
    fn bewerten(&self, _frage: &str, _ground_truth: &str, _kandidat: &str) -> Bewertung {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let status = match rng.gen_range(0..3) {
            0 => PruefStatus::Bestanden,
            1 => PruefStatus::Durchgefallen,
            _ => PruefStatus::Warnung,
        };

        Bewertung {
            status,
            begruendung: "Zufallsbewertung (Demo-Evaluator)".into(),
            konfidenz: rng.gen_range(0.5..1.0),
        }
    }
}
