//! Gemeinsame Wertetypen fuer Pruefstand
//!
//! Der Pruefstatus und der Schwierigkeitsgrad werden von der DB-Schicht,
//! der Evaluations-Logik und der REST-API gleichermassen verwendet und
//! deshalb hier zentral definiert. Die Serialisierung entspricht dem
//! Wire-Format der API ("pass"/"fail"/"warn" bzw. "easy"/"medium"/"hard").

use serde::{Deserialize, Serialize};

/// Ergebnis-Status eines Testfalls nach einem Evaluationslauf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PruefStatus {
    #[serde(rename = "pass")]
    Bestanden,
    #[serde(rename = "fail")]
    Durchgefallen,
    #[serde(rename = "warn")]
    Warnung,
}

impl PruefStatus {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Bestanden => "pass",
            Self::Durchgefallen => "fail",
            Self::Warnung => "warn",
        }
    }

    /// Parst den Status aus seiner Wire-Darstellung
    pub fn aus_str(s: &str) -> Option<Self> {
        match s {
            "pass" => Some(Self::Bestanden),
            "fail" => Some(Self::Durchgefallen),
            "warn" => Some(Self::Warnung),
            _ => None,
        }
    }
}

impl std::fmt::Display for PruefStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_str())
    }
}

/// Schwierigkeitsgrad eines Testfalls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schwierigkeit {
    #[serde(rename = "easy")]
    Leicht,
    #[serde(rename = "medium")]
    Mittel,
    #[serde(rename = "hard")]
    Schwer,
}

impl Schwierigkeit {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Leicht => "easy",
            Self::Mittel => "medium",
            Self::Schwer => "hard",
        }
    }

    pub fn aus_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Leicht),
            "medium" => Some(Self::Mittel),
            "hard" => Some(Self::Schwer),
            _ => None,
        }
    }

    /// Anzeigename fuer das Dashboard ("Easy", "Medium", "Hard")
    pub fn anzeigename(&self) -> &'static str {
        match self {
            Self::Leicht => "Easy",
            Self::Mittel => "Medium",
            Self::Schwer => "Hard",
        }
    }
}

impl std::fmt::Display for Schwierigkeit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_str())
    }
}
