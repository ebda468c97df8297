//! Syntaktische E-Mail-Pruefung
//!
//! Bewusst nur eine RFC-5322-nahe Plausibilitaetspruefung, keine
//! vollstaendige Grammatik: genau ein '@', nicht-leerer Local-Part,
//! Domain mit Punkt. Die Pruefung laeuft vor jedem Directory-Zugriff.

/// Maximale Gesamtlaenge einer Adresse
const MAX_LAENGE: usize = 254;

/// Maximale Laenge des Local-Parts
const MAX_LOCAL: usize = 64;

/// Gibt true zurueck wenn die Adresse syntaktisch plausibel ist
pub fn email_gueltig(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_LAENGE {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    // Genau ein '@'
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > MAX_LOCAL {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gueltige_adressen() {
        for adresse in [
            "a@x.com",
            "alice@example.com",
            "alice.b+tag@sub.example.co.uk",
            "ALICE@EXAMPLE.COM",
        ] {
            assert!(email_gueltig(adresse), "'{adresse}' sollte gueltig sein");
        }
    }

    #[test]
    fn ungueltige_adressen() {
        for adresse in [
            "",
            "ohne-at",
            "@example.com",
            "alice@",
            "alice@@example.com",
            "a@b@c.com",
            "alice@example",
            "alice @example.com",
            "alice@.example.com",
            "alice@example.com.",
            ".alice@example.com",
            "al..ice@example.com",
        ] {
            assert!(!email_gueltig(adresse), "'{adresse}' sollte ungueltig sein");
        }
    }

    #[test]
    fn ueberlange_adresse_abgelehnt() {
        let lang = format!("{}@example.com", "a".repeat(300));
        assert!(!email_gueltig(&lang));

        let local_zu_lang = format!("{}@example.com", "a".repeat(65));
        assert!(!email_gueltig(&local_zu_lang));
    }
}
