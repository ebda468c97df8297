//! Passwort-Hashing mit Argon2id
//!
//! Stellt sichere Passwort-Hashfunktionen mit Argon2id bereit.
//! Argon2id ist der empfohlene Algorithmus gemaess OWASP-Richtlinien.
//!
//! Die Verifikation ist bewusst ein reines bool: ein missgebildeter Hash
//! oder ein interner Fehler ist fuer den Aufrufer ununterscheidbar von
//! einem falschen Passwort.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id-Parameter fuer sicheres Passwort-Hashing
///
/// Werte gemaess OWASP-Empfehlungen (Stand 2024):
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
fn argon2_instanz() -> Argon2<'static> {
    let params = Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .expect("Argon2-Parameter ungueltig");

    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hasht ein Passwort mit Argon2id und einem frischen zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt);
/// der Salt muss deshalb nirgends separat gespeichert werden.
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_instanz();

    argon2
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Gibt `true` nur zurueck wenn das Passwort korrekt ist. Missgebildete
/// Hashes und interne Fehler ergeben `false`, niemals einen Fehler –
/// Aufrufer koennen die Faelle nicht unterscheiden.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    argon2_instanz()
        .verify_password(passwort.as_bytes(), &parsed_hash)
        .is_ok()
}

/// PHC-Digest ohne zugehoeriges Passwort, dieselben Parameter wie
/// [`argon2_instanz`]. Nur fuer [`blind_verifizieren`].
const BLIND_DIGEST: &str =
    "$argon2id$v=19$m=65536,t=3,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Verifiziert gegen einen festen Digest ohne bekanntes Passwort
///
/// Haelt den Login-Aufwand bei unbekannter E-Mail mit dem eines falschen
/// Passworts vergleichbar. Das Ergebnis ist immer `false` und wird
/// verworfen.
pub fn blind_verifizieren(passwort: &str) {
    let _ = passwort_verifizieren(passwort, BLIND_DIGEST);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let passwort = "sicheres_passwort_123!";
        let hash = passwort_hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(!hash.is_empty());
        assert!(
            hash.starts_with("$argon2id$"),
            "Hash muss mit $argon2id$ beginnen"
        );

        assert!(
            passwort_verifizieren(passwort, &hash),
            "Passwort muss korrekt verifiziert werden"
        );
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hash = passwort_hashen("richtiges_passwort").expect("Hashing fehlgeschlagen");
        assert!(!passwort_verifizieren("falsches_passwort", &hash));
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let passwort = "gleiches_passwort";
        let hash1 = passwort_hashen(passwort).expect("Hashing 1 fehlgeschlagen");
        let hash2 = passwort_hashen(passwort).expect("Hashing 2 fehlgeschlagen");

        assert_ne!(
            hash1, hash2,
            "Gleiche Passwoerter muessen verschiedene Hashes erzeugen (Salt)"
        );

        // Beide Hashes verifizieren trotzdem gegen das Passwort
        assert!(passwort_verifizieren(passwort, &hash1));
        assert!(passwort_verifizieren(passwort, &hash2));
    }

    #[test]
    fn ungueltiges_hash_format_gibt_false() {
        assert!(!passwort_verifizieren("passwort", "kein_gueltiger_hash"));
        assert!(!passwort_verifizieren("passwort", ""));
    }

    #[test]
    fn blind_digest_ist_wohlgeformt() {
        // Der Digest muss als PHC-String parsen, sonst kaeme
        // passwort_verifizieren vor der Argon2-Berechnung zurueck
        assert!(PasswordHash::new(BLIND_DIGEST).is_ok());
    }

    #[test]
    fn blinde_verifikation_akzeptiert_nie() {
        assert!(!passwort_verifizieren("irgendein_passwort", BLIND_DIGEST));
        assert!(!passwort_verifizieren("", BLIND_DIGEST));
    }
}
