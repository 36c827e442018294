use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

/// PHC string with the same cost parameters as [`hasher`]; it matches no real password.
/// Checked instead of a stored hash when no account exists, so a miss costs a full verify.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

fn hash_failure(stage: &'static str) -> impl Fn(password_hash::Error) -> anyhow::Error {
    move |e| {
        error!(error = %e, stage, "argon2 failure");
        anyhow::anyhow!("argon2 {stage}: {e}")
    }
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(hash_failure("hash"))
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a PHC string.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let stored = PasswordHash::new(hash).map_err(hash_failure("parse"))?;
    match hasher().verify_password(plain.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(hash_failure("verify")(e)),
    }
}

/// Spends one verification on [`DECOY_HASH`]; the outcome is always a mismatch.
pub fn verify_against_decoy(plain: &str) {
    if let Err(e) = verify_password(plain, DECOY_HASH) {
        error!(error = %e, "decoy verification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("secret1").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_other_strings() {
        let hash = hash_password("secret1").expect("hashing should succeed");
        for other in ["secret2", "Secret1", "secret1 ", ""] {
            assert!(!verify_password(other, &hash).expect("verify should not error"));
        }
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("secret1"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(err.to_string().starts_with("argon2 parse"));
    }

    #[test]
    fn decoy_hash_parses_with_current_cost() {
        let decoy = PasswordHash::new(DECOY_HASH).expect("decoy is a PHC string");
        let real = hash_password("secret1").unwrap();
        let real = PasswordHash::new(&real).unwrap();
        assert_eq!(decoy.algorithm, real.algorithm);
        assert_eq!(decoy.params, real.params);
        assert!(!verify_password("secret1", DECOY_HASH).expect("decoy verifies"));
    }
}
