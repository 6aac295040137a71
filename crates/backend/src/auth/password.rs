//! Salted Argon2 password hashes in PHC string format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Argon2 hash with the default parameters that matches no password.
/// Signin checks against it when the username is unknown, so both failure
/// paths cost one Argon2 run.
pub const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$Y2FsZW5kYXItZHVtbXktcw$NklGcTRpHkMknyTpyO9CWvmIwAqcPy2e3f+kuATPjYY";

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Hash on the blocking pool. Argon2 is CPU-bound.
pub async fn hash_password_blocking(password: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(password: String, stored_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_unknown_user_hash_runs_argon2() {
        let parsed = PasswordHash::new(UNKNOWN_USER_HASH).unwrap();
        let fresh = hash_password("anything").unwrap();
        let fresh = PasswordHash::new(&fresh).unwrap();
        assert_eq!(parsed.algorithm.as_str(), fresh.algorithm.as_str());
        assert_eq!(parsed.params.as_str(), fresh.params.as_str());

        assert!(!verify_password("", UNKNOWN_USER_HASH));
        assert!(!verify_password("password", UNKNOWN_USER_HASH));
    }

    #[test]
    fn test_plain_text_is_not_a_hash() {
        assert!(!verify_password("hunter2", "hunter2"));
    }
}
