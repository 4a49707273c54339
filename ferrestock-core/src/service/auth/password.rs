use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};
use tokio::task;

use crate::{Error, Result};

/// Argon2id, 19 MiB memory, 2 passes, 1 lane (OWASP minimum profile)
fn hasher() -> Result<Argon2<'static>> {
    let params = ParamsBuilder::new()
        .m_cost(19 * 1024)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| Error::Internal(format!("Failed to build Argon2 params: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a self-describing PHC string
///
/// The salt is generated here from the OS RNG; callers never manage it.
/// Runs on a blocking thread.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();

    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Internal(format!("Failed to hash password: {e}")))
    })
    .await
    .map_err(|e| Error::Internal(format!("Password hashing task failed: {e}")))?
}

/// Verify a password against a stored PHC hash
///
/// A mismatch is `Ok(false)`; a malformed hash is an error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash)
            .map_err(|e| Error::Internal(format!("Invalid password hash format: {e}")))?;

        // Parameters come from the PHC string, not from `hasher()`
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Internal(format!("Password verification failed: {e}"))),
        }
    })
    .await
    .map_err(|e| Error::Internal(format!("Password verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_argon2id_phc() {
        let hash = hash_password("123456").await.unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(!hash.contains("123456"));
    }

    #[tokio::test]
    async fn test_verify_accepts_hashed_password() {
        let hash = hash_password("123456").await.unwrap();
        assert!(verify_password("123456", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_other_password() {
        let hash = hash_password("123456").await.unwrap();
        assert!(!verify_password("1234567", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let first = hash_password("123456").await.unwrap();
        let second = hash_password("123456").await.unwrap();

        assert_ne!(first, second);
        assert!(verify_password("123456", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        let err = verify_password("123456", "123456").await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
