//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use crate::AuthError;

const PHC_PREFIX: &str = "$argon2";

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a stored secret.
///
/// PHC strings are verified with argon2. Anything else is a legacy plaintext
/// value, compared only when `allow_plaintext` is set.
pub fn verify_password(password: &str, stored: &str, allow_plaintext: bool) -> bool {
    if stored.starts_with(PHC_PREFIX) {
        return match PasswordHash::new(stored) {
            Ok(hash) => Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok(),
            Err(err) => {
                warn!(error = %err, "stored password hash is malformed");
                false
            }
        };
    }

    if !allow_plaintext {
        warn!("plaintext password stored but legacy plaintext login is disabled");
        return false;
    }

    let matched = constant_time_eq(password.as_bytes(), stored.as_bytes());
    if matched {
        warn!("verified legacy plaintext password; rehash with `portal-server hash-password`");
    }
    matched
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
