use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::LazyLock;
use thiserror::Error;

static CONTEXT: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::DEFAULT,
    )
});

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

pub fn hash(password: impl AsRef<[u8]>) -> Result<String, HashPasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = CONTEXT
        .hash_password(password.as_ref(), &salt)
        .map_err(|_| HashPasswordError)?;

    Ok(password_hash.to_string())
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

pub fn verify(password: &[u8], hash: &str) -> Result<bool, VerifyPasswordError> {
    let hash = PasswordHash::new(hash).map_err(|_| VerifyPasswordError)?;

    match CONTEXT.verify_password(password, &hash) {
        Ok(..) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(..) => Err(VerifyPasswordError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_right_password_only() {
        let hash = hash("correct horse").unwrap();
        assert!(verify(b"correct horse", &hash).unwrap());
        assert!(!verify(b"battery staple", &hash).unwrap());
    }
}
