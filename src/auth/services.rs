use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::error;

use super::{
    dto::{AuthResponse, PublicUser},
    jwt::JwtKeys,
    repo_types::User,
};

pub const MIN_PASSWORD_LEN: usize = 8;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref NET_ID_RE: Regex = Regex::new(r"^[a-z0-9_]{2,50}$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Campus identifiers are lowercase alphanumerics (plus `_`).
pub(crate) fn is_valid_net_id(net_id: &str) -> bool {
    NET_ID_RE.is_match(net_id)
}

pub(crate) fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Signs a fresh access/refresh pair for `user`.
pub fn issue_tokens(keys: &JwtKeys, user: User) -> anyhow::Result<AuthResponse> {
    Ok(AuthResponse {
        access_token: keys.sign_access(user.id)?,
        refresh_token: keys.sign_refresh(user.id)?,
        user: PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn email_and_net_id_rules() {
        assert!(is_valid_email("jdoe2@illinois.edu"));
        assert!(!is_valid_email("jdoe2@illinois"));
        assert!(!is_valid_email("j doe@illinois.edu"));

        assert!(is_valid_net_id("jdoe2"));
        assert!(is_valid_net_id(&normalize("  JDoe2 ")));
        assert!(!is_valid_net_id("j"));
        assert!(!is_valid_net_id("jdoe@illinois"));
    }
}
