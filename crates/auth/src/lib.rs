use argon2::Argon2;
use argon2::PasswordHasher;
use argon2::password_hash::{Error as PasswordHashError, SaltString};
use base64::Engine;
use chrono::Utc;
use common::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

/// Password assigned to admin-created accounts until the user resets it.
pub const DEFAULT_PASSWORD: &str = "Default@123";

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret.as_bytes()),
            dec: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String, // unique id to tie refresh tokens to DB records
}

/// Short-lived claims embedded in a password-reset link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
}

pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

pub fn new_jti() -> String {
    let mut bytes = [0u8; 16];
    thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub fn sign_access(
    keys: &JwtKeys,
    user_id: &str,
    role: Role,
    ttl_secs: i64,
) -> Result<String, AuthError> {
    let iat = now_ts();
    let claims = Claims {
        sub: user_id.into(),
        role,
        iat,
        exp: iat + ttl_secs,
        jti: new_jti(),
    };
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.enc)
        .map_err(|_| AuthError::InvalidToken)
}

pub fn sign_refresh(
    keys: &JwtKeys,
    user_id: &str,
    role: Role,
    ttl_secs: i64,
) -> Result<(String, Claims), AuthError> {
    let iat = now_ts();
    let claims = Claims {
        sub: user_id.into(),
        role,
        iat,
        exp: iat + ttl_secs,
        jti: new_jti(),
    };
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.enc)
        .map_err(|_| AuthError::InvalidToken)?;
    Ok((token, claims))
}

pub fn verify(keys: &JwtKeys, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    jsonwebtoken::decode::<Claims>(token, &keys.dec, &validation)
        .map(|d| d.claims)
        .map_err(|_| AuthError::InvalidToken)
}

/// Token carried by the reset link handed to the admin. One hour validity.
pub fn sign_reset(keys: &JwtKeys, user_id: &str, email: &str) -> Result<String, AuthError> {
    let iat = now_ts();
    let claims = ResetClaims {
        sub: user_id.into(),
        email: email.into(),
        iat,
        exp: iat + 3600,
    };
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.enc)
        .map_err(|_| AuthError::InvalidToken)
}

pub fn verify_reset(keys: &JwtKeys, token: &str) -> Result<ResetClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    jsonwebtoken::decode::<ResetClaims>(token, &keys.dec, &validation)
        .map(|d| d.claims)
        .map_err(|_| AuthError::InvalidToken)
}

pub fn hash_password(raw: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(raw.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

pub fn verify_password(raw: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    if let Ok(parsed) = PasswordHash::new(hash) {
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    } else {
        false
    }
}

pub fn sha256_hex(s: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_round_trips() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = sign_access(&keys, "user-1", Role::Vet, 60).unwrap();
        let claims = verify(&keys, &token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Vet);
    }

    #[test]
    fn expired_token_rejected() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = sign_access(&keys, "user-1", Role::Client, -120).unwrap();
        assert!(verify(&keys, &token).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let keys = JwtKeys::from_secret("test-secret");
        let other = JwtKeys::from_secret("other-secret");
        let token = sign_access(&keys, "user-1", Role::Client, 60).unwrap();
        assert!(verify(&other, &token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("supersecret").unwrap();
        assert!(verify_password("supersecret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("supersecret", "not-a-hash"));
    }

    #[test]
    fn reset_token_carries_email() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = sign_reset(&keys, "user-1", "a@b.com").unwrap();
        let claims = verify_reset(&keys, &token).unwrap();
        assert_eq!(claims.email, "a@b.com");
    }
}
