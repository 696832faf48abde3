use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// Errors raised while hashing passwords or handling tokens
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    PasswordHashingError(String),

    #[error("Token creation failed: {0}")]
    TokenCreationError(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims issued at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Password hashing and bearer token handling
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    /// Verified against on unknown-user logins so both failure paths cost one argon2 run
    dummy_hash: Option<String>,
}

const DUMMY_PASSWORD: &str = "pugorugh-no-such-user";

fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHashingError(e.to_string()))
}

impl AuthService {
    pub fn new(jwt_secret: &str, token_ttl_secs: u64) -> Self {
        let ttl_secs = token_ttl_secs.min(u64::from(u32::MAX)) as i64;

        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl: Duration::seconds(ttl_secs),
            dummy_hash: hash(DUMMY_PASSWORD)
                .map_err(|e| tracing::warn!("Could not prepare dummy password hash: {}", e))
                .ok(),
        }
    }

    /// Hash a password into an argon2 PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash(password)
    }

    /// Check a password against a stored hash; malformed hashes never verify
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one verification's worth of work for a login with no stored hash
    pub fn verify_without_user(&self, password: &str) {
        if let Some(hash) = &self.dummy_hash {
            self.verify_password(password, hash);
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.username.clone(),
            user_id: user.id,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(AuthError::TokenCreationError)
    }

    /// Validate signature and expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
