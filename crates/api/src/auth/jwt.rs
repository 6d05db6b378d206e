//! Session tokens for the portal.
//!
//! A login yields a short-lived HS256 access token that carries the user's
//! single role, plus an opaque refresh token. Refresh tokens are stored in
//! `user_sessions` only as a SHA-256 digest and rotate on every use.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as TokenError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use studiodesk_core::roles::is_known_role;
use studiodesk_core::types::DbId;
use uuid::Uuid;

/// `iss` claim stamped on every access token; tokens from anywhere else are refused.
pub const TOKEN_ISSUER: &str = "studiodesk";

const REFRESH_TOKEN_LEN: usize = 48;

/// Access-token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Role held when the token was issued. A role change takes effect on the
    /// next refresh.
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    /// Per-token id, so two tokens minted in the same second still differ.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    /// Lifetime of a refresh session, counted from the login or last rotation.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (default 15), and
    /// `JWT_REFRESH_EXPIRY_DAYS` (default 7).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or a lifetime is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: positive_env("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: positive_env("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

fn positive_env(name: &str, default: i64) -> i64 {
    let value = match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be an integer, got {raw:?}")),
        Err(_) => default,
    };
    assert!(value > 0, "{name} must be positive");
    value
}

/// Sign an access token for `user_id` holding `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let issued_at = Utc::now();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        exp: (issued_at + config.access_ttl()).timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry, and issuer, and check the role is one the portal
/// knows.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?
    .claims;

    if !is_known_role(&claims.role) {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

/// Mint a refresh token. Returns `(plaintext, sha256_hex)`; only the digest is
/// persisted, the plaintext goes to the client once.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(REFRESH_TOKEN_LEN)
        .map(char::from)
        .collect();
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    fn claims_for(role: &str, iss: &str, exp_offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: 7,
            role: role.to_string(),
            iss: iss.to_string(),
            exp: now + exp_offset_secs,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn access_token_round_trips_role_and_issuer() {
        let config = test_config();
        let token = generate_access_token(42, "designer", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "designer");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_refused() {
        let config = test_config();
        // Well beyond the default 60-second leeway.
        let token = sign(&claims_for("customer", TOKEN_ISSUER, -300), &config);

        let err = validate_token(&token, &config).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn token_from_another_issuer_is_refused() {
        let config = test_config();
        let token = sign(&claims_for("admin", "some-other-app", 300), &config);

        let err = validate_token(&token, &config).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidIssuer);
    }

    #[test]
    fn unknown_role_claim_is_refused() {
        let config = test_config();
        let token = sign(&claims_for("superuser", TOKEN_ISSUER, 300), &config);

        let err = validate_token(&token, &config).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn token_signed_with_another_secret_is_refused() {
        let config = test_config();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };

        let token = generate_access_token(1, "customer", &other)
            .expect("token generation should succeed");
        let err = validate_token(&token, &config).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn refresh_token_is_alphanumeric_and_stored_as_digest() {
        let (plaintext, hash) = generate_refresh_token();
        assert_eq!(plaintext.len(), REFRESH_TOKEN_LEN);
        assert!(plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(hash, hash_refresh_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert_ne!(generate_refresh_token().0, plaintext);
    }
}
