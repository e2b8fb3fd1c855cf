//! JWT session tokens and OAuth `state` tokens.
//!
//! Both are HS256-signed with the same secret and told apart by audience, so
//! a `state` token can never be replayed as a session token (or vice versa).
//! Nothing is stored server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience claim of session access tokens.
pub const ACCESS_AUDIENCE: &str = "glucolog-session";

/// Audience claim of OAuth `state` tokens.
pub const STATE_AUDIENCE: &str = "glucolog-oauth-state";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's email for access tokens, a nonce for state tokens.
    pub sub: String,
    /// Audience, see [`ACCESS_AUDIENCE`] and [`STATE_AUDIENCE`].
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session token lifetime in minutes (default: 1440).
    pub access_token_expiry_mins: i64,
    /// OAuth `state` token lifetime in minutes (default: 10).
    pub state_token_expiry_mins: i64,
}

/// Default session token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 24 * 60;
/// Default `state` token expiry in minutes.
const DEFAULT_STATE_EXPIRY_MINS: i64 = 10;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `1440`  |
    /// | `JWT_STATE_EXPIRY_MINS`   | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let state_token_expiry_mins: i64 = std::env::var("JWT_STATE_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_STATE_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_STATE_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            state_token_expiry_mins,
        }
    }
}

fn sign(
    sub: String,
    audience: &str,
    expiry_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub,
        aud: audience.to_string(),
        exp: now + expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

fn verify(
    token: &str,
    audience: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&[audience]);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Generate a session access token for the given email.
pub fn generate_access_token(
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        email.to_string(),
        ACCESS_AUDIENCE,
        config.access_token_expiry_mins,
        config,
    )
}

/// Validate and decode a session access token.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, ACCESS_AUDIENCE, config)
}

/// Generate a short-lived OAuth `state` value.
pub fn generate_state_token(config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        Uuid::new_v4().to_string(),
        STATE_AUDIENCE,
        config.state_token_expiry_mins,
        config,
    )
}

/// Check an OAuth `state` value returned by the identity provider.
pub fn validate_state_token(
    token: &str,
    config: &JwtConfig,
) -> Result<(), jsonwebtoken::errors::Error> {
    verify(token, STATE_AUDIENCE, config).map(|_| ())
}
