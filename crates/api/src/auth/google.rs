//! Google OAuth 2.0 authorization-code flow.
//!
//! Builds the consent URL, exchanges the returned code for a Google access
//! token, and reads the user's email from the userinfo endpoint using
//! [`reqwest`]. Google tokens are not kept; the email becomes the subject of
//! a glucolog session token.

use serde::Deserialize;

pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URI: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Scopes requested at consent time.
pub const SCOPES: [&str; 4] = [
    "openid",
    "email",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
];

/// OAuth client settings.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

impl GoogleOAuthConfig {
    /// Build a config pointing at Google's production endpoints.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_uri: GOOGLE_AUTH_URI.to_string(),
            token_uri: GOOGLE_TOKEN_URI.to_string(),
            userinfo_uri: GOOGLE_USERINFO_URI.to_string(),
        }
    }

    /// Load from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and
    /// `GOOGLE_REDIRECT_URI`.
    ///
    /// Returns `None` when any of them is missing or empty; sign-in endpoints
    /// then answer with a configuration error.
    pub fn from_env() -> Option<Self> {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        match (
            read("GOOGLE_CLIENT_ID"),
            read("GOOGLE_CLIENT_SECRET"),
            read("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(id), Some(secret), Some(redirect)) => Some(Self::new(id, secret, redirect)),
            _ => None,
        }
    }

    /// The consent-screen URL the browser is sent to.
    pub fn authorization_url(&self, state: &str) -> Result<String, GoogleAuthError> {
        let scope = SCOPES.join(" ");
        let url = reqwest::Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| GoogleAuthError::InvalidUrl(format!("{}: {e}", self.auth_uri)))?;
        Ok(url.into())
    }
}

/// Errors from the Google OAuth exchange.
#[derive(Debug, thiserror::Error)]
pub enum GoogleAuthError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Google returned a non-2xx status code.
    #[error("Google API error ({status}): {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The userinfo response did not include an email.
    #[error("Google account has no email address")]
    MissingEmail,

    /// Google reports the email as unverified.
    #[error("Google account email {0} is not verified")]
    UnverifiedEmail(String),

    /// A configured endpoint is not a valid URL.
    #[error("Invalid OAuth endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Response from the token endpoint. Only the access token is used.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Subset of the OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
pub struct GoogleUser {
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
}

/// HTTP client for the Google OAuth endpoints.
pub struct GoogleClient {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleClient {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GoogleOAuthConfig {
        &self.config
    }

    /// Exchange an authorization code for a Google access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, GoogleAuthError> {
        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the signed-in user's profile.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GoogleUser, GoogleAuthError> {
        let response = self
            .http
            .get(&self.config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Run the full exchange and return the user's verified email.
    pub async fn authenticate(&self, code: &str) -> Result<String, GoogleAuthError> {
        let token = self.exchange_code(code).await?;
        let user = self.fetch_user(&token.access_token).await?;

        let email = user.email.ok_or(GoogleAuthError::MissingEmail)?;
        if user.email_verified == Some(false) {
            return Err(GoogleAuthError::UnverifiedEmail(email));
        }

        tracing::info!(email = %email, name = ?user.name, "Google sign-in completed");
        Ok(email)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GoogleAuthError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleAuthError::Provider {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> GoogleOAuthConfig {
        GoogleOAuthConfig::new(
            "client-123.apps.googleusercontent.com".into(),
            "shh".into(),
            "http://localhost:3000/api/v1/auth/google/callback".into(),
        )
    }

    #[test]
    fn authorization_url_carries_required_params() {
        let url = config().authorization_url("state-abc").unwrap();
        let parsed = reqwest::Url::parse(&url).unwrap();
        let params: std::collections::HashMap<String, String> =
            parsed.query_pairs().into_owned().collect();

        assert!(url.starts_with(GOOGLE_AUTH_URI));
        assert_eq!(params["client_id"], "client-123.apps.googleusercontent.com");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["prompt"], "consent");
        assert_eq!(params["state"], "state-abc");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:3000/api/v1/auth/google/callback"
        );
        assert!(params["scope"].contains("https://www.googleapis.com/auth/spreadsheets"));
        assert!(params["scope"].contains("https://www.googleapis.com/auth/drive.file"));
    }

    #[test]
    fn authorization_url_rejects_bad_endpoint() {
        let mut config = config();
        config.auth_uri = "not a url".into();
        assert_matches!(
            config.authorization_url("s"),
            Err(GoogleAuthError::InvalidUrl(_))
        );
    }
}
