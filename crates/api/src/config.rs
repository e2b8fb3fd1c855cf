use crate::auth::google::GoogleOAuthConfig;
use crate::auth::jwt::JwtConfig;

/// Which [`ReadingStore`](glucolog_core::store::ReadingStore) backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local; data is lost on restart. For local development.
    Memory,
}

impl StoreBackend {
    pub fn from_str_env(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend (default: `postgres`).
    pub store_backend: StoreBackend,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Google sign-in settings; `None` disables the sign-in endpoints.
    pub google: Option<GoogleOAuthConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `postgres`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend = std::env::var("STORE_BACKEND")
            .map(|raw| {
                StoreBackend::from_str_env(&raw)
                    .unwrap_or_else(|| panic!("STORE_BACKEND must be 'postgres' or 'memory', got '{raw}'"))
            })
            .unwrap_or(StoreBackend::Postgres);

        let jwt = JwtConfig::from_env();

        let google = GoogleOAuthConfig::from_env();
        if google.is_none() {
            tracing::warn!("Google OAuth settings missing; sign-in endpoints are disabled");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            jwt,
            google,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend_names() {
        assert_eq!(
            StoreBackend::from_str_env("postgres"),
            Some(StoreBackend::Postgres)
        );
        assert_eq!(
            StoreBackend::from_str_env(" Memory "),
            Some(StoreBackend::Memory)
        );
        assert_eq!(StoreBackend::from_str_env("sheets"), None);
    }
}
