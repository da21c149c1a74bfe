//! Application Configuration Settings
//!
//! Loaded from environment variables (optionally seeded from a `.env`
//! file). Every variable has a default except that production refuses
//! to start without a session secret.

use std::fmt;

/// Default HTTP port of the embedding web server.
const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default database location.
const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Public deployment.
    Production,
}

impl Environment {
    /// Parse environment from string. Anything but "production" is development.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Check if this is production.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Get the environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Cookie `SameSite` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on top-level navigations and same-site requests.
    Lax,
    /// Sent on cross-site requests; requires `Secure`.
    None,
}

impl SameSite {
    /// Attribute value as written in `Set-Cookie`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// OAuth2 client registration.
#[derive(Clone, Default)]
pub struct OAuthSettings {
    /// Client id.
    pub client_id: String,
    client_secret: String,
    /// OpenID provider metadata URL.
    pub meta_url: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
}

impl OAuthSettings {
    /// Create settings.
    #[must_use]
    pub const fn new(
        client_id: String,
        client_secret: String,
        meta_url: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            meta_url,
            redirect_uri,
        }
    }

    /// Get the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Check whether a client id and secret are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("meta_url", &self.meta_url)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Session cookie policy.
#[derive(Clone)]
pub struct SessionSettings {
    secret: String,
    /// Only send the cookie over HTTPS.
    pub cookie_secure: bool,
    /// Cross-site policy.
    pub cookie_same_site: SameSite,
    /// Hide the cookie from scripts.
    pub cookie_http_only: bool,
}

impl SessionSettings {
    /// Derive the cookie policy for an environment.
    ///
    /// Production serves the web client from another origin, so cookies
    /// must be `Secure` with `SameSite=None`.
    #[must_use]
    pub const fn for_environment(environment: Environment, secret: String) -> Self {
        let production = environment.is_production();
        Self {
            secret,
            cookie_secure: production,
            cookie_same_site: if production { SameSite::None } else { SameSite::Lax },
            cookie_http_only: true,
        }
    }

    /// Get the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secret", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("cookie_http_only", &self.cookie_http_only)
            .finish()
    }
}

/// Complete application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// OAuth2 client registration.
    pub oauth: OAuthSettings,
    /// Session cookie policy.
    pub session: SessionSettings,
    finnhub_api_key: String,
    /// Web client origin, for CORS and redirects.
    pub client_base_url: String,
    /// HTTP port.
    pub server_port: u16,
    /// Database connection string.
    pub database_url: String,
}

impl AppConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration through a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_PORT` is not a port number, or if
    /// `SESSION_SECRET` is empty in production.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let environment = Environment::from_str_case_insensitive(&var("APP_ENV"));

        let session_secret = var("SESSION_SECRET");
        if environment.is_production() && session_secret.is_empty() {
            return Err(ConfigError::EmptyValue("SESSION_SECRET".to_string()));
        }

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "SERVER_PORT".to_string(),
                    value: raw,
                })?,
            None => DEFAULT_SERVER_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            environment,
            oauth: OAuthSettings::new(
                var("OAUTH2_CLIENT_ID"),
                var("OAUTH2_CLIENT_SECRET"),
                var("OAUTH2_META_URL"),
                var("OAUTH2_REDIRECT_URI"),
            ),
            session: SessionSettings::for_environment(environment, session_secret),
            finnhub_api_key: var("FINNHUB_API_KEY"),
            client_base_url: var("CLIENT_BASE_URL"),
            server_port,
            database_url,
        })
    }

    /// Load `.env` (see [`load_dotenv`]) and read the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_env()
    }

    /// Get the Finnhub market data API key.
    #[must_use]
    pub fn finnhub_api_key(&self) -> &str {
        &self.finnhub_api_key
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("oauth", &self.oauth)
            .field("session", &self.session)
            .field("finnhub_api_key", &"[REDACTED]")
            .field("client_base_url", &self.client_base_url)
            .field("server_port", &self.server_port)
            .field("database_url", &self.database_url)
            .finish()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },
}

/// Load a `.env` file from the current directory or the nearest ancestor.
///
/// A missing file is not an error; variables already set in the process
/// take precedence.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let Ok(cwd) = std::env::current_dir() else {
        return;
    };

    for dir in cwd.ancestors().skip(1) {
        let env_path = dir.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(
            Environment::from_str_case_insensitive("production"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_case_insensitive(" PRODUCTION "),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_case_insensitive("staging"),
            Environment::Development
        );
        assert_eq!(
            Environment::from_str_case_insensitive(""),
            Environment::Development
        );
    }

    #[test]
    fn development_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.database_url, "sqlite://app.db");
        assert!(!config.oauth.is_configured());
        assert!(!config.session.cookie_secure);
        assert_eq!(config.session.cookie_same_site, SameSite::Lax);
        assert!(config.session.cookie_http_only);
    }

    #[test]
    fn production_cookie_policy() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("SESSION_SECRET", "s3cret"),
            ("OAUTH2_CLIENT_ID", "client"),
            ("OAUTH2_CLIENT_SECRET", "shh"),
            ("DATABASE_URL", "postgres://db/tracker"),
        ])
        .unwrap();

        assert!(config.environment.is_production());
        assert!(config.session.cookie_secure);
        assert_eq!(config.session.cookie_same_site.as_str(), "None");
        assert_eq!(config.session.secret(), "s3cret");
        assert!(config.oauth.is_configured());
        assert_eq!(config.database_url, "postgres://db/tracker");
    }

    #[test]
    fn production_requires_session_secret() {
        let err = config_from(&[("APP_ENV", "production")]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue("SESSION_SECRET".to_string()));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("SERVER_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "SERVER_PORT"));

        let config = config_from(&[("SERVER_PORT", "8080")]).unwrap();
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn load_without_dotenv_file() {
        load_dotenv();
        assert!(AppConfig::from_lookup(|_| None).is_ok());
    }

    #[test]
    fn secrets_redacted_debug() {
        let config = config_from(&[
            ("OAUTH2_CLIENT_SECRET", "client-secret-value"),
            ("SESSION_SECRET", "session-secret-value"),
            ("FINNHUB_API_KEY", "finnhub-key-value"),
        ])
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("client-secret-value"));
        assert!(!debug.contains("session-secret-value"));
        assert!(!debug.contains("finnhub-key-value"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(config.finnhub_api_key(), "finnhub-key-value");
        assert_eq!(config.oauth.client_secret(), "client-secret-value");
    }
}
