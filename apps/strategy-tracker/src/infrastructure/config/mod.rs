//! Configuration Module
//!
//! Environment-driven application settings.

mod settings;

pub use settings::{
    AppConfig, ConfigError, Environment, OAuthSettings, SameSite, SessionSettings, load_dotenv,
};
