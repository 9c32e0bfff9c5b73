//! Domain types shared across the Haven workspace: the resource category
//! catalog, the resource location model, keyword classification, and
//! application configuration.

mod app_config;
mod category;
mod classify;
mod config;
mod location;

pub use app_config::{AppConfig, Environment};
pub use category::ResourceCategory;
pub use classify::{Classifier, KeywordClassifier};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Coordinate, ResourceLocation, NO_PHONE_PLACEHOLDER, UNKNOWN_NAME_PLACEHOLDER};

use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
