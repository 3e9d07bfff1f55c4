//! Run plan configuration.
//!
//! A plan names the candle input and the ordered list of indicator steps to
//! apply to it.

mod settings;

pub use settings::{InputConfig, LoggingConfig, PlanConfig, StepConfig};

pub use config::ConfigError;

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Prefix for environment overrides, e.g. `TECHIND__LOGGING__LEVEL=debug`.
const ENV_PREFIX: &str = "TECHIND";

/// Load a plan from file and environment.
pub fn load_plan(path: &Path) -> Result<PlanConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse a plan from TOML text.
pub fn parse_plan(text: &str) -> Result<PlanConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(text, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
