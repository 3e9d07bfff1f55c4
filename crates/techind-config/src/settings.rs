//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use techind_core::traits::validate_period;
use techind_core::Error;

fn default_digits() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

/// A full run plan.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Whether JSON log output was requested.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Candle input.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputConfig {
    /// CSV file of candles; the CLI `--data` flag takes precedence.
    pub path: Option<PathBuf>,
}

/// One engine call. Defaults match the engine's: 4 digits, RCI rescaled,
/// lag differences on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepConfig {
    Rci {
        source: String,
        periods: Vec<usize>,
        #[serde(default = "default_digits")]
        digits: u32,
        #[serde(default = "default_true")]
        rescale: bool,
    },
    /// Shift every RCI column in the table by +100.
    RciRange,
    Macd {
        source: String,
        short: usize,
        long: usize,
        signal: usize,
        #[serde(default = "default_digits")]
        digits: u32,
    },
    Stochastic {
        source: String,
        periods: Vec<usize>,
        #[serde(default = "default_digits")]
        digits: u32,
    },
    /// Lag (and difference) every column whose name contains `family`.
    Shift {
        family: String,
        #[serde(default = "default_true")]
        diff: bool,
    },
}

impl StepConfig {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            StepConfig::Rci { .. } => "rci",
            StepConfig::RciRange => "rci_range",
            StepConfig::Macd { .. } => "macd",
            StepConfig::Stochastic { .. } => "stochastic",
            StepConfig::Shift { .. } => "shift",
        }
    }

    /// Check parameters without touching any data.
    pub fn validate(&self) -> Result<(), Error> {
        let check = |result: Result<(), techind_core::IndicatorError>| {
            result.map_err(|e| Error::Config(format!("{} step: {}", self.label(), e)))
        };

        match self {
            StepConfig::Rci { periods, .. } => {
                for &period in periods {
                    check(validate_period("RCI", period, 2))?;
                }
                Ok(())
            }
            StepConfig::Macd {
                short,
                long,
                signal,
                ..
            } => {
                check(validate_period("MACD short", *short, 1))?;
                check(validate_period("MACD long", *long, 1))?;
                check(validate_period("MACD signal", *signal, 1))
            }
            StepConfig::Stochastic { periods, .. } => {
                for &period in periods {
                    check(validate_period("Stochastic", period, 1))?;
                }
                Ok(())
            }
            StepConfig::Shift { family, .. } if family.is_empty() => Err(Error::Config(
                "shift step: family must not be empty".to_string(),
            )),
            StepConfig::Shift { .. } | StepConfig::RciRange => Ok(()),
        }
    }
}

impl PlanConfig {
    /// Validate every step.
    pub fn validate(&self) -> Result<(), Error> {
        if self.steps.is_empty() {
            return Err(Error::Config("plan has no steps".to_string()));
        }
        for (i, step) in self.steps.iter().enumerate() {
            step.validate()
                .map_err(|e| Error::Config(format!("step {}: {}", i + 1, e)))?;
        }
        Ok(())
    }

    /// Render the plan back to TOML, with defaults filled in.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
