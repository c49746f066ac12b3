use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{ClassifierThresholds, ClassifierVariant};
use crate::consts::{
    DEFAULT_ENTROPY_FLOOR, DEFAULT_MIN_TOTAL, DEFAULT_PSEUDOCOUNT, DEFAULT_SIGNED_UNSTRANDED_THRESHOLD,
    DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_UNSIGNED_UNSTRANDED_THRESHOLD,
};
use crate::statistics::StrandAnalyzer;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierSection {
    pub min_total: u64,
    pub signed_unstranded_threshold: f64,
    pub unsigned_unstranded_threshold: f64,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        ClassifierSection {
            min_total: DEFAULT_MIN_TOTAL,
            signed_unstranded_threshold: DEFAULT_SIGNED_UNSTRANDED_THRESHOLD,
            unsigned_unstranded_threshold: DEFAULT_UNSIGNED_UNSTRANDED_THRESHOLD,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsSection {
    pub pseudocount: f64,
    pub entropy_floor: f64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        MetricsSection {
            pseudocount: DEFAULT_PSEUDOCOUNT,
            entropy_floor: DEFAULT_ENTROPY_FLOOR,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub significance_level: f64,
}

impl Default for ReportSection {
    fn default() -> Self {
        ReportSection {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

///
/// Optional overrides for thresholds and numeric constants, read from TOML.
/// Every key may be omitted.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct StrandCheckConfig {
    pub classifier: ClassifierSection,
    pub metrics: MetricsSection,
    pub report: ReportSection,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl StrandCheckConfig {
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        let config: StrandCheckConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let classifier = &self.classifier;
        for (name, value) in [
            (
                "classifier.signed_unstranded_threshold",
                classifier.signed_unstranded_threshold,
            ),
            (
                "classifier.unsigned_unstranded_threshold",
                classifier.unsigned_unstranded_threshold,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        if !(self.metrics.pseudocount.is_finite() && self.metrics.pseudocount > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "metrics.pseudocount must be positive (got {})",
                self.metrics.pseudocount
            )));
        }

        if !(self.metrics.entropy_floor > 0.0 && self.metrics.entropy_floor < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "metrics.entropy_floor must be between 0 and 1 (got {})",
                self.metrics.entropy_floor
            )));
        }

        if !(self.report.significance_level > 0.0 && self.report.significance_level < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "report.significance_level must be between 0 and 1 (got {})",
                self.report.significance_level
            )));
        }

        Ok(())
    }

    pub fn thresholds(&self) -> ClassifierThresholds {
        ClassifierThresholds {
            min_total: self.classifier.min_total,
            signed_unstranded: self.classifier.signed_unstranded_threshold,
            unsigned_unstranded: self.classifier.unsigned_unstranded_threshold,
        }
    }

    ///
    /// An analyzer using the given classifier rule and this config's settings.
    ///
    pub fn analyzer(&self, variant: ClassifierVariant) -> StrandAnalyzer {
        StrandAnalyzer::new(variant)
            .with_thresholds(self.thresholds())
            .with_pseudocount(self.metrics.pseudocount)
            .with_entropy_floor(self.metrics.entropy_floor)
    }
}

impl TryFrom<&Path> for StrandCheckConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        StrandCheckConfig::from_toml_str(&toml_str)
    }
}
