//! Stage parameters, loadable from a TOML parameter file.

use serde::Deserialize;
use thiserror::Error;

use crate::math::mask::Fill;

/// Fraction of channels eligible for flagging if nothing else is asked for.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// How many leading and trailing time samples enter the per-channel mean by
/// default.
pub const DEFAULT_EDGE_SAMPLES: usize = 10;

/// Everything the flagging pass can be told to do.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlagParams {
    /// Flag on the imaginary part alone instead of the full magnitude.
    pub imaginary_only: bool,

    /// Fraction of channels eligible for flagging. Must lie in [0, 1]; 0
    /// flags nothing.
    pub threshold: f64,

    /// Fill flagged channels with zeros instead of NaNs.
    pub fill0: bool,

    /// How many leading and trailing time samples enter the per-channel
    /// time mean.
    pub edge_samples: usize,

    /// Extra text appended to the output history.
    pub extra_history: String,
}

impl Default for FlagParams {
    fn default() -> Self {
        Self {
            imaginary_only: false,
            threshold: DEFAULT_THRESHOLD,
            fill0: false,
            edge_samples: DEFAULT_EDGE_SAMPLES,
            extra_history: String::new(),
        }
    }
}

impl FlagParams {
    /// The value flagged channels are overwritten with.
    pub fn fill(&self) -> Fill {
        if self.fill0 {
            Fill::Zero
        } else {
            Fill::Nan
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ParamsError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }

    /// Parse a TOML parameter file. Absent keys keep their defaults.
    #[cfg(feature = "cli")]
    pub fn from_file(path: &std::path::Path) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[cfg(feature = "cli")]
    #[error("could not read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("could not parse parameter file: {0}")]
    Toml(#[from] toml::de::Error),
}
