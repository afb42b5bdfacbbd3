//! Engine configuration.
//!
//! Tunables that are not part of the scheduling model itself. Both fields
//! are pixel quantities, so they stay valid when the caller zooms the time
//! axis.

use serde::{Deserialize, Serialize};

/// Default pixel tolerance for bound comparisons.
pub const DEFAULT_EPSILON_PX: f64 = 0.5;

/// Default smallest bar width a resize may produce.
pub const DEFAULT_MIN_WIDTH_PX: f64 = 1.0;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Time-to-pixel factor is zero, negative, or not finite.
    #[error("pixels per day must be finite and positive, got {0}")]
    InvalidScale(f64),
    /// Tolerance is negative or not finite.
    #[error("epsilon_px must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),
    /// Minimum width is negative or not finite.
    #[error("min_width_px must be finite and non-negative, got {0}")]
    InvalidMinWidth(f64),
}

/// Constraint engine tunables.
///
/// Deserializes with defaults for missing fields, so callers can embed it
/// in their own settings files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixel tolerance absorbing time/pixel rounding. A lower bound must
    /// exceed an upper bound by more than this before a move is blocked.
    pub epsilon_px: f64,
    /// Smallest width a resize may produce.
    pub min_width_px: f64,
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            epsilon_px: DEFAULT_EPSILON_PX,
            min_width_px: DEFAULT_MIN_WIDTH_PX,
        }
    }

    /// Sets the pixel tolerance.
    pub fn with_epsilon_px(mut self, epsilon_px: f64) -> Self {
        self.epsilon_px = epsilon_px;
        self
    }

    /// Sets the minimum resize width.
    pub fn with_min_width_px(mut self, min_width_px: f64) -> Self {
        self.min_width_px = min_width_px;
        self
    }

    /// Checks that every tunable is usable.
    ///
    /// # Errors
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon_px.is_finite() || self.epsilon_px < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon_px));
        }
        if !self.min_width_px.is_finite() || self.min_width_px < 0.0 {
            return Err(ConfigError::InvalidMinWidth(self.min_width_px));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
