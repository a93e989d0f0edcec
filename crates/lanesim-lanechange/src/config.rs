//! Lane-change configuration, validation, and error types.
//!
//! [`LaneChangeConfig`] is the builder-input for constructing a
//! [`PendingLaneChangeModel`](crate::PendingLaneChangeModel).
//! [`validate()`](LaneChangeConfig::validate) checks every numeric
//! parameter once at setup so the per-step decision code never has to.

use std::error::Error;
use std::fmt;

// ── RulesConfig ────────────────────────────────────────────────────

/// Jurisdiction-specific rule variant.
///
/// The decision core never branches on these values; they are handed to
/// the incentive model, which may apply a keep-right bias or forbid
/// overtaking on the right above the critical speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulesConfig {
    /// Whether European (no undertaking) rules apply. Default: true.
    pub european_rules: bool,
    /// Speed above which the European rules kick in, in m/s. Default: 5.0.
    pub critical_speed_eur: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            european_rules: true,
            critical_speed_eur: 5.0,
        }
    }
}

impl RulesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.critical_speed_eur.is_finite() || self.critical_speed_eur < 0.0 {
            return Err(ConfigError::InvalidCriticalSpeed {
                value: self.critical_speed_eur,
            });
        }
        Ok(())
    }
}

// ── IncentiveParams ────────────────────────────────────────────────

/// Parameters handed to the incentive model when it is built.
///
/// Only `minimum_gap` and `safe_deceleration` are read back by the core
/// (through [`SafetyLimits`](crate::SafetyLimits)); the others are opaque
/// to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncentiveParams {
    /// Weight given to the acceleration change of neighbours. Default: 0.1.
    pub politeness: f64,
    /// Net acceleration gain required before a change pays off, in m/s².
    /// Default: 0.2.
    pub threshold_acceleration: f64,
    /// Bias towards the right lane, in m/s². May be negative. Default: 0.3.
    pub right_bias_acceleration: f64,
    /// Smallest tolerable net gap in the target lane, in m. Default: 2.0.
    pub minimum_gap: f64,
    /// Maximum braking a change may impose on anyone, in m/s². Default: 4.0.
    pub safe_deceleration: f64,
}

impl Default for IncentiveParams {
    fn default() -> Self {
        Self {
            politeness: 0.1,
            threshold_acceleration: 0.2,
            right_bias_acceleration: 0.3,
            minimum_gap: 2.0,
            safe_deceleration: 4.0,
        }
    }
}

impl IncentiveParams {
    /// Check that every parameter is finite and within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.politeness.is_finite() || self.politeness < 0.0 {
            return Err(ConfigError::InvalidPoliteness {
                value: self.politeness,
            });
        }
        if !self.threshold_acceleration.is_finite() || self.threshold_acceleration < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold_acceleration,
            });
        }
        if !self.right_bias_acceleration.is_finite() {
            return Err(ConfigError::InvalidRightBias {
                value: self.right_bias_acceleration,
            });
        }
        if !self.minimum_gap.is_finite() || self.minimum_gap < 0.0 {
            return Err(ConfigError::InvalidMinimumGap {
                value: self.minimum_gap,
            });
        }
        if !self.safe_deceleration.is_finite() || self.safe_deceleration <= 0.0 {
            return Err(ConfigError::InvalidSafeDeceleration {
                value: self.safe_deceleration,
            });
        }
        Ok(())
    }
}

// ── CooldownConfig ─────────────────────────────────────────────────

/// Anti-oscillation delay between two discretionary lane changes.
///
/// Disabled by default. When enabled, [`decide_at`] suppresses a
/// discretionary change while less than `delay_s` seconds of simulated
/// time have passed since the last change recorded with
/// [`record_lane_change`]. Mandatory exit changes are never suppressed.
///
/// [`decide_at`]: crate::LaneChangeModel::decide_at
/// [`record_lane_change`]: crate::LaneChangeModel::record_lane_change
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CooldownConfig {
    /// Minimum simulated seconds between changes. `None` disables the
    /// cooldown.
    pub delay_s: Option<f64>,
}

impl CooldownConfig {
    /// Delay historically used to damp lane-change flip-flopping.
    pub const DEFAULT_DELAY_S: f64 = 3.0;

    /// Cooldown enabled with [`CooldownConfig::DEFAULT_DELAY_S`].
    pub fn enabled() -> Self {
        Self {
            delay_s: Some(Self::DEFAULT_DELAY_S),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.delay_s {
            Some(value) if !value.is_finite() || value < 0.0 => {
                Err(ConfigError::InvalidCooldown { value })
            }
            _ => Ok(()),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`LaneChangeConfig::validate()`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `critical_speed_eur` is NaN, infinite, or negative.
    InvalidCriticalSpeed {
        /// The invalid value.
        value: f64,
    },
    /// `politeness` is NaN, infinite, or negative.
    InvalidPoliteness {
        /// The invalid value.
        value: f64,
    },
    /// `threshold_acceleration` is NaN, infinite, or negative.
    InvalidThreshold {
        /// The invalid value.
        value: f64,
    },
    /// `right_bias_acceleration` is NaN or infinite.
    InvalidRightBias {
        /// The invalid value.
        value: f64,
    },
    /// `minimum_gap` is NaN, infinite, or negative.
    InvalidMinimumGap {
        /// The invalid value.
        value: f64,
    },
    /// `safe_deceleration` is NaN, infinite, zero, or negative.
    InvalidSafeDeceleration {
        /// The invalid value.
        value: f64,
    },
    /// Cooldown `delay_s` is NaN, infinite, or negative.
    InvalidCooldown {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCriticalSpeed { value } => {
                write!(f, "critical_speed_eur must be finite and >= 0, got {value}")
            }
            Self::InvalidPoliteness { value } => {
                write!(f, "politeness must be finite and >= 0, got {value}")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "threshold_acceleration must be finite and >= 0, got {value}")
            }
            Self::InvalidRightBias { value } => {
                write!(f, "right_bias_acceleration must be finite, got {value}")
            }
            Self::InvalidMinimumGap { value } => {
                write!(f, "minimum_gap must be finite and >= 0, got {value}")
            }
            Self::InvalidSafeDeceleration { value } => {
                write!(f, "safe_deceleration must be finite and positive, got {value}")
            }
            Self::InvalidCooldown { value } => {
                write!(f, "cooldown delay_s must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── LaneChangeConfig ───────────────────────────────────────────────

/// Complete per-vehicle lane-change configuration.
///
/// `incentive: None` means no incentive parameters were supplied; the
/// incentive-model factory then falls back to its own defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LaneChangeConfig {
    /// Rule variant passed through to the incentive model.
    pub rules: RulesConfig,
    /// Incentive-model parameters, if configured.
    pub incentive: Option<IncentiveParams>,
    /// Anti-oscillation cooldown.
    pub cooldown: CooldownConfig,
}

impl LaneChangeConfig {
    /// Validate all numeric parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if let Some(params) = &self.incentive {
            params.validate()?;
        }
        self.cooldown.validate()?;
        Ok(())
    }
}
