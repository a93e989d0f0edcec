//! The [`IncentiveModel`] contract and its factory.
//!
//! The incentive computation itself (MOBIL or any other utility model)
//! lives outside this crate. The core only needs a scalar per candidate
//! direction plus the two safety thresholds.

use crate::config::{IncentiveParams, RulesConfig};
use lanesim_core::{Direction, RoadSegment, VehicleId};

/// Incentive assigned to a direction that cannot be taken.
///
/// Negative infinity, never zero: a neutral incentive of exactly zero must
/// not tie with an impossible one.
pub const IMPOSSIBLE_INCENTIVE: f64 = f64::NEG_INFINITY;

/// Thresholds consulted by the safety gate.
///
/// Both values are constant for the lifetime of a model instance.
pub trait SafetyLimits {
    /// Smallest tolerable net gap to the front and rear vehicle of the
    /// target lane, in m.
    fn minimum_gap(&self) -> f64;

    /// Maximum braking, in m/s² (positive), the change may impose on the
    /// new follower or on the changing vehicle itself.
    fn safe_deceleration(&self) -> f64;
}

/// Plain pair of safety thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafetyThresholds {
    /// See [`SafetyLimits::minimum_gap`].
    pub minimum_gap: f64,
    /// See [`SafetyLimits::safe_deceleration`].
    pub safe_deceleration: f64,
}

impl SafetyLimits for SafetyThresholds {
    fn minimum_gap(&self) -> f64 {
        self.minimum_gap
    }

    fn safe_deceleration(&self) -> f64 {
        self.safe_deceleration
    }
}

impl From<&IncentiveParams> for SafetyThresholds {
    fn from(params: &IncentiveParams) -> Self {
        Self {
            minimum_gap: params.minimum_gap,
            safe_deceleration: params.safe_deceleration,
        }
    }
}

/// Utility model scoring candidate lane changes.
///
/// # Contract
///
/// - `acceleration_balance()` is only called for directions whose target
///   lane exists and is a traffic lane.
/// - A positive balance means the change is net-beneficial.
/// - Implementations must not mutate simulation state; the balance is a
///   pure function of the step-start snapshot.
pub trait IncentiveModel<R: RoadSegment>: SafetyLimits {
    /// Net acceleration benefit of moving `me` in `direction` on `road`.
    fn acceleration_balance(&self, me: &R::Vehicle, direction: Direction, road: &R) -> f64;
}

/// Builds an [`IncentiveModel`] bound to one vehicle.
///
/// Used by [`PendingLaneChangeModel::initialize`](crate::PendingLaneChangeModel::initialize).
/// `params` is `None` when the configuration carried no incentive
/// parameters; the factory then applies its own defaults.
pub trait IncentiveModelFactory<R: RoadSegment> {
    /// The model type produced.
    type Model: IncentiveModel<R>;

    /// Build the model for `vehicle`.
    fn build(
        &self,
        vehicle: VehicleId,
        rules: &RulesConfig,
        params: Option<&IncentiveParams>,
    ) -> Self::Model;
}
