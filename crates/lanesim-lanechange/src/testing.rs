//! Incentive-model doubles for tests and synthetic setups.
//!
//! Compiled for this crate's own tests and behind the `test-support`
//! feature for downstream crates.

#![allow(missing_docs)]

use crate::config::{IncentiveParams, RulesConfig};
use crate::incentive::{IncentiveModel, IncentiveModelFactory, SafetyLimits, SafetyThresholds};
use lanesim_core::{Direction, RoadSegment, VehicleId};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns a fixed acceleration balance per direction.
///
/// Counts how often it is queried so tests can assert that unavailable
/// directions are never scored.
#[derive(Debug)]
pub struct FixedIncentive {
    pub to_right: f64,
    pub to_left: f64,
    pub thresholds: SafetyThresholds,
    /// Vehicle the factory built this model for, if any.
    pub vehicle: Option<VehicleId>,
    /// Rules the factory passed in.
    pub rules: RulesConfig,
    queries: AtomicUsize,
}

impl FixedIncentive {
    /// Fixed balances with the default safety thresholds.
    pub fn new(to_right: f64, to_left: f64) -> Self {
        Self {
            to_right,
            to_left,
            thresholds: SafetyThresholds::from(&IncentiveParams::default()),
            vehicle: None,
            rules: RulesConfig::default(),
            queries: AtomicUsize::new(0),
        }
    }

    /// Replace the safety thresholds.
    pub fn with_thresholds(mut self, minimum_gap: f64, safe_deceleration: f64) -> Self {
        self.thresholds = SafetyThresholds {
            minimum_gap,
            safe_deceleration,
        };
        self
    }

    /// How many times `acceleration_balance()` has been called.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl Clone for FixedIncentive {
    fn clone(&self) -> Self {
        Self {
            to_right: self.to_right,
            to_left: self.to_left,
            thresholds: self.thresholds,
            vehicle: self.vehicle,
            rules: self.rules,
            queries: AtomicUsize::new(self.queries()),
        }
    }
}

impl SafetyLimits for FixedIncentive {
    fn minimum_gap(&self) -> f64 {
        self.thresholds.minimum_gap
    }

    fn safe_deceleration(&self) -> f64 {
        self.thresholds.safe_deceleration
    }
}

impl<R: RoadSegment> IncentiveModel<R> for FixedIncentive {
    fn acceleration_balance(&self, _me: &R::Vehicle, direction: Direction, _road: &R) -> f64 {
        self.queries.fetch_add(1, Ordering::Relaxed);
        match direction {
            Direction::ToRight => self.to_right,
            Direction::ToLeft => self.to_left,
            Direction::NoChange => 0.0,
        }
    }
}

/// Builds [`FixedIncentive`] models.
///
/// Thresholds come from the configured [`IncentiveParams`], or from
/// `IncentiveParams::default()` when none were configured.
#[derive(Clone, Copy, Debug)]
pub struct FixedIncentiveFactory {
    pub to_right: f64,
    pub to_left: f64,
}

impl FixedIncentiveFactory {
    pub fn new(to_right: f64, to_left: f64) -> Self {
        Self { to_right, to_left }
    }
}

impl<R: RoadSegment> IncentiveModelFactory<R> for FixedIncentiveFactory {
    type Model = FixedIncentive;

    fn build(
        &self,
        vehicle: VehicleId,
        rules: &RulesConfig,
        params: Option<&IncentiveParams>,
    ) -> FixedIncentive {
        let defaults = IncentiveParams::default();
        let params = params.unwrap_or(&defaults);
        FixedIncentive {
            thresholds: SafetyThresholds::from(params),
            vehicle: Some(vehicle),
            rules: *rules,
            ..FixedIncentive::new(self.to_right, self.to_left)
        }
    }
}
