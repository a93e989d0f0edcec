//! Reusable car-following fixtures.
//!
//! Three longitudinal models for exercising the safety gate:
//!
//! - [`ConstantAcceleration`]: the same acceleration for any leader.
//! - [`ScriptedAcceleration`]: per-leader accelerations set by the test.
//! - [`LinearGapModel`]: a simple gap-proportional controller.

use crate::TestVehicle;
use lanesim_core::{LongitudinalModel, Vehicle, VehicleId};
use std::collections::HashMap;

/// Returns the same acceleration whoever leads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantAcceleration(pub f64);

impl LongitudinalModel<TestVehicle> for ConstantAcceleration {
    fn acceleration(&self, _me: &TestVehicle, _leader: Option<&TestVehicle>) -> f64 {
        self.0
    }
}

/// Returns an acceleration looked up by leader.
///
/// `None` as key scripts the free-road case. Unlisted leaders get
/// `fallback`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedAcceleration {
    pub by_leader: HashMap<Option<VehicleId>, f64>,
    pub fallback: f64,
}

impl ScriptedAcceleration {
    pub fn new(fallback: f64) -> Self {
        Self {
            by_leader: HashMap::new(),
            fallback,
        }
    }

    /// Script the acceleration behind `leader`.
    pub fn with_leader(mut self, leader: Option<VehicleId>, acceleration: f64) -> Self {
        self.by_leader.insert(leader, acceleration);
        self
    }
}

impl LongitudinalModel<TestVehicle> for ScriptedAcceleration {
    fn acceleration(&self, _me: &TestVehicle, leader: Option<&TestVehicle>) -> f64 {
        let key = leader.map(|l| l.id());
        self.by_leader.get(&key).copied().unwrap_or(self.fallback)
    }
}

/// Gap-proportional controller.
///
/// `gain * (net_gap - desired_gap)`, clamped to
/// `[-max_deceleration, free_acceleration]`. Free road yields
/// `free_acceleration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGapModel {
    pub desired_gap: f64,
    pub gain: f64,
    pub free_acceleration: f64,
    pub max_deceleration: f64,
}

impl Default for LinearGapModel {
    fn default() -> Self {
        Self {
            desired_gap: 20.0,
            gain: 0.1,
            free_acceleration: 1.0,
            max_deceleration: 9.0,
        }
    }
}

impl LongitudinalModel<TestVehicle> for LinearGapModel {
    fn acceleration(&self, me: &TestVehicle, leader: Option<&TestVehicle>) -> f64 {
        match leader {
            None => self.free_acceleration,
            Some(leader) => {
                let gap = me.net_distance(leader);
                (self.gain * (gap - self.desired_gap))
                    .clamp(-self.max_deceleration, self.free_acceleration)
            }
        }
    }
}
