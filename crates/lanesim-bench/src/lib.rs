//! Benchmark profiles and utilities for the lanesim lane-change core.
//!
//! Provides pre-built highway profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 4 lanes, 2 km, 400 vehicles
//! - [`stress_profile`]: 6 lanes, 10 km, 4 000 vehicles
//! - [`init_vehicle_slots`]: deterministic vehicle placement via seed
//!
//! Vehicles use [`SelfishIncentive`], a minimal own-advantage incentive
//! model. It stands in for a full utility model so the benchmarks
//! exercise realistic call patterns.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lanesim_core::{
    Direction, LaneIndex, LaneSegment, LaneType, RoadSegment, RoadSegmentId, Vehicle, VehicleId,
};
use lanesim_lanechange::phase::lane_changes;
use lanesim_lanechange::{
    decide_all, decide_all_at, safety, CooldownConfig, IncentiveModel, IncentiveModelFactory,
    IncentiveParams, LaneChangeConfig, LaneChangeDecision, LaneChangeModel,
    PendingLaneChangeModel, RulesConfig, SafetyLimits, IMPOSSIBLE_INCENTIVE,
};
use lanesim_test_utils::{TestRoad, TestVehicle};

/// Spacing between placement slots along a lane, in m.
pub const SLOT_SPACING_M: f64 = 10.0;

/// Own-advantage incentive: the acceleration gained behind the new
/// leader, minus the switching threshold, plus the keep-right bias.
///
/// Unsafe changes score [`IMPOSSIBLE_INCENTIVE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfishIncentive {
    params: IncentiveParams,
    rules: RulesConfig,
}

impl SelfishIncentive {
    pub fn new(params: IncentiveParams, rules: RulesConfig) -> Self {
        Self { params, rules }
    }

    fn bias(&self, direction: Direction) -> f64 {
        if !self.rules.european_rules {
            return 0.0;
        }
        match direction {
            Direction::ToRight => self.params.right_bias_acceleration,
            Direction::ToLeft => -self.params.right_bias_acceleration,
            Direction::NoChange => 0.0,
        }
    }
}

impl SafetyLimits for SelfishIncentive {
    fn minimum_gap(&self) -> f64 {
        self.params.minimum_gap
    }

    fn safe_deceleration(&self) -> f64 {
        self.params.safe_deceleration
    }
}

impl<R: RoadSegment> IncentiveModel<R> for SelfishIncentive {
    fn acceleration_balance(&self, me: &R::Vehicle, direction: Direction, road: &R) -> f64 {
        let Some(target) = direction.target_lane(me.lane(), road.lane_count()) else {
            return IMPOSSIBLE_INCENTIVE;
        };
        let new_lane = road.lane_segment(target);
        if !safety::check_lane(me, new_lane, self).is_safe() {
            return IMPOSSIBLE_INCENTIVE;
        }
        let current = road.lane_segment(me.lane());
        let acc_now = me.acceleration_behind(current.front_vehicle(me));
        let acc_new = me.acceleration_behind(new_lane.front_vehicle(me));
        acc_new - acc_now - self.params.threshold_acceleration + self.bias(direction)
    }
}

/// Builds [`SelfishIncentive`] models, defaulting the parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelfishIncentiveFactory;

impl<R: RoadSegment> IncentiveModelFactory<R> for SelfishIncentiveFactory {
    type Model = SelfishIncentive;

    fn build(
        &self,
        _vehicle: VehicleId,
        rules: &RulesConfig,
        params: Option<&IncentiveParams>,
    ) -> SelfishIncentive {
        SelfishIncentive::new(params.copied().unwrap_or_default(), *rules)
    }
}

/// A road plus one lane-change model per vehicle on it.
pub struct Profile {
    pub road: TestRoad,
    pub models: Vec<LaneChangeModel<SelfishIncentive>>,
}

impl Profile {
    /// Decide for every vehicle against the current road state.
    pub fn decide_all(&self) -> Vec<LaneChangeDecision> {
        let agents = self.models.iter().filter_map(|model| {
            self.road
                .vehicle(model.vehicle())
                .map(|vehicle| (model, vehicle))
        });
        decide_all(&self.road, agents)
    }

    /// Like [`Profile::decide_all`], honouring cooldowns at `now_s`.
    pub fn decide_all_at(&self, now_s: f64) -> Vec<LaneChangeDecision> {
        let agents = self.models.iter().filter_map(|model| {
            self.road
                .vehicle(model.vehicle())
                .map(|vehicle| (model, vehicle))
        });
        decide_all_at(&self.road, agents, now_s)
    }

    /// Record `decisions` that changed lane at `now_s`, starting each
    /// vehicle's cooldown.
    pub fn record(&mut self, decisions: &[LaneChangeDecision], now_s: f64) {
        for decision in lane_changes(decisions) {
            if let Some(model) = self
                .models
                .iter_mut()
                .find(|m| m.vehicle() == decision.vehicle)
            {
                model.record_lane_change(now_s);
            }
        }
    }

    /// Apply `decisions` to the road. Returns the number applied.
    pub fn apply(&mut self, decisions: &[LaneChangeDecision]) -> usize {
        decisions
            .iter()
            .filter(|d| d.direction.is_change())
            .filter(|d| self.road.shift_lane(d.vehicle, d.direction.lane_offset()))
            .count()
    }
}

/// Build a reference profile: 4 traffic lanes, 2 km, 400 vehicles.
///
/// Every tenth vehicle leaves the road at this segment.
pub fn reference_profile(seed: u64) -> Profile {
    build_profile(4, 2_000.0, 400, seed)
}

/// Build a stress profile: 6 traffic lanes, 10 km, 4 000 vehicles.
pub fn stress_profile(seed: u64) -> Profile {
    build_profile(6, 10_000.0, 4_000, seed)
}

fn build_profile(lanes: usize, length_m: f64, vehicles: u32, seed: u64) -> Profile {
    let road_id = RoadSegmentId(1);
    let mut road = TestRoad::new(road_id, &vec![LaneType::Traffic; lanes]);
    let slots_per_lane = (length_m / SLOT_SPACING_M) as usize;
    let mut models = Vec::with_capacity(vehicles as usize);

    for (id, lane, position) in init_vehicle_slots(lanes, slots_per_lane, vehicles, seed) {
        let mut vehicle = TestVehicle::new(id, lane, position);
        if id.0 % 10 == 0 {
            vehicle = vehicle.with_exit(road_id);
        }
        road.insert(vehicle);

        let config = LaneChangeConfig {
            incentive: Some(IncentiveParams::default()),
            cooldown: CooldownConfig::enabled(),
            ..Default::default()
        };
        let pending =
            PendingLaneChangeModel::new(config).expect("default lane-change config validates");
        models.push(pending.initialize::<TestRoad, _>(id, &SelfishIncentiveFactory));
    }

    Profile { road, models }
}

/// Generate deterministic vehicle placements.
///
/// Places `n` vehicles in distinct slots of a `lanes x slots_per_lane`
/// grid using a simple hash of the seed. Returns
/// `(vehicle_id, lane, front_bumper_position)` triples.
pub fn init_vehicle_slots(
    lanes: usize,
    slots_per_lane: usize,
    n: u32,
    seed: u64,
) -> Vec<(VehicleId, LaneIndex, f64)> {
    let slot_count = lanes * slots_per_lane;
    let mut placements = Vec::with_capacity(n as usize);
    let mut occupied = vec![false; slot_count];

    for i in 0..(n as usize).min(slot_count) {
        let mut slot = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add((i as u64).wrapping_mul(1442695040888963407))
            % slot_count as u64) as usize;

        // Linear probe to avoid collisions
        while occupied[slot] {
            slot = (slot + 1) % slot_count;
        }
        occupied[slot] = true;

        let lane = LaneIndex((slot / slots_per_lane) as u32);
        let position = (slot % slots_per_lane) as f64 * SLOT_SPACING_M + SLOT_SPACING_M;
        placements.push((VehicleId(i as u64), lane, position));
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reference_profile_places_every_vehicle() {
        let profile = reference_profile(42);
        assert_eq!(profile.models.len(), 400);
        assert_eq!(profile.road.vehicles().count(), 400);
        assert_eq!(profile.road.lane_count(), 4);
    }

    #[test]
    fn init_vehicle_slots_no_collisions() {
        let placements = init_vehicle_slots(3, 50, 100, 42);
        assert_eq!(placements.len(), 100);

        let unique: HashSet<(LaneIndex, u64)> = placements
            .iter()
            .map(|&(_, lane, pos)| (lane, pos as u64))
            .collect();
        assert_eq!(unique.len(), 100, "all slots should be unique");

        for &(_, lane, pos) in &placements {
            assert!(lane.0 < 3, "lane {lane} out of bounds");
            assert!(pos > 0.0 && pos <= 500.0, "position {pos} out of bounds");
        }
    }

    #[test]
    fn init_vehicle_slots_deterministic() {
        assert_eq!(init_vehicle_slots(4, 200, 50, 7), init_vehicle_slots(4, 200, 50, 7));
    }

    #[test]
    fn init_vehicle_slots_caps_at_capacity() {
        assert_eq!(init_vehicle_slots(2, 5, 100, 1).len(), 10);
    }

    #[test]
    fn decide_then_apply_keeps_vehicle_count() {
        let mut profile = reference_profile(3);
        for _ in 0..5 {
            let decisions = profile.decide_all();
            assert_eq!(decisions.len(), 400);
            profile.apply(&decisions);
        }
        assert_eq!(profile.road.vehicles().count(), 400);
    }

    #[test]
    fn recorded_changes_enter_cooldown() {
        let mut profile = reference_profile(11);
        let decisions = profile.decide_all_at(0.0);
        profile.apply(&decisions);
        profile.record(&decisions, 0.0);

        for decision in lane_changes(&decisions) {
            let model = profile
                .models
                .iter()
                .find(|m| m.vehicle() == decision.vehicle)
                .unwrap();
            assert!(model.in_cooldown(1.0));
            assert!(!model.in_cooldown(CooldownConfig::DEFAULT_DELAY_S));
        }
    }

    #[test]
    fn selfish_incentive_rejects_unsafe_target() {
        let road = TestRoad::new(RoadSegmentId(1), &[LaneType::Traffic; 2])
            .with_vehicle(TestVehicle::new(VehicleId(0), LaneIndex(0), 100.0))
            .with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(1), 103.0));
        let me = road.vehicle(VehicleId(0)).unwrap();
        let model = SelfishIncentive::new(IncentiveParams::default(), RulesConfig::default());
        assert_eq!(
            model.acceleration_balance(me, Direction::ToLeft, &road),
            IMPOSSIBLE_INCENTIVE
        );
        assert_eq!(
            model.acceleration_balance(me, Direction::ToRight, &road),
            IMPOSSIBLE_INCENTIVE
        );
    }
}
