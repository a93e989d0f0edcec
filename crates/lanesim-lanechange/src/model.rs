//! Per-vehicle lane-change state.
//!
//! A [`LaneChangeModel`] is created once per vehicle at simulation setup
//! and lives as long as the vehicle. Configuration-driven setup goes
//! through [`PendingLaneChangeModel`], which holds a validated
//! [`LaneChangeConfig`] until the vehicle exists and its incentive model
//! can be built. Both that path and the test-support direct constructor
//! end in the same private assembly step.

use crate::arbiter::{self, Decision, DecisionKind};
use crate::config::{ConfigError, CooldownConfig, LaneChangeConfig, RulesConfig};
use crate::incentive::{IncentiveModel, IncentiveModelFactory, SafetyLimits};
use crate::safety;
use lanesim_core::{Direction, LaneSegment, RoadSegment, Vehicle, VehicleId};
use tracing::{info, trace};

/// A validated configuration waiting for its vehicle.
#[derive(Clone, Debug)]
pub struct PendingLaneChangeModel {
    config: LaneChangeConfig,
}

impl PendingLaneChangeModel {
    /// Validate `config` and hold it until [`initialize`](Self::initialize).
    pub fn new(config: LaneChangeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// `true` if the configuration carries incentive parameters. When it
    /// does not, the factory falls back to its defaults.
    pub fn has_incentive_params(&self) -> bool {
        self.config.incentive.is_some()
    }

    /// The held configuration.
    pub fn config(&self) -> &LaneChangeConfig {
        &self.config
    }

    /// Bind to `vehicle`, building its incentive model with `factory`.
    pub fn initialize<R, F>(self, vehicle: VehicleId, factory: &F) -> LaneChangeModel<F::Model>
    where
        R: RoadSegment,
        F: IncentiveModelFactory<R>,
    {
        let incentive = factory.build(vehicle, &self.config.rules, self.config.incentive.as_ref());
        LaneChangeModel::assemble(vehicle, self.config.rules, self.config.cooldown, incentive)
    }
}

/// Lane-change state of one vehicle.
///
/// Holds the immutable rule variant, the vehicle's incentive model, the
/// pending mandatory change and the time of the last applied change.
/// Decisions take `&self`; only the setters and
/// [`record_lane_change`](Self::record_lane_change) take `&mut self`, and
/// those belong to the apply phase of a step.
#[derive(Clone, Debug)]
pub struct LaneChangeModel<M> {
    vehicle: VehicleId,
    rules: RulesConfig,
    cooldown: CooldownConfig,
    incentive: M,
    mandatory_change: Direction,
    last_change_s: Option<f64>,
}

impl<M> LaneChangeModel<M> {
    fn assemble(
        vehicle: VehicleId,
        rules: RulesConfig,
        cooldown: CooldownConfig,
        incentive: M,
    ) -> Self {
        Self {
            vehicle,
            rules,
            cooldown,
            incentive,
            mandatory_change: Direction::NoChange,
            last_change_s: None,
        }
    }

    /// Direct construction around a pre-built incentive model.
    ///
    /// Uses [`RulesConfig::default()`] (European rules, 5 m/s) and no
    /// cooldown.
    #[cfg(any(test, feature = "test-support"))]
    pub fn with_incentive_model(vehicle: VehicleId, incentive: M) -> Self {
        Self::assemble(
            vehicle,
            RulesConfig::default(),
            CooldownConfig::default(),
            incentive,
        )
    }

    /// The vehicle this state belongs to.
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    /// The bound incentive model.
    pub fn incentive_model(&self) -> &M {
        &self.incentive
    }

    /// Whether European rules apply.
    pub fn with_european_rules(&self) -> bool {
        self.rules.european_rules
    }

    /// Critical speed for the European rules, in m/s.
    pub fn critical_speed(&self) -> f64 {
        self.rules.critical_speed_eur
    }

    /// The rule variant.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// The pending mandatory change.
    pub fn mandatory_change(&self) -> Direction {
        self.mandatory_change
    }

    /// Set the pending mandatory change.
    pub fn set_mandatory_change(&mut self, direction: Direction) {
        if direction != self.mandatory_change {
            info!(
                vehicle = %self.vehicle,
                from = %self.mandatory_change,
                to = %direction,
                "mandatory lane change updated"
            );
        }
        self.mandatory_change = direction;
    }

    /// Set the pending mandatory change from its integer code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is not -1, 0 or 1. Codes reaching this setter come
    /// from simulation logic, so an invalid one is a bug and the state is
    /// left untouched.
    pub fn set_mandatory_change_code(&mut self, code: i32) {
        match Direction::try_from(code) {
            Ok(direction) => self.set_mandatory_change(direction),
            Err(err) => panic!("vehicle {}: {err}", self.vehicle),
        }
    }

    /// Record that a lane change was applied at simulated time `now_s`.
    pub fn record_lane_change(&mut self, now_s: f64) {
        self.last_change_s = Some(now_s);
    }

    /// Simulated time of the last recorded change.
    pub fn last_lane_change(&self) -> Option<f64> {
        self.last_change_s
    }

    /// `true` while the cooldown blocks discretionary changes at `now_s`.
    pub fn in_cooldown(&self, now_s: f64) -> bool {
        match (self.cooldown.delay_s, self.last_change_s) {
            (Some(delay), Some(last)) => now_s - last < delay,
            _ => false,
        }
    }
}

impl<M: SafetyLimits> LaneChangeModel<M> {
    /// Safety gate for moving `me` into `lane`.
    ///
    /// Usable by the executor to re-validate a change before applying it.
    pub fn is_safe_lane_change<L: LaneSegment>(&self, me: &L::Vehicle, lane: &L) -> bool {
        safety::check_lane(me, lane, &self.incentive).is_safe()
    }
}

impl<M> LaneChangeModel<M> {
    /// Decide what `me` should do on `road` this step.
    ///
    /// Ignores the cooldown; see [`decide_at`](Self::decide_at).
    pub fn decide<R>(&self, me: &R::Vehicle, road: &R) -> Direction
    where
        R: RoadSegment,
        M: IncentiveModel<R>,
    {
        self.arbitrate(me, road).direction
    }

    /// Like [`decide`](Self::decide), but a discretionary change is
    /// suppressed while the cooldown is active at `now_s`.
    pub fn decide_at<R>(&self, me: &R::Vehicle, road: &R, now_s: f64) -> Direction
    where
        R: RoadSegment,
        M: IncentiveModel<R>,
    {
        let decision = self.arbitrate(me, road);
        if decision.kind == DecisionKind::Discretionary
            && decision.direction.is_change()
            && self.in_cooldown(now_s)
        {
            trace!(
                vehicle = %self.vehicle,
                direction = %decision.direction,
                now_s,
                "discretionary lane change suppressed by cooldown"
            );
            return Direction::NoChange;
        }
        decision.direction
    }

    /// The decision together with the rule that produced it.
    pub fn arbitrate<R>(&self, me: &R::Vehicle, road: &R) -> Decision
    where
        R: RoadSegment,
        M: IncentiveModel<R>,
    {
        debug_assert_eq!(
            me.id(),
            self.vehicle,
            "lane-change state queried with another vehicle"
        );
        arbiter::arbitrate(me, road, &self.incentive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IncentiveParams;
    use crate::testing::{FixedIncentive, FixedIncentiveFactory};
    use lanesim_core::{LaneIndex, LaneType, RoadSegmentId};
    use lanesim_test_utils::{TestRoad, TestVehicle};

    fn three_lane_road() -> TestRoad {
        TestRoad::new(
            RoadSegmentId(1),
            &[LaneType::Traffic, LaneType::Traffic, LaneType::Traffic],
        )
    }

    #[test]
    fn direct_construction_defaults() {
        let model = LaneChangeModel::with_incentive_model(VehicleId(3), FixedIncentive::new(0.0, 0.0));
        assert!(model.with_european_rules());
        assert_eq!(model.critical_speed(), 5.0);
        assert_eq!(model.mandatory_change(), Direction::NoChange);
        assert_eq!(model.vehicle(), VehicleId(3));
        assert_eq!(model.last_lane_change(), None);
    }

    #[test]
    fn config_path_passes_rules_and_params_to_factory() {
        let config = LaneChangeConfig {
            rules: RulesConfig {
                european_rules: false,
                critical_speed_eur: 16.7,
            },
            incentive: Some(IncentiveParams {
                minimum_gap: 3.5,
                ..Default::default()
            }),
            ..Default::default()
        };
        let pending = PendingLaneChangeModel::new(config).unwrap();
        assert!(pending.has_incentive_params());
        let model = pending.initialize::<TestRoad, _>(VehicleId(9), &FixedIncentiveFactory::new(0.1, 0.2));

        assert!(!model.with_european_rules());
        assert_eq!(model.critical_speed(), 16.7);
        assert_eq!(model.incentive_model().vehicle, Some(VehicleId(9)));
        assert_eq!(model.incentive_model().rules, *model.rules());
        assert_eq!(model.incentive_model().minimum_gap(), 3.5);
    }

    #[test]
    fn config_path_without_params_uses_factory_defaults() {
        let pending = PendingLaneChangeModel::new(LaneChangeConfig::default()).unwrap();
        assert!(!pending.has_incentive_params());
        let model = pending.initialize::<TestRoad, _>(VehicleId(1), &FixedIncentiveFactory::new(0.0, 0.0));
        let defaults = IncentiveParams::default();
        assert_eq!(model.incentive_model().minimum_gap(), defaults.minimum_gap);
        assert_eq!(
            model.incentive_model().safe_deceleration(),
            defaults.safe_deceleration
        );
    }

    #[test]
    fn invalid_config_rejected_before_initialization() {
        let config = LaneChangeConfig {
            rules: RulesConfig {
                european_rules: true,
                critical_speed_eur: f64::NAN,
            },
            ..Default::default()
        };
        assert!(PendingLaneChangeModel::new(config).is_err());
    }

    #[test]
    fn both_paths_decide_alike() {
        let road = three_lane_road().with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(1), 50.0));
        let me = road.vehicle(VehicleId(1)).unwrap();

        let direct = LaneChangeModel::with_incentive_model(VehicleId(1), FixedIncentive::new(0.4, 0.4));
        let configured = PendingLaneChangeModel::new(LaneChangeConfig::default())
            .unwrap()
            .initialize::<TestRoad, _>(VehicleId(1), &FixedIncentiveFactory::new(0.4, 0.4));

        assert_eq!(direct.decide(me, &road), Direction::ToLeft);
        assert_eq!(direct.decide(me, &road), configured.decide(me, &road));
    }

    #[test]
    fn mandatory_change_setters() {
        let mut model = LaneChangeModel::with_incentive_model(VehicleId(1), FixedIncentive::new(0.0, 0.0));
        model.set_mandatory_change(Direction::ToRight);
        assert_eq!(model.mandatory_change(), Direction::ToRight);
        model.set_mandatory_change_code(1);
        assert_eq!(model.mandatory_change(), Direction::ToLeft);
        model.set_mandatory_change_code(0);
        assert_eq!(model.mandatory_change(), Direction::NoChange);
        model.set_mandatory_change_code(-1);
        assert_eq!(model.mandatory_change(), Direction::ToRight);
    }

    #[test]
    #[should_panic(expected = "invalid lane-change code 2")]
    fn invalid_mandatory_code_panics() {
        let mut model = LaneChangeModel::with_incentive_model(VehicleId(1), FixedIncentive::new(0.0, 0.0));
        model.set_mandatory_change_code(2);
    }

    #[test]
    fn invalid_mandatory_code_never_stored() {
        let mut model = LaneChangeModel::with_incentive_model(VehicleId(1), FixedIncentive::new(0.0, 0.0));
        model.set_mandatory_change(Direction::ToLeft);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            model.set_mandatory_change_code(-42);
        }));
        assert!(result.is_err());
        assert_eq!(model.mandatory_change(), Direction::ToLeft);
    }

    #[test]
    fn cooldown_suppresses_discretionary_change() {
        let config = LaneChangeConfig {
            cooldown: CooldownConfig::enabled(),
            ..Default::default()
        };
        let mut model = PendingLaneChangeModel::new(config)
            .unwrap()
            .initialize::<TestRoad, _>(VehicleId(1), &FixedIncentiveFactory::new(0.0, 0.5));
        let road = three_lane_road().with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(1), 50.0));
        let me = road.vehicle(VehicleId(1)).unwrap();

        assert_eq!(model.decide_at(me, &road, 10.0), Direction::ToLeft);
        model.record_lane_change(10.0);
        assert!(model.in_cooldown(12.9));
        assert_eq!(model.decide_at(me, &road, 12.9), Direction::NoChange);
        assert_eq!(model.decide(me, &road), Direction::ToLeft);
        assert!(!model.in_cooldown(13.0));
        assert_eq!(model.decide_at(me, &road, 13.0), Direction::ToLeft);
    }

    #[test]
    fn cooldown_never_blocks_mandatory_exit() {
        let config = LaneChangeConfig {
            cooldown: CooldownConfig::enabled(),
            ..Default::default()
        };
        let mut model = PendingLaneChangeModel::new(config)
            .unwrap()
            .initialize::<TestRoad, _>(VehicleId(1), &FixedIncentiveFactory::new(0.0, 0.0));
        let road = three_lane_road().with_vehicle(
            TestVehicle::new(VehicleId(1), LaneIndex::LANE2, 50.0).with_exit(RoadSegmentId(1)),
        );
        let me = road.vehicle(VehicleId(1)).unwrap();

        model.record_lane_change(10.0);
        assert_eq!(model.decide_at(me, &road, 10.5), Direction::ToRight);
    }

    #[test]
    fn disabled_cooldown_never_blocks() {
        let mut model = LaneChangeModel::with_incentive_model(VehicleId(1), FixedIncentive::new(0.0, 0.0));
        model.record_lane_change(1.0);
        assert!(!model.in_cooldown(1.0));
    }
}
