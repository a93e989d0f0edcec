use lanesim_core::{Direction, LaneIndex, LaneType, RoadSegmentId, Vehicle, VehicleId};
use lanesim_lanechange::safety;
use lanesim_lanechange::testing::FixedIncentive;
use lanesim_lanechange::{Incentives, LaneChangeModel, SafetyThresholds, IMPOSSIBLE_INCENTIVE};
use lanesim_test_utils::{ConstantAcceleration, TestLane, TestRoad, TestVehicle};
use proptest::prelude::*;
use std::sync::Arc;

fn lane_types() -> impl Strategy<Value = Vec<LaneType>> {
    prop::collection::vec(
        prop_oneof![
            4 => Just(LaneType::Traffic),
            1 => Just(LaneType::Exit),
            1 => Just(LaneType::Entrance),
        ],
        1..6,
    )
}

proptest! {
    #[test]
    fn choice_follows_the_larger_positive_incentive(
        to_right in -5.0f64..5.0,
        to_left in -5.0f64..5.0,
    ) {
        let chosen = Incentives { to_right, to_left }.choose();
        if to_right <= 0.0 && to_left <= 0.0 {
            prop_assert_eq!(chosen, Direction::NoChange);
        } else if to_right > to_left {
            prop_assert_eq!(chosen, Direction::ToRight);
        } else {
            prop_assert_eq!(chosen, Direction::ToLeft);
        }
    }

    #[test]
    fn equal_incentives_go_left(value in 0.001f64..5.0) {
        prop_assert_eq!(
            Incentives { to_right: value, to_left: value }.choose(),
            Direction::ToLeft
        );
    }

    #[test]
    fn decided_target_is_an_existing_traffic_lane(
        types in lane_types(),
        lane in 0u32..6,
        to_right in -5.0f64..5.0,
        to_left in -5.0f64..5.0,
    ) {
        let lane = LaneIndex(lane % types.len() as u32);
        let road = TestRoad::new(RoadSegmentId(0), &types)
            .with_vehicle(TestVehicle::new(VehicleId(1), lane, 100.0));
        let me = road.vehicle(VehicleId(1)).unwrap();
        let model = LaneChangeModel::with_incentive_model(
            VehicleId(1),
            FixedIncentive::new(to_right, to_left),
        );

        let direction = model.decide(me, &road);
        if direction.is_change() {
            let target = direction.target_lane(lane, types.len());
            prop_assert!(target.is_some());
            prop_assert_eq!(types[target.unwrap().0 as usize], LaneType::Traffic);
        }

        let scorable = [Direction::ToRight, Direction::ToLeft]
            .into_iter()
            .filter_map(|d| d.target_lane(lane, types.len()))
            .filter(|t| types[t.0 as usize].is_traffic())
            .count();
        prop_assert_eq!(model.incentive_model().queries(), scorable);
    }

    #[test]
    fn gap_below_minimum_is_never_safe(
        offset in -30.0f64..30.0,
        length in 2.0f64..20.0,
        minimum_gap in 0.0f64..10.0,
    ) {
        let me = TestVehicle::new(VehicleId(1), LaneIndex(1), 100.0)
            .with_model(Arc::new(ConstantAcceleration(0.0)));
        let other = TestVehicle::new(VehicleId(2), LaneIndex(0), 100.0 + offset)
            .with_length(length)
            .with_model(Arc::new(ConstantAcceleration(0.0)));
        let lane = TestLane::new(LaneType::Traffic).with_vehicle(other.clone());
        let limits = SafetyThresholds { minimum_gap, safe_deceleration: 4.0 };

        let gap = if other.position > me.position {
            me.net_distance(&other)
        } else {
            other.net_distance(&me)
        };
        let verdict = safety::check_lane(&me, &lane, &limits);
        prop_assert_eq!(verdict.is_safe(), gap >= minimum_gap);
    }

    #[test]
    fn impossible_incentive_never_wins(other in -5.0f64..5.0) {
        let right_blocked = Incentives { to_right: IMPOSSIBLE_INCENTIVE, to_left: other };
        prop_assert_ne!(right_blocked.choose(), Direction::ToRight);
        let left_blocked = Incentives { to_right: other, to_left: IMPOSSIBLE_INCENTIVE };
        prop_assert_ne!(left_blocked.choose(), Direction::ToLeft);
    }
}
