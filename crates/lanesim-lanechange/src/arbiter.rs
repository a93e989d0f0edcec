//! Direction arbitration.
//!
//! # Step order
//!
//! 1. **Mandatory exit**: on the vehicle's exit segment, a vehicle in
//!    [`LaneIndex::LANE1`] stays put and a vehicle in
//!    [`LaneIndex::LANE2`] moves right if the safety gate allows it.
//!    Vehicles further left fall through to step 2.
//! 2. **Discretionary**: each side whose target lane exists and is a
//!    traffic lane is scored by the incentive model; the others keep
//!    [`IMPOSSIBLE_INCENTIVE`].
//! 3. **Decision**: no positive incentive means no change. Right wins
//!    only if strictly better than left, so ties go left.

use crate::incentive::{IncentiveModel, IMPOSSIBLE_INCENTIVE};
use crate::safety;
use lanesim_core::{Direction, LaneIndex, LaneSegment, RoadSegment, Vehicle};
use tracing::debug;

/// Which rule produced a [`Decision`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionKind {
    /// Produced by the mandatory exit rule.
    MandatoryExit,
    /// Produced by the incentive comparison.
    Discretionary,
}

/// A direction together with the rule that chose it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// The chosen direction.
    pub direction: Direction,
    /// The rule that chose it.
    pub kind: DecisionKind,
}

/// Incentives of both sides. Unavailable sides hold
/// [`IMPOSSIBLE_INCENTIVE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Incentives {
    /// Acceleration balance of moving right.
    pub to_right: f64,
    /// Acceleration balance of moving left.
    pub to_left: f64,
}

impl Default for Incentives {
    fn default() -> Self {
        Self {
            to_right: IMPOSSIBLE_INCENTIVE,
            to_left: IMPOSSIBLE_INCENTIVE,
        }
    }
}

impl Incentives {
    /// Pick a direction: no change unless one side is strictly positive;
    /// right only if strictly greater than left.
    pub fn choose(&self) -> Direction {
        if self.to_right > 0.0 || self.to_left > 0.0 {
            if self.to_right > self.to_left {
                return Direction::ToRight;
            }
            return Direction::ToLeft;
        }
        Direction::NoChange
    }
}

/// Run the full arbitration for `me` on `road`.
pub fn arbitrate<R, M>(me: &R::Vehicle, road: &R, model: &M) -> Decision
where
    R: RoadSegment,
    M: IncentiveModel<R>,
{
    if let Some(direction) = mandatory_exit(me, road, model) {
        return Decision {
            direction,
            kind: DecisionKind::MandatoryExit,
        };
    }

    let incentives = discretionary_incentives(me, road, model);
    let direction = incentives.choose();
    if direction.is_change() {
        debug!(
            vehicle = %me.id(),
            lane = %me.lane(),
            acc_to_right = incentives.to_right,
            acc_to_left = incentives.to_left,
            %direction,
            "discretionary lane change"
        );
    }
    Decision {
        direction,
        kind: DecisionKind::Discretionary,
    }
}

/// The mandatory exit rule. `None` when it does not fire.
pub fn mandatory_exit<R, M>(me: &R::Vehicle, road: &R, model: &M) -> Option<Direction>
where
    R: RoadSegment,
    M: IncentiveModel<R>,
{
    if me.exit_road_segment() != Some(road.id()) {
        return None;
    }
    match me.lane() {
        // Already in the exit lane; do not leave it to the right.
        LaneIndex::LANE1 => Some(Direction::NoChange),
        LaneIndex::LANE2 => {
            let exit_lane = road.lane_segment(LaneIndex::LANE1);
            if safety::check_lane(me, exit_lane, model).is_safe() {
                Some(Direction::ToRight)
            } else {
                Some(Direction::NoChange)
            }
        }
        _ => None,
    }
}

/// Score both sides for a discretionary change.
pub fn discretionary_incentives<R, M>(me: &R::Vehicle, road: &R, model: &M) -> Incentives
where
    R: RoadSegment,
    M: IncentiveModel<R>,
{
    let mut incentives = Incentives::default();
    let lane = me.lane();

    if let Some(right) = lane.right() {
        if road.lane_segment(right).lane_type().is_traffic() {
            incentives.to_right = model.acceleration_balance(me, Direction::ToRight, road);
        }
    }

    if let Some(left) = lane.left(road.lane_count()) {
        if road.lane_segment(left).lane_type().is_traffic() {
            incentives.to_left = model.acceleration_balance(me, Direction::ToLeft, road);
        }
    }

    incentives
}
