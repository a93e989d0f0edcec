//! Decision phase of a simulation step.
//!
//! All decisions of a step must see the same snapshot: no vehicle may
//! observe a lane change that is itself being decided this step.
//! [`decide_all`] takes the road and every model by shared reference, so
//! the road cannot be mutated until the returned decisions are dropped
//! or handed to the apply phase. Results are sorted by [`VehicleId`],
//! giving the apply phase a deterministic order.

use crate::incentive::IncentiveModel;
use crate::model::LaneChangeModel;
use lanesim_core::{Direction, RoadSegment, Vehicle, VehicleId};

/// One vehicle's decision for the current step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneChangeDecision {
    /// The deciding vehicle.
    pub vehicle: VehicleId,
    /// What it should do.
    pub direction: Direction,
}

/// Decide for every `(model, vehicle)` pair on `road`.
pub fn decide_all<'a, R, M, I>(road: &R, agents: I) -> Vec<LaneChangeDecision>
where
    R: RoadSegment,
    R::Vehicle: 'a,
    M: IncentiveModel<R> + 'a,
    I: IntoIterator<Item = (&'a LaneChangeModel<M>, &'a R::Vehicle)>,
{
    collect(agents, |model, me| model.decide(me, road))
}

/// Like [`decide_all`], honouring each model's cooldown at `now_s`.
pub fn decide_all_at<'a, R, M, I>(road: &R, agents: I, now_s: f64) -> Vec<LaneChangeDecision>
where
    R: RoadSegment,
    R::Vehicle: 'a,
    M: IncentiveModel<R> + 'a,
    I: IntoIterator<Item = (&'a LaneChangeModel<M>, &'a R::Vehicle)>,
{
    collect(agents, |model, me| model.decide_at(me, road, now_s))
}

/// Only the decisions that move a vehicle.
pub fn lane_changes(decisions: &[LaneChangeDecision]) -> impl Iterator<Item = &LaneChangeDecision> {
    decisions.iter().filter(|d| d.direction.is_change())
}

fn collect<'a, V, M, I, F>(agents: I, mut decide: F) -> Vec<LaneChangeDecision>
where
    V: Vehicle + 'a,
    M: 'a,
    I: IntoIterator<Item = (&'a LaneChangeModel<M>, &'a V)>,
    F: FnMut(&LaneChangeModel<M>, &V) -> Direction,
{
    let mut decisions: Vec<LaneChangeDecision> = agents
        .into_iter()
        .map(|(model, me)| LaneChangeDecision {
            vehicle: me.id(),
            direction: decide(model, me),
        })
        .collect();
    decisions.sort_by_key(|d| d.vehicle);
    decisions
}
