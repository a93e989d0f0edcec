//! Safety gate for a candidate lane change.
//!
//! A change is safe when both net gaps in the target lane reach the
//! minimum gap, the new follower would not have to brake at or beyond
//! the safe deceleration, and the changing vehicle itself would brake
//! strictly less than it. Nothing is mutated; rejected checks emit
//! `debug!` events.

use crate::incentive::SafetyLimits;
use lanesim_core::{LaneSegment, Vehicle, GAP_INFINITY};
use tracing::debug;

/// Outcome of a safety check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// All criteria hold.
    Safe,
    /// The front or rear net gap is below the minimum gap.
    GapTooSmall,
    /// The new follower would brake at least as hard as the safe
    /// deceleration.
    FollowerBraking,
    /// The changing vehicle would brake at least as hard as the safe
    /// deceleration behind its new leader.
    OwnBraking,
}

impl SafetyVerdict {
    /// `true` only for [`SafetyVerdict::Safe`].
    pub fn is_safe(self) -> bool {
        self == SafetyVerdict::Safe
    }
}

/// Check a change of `me` into `lane` at `me`'s current position.
pub fn check_lane<L: LaneSegment>(
    me: &L::Vehicle,
    lane: &L,
    limits: &impl SafetyLimits,
) -> SafetyVerdict {
    let front = lane.front_vehicle(me);
    let back = lane.rear_vehicle(me);
    check(me, front, back, limits)
}

/// Check a change of `me` in between `front` and `back`.
///
/// A missing `front` or `back` counts as an infinite gap. A missing
/// `back` also counts as zero induced acceleration; that fallback is
/// specific to this check.
pub fn check<V: Vehicle>(
    me: &V,
    front: Option<&V>,
    back: Option<&V>,
    limits: &impl SafetyLimits,
) -> SafetyVerdict {
    let minimum_gap = limits.minimum_gap();
    let safe_deceleration = limits.safe_deceleration();

    let gap_front = front.map_or(GAP_INFINITY, |f| me.net_distance(f));
    let gap_back = back.map_or(GAP_INFINITY, |b| b.net_distance(me));

    // Net gaps go negative when lengths differ; compare them as-is.
    if gap_front < minimum_gap || gap_back < minimum_gap {
        debug!(
            vehicle = %me.id(),
            gap_front,
            gap_back,
            minimum_gap,
            "lane change unsafe: gap below minimum"
        );
        return SafetyVerdict::GapTooSmall;
    }

    let back_new_acc = match back {
        Some(b) => b.acceleration_behind(Some(me)),
        None => 0.0,
    };
    if back_new_acc <= -safe_deceleration {
        debug!(
            vehicle = %me.id(),
            gap_front,
            gap_back,
            back_new_acc,
            safe_deceleration,
            "lane change unsafe: new follower brakes too hard"
        );
        return SafetyVerdict::FollowerBraking;
    }

    let me_new_acc = me.acceleration_behind(front);
    if me_new_acc > -safe_deceleration {
        return SafetyVerdict::Safe;
    }
    debug!(
        vehicle = %me.id(),
        gap_front,
        gap_back,
        back_new_acc,
        me_new_acc,
        safe_deceleration,
        "lane change unsafe: own braking too hard"
    );
    SafetyVerdict::OwnBraking
}
