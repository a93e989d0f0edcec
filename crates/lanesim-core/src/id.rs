//! Strongly-typed identifiers and the [`LaneIndex`] type.

use std::fmt;

/// Identifies a vehicle within a simulation.
///
/// Vehicle IDs are assigned by the simulation when a vehicle enters the
/// network and stay stable for the vehicle's lifetime. They also provide
/// the deterministic ordering used when decisions are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VehicleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a road segment within the road network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadSegmentId(pub u32);

impl fmt::Display for RoadSegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RoadSegmentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a lane on a road segment.
///
/// Lanes are counted from the right: [`LaneIndex::MOST_RIGHT`] is the
/// rightmost lane and `lane_count - 1` the leftmost. Moving right
/// decreases the index, moving left increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneIndex(pub u32);

impl LaneIndex {
    /// Lower bound of the valid lane range.
    pub const MOST_RIGHT: LaneIndex = LaneIndex(0);

    /// The exit lane. Vehicles leaving the road at the current segment
    /// must be in this lane.
    pub const LANE1: LaneIndex = LaneIndex(1);

    /// The lane immediately to the left of [`LaneIndex::LANE1`].
    pub const LANE2: LaneIndex = LaneIndex(2);

    /// The lane one step to the right, or `None` below
    /// [`LaneIndex::MOST_RIGHT`].
    pub fn right(self) -> Option<LaneIndex> {
        self.0
            .checked_sub(1)
            .map(LaneIndex)
            .filter(|lane| *lane >= Self::MOST_RIGHT)
    }

    /// The lane one step to the left, or `None` if it would not exist on
    /// a road with `lane_count` lanes.
    pub fn left(self, lane_count: usize) -> Option<LaneIndex> {
        let next = self.0.checked_add(1)?;
        ((next as usize) < lane_count).then_some(LaneIndex(next))
    }
}

impl fmt::Display for LaneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LaneIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_of_most_right_is_none() {
        assert_eq!(LaneIndex::MOST_RIGHT.right(), None);
        assert_eq!(LaneIndex::LANE1.right(), Some(LaneIndex::MOST_RIGHT));
        assert_eq!(LaneIndex::LANE2.right(), Some(LaneIndex::LANE1));
    }

    #[test]
    fn left_respects_lane_count() {
        assert_eq!(LaneIndex(0).left(3), Some(LaneIndex(1)));
        assert_eq!(LaneIndex(1).left(3), Some(LaneIndex(2)));
        assert_eq!(LaneIndex(2).left(3), None);
        assert_eq!(LaneIndex(0).left(1), None);
        assert_eq!(LaneIndex(u32::MAX).left(usize::MAX), None);
    }

    #[test]
    fn ids_display_inner_value() {
        assert_eq!(VehicleId(42).to_string(), "42");
        assert_eq!(RoadSegmentId(7).to_string(), "7");
        assert_eq!(LaneIndex::LANE2.to_string(), "2");
    }
}
