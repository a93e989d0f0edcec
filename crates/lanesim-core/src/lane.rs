//! Lane-change directions and lane classification.

use crate::error::DirectionCodeError;
use crate::id::LaneIndex;
use std::fmt;

/// Outcome of a lane-change decision.
///
/// The discriminants are the integer codes used by the code-based
/// mandatory-change setter and equal the lane-index offset of the
/// maneuver: moving left increases the lane index, moving right
/// decreases it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Direction {
    /// Stay in the current lane.
    #[default]
    NoChange = 0,
    /// Move one lane to the left (lane index + 1).
    ToLeft = 1,
    /// Move one lane to the right (lane index - 1).
    ToRight = -1,
}

impl Direction {
    /// Returns the lane-index offset of this direction.
    pub fn lane_offset(self) -> i32 {
        self as i8 as i32
    }

    /// Returns the integer code of this direction.
    pub fn code(self) -> i32 {
        self.lane_offset()
    }

    /// Returns the lane this direction leads to from `lane`, or `None` if
    /// the maneuver would leave the road.
    ///
    /// For [`Direction::NoChange`] this is always `Some(lane)`.
    pub fn target_lane(self, lane: LaneIndex, lane_count: usize) -> Option<LaneIndex> {
        match self {
            Direction::NoChange => Some(lane),
            Direction::ToLeft => lane.left(lane_count),
            Direction::ToRight => lane.right(),
        }
    }

    /// `true` for [`Direction::ToLeft`] and [`Direction::ToRight`].
    pub fn is_change(self) -> bool {
        self != Direction::NoChange
    }
}

impl TryFrom<i32> for Direction {
    type Error = DirectionCodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::NoChange),
            1 => Ok(Direction::ToLeft),
            -1 => Ok(Direction::ToRight),
            _ => Err(DirectionCodeError { code }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::NoChange => write!(f, "no-change"),
            Direction::ToLeft => write!(f, "to-left"),
            Direction::ToRight => write!(f, "to-right"),
        }
    }
}

/// Classification of a lane segment.
///
/// Only [`LaneType::Traffic`] lanes are targets of discretionary lane
/// changes; lanes of other types are entered through mandatory logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LaneType {
    /// A regular through-traffic lane.
    #[default]
    Traffic,
    /// An exit (off-ramp) lane.
    Exit,
    /// An entrance (on-ramp) lane.
    Entrance,
}

impl LaneType {
    /// `true` if this lane may be the target of a discretionary change.
    pub fn is_traffic(self) -> bool {
        self == LaneType::Traffic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for dir in [Direction::NoChange, Direction::ToLeft, Direction::ToRight] {
            assert_eq!(Direction::try_from(dir.code()), Ok(dir));
        }
    }

    #[test]
    fn out_of_range_code_rejected() {
        assert_eq!(
            Direction::try_from(2),
            Err(DirectionCodeError { code: 2 })
        );
        assert!(Direction::try_from(-7).is_err());
        assert!(Direction::try_from(i32::MIN).is_err());
    }

    #[test]
    fn offsets_follow_lane_numbering() {
        assert_eq!(Direction::ToLeft.lane_offset(), 1);
        assert_eq!(Direction::ToRight.lane_offset(), -1);
        assert_eq!(Direction::NoChange.lane_offset(), 0);
    }

    #[test]
    fn target_lane_bounds() {
        assert_eq!(
            Direction::ToRight.target_lane(LaneIndex(0), 3),
            None
        );
        assert_eq!(
            Direction::ToLeft.target_lane(LaneIndex(2), 3),
            None
        );
        assert_eq!(
            Direction::ToLeft.target_lane(LaneIndex(1), 3),
            Some(LaneIndex(2))
        );
        assert_eq!(
            Direction::NoChange.target_lane(LaneIndex(1), 3),
            Some(LaneIndex(1))
        );
    }

    #[test]
    fn only_traffic_lanes_are_discretionary() {
        assert!(LaneType::Traffic.is_traffic());
        assert!(!LaneType::Exit.is_traffic());
        assert!(!LaneType::Entrance.is_traffic());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn only_valid_codes_decode(code in any::<i32>()) {
                let decoded = Direction::try_from(code);
                prop_assert_eq!(decoded.is_ok(), (-1..=1).contains(&code));
                if let Ok(dir) = decoded {
                    prop_assert_eq!(dir.code(), code);
                }
            }

            #[test]
            fn target_lane_stays_on_the_road(
                lane_count in 1usize..8,
                lane in 0u32..8,
                dir in prop_oneof![
                    Just(Direction::ToLeft),
                    Just(Direction::ToRight),
                    Just(Direction::NoChange),
                ],
            ) {
                let lane = LaneIndex(lane % lane_count as u32);
                match dir.target_lane(lane, lane_count) {
                    Some(target) => {
                        prop_assert!((target.0 as usize) < lane_count);
                        prop_assert_eq!(
                            target.0 as i64 - lane.0 as i64,
                            dir.lane_offset() as i64
                        );
                    }
                    None => {
                        prop_assert!(dir.is_change());
                    }
                }
            }
        }
    }
}
