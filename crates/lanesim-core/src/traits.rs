//! Traits through which the lane-change core reads the simulation.
//!
//! The core never owns vehicles or roads. The simulation implements these
//! traits over its own storage, and every method here is a read: a
//! decision observes the state captured at the start of the step and
//! mutates nothing.

use crate::id::{LaneIndex, RoadSegmentId, VehicleId};
use crate::lane::LaneType;

/// Gap reported when there is no neighbour to measure against.
pub const GAP_INFINITY: f64 = f64::INFINITY;

/// Car-following model used to compute hypothetical accelerations.
///
/// `leader` is the vehicle that would be directly ahead of `me`; `None`
/// means free road.
pub trait LongitudinalModel<V: ?Sized> {
    /// Acceleration (m/s²) of `me` when following `leader`.
    fn acceleration(&self, me: &V, leader: Option<&V>) -> f64;
}

/// Read-only view of a simulated vehicle.
pub trait Vehicle {
    /// Stable identity of this vehicle.
    fn id(&self) -> VehicleId;

    /// Lane the vehicle currently occupies.
    fn lane(&self) -> LaneIndex;

    /// Road segment at which the vehicle leaves the road, if any.
    fn exit_road_segment(&self) -> Option<RoadSegmentId>;

    /// Net distance from this vehicle to `front`, bumper to bumper.
    ///
    /// May be negative when vehicles of different lengths overlap
    /// longitudinally in adjacent lanes.
    fn net_distance(&self, front: &Self) -> f64;

    /// The car-following model driving this vehicle.
    fn longitudinal_model(&self) -> &dyn LongitudinalModel<Self>;

    /// Hypothetical acceleration of this vehicle behind `leader`.
    fn acceleration_behind(&self, leader: Option<&Self>) -> f64 {
        self.longitudinal_model().acceleration(self, leader)
    }
}

/// One lane of a road segment.
pub trait LaneSegment {
    /// Vehicle type stored in this lane.
    type Vehicle: Vehicle;

    /// Classification of this lane.
    fn lane_type(&self) -> LaneType;

    /// Nearest vehicle in this lane ahead of `me`'s current position.
    ///
    /// `me` need not be in this lane.
    fn front_vehicle(&self, me: &Self::Vehicle) -> Option<&Self::Vehicle>;

    /// Nearest vehicle in this lane behind `me`'s current position.
    fn rear_vehicle(&self, me: &Self::Vehicle) -> Option<&Self::Vehicle>;
}

/// A multi-lane road segment.
pub trait RoadSegment {
    /// Vehicle type travelling on this road.
    type Vehicle: Vehicle;
    /// Lane segment type of this road.
    type Lane: LaneSegment<Vehicle = Self::Vehicle>;

    /// Identity of this segment.
    fn id(&self) -> RoadSegmentId;

    /// Number of lanes on this segment.
    fn lane_count(&self) -> usize;

    /// The lane at `lane`.
    ///
    /// Callers only pass indices in `[LaneIndex::MOST_RIGHT, lane_count)`;
    /// implementations may panic otherwise.
    fn lane_segment(&self, lane: LaneIndex) -> &Self::Lane;
}
