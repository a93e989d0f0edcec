//! Test utilities and mock types for lanesim development.
//!
//! Provides in-memory implementations of the core read traits
//! ([`Vehicle`], [`LaneSegment`], [`RoadSegment`]) and the car-following
//! fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstantAcceleration, LinearGapModel, ScriptedAcceleration};

use indexmap::IndexMap;
use lanesim_core::{
    LaneIndex, LaneSegment, LaneType, LongitudinalModel, RoadSegment, RoadSegmentId, Vehicle,
    VehicleId,
};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Shared car-following model of a [`TestVehicle`].
pub type SharedModel = Arc<dyn LongitudinalModel<TestVehicle> + Send + Sync>;

/// Mock vehicle implementing [`Vehicle`].
///
/// `position` is the front bumper along the road in metres; the rear
/// bumper is at `position - length`.
#[derive(Clone)]
pub struct TestVehicle {
    pub id: VehicleId,
    pub lane: LaneIndex,
    pub position: f64,
    pub length: f64,
    pub exit: Option<RoadSegmentId>,
    pub model: SharedModel,
}

impl TestVehicle {
    /// A 5 m vehicle driven by [`LinearGapModel::default()`].
    pub fn new(id: VehicleId, lane: LaneIndex, position: f64) -> Self {
        Self {
            id,
            lane,
            position,
            length: 5.0,
            exit: None,
            model: Arc::new(LinearGapModel::default()),
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_exit(mut self, exit: RoadSegmentId) -> Self {
        self.exit = Some(exit);
        self
    }

    pub fn with_model(mut self, model: SharedModel) -> Self {
        self.model = model;
        self
    }

    pub fn rear_position(&self) -> f64 {
        self.position - self.length
    }
}

impl fmt::Debug for TestVehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestVehicle")
            .field("id", &self.id)
            .field("lane", &self.lane)
            .field("position", &self.position)
            .field("length", &self.length)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}

impl Vehicle for TestVehicle {
    fn id(&self) -> VehicleId {
        self.id
    }

    fn lane(&self) -> LaneIndex {
        self.lane
    }

    fn exit_road_segment(&self) -> Option<RoadSegmentId> {
        self.exit
    }

    fn net_distance(&self, front: &Self) -> f64 {
        front.rear_position() - self.position
    }

    fn longitudinal_model(&self) -> &dyn LongitudinalModel<Self> {
        self.model.as_ref()
    }
}

/// Mock lane implementing [`LaneSegment`].
///
/// Vehicles are kept in insertion order, keyed by id. Neighbour queries
/// compare front-bumper positions: a vehicle at exactly `me`'s position
/// counts as behind.
#[derive(Clone, Debug, Default)]
pub struct TestLane {
    pub lane_type: LaneType,
    pub vehicles: IndexMap<VehicleId, TestVehicle>,
}

impl TestLane {
    pub fn new(lane_type: LaneType) -> Self {
        Self {
            lane_type,
            vehicles: IndexMap::new(),
        }
    }

    /// Insert `vehicle`, replacing any vehicle with the same id.
    pub fn with_vehicle(mut self, vehicle: TestVehicle) -> Self {
        self.insert(vehicle);
        self
    }

    pub fn insert(&mut self, vehicle: TestVehicle) {
        self.vehicles.insert(vehicle.id, vehicle);
    }

    pub fn remove(&mut self, id: VehicleId) -> Option<TestVehicle> {
        self.vehicles.shift_remove(&id)
    }
}

impl LaneSegment for TestLane {
    type Vehicle = TestVehicle;

    fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    fn front_vehicle(&self, me: &TestVehicle) -> Option<&TestVehicle> {
        self.vehicles
            .values()
            .filter(|v| v.id != me.id && v.position > me.position)
            .min_by(|a, b| a.position.total_cmp(&b.position))
    }

    fn rear_vehicle(&self, me: &TestVehicle) -> Option<&TestVehicle> {
        self.vehicles
            .values()
            .filter(|v| v.id != me.id && v.position <= me.position)
            .max_by(|a, b| a.position.total_cmp(&b.position))
    }
}

/// Mock road implementing [`RoadSegment`].
#[derive(Clone, Debug)]
pub struct TestRoad {
    pub id: RoadSegmentId,
    pub lanes: SmallVec<[TestLane; 4]>,
}

impl TestRoad {
    /// A road whose lane `i` has type `lane_types[i]`.
    pub fn new(id: RoadSegmentId, lane_types: &[LaneType]) -> Self {
        Self {
            id,
            lanes: lane_types.iter().map(|&t| TestLane::new(t)).collect(),
        }
    }

    /// Place `vehicle` in the lane named by its `lane` field.
    ///
    /// # Panics
    ///
    /// Panics if that lane does not exist.
    pub fn with_vehicle(mut self, vehicle: TestVehicle) -> Self {
        self.insert(vehicle);
        self
    }

    pub fn insert(&mut self, vehicle: TestVehicle) {
        let lane = vehicle.lane.0 as usize;
        self.lanes[lane].insert(vehicle);
    }

    /// Look a vehicle up by id in any lane.
    pub fn vehicle(&self, id: VehicleId) -> Option<&TestVehicle> {
        self.lanes.iter().find_map(|lane| lane.vehicles.get(&id))
    }

    /// All vehicles, lane by lane.
    pub fn vehicles(&self) -> impl Iterator<Item = &TestVehicle> {
        self.lanes.iter().flat_map(|lane| lane.vehicles.values())
    }

    /// Move a vehicle one lane in `offset` direction. Used by tests to
    /// play the apply phase.
    ///
    /// Returns `false` if the vehicle or the target lane does not exist.
    pub fn shift_lane(&mut self, id: VehicleId, offset: i32) -> bool {
        let Some(from) = self
            .lanes
            .iter()
            .position(|lane| lane.vehicles.contains_key(&id))
        else {
            return false;
        };
        let to = from as i64 + offset as i64;
        if to < 0 || to as usize >= self.lanes.len() {
            return false;
        }
        let Some(mut vehicle) = self.lanes[from].remove(id) else {
            return false;
        };
        vehicle.lane = LaneIndex(to as u32);
        self.lanes[to as usize].insert(vehicle);
        true
    }
}

impl RoadSegment for TestRoad {
    type Vehicle = TestVehicle;
    type Lane = TestLane;

    fn id(&self) -> RoadSegmentId {
        self.id
    }

    fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    fn lane_segment(&self, lane: LaneIndex) -> &TestLane {
        &self.lanes[lane.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_distance_can_be_negative() {
        let me = TestVehicle::new(VehicleId(0), LaneIndex(0), 100.0);
        let truck = TestVehicle::new(VehicleId(1), LaneIndex(1), 110.0).with_length(18.0);
        assert_eq!(me.net_distance(&truck), -8.0);
    }

    #[test]
    fn neighbours_are_nearest_on_each_side() {
        let lane = TestLane::new(LaneType::Traffic)
            .with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(0), 150.0))
            .with_vehicle(TestVehicle::new(VehicleId(2), LaneIndex(0), 120.0))
            .with_vehicle(TestVehicle::new(VehicleId(3), LaneIndex(0), 80.0))
            .with_vehicle(TestVehicle::new(VehicleId(4), LaneIndex(0), 40.0));
        let me = TestVehicle::new(VehicleId(9), LaneIndex(1), 100.0);

        assert_eq!(lane.front_vehicle(&me).map(|v| v.id), Some(VehicleId(2)));
        assert_eq!(lane.rear_vehicle(&me).map(|v| v.id), Some(VehicleId(3)));
    }

    #[test]
    fn vehicle_never_its_own_neighbour() {
        let me = TestVehicle::new(VehicleId(1), LaneIndex(0), 100.0);
        let lane = TestLane::new(LaneType::Traffic).with_vehicle(me.clone());
        assert!(lane.front_vehicle(&me).is_none());
        assert!(lane.rear_vehicle(&me).is_none());
    }

    #[test]
    fn shift_lane_moves_between_lanes() {
        let mut road = TestRoad::new(RoadSegmentId(0), &[LaneType::Traffic; 3])
            .with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(1), 10.0));
        assert!(road.shift_lane(VehicleId(1), 1));
        assert_eq!(road.vehicle(VehicleId(1)).map(|v| v.lane), Some(LaneIndex(2)));
        assert!(!road.shift_lane(VehicleId(1), 1));
        assert!(!road.shift_lane(VehicleId(5), -1));
        assert_eq!(road.vehicles().count(), 1);
    }
}
