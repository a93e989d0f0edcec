//! lanesim: the lane-change decision core of a microscopic highway simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! lanesim sub-crates. For most users, adding `lanesim` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lanesim::prelude::*;
//! use lanesim_test_utils::{TestRoad, TestVehicle};
//!
//! // An incentive model that always prefers the lane to the left.
//! struct PreferLeft;
//! impl SafetyLimits for PreferLeft {
//!     fn minimum_gap(&self) -> f64 { 2.0 }
//!     fn safe_deceleration(&self) -> f64 { 4.0 }
//! }
//! impl<R: RoadSegment> IncentiveModel<R> for PreferLeft {
//!     fn acceleration_balance(&self, _me: &R::Vehicle, d: Direction, _road: &R) -> f64 {
//!         if d == Direction::ToLeft { 0.5 } else { -0.5 }
//!     }
//! }
//! struct PreferLeftFactory;
//! impl<R: RoadSegment> IncentiveModelFactory<R> for PreferLeftFactory {
//!     type Model = PreferLeft;
//!     fn build(&self, _: VehicleId, _: &RulesConfig, _: Option<&IncentiveParams>) -> PreferLeft {
//!         PreferLeft
//!     }
//! }
//!
//! // A three-lane segment with one car in the rightmost lane.
//! let road = TestRoad::new(RoadSegmentId(7), &[LaneType::Traffic; 3])
//!     .with_vehicle(TestVehicle::new(VehicleId(1), LaneIndex(0), 100.0));
//! let me = road.vehicle(VehicleId(1)).unwrap();
//!
//! let model = PendingLaneChangeModel::new(LaneChangeConfig::default())
//!     .unwrap()
//!     .initialize::<TestRoad, _>(VehicleId(1), &PreferLeftFactory);
//! assert_eq!(model.decide(me, &road), Direction::ToLeft);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lanesim-core` | IDs, directions, lane types, road-view traits |
//! | [`lanechange`] | `lanesim-lanechange` | Decision model, safety gate, arbiter, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`lanesim-core`).
///
/// Contains vehicle and lane identifiers, [`types::Direction`], and the
/// road-view traits ([`types::Vehicle`], [`types::LaneSegment`],
/// [`types::RoadSegment`]) a host simulation implements.
pub use lanesim_core as types;

/// Lane-change decisions (`lanesim-lanechange`).
///
/// [`lanechange::LaneChangeModel`] is the per-vehicle state; the
/// [`lanechange::IncentiveModel`] trait is the main extension point.
pub use lanesim_lanechange as lanechange;

/// Common imports for typical lanesim usage.
///
/// ```rust
/// use lanesim::prelude::*;
/// ```
///
/// This imports the most frequently used types: identifiers, the road-view
/// traits, configuration, the per-vehicle model and the incentive traits.
pub mod prelude {
    // Core types and traits
    pub use lanesim_core::{
        Direction, LaneIndex, LaneSegment, LaneType, LongitudinalModel, RoadSegment,
        RoadSegmentId, Vehicle, VehicleId,
    };

    // Configuration
    pub use lanesim_lanechange::{
        ConfigError, CooldownConfig, IncentiveParams, LaneChangeConfig, RulesConfig,
    };

    // Decision model
    pub use lanesim_lanechange::{
        decide_all, IncentiveModel, IncentiveModelFactory, LaneChangeDecision, LaneChangeModel,
        PendingLaneChangeModel, SafetyLimits, IMPOSSIBLE_INCENTIVE,
    };
}
