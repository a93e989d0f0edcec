//! Core types and traits for the lanesim lane-change framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers, the [`Direction`] and [`LaneType`] enums, and the
//! read-only traits ([`Vehicle`], [`LongitudinalModel`], [`LaneSegment`],
//! [`RoadSegment`]) through which the lane-change core observes a
//! simulation it does not own.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod lane;
pub mod traits;

pub use error::DirectionCodeError;
pub use id::{LaneIndex, RoadSegmentId, VehicleId};
pub use lane::{Direction, LaneType};
pub use traits::{LaneSegment, LongitudinalModel, RoadSegment, Vehicle, GAP_INFINITY};
