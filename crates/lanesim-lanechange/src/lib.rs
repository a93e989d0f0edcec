//! Lane-change decision core for lanesim.
//!
//! Each simulated vehicle owns a [`LaneChangeModel`]. Once per step the
//! simulation asks it what the vehicle should do; the model runs the
//! mandatory exit rule, then the two-sided incentive comparison, using
//! the safety gate before committing to an exit change. Executing the
//! change is left to the caller.
//!
//! The incentive computation and the car-following model are supplied by
//! the caller through [`IncentiveModel`] and
//! [`LongitudinalModel`](lanesim_core::LongitudinalModel).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arbiter;
pub mod config;
pub mod incentive;
pub mod model;
pub mod phase;
pub mod safety;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use arbiter::{Decision, DecisionKind, Incentives};
pub use config::{ConfigError, CooldownConfig, IncentiveParams, LaneChangeConfig, RulesConfig};
pub use incentive::{
    IncentiveModel, IncentiveModelFactory, SafetyLimits, SafetyThresholds, IMPOSSIBLE_INCENTIVE,
};
pub use model::{LaneChangeModel, PendingLaneChangeModel};
pub use phase::{decide_all, decide_all_at, LaneChangeDecision};
pub use safety::SafetyVerdict;
