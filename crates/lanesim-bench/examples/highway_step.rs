//! End-to-end decide/apply loop example.
//!
//! Demonstrates: build profile → decision phase against a frozen road →
//! apply phase → repeat. Run with `RUST_LOG=lanesim_lanechange=debug` to
//! see the gate and arbiter events.

use lanesim_bench::reference_profile;
use lanesim_core::Direction;
use lanesim_lanechange::phase::lane_changes;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    println!("=== lanesim highway example ===\n");

    let mut profile = reference_profile(42);
    let dt = 0.5;

    for step in 0..20 {
        let now_s = step as f64 * dt;

        // Decision phase: the road is only borrowed.
        let decisions = profile.decide_all_at(now_s);
        let (left, right) = lane_changes(&decisions).fold((0, 0), |(l, r), d| match d.direction {
            Direction::ToLeft => (l + 1, r),
            Direction::ToRight => (l, r + 1),
            Direction::NoChange => (l, r),
        });

        // Apply phase.
        let applied = profile.apply(&decisions);
        profile.record(&decisions, now_s);

        println!("t={now_s:5.1}s  left={left:3}  right={right:3}  applied={applied:3}");
    }

    let per_lane: Vec<usize> = profile.road.lanes.iter().map(|l| l.vehicles.len()).collect();
    println!("\nVehicles per lane (right to left): {per_lane:?}");
}
