//! Pure analytics engine for the founder dashboard
//!
//! Four synchronous, side-effect-free components over already-aggregated
//! counts: confidence scoring, funnel math, growth-blocker detection, and
//! what-if strategy simulation. Nothing in this module performs I/O; the
//! datastore client and HTTP handlers feed it plain values.

pub mod blockers;
pub mod confidence;
pub mod funnel;
pub mod strategy;
pub mod types;

pub use blockers::{detect_blockers, BlockerThresholds};
pub use confidence::{compute_confidence, compute_confidence_with, ConfidenceWeights};
pub use funnel::{compute_funnel, FunnelOptions};
pub use strategy::{simulate, simulate_with, SimulationAssumptions};

/// Round-half-up, applied identically to every derived percentage and count
/// so results stay deterministic across components.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn test_round_half_up_at_midpoint() {
        assert_eq!(round_half_up(62.5), 63.0);
        assert_eq!(round_half_up(17.5), 18.0);
        assert_eq!(round_half_up(16.2), 16.0);
        assert_eq!(round_half_up(19.8), 20.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }
}
