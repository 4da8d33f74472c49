//! Conversion funnel math
//!
//! Turns an ordered list of stage counts into conversion and drop-off
//! percentages. Every rate is a round-half-up integer percent; every
//! denominator is guarded so sparse traffic yields zeros, never NaN.

use crate::insights::round_half_up;
use crate::insights::types::{FunnelData, FunnelStep, Period, StepCount, Track};

/// Canonical pipeline order used by the marketplace dashboards
///
/// Callers may supply any ordered subset; this constant is the reference
/// sequence for data sources and tests.
pub const CANONICAL_STEPS: [(&str, &str); 6] = [
    ("visit", "Visit"),
    ("registration", "Registration"),
    ("nda_requested", "NDA Requested"),
    ("nda_signed", "NDA Signed"),
    ("enquiry", "Enquiry"),
    ("deal_room", "Deal Room"),
];

/// Selection options for one funnel computation
#[derive(Debug, Clone, Copy, Default)]
pub struct FunnelOptions {
    pub period: Period,
    pub track: Track,
    /// Upstream source's own estimation flag, propagated verbatim
    pub is_estimated: bool,
}

/// Compute conversion/drop-off percentages over ordered stage counts
///
/// Step order is exactly the caller-supplied pipeline order. The first step
/// carries null derived fields (no predecessor); empty input yields an empty
/// funnel rather than an error.
pub fn compute_funnel(step_counts: &[StepCount], options: FunnelOptions) -> FunnelData {
    let top_of_funnel = step_counts.first().map(|s| s.count).unwrap_or(0);

    let steps = step_counts
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            if i == 0 {
                return FunnelStep {
                    step: stage.step.clone(),
                    label: stage.label.clone(),
                    count: stage.count,
                    conversion_rate: None,
                    drop_off: None,
                    drop_off_rate: None,
                };
            }

            let previous = step_counts[i - 1].count;
            let drop_off = previous.saturating_sub(stage.count);

            FunnelStep {
                step: stage.step.clone(),
                label: stage.label.clone(),
                count: stage.count,
                conversion_rate: Some(percent_of(stage.count, top_of_funnel)),
                drop_off: Some(drop_off),
                drop_off_rate: Some(percent_of(drop_off, previous)),
            }
        })
        .collect();

    FunnelData {
        steps,
        is_estimated: options.is_estimated,
        period: options.period,
        track: options.track,
    }
}

/// `part / whole` as a round-half-up integer percent, 0 on a zero denominator
fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0) as u32
}
