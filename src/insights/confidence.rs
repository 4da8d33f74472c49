//! Metric confidence scoring
//!
//! Deduction-based 0-100 trust score combining:
//! - Analytics coverage (1.5 points per missing day under 30)
//! - Estimated metrics (8 points each)
//! - Low-volume warnings (5 points each)
//! - Sparse session/event volume (15 points each)

use crate::insights::types::{ConfidenceLevel, ConfidenceSignals, ConfidenceSummary};

/// Weighting constants for the confidence scorer
///
/// Documented defaults, not measured product requirements; override per
/// deployment once real thresholds are validated.
#[derive(Debug, Clone)]
pub struct ConfidenceWeights {
    /// Coverage window considered "full" (days)
    pub full_coverage_days: u32,
    /// Deduction per day of missing coverage
    pub coverage_penalty_per_day: f64,
    /// Deduction per estimated metric
    pub estimated_metric_penalty: f64,
    /// Deduction per low-volume warning
    pub low_volume_penalty: f64,
    /// Session floor below which volume is considered sparse
    pub min_sessions_30d: u64,
    /// Deduction when the session floor is missed
    pub sparse_sessions_penalty: f64,
    /// Event floor below which volume is considered sparse
    pub min_events_30d: u64,
    /// Deduction when the event floor is missed
    pub sparse_events_penalty: f64,
    /// Score floor for the `high` level
    pub high_floor: f64,
    /// Score floor for the `medium` level
    pub medium_floor: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            full_coverage_days: 30,
            coverage_penalty_per_day: 1.5,
            estimated_metric_penalty: 8.0,
            low_volume_penalty: 5.0,
            min_sessions_30d: 100,
            sparse_sessions_penalty: 15.0,
            min_events_30d: 500,
            sparse_events_penalty: 15.0,
            high_floor: 75.0,
            medium_floor: 40.0,
        }
    }
}

/// Compute the trust score for the current analytics snapshot
///
/// Pure and deterministic: identical signals always produce an identical
/// summary. Missing upstream data arrives here as zero sentinels and
/// degrades the score instead of failing.
pub fn compute_confidence(signals: &ConfidenceSignals) -> ConfidenceSummary {
    compute_confidence_with(&ConfidenceWeights::default(), signals)
}

/// Compute the trust score with explicit weights
pub fn compute_confidence_with(
    weights: &ConfidenceWeights,
    signals: &ConfidenceSignals,
) -> ConfidenceSummary {
    // No coverage at all means nothing downstream can be trusted
    if signals.coverage_days == 0 {
        return ConfidenceSummary {
            level: ConfidenceLevel::Low,
            score: 0.0,
            coverage_days: 0,
            sessions_30d: signals.sessions_30d,
            events_30d: signals.events_30d,
            estimated_metrics: signals.estimated_metrics,
            low_volume_warnings: signals.low_volume_warnings,
            notes: vec!["No analytics coverage available.".to_string()],
        };
    }

    // Collect (deduction, note) pairs for every factor that fired
    let mut deductions: Vec<(f64, String)> = Vec::new();

    let missing_days = weights.full_coverage_days.saturating_sub(signals.coverage_days);
    if missing_days > 0 {
        deductions.push((
            missing_days as f64 * weights.coverage_penalty_per_day,
            format!(
                "Limited analytics coverage ({} of {} days)",
                signals.coverage_days, weights.full_coverage_days
            ),
        ));
    }

    if signals.estimated_metrics > 0 {
        deductions.push((
            signals.estimated_metrics as f64 * weights.estimated_metric_penalty,
            format!(
                "{} metric(s) estimated from fallback heuristics",
                signals.estimated_metrics
            ),
        ));
    }

    if signals.low_volume_warnings > 0 {
        deductions.push((
            signals.low_volume_warnings as f64 * weights.low_volume_penalty,
            format!(
                "{} metric(s) below the statistical-significance floor",
                signals.low_volume_warnings
            ),
        ));
    }

    if signals.sessions_30d < weights.min_sessions_30d {
        deductions.push((
            weights.sparse_sessions_penalty,
            format!("Low session volume ({} sessions in 30d)", signals.sessions_30d),
        ));
    }

    if signals.events_30d < weights.min_events_30d {
        deductions.push((
            weights.sparse_events_penalty,
            format!("Low event volume ({} events in 30d)", signals.events_30d),
        ));
    }

    let total: f64 = deductions.iter().map(|(amount, _)| amount).sum();
    let score = (100.0 - total).clamp(0.0, 100.0);

    // Largest deduction first; equal deductions keep evaluation order
    deductions.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let notes = deductions.into_iter().map(|(_, note)| note).collect();

    ConfidenceSummary {
        level: classify_level(score, weights),
        score,
        coverage_days: signals.coverage_days,
        sessions_30d: signals.sessions_30d,
        events_30d: signals.events_30d,
        estimated_metrics: signals.estimated_metrics,
        low_volume_warnings: signals.low_volume_warnings,
        notes,
    }
}

/// Classify trust level from the composite score
fn classify_level(score: f64, weights: &ConfidenceWeights) -> ConfidenceLevel {
    if score >= weights.high_floor {
        ConfidenceLevel::High
    } else if score >= weights.medium_floor {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(
        coverage_days: u32,
        sessions_30d: u64,
        events_30d: u64,
        estimated_metrics: u32,
        low_volume_warnings: u32,
    ) -> ConfidenceSignals {
        ConfidenceSignals {
            coverage_days,
            sessions_30d,
            events_30d,
            estimated_metrics,
            low_volume_warnings,
        }
    }

    #[test]
    fn test_zero_coverage_forces_low() {
        let summary = compute_confidence(&signals(0, 5000, 20000, 0, 0));
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.level, ConfidenceLevel::Low);
        assert_eq!(summary.notes, vec!["No analytics coverage available."]);
    }

    #[test]
    fn test_full_coverage_high_volume_scores_high() {
        let summary = compute_confidence(&signals(90, 10_000, 50_000, 0, 0));
        assert!(summary.score >= 90.0);
        assert_eq!(summary.level, ConfidenceLevel::High);
        assert!(summary.notes.is_empty());
    }

    #[test]
    fn test_deductions_accumulate() {
        // 10 missing days * 1.5 + 2 estimated * 8 + 1 warning * 5 = 36
        let summary = compute_confidence(&signals(20, 5000, 20_000, 2, 1));
        assert_eq!(summary.score, 64.0);
        assert_eq!(summary.level, ConfidenceLevel::Medium);
        assert_eq!(summary.notes.len(), 3);
    }

    #[test]
    fn test_notes_ordered_most_severe_first() {
        // estimated: 3 * 8 = 24, coverage: 10 * 1.5 = 15, sessions: 15, events: 15
        let summary = compute_confidence(&signals(20, 50, 300, 3, 0));
        assert!(summary.notes[0].contains("fallback heuristics"));
        // Tied 15-point deductions keep evaluation order: coverage, sessions, events
        assert!(summary.notes[1].contains("coverage"));
        assert!(summary.notes[2].contains("session volume"));
        assert!(summary.notes[3].contains("event volume"));
    }

    #[test]
    fn test_score_clamped_to_zero() {
        let summary = compute_confidence(&signals(1, 0, 0, 10, 10));
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.level, ConfidenceLevel::Low);
    }

    #[test]
    fn test_level_boundaries() {
        // 75 exactly is high: 25 missing days would be 37.5; craft via estimated metrics
        let weights = ConfidenceWeights::default();
        let summary = compute_confidence_with(&weights, &signals(30, 5000, 20_000, 0, 5));
        assert_eq!(summary.score, 75.0);
        assert_eq!(summary.level, ConfidenceLevel::High);

        let summary = compute_confidence_with(&weights, &signals(30, 5000, 20_000, 0, 12));
        assert_eq!(summary.score, 40.0);
        assert_eq!(summary.level, ConfidenceLevel::Medium);
    }
}
