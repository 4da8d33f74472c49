//! Growth blocker detection
//!
//! Applies a fixed, ordered list of threshold rules over funnel, engagement,
//! and risk signals to surface ranked friction points:
//! - Severe funnel drop-off: stage loses >60% of its predecessor
//! - Elevated funnel drop-off: stage loses 35-60%
//! - Shallow sessions: <2 page views per session
//! - High-risk traffic: >20% of sessions flagged
//! - Few returning visitors: <15% return rate
//! - Payment failures: >5% of attempts fail
//!
//! Each rule is an independent pure predicate producing zero or more
//! blockers; missing signal groups skip their rules instead of firing false
//! positives from zero sentinels.

use crate::insights::types::{
    BlockerCategory, EngagementSignals, FunnelData, GrowthBlocker, RiskSignals, Severity,
};

/// Threshold constants for blocker detection
///
/// Documented defaults, not measured product requirements; override per
/// deployment once real thresholds are validated.
#[derive(Debug, Clone)]
pub struct BlockerThresholds {
    /// Drop-off percent above which a stage is a severe conversion blocker
    pub severe_drop_off_pct: u32,
    /// Drop-off percent above which a stage is an elevated conversion blocker
    pub elevated_drop_off_pct: u32,
    /// Page views per session below which browsing is considered shallow
    pub min_page_views_per_session: f64,
    /// Share of flagged sessions above which traffic risk is a blocker
    pub max_high_risk_session_ratio: f64,
    /// Return-visitor share below which retention is a blocker
    pub min_returning_visitor_ratio: f64,
    /// Payment failure share above which monetization is a blocker
    pub max_payment_failure_ratio: f64,
}

impl Default for BlockerThresholds {
    fn default() -> Self {
        Self {
            severe_drop_off_pct: 60,
            elevated_drop_off_pct: 35,
            min_page_views_per_session: 2.0,
            max_high_risk_session_ratio: 0.2,
            min_returning_visitor_ratio: 0.15,
            max_payment_failure_ratio: 0.05,
        }
    }
}

/// Detect growth blockers across funnel, engagement, and risk signals
///
/// Output is sorted by severity (high > medium > low); equal-severity
/// blockers keep rule-evaluation order, so repeated calls with identical
/// input produce identical output.
pub fn detect_blockers(
    funnel: &FunnelData,
    engagement: Option<&EngagementSignals>,
    risk: Option<&RiskSignals>,
) -> Vec<GrowthBlocker> {
    detect_blockers_with(&BlockerThresholds::default(), funnel, engagement, risk)
}

/// Detect growth blockers with explicit thresholds
pub fn detect_blockers_with(
    thresholds: &BlockerThresholds,
    funnel: &FunnelData,
    engagement: Option<&EngagementSignals>,
    risk: Option<&RiskSignals>,
) -> Vec<GrowthBlocker> {
    let mut blockers = Vec::new();

    blockers.extend(detect_severe_drop_off(thresholds, funnel));
    blockers.extend(detect_elevated_drop_off(thresholds, funnel));

    if let Some(signals) = engagement {
        blockers.extend(detect_shallow_sessions(thresholds, signals));
    }
    if let Some(signals) = risk {
        blockers.extend(detect_high_risk_traffic(thresholds, signals));
    }
    if let Some(signals) = engagement {
        blockers.extend(detect_low_return_rate(thresholds, signals));
    }
    if let Some(signals) = risk {
        blockers.extend(detect_payment_failures(thresholds, signals));
    }

    // Stable: ties keep rule-evaluation order
    blockers.sort_by_key(|blocker| blocker.severity.rank());
    blockers
}

/// Stage loses more than the severe threshold of its predecessor
fn detect_severe_drop_off(
    thresholds: &BlockerThresholds,
    funnel: &FunnelData,
) -> Vec<GrowthBlocker> {
    funnel
        .steps
        .windows(2)
        .filter_map(|pair| {
            let (previous, step) = (&pair[0], &pair[1]);
            let rate = step.drop_off_rate?;
            if rate <= thresholds.severe_drop_off_pct {
                return None;
            }
            Some(GrowthBlocker {
                id: format!("funnel-dropoff-{}", step.step),
                title: format!("Severe drop-off at {}", step.label),
                description: format!(
                    "{}% of users leave between {} and {} ({} of {} in the selected window).",
                    rate,
                    previous.label,
                    step.label,
                    step.drop_off.unwrap_or(0),
                    previous.count
                ),
                severity: Severity::High,
                category: BlockerCategory::Conversion,
            })
        })
        .collect()
}

/// Stage loses between the elevated and severe thresholds
fn detect_elevated_drop_off(
    thresholds: &BlockerThresholds,
    funnel: &FunnelData,
) -> Vec<GrowthBlocker> {
    funnel
        .steps
        .windows(2)
        .filter_map(|pair| {
            let (previous, step) = (&pair[0], &pair[1]);
            let rate = step.drop_off_rate?;
            if rate <= thresholds.elevated_drop_off_pct || rate > thresholds.severe_drop_off_pct {
                return None;
            }
            Some(GrowthBlocker {
                id: format!("funnel-friction-{}", step.step),
                title: format!("Elevated drop-off at {}", step.label),
                description: format!(
                    "{}% of users leave between {} and {}; worth a funnel review.",
                    rate, previous.label, step.label
                ),
                severity: Severity::Medium,
                category: BlockerCategory::Conversion,
            })
        })
        .collect()
}

/// Sessions touch fewer pages than the shallow-browsing floor
fn detect_shallow_sessions(
    thresholds: &BlockerThresholds,
    signals: &EngagementSignals,
) -> Option<GrowthBlocker> {
    if signals.page_views_per_session >= thresholds.min_page_views_per_session {
        return None;
    }
    Some(GrowthBlocker {
        id: "shallow-sessions".to_string(),
        title: "Shallow browsing sessions".to_string(),
        description: format!(
            "Visitors view {:.1} pages per session on average; listings are not holding attention.",
            signals.page_views_per_session
        ),
        severity: Severity::Medium,
        category: BlockerCategory::Engagement,
    })
}

/// Flagged-session share exceeds tolerance
fn detect_high_risk_traffic(
    thresholds: &BlockerThresholds,
    signals: &RiskSignals,
) -> Option<GrowthBlocker> {
    if signals.high_risk_session_ratio <= thresholds.max_high_risk_session_ratio {
        return None;
    }
    Some(GrowthBlocker {
        id: "high-risk-traffic".to_string(),
        title: "Elevated high-risk traffic".to_string(),
        description: format!(
            "{:.0}% of sessions are flagged high-risk; review fraud filters before trusting engagement numbers.",
            signals.high_risk_session_ratio * 100.0
        ),
        severity: Severity::High,
        category: BlockerCategory::Technical,
    })
}

/// Returning-visitor share misses the retention floor
fn detect_low_return_rate(
    thresholds: &BlockerThresholds,
    signals: &EngagementSignals,
) -> Option<GrowthBlocker> {
    if signals.returning_visitor_ratio >= thresholds.min_returning_visitor_ratio {
        return None;
    }
    Some(GrowthBlocker {
        id: "low-return-rate".to_string(),
        title: "Few returning visitors".to_string(),
        description: format!(
            "Only {:.0}% of visitors come back within the window; buyers are not building shortlists.",
            signals.returning_visitor_ratio * 100.0
        ),
        severity: Severity::Medium,
        category: BlockerCategory::Retention,
    })
}

/// Payment failure share exceeds tolerance
fn detect_payment_failures(
    thresholds: &BlockerThresholds,
    signals: &RiskSignals,
) -> Option<GrowthBlocker> {
    if signals.payment_failure_ratio <= thresholds.max_payment_failure_ratio {
        return None;
    }
    Some(GrowthBlocker {
        id: "payment-failures".to_string(),
        title: "Payment failures above tolerance".to_string(),
        description: format!(
            "{:.0}% of payment attempts fail; upgrades are leaking at the billing step.",
            signals.payment_failure_ratio * 100.0
        ),
        severity: Severity::High,
        category: BlockerCategory::Monetization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::funnel::{compute_funnel, FunnelOptions};
    use crate::insights::types::StepCount;

    fn funnel_from(values: &[u64]) -> FunnelData {
        let counts: Vec<StepCount> = values
            .iter()
            .enumerate()
            .map(|(i, &count)| StepCount {
                step: format!("stage_{}", i),
                label: format!("Stage {}", i),
                count,
            })
            .collect();
        compute_funnel(&counts, FunnelOptions::default())
    }

    #[test]
    fn test_no_rules_fire_on_healthy_input() {
        let funnel = funnel_from(&[1000, 900, 800]);
        let engagement = EngagementSignals {
            page_views_per_session: 5.2,
            returning_visitor_ratio: 0.4,
        };
        let risk = RiskSignals {
            high_risk_session_ratio: 0.02,
            payment_failure_ratio: 0.01,
        };
        let blockers = detect_blockers(&funnel, Some(&engagement), Some(&risk));
        assert!(blockers.is_empty());
    }

    #[test]
    fn test_severe_and_elevated_drop_off_split() {
        // Stage 1: 62% drop (severe). Stage 2: 39% drop (elevated).
        let funnel = funnel_from(&[1000, 380, 230]);
        let blockers = detect_blockers(&funnel, None, None);

        assert_eq!(blockers.len(), 2);
        assert_eq!(blockers[0].severity, Severity::High);
        assert_eq!(blockers[0].id, "funnel-dropoff-stage_1");
        assert_eq!(blockers[1].severity, Severity::Medium);
        assert_eq!(blockers[1].id, "funnel-friction-stage_2");
    }

    #[test]
    fn test_boundary_values_do_not_fire() {
        // Exactly 60% and exactly 35% sit on the thresholds, not above them
        let funnel = funnel_from(&[1000, 400, 260]);
        let blockers = detect_blockers(&funnel, None, None);
        assert_eq!(blockers.len(), 1);
        assert_eq!(blockers[0].id, "funnel-friction-stage_1");
    }

    #[test]
    fn test_missing_signal_groups_skip_rules() {
        // Zero sentinels would trip every engagement/risk rule if passed through
        let funnel = funnel_from(&[100, 90]);
        let blockers = detect_blockers(&funnel, None, None);
        assert!(blockers.is_empty());
    }

    #[test]
    fn test_ordering_severity_then_rule_order() {
        let funnel = funnel_from(&[1000, 300]); // 70% drop: high
        let engagement = EngagementSignals {
            page_views_per_session: 1.2,  // medium
            returning_visitor_ratio: 0.1, // medium
        };
        let risk = RiskSignals {
            high_risk_session_ratio: 0.3, // high
            payment_failure_ratio: 0.08,  // high
        };

        let blockers = detect_blockers(&funnel, Some(&engagement), Some(&risk));
        let ids: Vec<&str> = blockers.iter().map(|b| b.id.as_str()).collect();

        // Highs in rule order, then mediums in rule order
        assert_eq!(
            ids,
            vec![
                "funnel-dropoff-stage_1",
                "high-risk-traffic",
                "payment-failures",
                "shallow-sessions",
                "low-return-rate",
            ]
        );
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let funnel = funnel_from(&[1000, 300, 100]);
        let engagement = EngagementSignals {
            page_views_per_session: 1.0,
            returning_visitor_ratio: 0.05,
        };
        let first = detect_blockers(&funnel, Some(&engagement), None);
        let second = detect_blockers(&funnel, Some(&engagement), None);
        let first_ids: Vec<&str> = first.iter().map(|b| b.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
