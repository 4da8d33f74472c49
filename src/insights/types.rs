//! Core data types for the founder insights engine
//!
//! This module defines all entities and enums shared across the analytics
//! components. Every output type serializes to plain camelCase JSON with no
//! framework-specific payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Selector Enums
// ============================================================================

/// Trailing window selector for funnel and metric queries
///
/// Unknown parameter values normalize to the 30-day default instead of
/// failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum Period {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Period {
    /// Parse a query/body parameter, normalizing unknown values to 30d
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "7d" => Self::SevenDays,
            "30d" => Self::ThirtyDays,
            _ => Self::ThirtyDays,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::ThirtyDays
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown values normalize rather than erroring (wrong value, not wrong type)
impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Period::from_param(&raw))
    }
}

/// Marketplace segmentation: physical ("operational") vs online ("digital")
/// businesses, or both cohorts combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    All,
    Operational,
    Digital,
}

impl Track {
    /// Parse a query/body parameter, normalizing unknown values to `all`
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "operational" => Self::Operational,
            "digital" => Self::Digital,
            "all" => Self::All,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Operational => "operational",
            Self::Digital => "digital",
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::All
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Track {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Track::from_param(&raw))
    }
}

// ============================================================================
// Classification Enums
// ============================================================================

/// Trust level classification derived from the confidence score
///
/// Mapping (default weights):
/// - high: score >= 75
/// - medium: score 40-74
/// - low: score < 40
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Growth blocker severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank, most severe first
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Which part of the growth pipeline a blocker points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockerCategory {
    Conversion,
    Retention,
    Engagement,
    Monetization,
    Technical,
}

// ============================================================================
// Sourced wrapper
// ============================================================================

/// Uniform wrapper for values coming back from data-access collaborators
///
/// Replaces the per-page "safe default plus dataQualityNote" boilerplate: a
/// fetch either carries a value, carries an estimated value with a note, or
/// carries no value and an explanation. Consumers degrade instead of crashing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sourced<T> {
    pub value: Option<T>,
    pub is_estimated: bool,
    pub note: Option<String>,
}

impl<T> Sourced<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            is_estimated: false,
            note: None,
        }
    }

    pub fn estimated(value: T, note: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            is_estimated: true,
            note: Some(note.into()),
        }
    }

    pub fn missing(note: impl Into<String>) -> Self {
        Self {
            value: None,
            is_estimated: false,
            note: Some(note.into()),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

// ============================================================================
// Metric Primitives
// ============================================================================

/// One named KPI over the two trailing windows (7d and 30d)
///
/// `delta`/`deltaPercent` compare the 7-day value against the prorated
/// 30-day window and are null whenever either window value is null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub label: String,

    /// Trailing 7-day value, null when the window has no coverage
    pub value_7d: Option<f64>,

    /// Trailing 30-day value, null when the window has no coverage
    pub value_30d: Option<f64>,

    /// 7-day value minus the prorated 30-day expectation
    pub delta: Option<f64>,

    /// `delta` as a percentage of the prorated expectation (1 decimal)
    pub delta_percent: Option<f64>,

    /// Set when the value came from a fallback heuristic rather than telemetry
    pub is_estimated: bool,
}

impl MetricPoint {
    /// Build a metric point, deriving the trend fields
    ///
    /// A zero prorated baseline leaves `deltaPercent` null rather than
    /// producing infinity.
    pub fn new(
        label: impl Into<String>,
        value_7d: Option<f64>,
        value_30d: Option<f64>,
        is_estimated: bool,
    ) -> Self {
        let (delta, delta_percent) = match (value_7d, value_30d) {
            (Some(v7), Some(v30)) => {
                let expected_7d = v30 * 7.0 / 30.0;
                let delta = v7 - expected_7d;
                let pct = if expected_7d > 0.0 {
                    Some((delta / expected_7d * 1000.0).round() / 10.0)
                } else {
                    None
                };
                (Some((delta * 10.0).round() / 10.0), pct)
            }
            _ => (None, None),
        };

        Self {
            label: label.into(),
            value_7d,
            value_30d,
            delta,
            delta_percent,
            is_estimated,
        }
    }

    /// 30-day value with a zero sentinel for missing coverage
    pub fn value_30d_or_zero(&self) -> f64 {
        self.value_30d.unwrap_or(0.0)
    }
}

/// Raw funnel stage count as supplied by the data source, in pipeline order
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepCount {
    pub step: String,
    pub label: String,
    pub count: u64,
}

/// One computed stage of the conversion funnel
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    /// Stable stage identifier (e.g. "nda_signed")
    pub step: String,

    /// Human-readable stage label
    pub label: String,

    pub count: u64,

    /// Percent of step-0 volume reaching this stage; null for the first step
    pub conversion_rate: Option<u32>,

    /// Users lost between the previous stage and this one; null for the first step
    pub drop_off: Option<u64>,

    /// `dropOff` as a percent of the previous stage; null for the first step
    pub drop_off_rate: Option<u32>,
}

/// Computed funnel for one period/track selection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunnelData {
    pub steps: Vec<FunnelStep>,

    /// Propagated verbatim from the upstream source's estimation flag
    pub is_estimated: bool,

    pub period: Period,
    pub track: Track,
}

// ============================================================================
// Confidence
// ============================================================================

/// Data-coverage/volume signals consumed by the confidence scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceSignals {
    /// Days with any analytics coverage
    pub coverage_days: u32,
    pub sessions_30d: u64,
    pub events_30d: u64,
    /// KPIs computed via fallback heuristics rather than direct telemetry
    pub estimated_metrics: u32,
    /// KPIs below the statistical-significance floor
    pub low_volume_warnings: u32,
}

/// How trustworthy the computed metrics are, given coverage and volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceSummary {
    pub level: ConfidenceLevel,

    /// Composite trust score
    #[schemars(range(min = 0.0, max = 100.0))]
    pub score: f64,

    pub coverage_days: u32,
    pub sessions_30d: u64,
    pub events_30d: u64,
    pub estimated_metrics: u32,
    pub low_volume_warnings: u32,

    /// Factors that actually fired, most severe first
    pub notes: Vec<String>,
}

// ============================================================================
// Blockers
// ============================================================================

/// Session-depth signals feeding blocker detection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSignals {
    pub page_views_per_session: f64,
    /// Share of 30d visitors who had visited before (0.0-1.0)
    pub returning_visitor_ratio: f64,
}

/// Fraud/abuse and payment-health signals feeding blocker detection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskSignals {
    /// Share of 30d sessions flagged high-risk (0.0-1.0)
    pub high_risk_session_ratio: f64,
    /// Share of payment attempts that failed (0.0-1.0)
    pub payment_failure_ratio: f64,
}

/// A detected friction point in the growth pipeline
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthBlocker {
    /// Stable rule-scoped identifier (e.g. "funnel-dropoff-nda_signed")
    pub id: String,

    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: BlockerCategory,
}

// ============================================================================
// Strategy Simulation
// ============================================================================

/// Named baseline KPI snapshot consumed by the strategy simulator
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetrics {
    pub visitors: MetricPoint,
    pub registrations: MetricPoint,
    pub nda_requested: MetricPoint,
    pub nda_signed: MetricPoint,
    pub enquiries: MetricPoint,
    pub deal_rooms_active: MetricPoint,
    pub paid_users: MetricPoint,
    pub mrr: MetricPoint,
}

/// User-chosen growth levers for what-if simulation
///
/// The UI exposes discrete buttons, but the engine tolerates any value within
/// the documented bounds; out-of-range values clamp (see `normalized`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyInputs {
    pub track: Track,

    /// Additional listing supply, percent (0-50)
    #[schemars(range(min = 0.0, max = 50.0))]
    pub listings_increase_pct: f64,

    /// NDA conversion uplift, percentage points (0-10)
    #[schemars(range(min = 0.0, max = 10.0))]
    pub nda_conversion_uplift_pts: f64,

    /// Paid conversion uplift, percentage points (0-2)
    #[schemars(range(min = 0.0, max = 2.0))]
    pub paid_conversion_uplift_pts: f64,

    /// Additional partner-sourced leads, percent (0-50)
    #[schemars(range(min = 0.0, max = 50.0))]
    pub partner_lead_increase_pct: f64,
}

/// Low/base/high projection for one simulated count
///
/// Invariant: `low <= base <= high`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub low: u64,
    pub base: u64,
    pub high: u64,
}

/// Projected monthly revenue impact; all-null when the baseline cannot
/// support an estimate
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueImpact {
    pub low: Option<f64>,
    pub base: Option<f64>,
    pub high: Option<f64>,
    pub note: Option<String>,
}

/// Simulation result: additional 30-day volume per tracked metric
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutputs {
    pub additional_nda_signed: Band,
    pub additional_enquiries: Band,
    pub additional_deal_rooms: Band,
    pub additional_paid_users: Band,
    pub revenue_impact: RevenueImpact,
    pub recommended_focus: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_param_normalizes_unknown() {
        assert_eq!(Period::from_param("7d"), Period::SevenDays);
        assert_eq!(Period::from_param("30d"), Period::ThirtyDays);
        assert_eq!(Period::from_param("90d"), Period::ThirtyDays);
        assert_eq!(Period::from_param(""), Period::ThirtyDays);
    }

    #[test]
    fn test_track_from_param_normalizes_unknown() {
        assert_eq!(Track::from_param("Operational"), Track::Operational);
        assert_eq!(Track::from_param("digital"), Track::Digital);
        assert_eq!(Track::from_param("franchise"), Track::All);
    }

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }

    #[test]
    fn test_metric_point_nulls_propagate() {
        let point = MetricPoint::new("Visitors", None, Some(1200.0), false);
        assert!(point.delta.is_none());
        assert!(point.delta_percent.is_none());

        let point = MetricPoint::new("Visitors", Some(300.0), None, false);
        assert!(point.delta.is_none());
    }

    #[test]
    fn test_metric_point_trend_vs_prorated_window() {
        // 1200 over 30d prorates to 280 over 7d; 350 observed => +70 (+25%)
        let point = MetricPoint::new("Visitors", Some(350.0), Some(1200.0), false);
        assert_eq!(point.delta, Some(70.0));
        assert_eq!(point.delta_percent, Some(25.0));
    }

    #[test]
    fn test_metric_point_zero_baseline_guards_percent() {
        let point = MetricPoint::new("MRR", Some(10.0), Some(0.0), false);
        assert_eq!(point.delta, Some(10.0));
        assert!(point.delta_percent.is_none());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let step = FunnelStep {
            step: "nda_signed".to_string(),
            label: "NDA Signed".to_string(),
            count: 90,
            conversion_rate: Some(9),
            drop_off: Some(60),
            drop_off_rate: Some(40),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("conversionRate").is_some());
        assert!(json.get("dropOffRate").is_some());

        let point = MetricPoint::new("Visitors", Some(1.0), Some(2.0), true);
        let json = serde_json::to_value(&point).unwrap();
        assert!(json.get("value7d").is_some());
        assert!(json.get("value30d").is_some());
        assert!(json.get("isEstimated").is_some());
    }

    #[test]
    fn test_strategy_inputs_unknown_track_normalizes() {
        let inputs: StrategyInputs =
            serde_json::from_str(r#"{"track":"saas","listingsIncreasePct":25}"#).unwrap();
        assert_eq!(inputs.track, Track::All);
        assert_eq!(inputs.listings_increase_pct, 25.0);
        assert_eq!(inputs.partner_lead_increase_pct, 0.0);
    }
}
