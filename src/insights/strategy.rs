//! What-if strategy simulation
//!
//! Growth levers are modeled as multiplicative/additive shifts on baseline
//! 30-day counts. Uncertainty bands narrow as measurement confidence
//! increases, tying the simulator's trustworthiness to data quality instead
//! of presenting false precision.

use crate::insights::round_half_up;
use crate::insights::types::{
    BaselineMetrics, Band, ConfidenceSummary, RevenueImpact, StrategyInputs, StrategyOutputs,
};

/// Elasticity and band-width constants for the simulator
///
/// Documented defaults, not measured constants; override per deployment once
/// real elasticities are validated.
#[derive(Debug, Clone)]
pub struct SimulationAssumptions {
    /// Share of added listing supply that converts into visitor-equivalent
    /// volume (diminishing returns from added top-of-funnel supply)
    pub supply_elasticity: f64,
    /// Band spread at zero confidence
    pub base_band_spread: f64,
    /// Narrowest allowed band spread
    pub min_band_spread: f64,
    /// Widest allowed band spread
    pub max_band_spread: f64,
    /// Lever bounds; out-of-range inputs clamp instead of failing
    pub max_listings_increase_pct: f64,
    pub max_nda_uplift_pts: f64,
    pub max_paid_uplift_pts: f64,
    pub max_partner_increase_pct: f64,
}

impl Default for SimulationAssumptions {
    fn default() -> Self {
        Self {
            supply_elasticity: 0.5,
            base_band_spread: 0.30,
            min_band_spread: 0.10,
            max_band_spread: 0.50,
            max_listings_increase_pct: 50.0,
            max_nda_uplift_pts: 10.0,
            max_paid_uplift_pts: 2.0,
            max_partner_increase_pct: 50.0,
        }
    }
}

impl SimulationAssumptions {
    /// Validates the assumption set and returns an error if any value is
    /// incoherent.
    ///
    /// # Validation Rules
    /// - `supply_elasticity`: must be within [0, 1]
    /// - band spreads: must be within (0, 1] with `min <= base <= max`
    /// - lever bounds: must be non-negative
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.supply_elasticity) {
            return Err(format!(
                "supply_elasticity must be between 0 and 1, got {}",
                self.supply_elasticity
            ));
        }

        for (name, value) in [
            ("min_band_spread", self.min_band_spread),
            ("base_band_spread", self.base_band_spread),
            ("max_band_spread", self.max_band_spread),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(format!("{} must be within (0, 1], got {}", name, value));
            }
        }
        if self.min_band_spread > self.max_band_spread {
            return Err(format!(
                "min_band_spread ({}) exceeds max_band_spread ({})",
                self.min_band_spread, self.max_band_spread
            ));
        }

        for (name, value) in [
            ("max_listings_increase_pct", self.max_listings_increase_pct),
            ("max_nda_uplift_pts", self.max_nda_uplift_pts),
            ("max_paid_uplift_pts", self.max_paid_uplift_pts),
            ("max_partner_increase_pct", self.max_partner_increase_pct),
        ] {
            if value < 0.0 {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }

        Ok(())
    }

    /// Clamp lever values to their documented bounds
    fn normalized(&self, inputs: &StrategyInputs) -> StrategyInputs {
        StrategyInputs {
            track: inputs.track,
            listings_increase_pct: inputs
                .listings_increase_pct
                .clamp(0.0, self.max_listings_increase_pct),
            nda_conversion_uplift_pts: inputs
                .nda_conversion_uplift_pts
                .clamp(0.0, self.max_nda_uplift_pts),
            paid_conversion_uplift_pts: inputs
                .paid_conversion_uplift_pts
                .clamp(0.0, self.max_paid_uplift_pts),
            partner_lead_increase_pct: inputs
                .partner_lead_increase_pct
                .clamp(0.0, self.max_partner_increase_pct),
        }
    }
}

/// Project low/base/high outcome ranges for the chosen growth levers
///
/// Deterministic: identical `(baseline, confidence, inputs)` always yields
/// identical output. Missing baseline values degrade to zero-count
/// sentinels; nothing here throws for data-shape problems.
pub fn simulate(
    baseline: &BaselineMetrics,
    confidence: &ConfidenceSummary,
    inputs: &StrategyInputs,
) -> StrategyOutputs {
    simulate_with(&SimulationAssumptions::default(), baseline, confidence, inputs)
}

/// Project outcome ranges with explicit assumptions
pub fn simulate_with(
    assumptions: &SimulationAssumptions,
    baseline: &BaselineMetrics,
    confidence: &ConfidenceSummary,
    inputs: &StrategyInputs,
) -> StrategyOutputs {
    let inputs = assumptions.normalized(inputs);

    let supply = 1.0 + inputs.listings_increase_pct / 100.0 * assumptions.supply_elasticity;
    let nda_shift = inputs.nda_conversion_uplift_pts / 100.0;
    let paid_shift = inputs.paid_conversion_uplift_pts / 100.0;
    let partner = 1.0 + inputs.partner_lead_increase_pct / 100.0;

    let base_nda = baseline.nda_signed.value_30d_or_zero();
    let base_enq = baseline.enquiries.value_30d_or_zero();
    let base_deal_rooms = baseline.deal_rooms_active.value_30d_or_zero();
    let base_paid = baseline.paid_users.value_30d_or_zero();

    // Propagate the levers stage by stage through the funnel
    let new_nda = base_nda * supply + base_nda * nda_shift;
    let new_enq = base_enq * supply * partner;

    let enquiry_growth = if base_enq > 0.0 {
        new_enq / base_enq
    } else {
        supply * partner
    };
    let new_deal_rooms = base_deal_rooms * enquiry_growth;

    let nda_growth = if base_nda > 0.0 {
        new_nda / base_nda
    } else {
        supply + nda_shift
    };
    let new_paid = base_paid * nda_growth + base_paid * paid_shift;

    // Band width narrows as confidence rises
    let spread = (assumptions.base_band_spread * (1.0 - confidence.score / 100.0))
        .clamp(assumptions.min_band_spread, assumptions.max_band_spread);

    let additional_nda_signed = band(additional(new_nda, base_nda), spread);
    let additional_enquiries = band(additional(new_enq, base_enq), spread);
    let additional_deal_rooms = band(additional(new_deal_rooms, base_deal_rooms), spread);
    let additional_paid_users = band(additional(new_paid, base_paid), spread);

    let revenue_impact = revenue_impact(baseline, additional_paid_users.base, spread);

    let recommended_focus = recommended_focus(assumptions, &inputs, base_enq);

    StrategyOutputs {
        additional_nda_signed,
        additional_enquiries,
        additional_deal_rooms,
        additional_paid_users,
        revenue_impact,
        recommended_focus,
    }
}

/// Additional 30-day volume over baseline, floored at zero
fn additional(new_value: f64, baseline_value: f64) -> u64 {
    round_half_up(new_value - baseline_value).max(0.0) as u64
}

/// Low/base/high band around an additional count
fn band(base: u64, spread: f64) -> Band {
    Band {
        low: round_half_up(base as f64 * (1.0 - spread)) as u64,
        base,
        high: round_half_up(base as f64 * (1.0 + spread)) as u64,
    }
}

/// Monthly revenue projection via ARPU, or an all-null triple when the
/// baseline has no paid users to derive ARPU from
fn revenue_impact(baseline: &BaselineMetrics, additional_paid: u64, spread: f64) -> RevenueImpact {
    let base_paid = baseline.paid_users.value_30d_or_zero();
    if base_paid <= 0.0 {
        return RevenueImpact {
            low: None,
            base: None,
            high: None,
            note: Some("insufficient baseline to estimate revenue".to_string()),
        };
    }

    let arpu = baseline.mrr.value_30d_or_zero() / base_paid;
    let base_revenue = additional_paid as f64 * arpu;

    RevenueImpact {
        low: Some(round_half_up(base_revenue * (1.0 - spread))),
        base: Some(round_half_up(base_revenue)),
        high: Some(round_half_up(base_revenue * (1.0 + spread))),
        note: None,
    }
}

/// Rank levers by isolated enquiry impact per unit of input magnitude and
/// emit short advisory strings for the strongest engaged levers
fn recommended_focus(
    assumptions: &SimulationAssumptions,
    inputs: &StrategyInputs,
    base_enq: f64,
) -> Vec<String> {
    const DEFAULT_FOCUS: &str =
        "Start with listing supply: modest increases produce the largest modeled enquiry lift.";

    let all_zero = inputs.listings_increase_pct == 0.0
        && inputs.nda_conversion_uplift_pts == 0.0
        && inputs.paid_conversion_uplift_pts == 0.0
        && inputs.partner_lead_increase_pct == 0.0;
    if all_zero {
        return vec![DEFAULT_FOCUS.to_string()];
    }

    // Isolated additional-enquiry impact per lever; conversion-stage levers
    // act downstream of enquiries and contribute zero here
    let levers: [(f64, f64, String); 4] = [
        (
            base_enq * inputs.listings_increase_pct / 100.0 * assumptions.supply_elasticity,
            inputs.listings_increase_pct,
            format!(
                "Expand listing supply (+{:.0}% modeled): adds top-of-funnel volume across every stage.",
                inputs.listings_increase_pct
            ),
        ),
        (
            0.0,
            inputs.nda_conversion_uplift_pts,
            format!(
                "Lift NDA conversion (+{:.1} pts modeled): compounds into deal rooms and paid growth.",
                inputs.nda_conversion_uplift_pts
            ),
        ),
        (
            0.0,
            inputs.paid_conversion_uplift_pts,
            format!(
                "Tune paid conversion (+{:.1} pts modeled): each point flows straight into revenue.",
                inputs.paid_conversion_uplift_pts
            ),
        ),
        (
            base_enq * inputs.partner_lead_increase_pct / 100.0,
            inputs.partner_lead_increase_pct,
            format!(
                "Grow partner lead volume (+{:.0}% modeled): multiplies enquiry flow directly.",
                inputs.partner_lead_increase_pct
            ),
        ),
    ];

    let mut ranked: Vec<(f64, String)> = levers
        .into_iter()
        .filter(|(impact, magnitude, _)| *magnitude > 0.0 && *impact > 0.0)
        .map(|(impact, magnitude, advisory)| (impact / magnitude, advisory))
        .collect();

    if ranked.is_empty() {
        return vec![DEFAULT_FOCUS.to_string()];
    }

    // Stable: equal efficiency keeps lever declaration order
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(3)
        .map(|(_, advisory)| advisory)
        .collect()
}
