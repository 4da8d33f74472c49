//! HTTP request handlers for the founder dashboard endpoints
//!
//! Implements handlers for:
//! - GET  /health: liveness probe
//! - GET  /founder/confidence: metric trust score
//! - GET  /founder/funnel: conversion funnel for a period/track
//! - GET  /founder/blockers: ranked growth blockers
//! - POST /founder/strategy/simulate: what-if projection
//! - GET  /founder/report: assembled markdown briefing
//!
//! Each handler gathers its collaborator data concurrently, then invokes the
//! pure engine functions. Missing upstream data degrades into sentinels with
//! notes; only malformed requests produce error responses.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::error::{ApiError, Result};
use crate::datastore::DatastoreClient;
use crate::insights::funnel::FunnelOptions;
use crate::insights::types::{
    ConfidenceSignals, ConfidenceSummary, FunnelData, GrowthBlocker, Period, StrategyInputs,
    StrategyOutputs, Track,
};
use crate::insights::{compute_confidence, compute_funnel, detect_blockers, simulate};
use crate::report::{FounderReport, ReportGenerator, ReportOptions};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hosted datastore RPC client
    pub datastore: Arc<DatastoreClient>,

    /// Briefing generator with its TTL cache
    pub report_generator: Arc<ReportGenerator>,
}

/// Raw period/track selection; unknown values normalize to defaults
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    period: Option<String>,
    track: Option<String>,
}

impl SelectionParams {
    fn period(&self) -> Period {
        self.period
            .as_deref()
            .map(Period::from_param)
            .unwrap_or_default()
    }

    fn track(&self) -> Track {
        self.track
            .as_deref()
            .map(Track::from_param)
            .unwrap_or_default()
    }
}

/// Report selection: period/track plus an optional comma-separated section list
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    period: Option<String>,
    track: Option<String>,
    sections: Option<String>,
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /founder/confidence
///
/// A failed signal fetch degrades to the zero-coverage sentinel, which the
/// scorer reports as a score-0 summary with an explanatory note.
pub async fn get_confidence(State(state): State<AppState>) -> Json<ConfidenceSummary> {
    tracing::debug!("Computing metric confidence");

    let signals = state.datastore.confidence_signals().await;
    let summary = compute_confidence(signals.value().unwrap_or(&ConfidenceSignals::default()));

    Json(summary)
}

/// GET /founder/funnel?period=&track=
///
/// A failed fetch yields an empty funnel for the selection rather than an
/// error; the dashboard renders "No funnel data available."
pub async fn get_funnel(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> Json<FunnelData> {
    let (period, track) = (params.period(), params.track());
    tracing::debug!(period = %period, track = %track, "Computing funnel");

    let step_counts = state.datastore.funnel_step_counts(period, track).await;
    let options = FunnelOptions {
        period,
        track,
        is_estimated: step_counts.is_estimated,
    };

    let funnel = match step_counts.value() {
        Some(counts) => compute_funnel(counts, options),
        None => compute_funnel(&[], options),
    };

    Json(funnel)
}

/// GET /founder/blockers?period=&track=
///
/// Blocker detection consumes the funnel output, so the funnel is computed
/// here first; engagement/risk fetches that fail simply skip their rules.
pub async fn get_blockers(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> Json<Vec<GrowthBlocker>> {
    let (period, track) = (params.period(), params.track());
    tracing::debug!(period = %period, track = %track, "Detecting growth blockers");

    let (step_counts, engagement, risk) = tokio::join!(
        state.datastore.funnel_step_counts(period, track),
        state.datastore.engagement_signals(),
        state.datastore.risk_signals(),
    );

    let options = FunnelOptions {
        period,
        track,
        is_estimated: step_counts.is_estimated,
    };
    let funnel = match step_counts.value() {
        Some(counts) => compute_funnel(counts, options),
        None => compute_funnel(&[], options),
    };

    let blockers = detect_blockers(&funnel, engagement.value(), risk.value());

    Json(blockers)
}

/// POST /founder/strategy/simulate
///
/// Lever values clamp to documented bounds; a missing baseline degrades to
/// zero-count sentinels (revenue impact becomes the all-null triple).
pub async fn post_simulate(
    State(state): State<AppState>,
    Json(inputs): Json<StrategyInputs>,
) -> Json<StrategyOutputs> {
    tracing::debug!(track = %inputs.track, "Running strategy simulation");

    let (baseline, signals) = tokio::join!(
        state.datastore.baseline_metrics(inputs.track),
        state.datastore.confidence_signals(),
    );

    let confidence = compute_confidence(signals.value().unwrap_or(&ConfidenceSignals::default()));
    let baseline = baseline.value.unwrap_or_default();

    let outputs = simulate(&baseline, &confidence, &inputs);

    Json(outputs)
}

/// GET /founder/report?period=&track=&sections=
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<FounderReport>> {
    let options = ReportOptions {
        include_sections: params.sections.as_deref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        }),
        period: params
            .period
            .as_deref()
            .map(Period::from_param)
            .unwrap_or_default(),
        track: params
            .track
            .as_deref()
            .map(Track::from_param)
            .unwrap_or_default(),
    };

    tracing::debug!(period = %options.period, track = %options.track, "Generating founder briefing");

    let report = state
        .report_generator
        .generate_report(options)
        .await
        .map_err(ApiError::InvalidRequest)?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_params_default() {
        let params = SelectionParams::default();
        assert_eq!(params.period(), Period::ThirtyDays);
        assert_eq!(params.track(), Track::All);
    }

    #[test]
    fn test_selection_params_normalize_unknown() {
        let params = SelectionParams {
            period: Some("quarterly".to_string()),
            track: Some("franchise".to_string()),
        };
        assert_eq!(params.period(), Period::ThirtyDays);
        assert_eq!(params.track(), Track::All);
    }

    #[test]
    fn test_selection_params_parse_known() {
        let params = SelectionParams {
            period: Some("7d".to_string()),
            track: Some("operational".to_string()),
        };
        assert_eq!(params.period(), Period::SevenDays);
        assert_eq!(params.track(), Track::Operational);
    }
}
