// Section builders for the founder briefing
//
// Each function builds a specific section of the briefing markdown.
// Sections carry Result<String, SectionError> for graceful degradation.

use super::{ReportSection, SectionError};
use crate::insights::types::{
    BaselineMetrics, ConfidenceLevel, ConfidenceSummary, FunnelData, GrowthBlocker, MetricPoint,
    Period, Severity, Track,
};

/// Build the briefing header section with metadata
///
/// Includes: track, period, generation timestamp
pub(crate) fn build_report_header(track: Track, period: Period, generated_at: i64) -> ReportSection {
    use super::formatter;

    let mut content = String::new();
    content.push_str(&formatter::build_section_header("Founder Briefing", 1));

    let headers = vec!["Field", "Value"];
    let rows = vec![
        vec!["Track".to_string(), track.to_string()],
        vec!["Period".to_string(), period.to_string()],
        vec![
            "Generated At".to_string(),
            formatter::format_timestamp(generated_at),
        ],
    ];

    content.push_str(&formatter::build_table(&headers, &rows));
    content.push('\n');

    ReportSection {
        name: "header".to_string(),
        title: "Founder Briefing".to_string(),
        content: Ok(content),
    }
}

/// Build the key metrics section
///
/// Includes: each baseline KPI over both windows with its trend delta
pub(crate) fn build_key_metrics_section(baseline: Option<&BaselineMetrics>) -> ReportSection {
    use super::formatter;

    let content = match baseline {
        Some(metrics) => {
            let mut section = formatter::build_section_header("Key Metrics", 2);

            let ordered: [&MetricPoint; 8] = [
                &metrics.visitors,
                &metrics.registrations,
                &metrics.nda_requested,
                &metrics.nda_signed,
                &metrics.enquiries,
                &metrics.deal_rooms_active,
                &metrics.paid_users,
                &metrics.mrr,
            ];

            let headers = vec!["Metric", "30d", "7d", "Trend"];
            let rows = ordered
                .iter()
                .map(|point| {
                    let label = if point.is_estimated {
                        format!("{} *", point.label)
                    } else {
                        point.label.clone()
                    };
                    vec![
                        label,
                        formatter::format_metric_value(point.value_30d),
                        formatter::format_metric_value(point.value_7d),
                        formatter::format_delta(point.delta, point.delta_percent),
                    ]
                })
                .collect::<Vec<_>>();

            section.push_str(&formatter::build_table(&headers, &rows));
            if ordered.iter().any(|point| point.is_estimated) {
                section.push_str("\n\\* estimated from fallback heuristics\n");
            }
            section.push('\n');

            Ok(section)
        }
        None => Err(SectionError::DataSourceUnavailable("key metrics".to_string())),
    };

    ReportSection {
        name: "key_metrics".to_string(),
        title: "Key Metrics".to_string(),
        content,
    }
}

/// Build the confidence section
///
/// Includes: trust score, level indicator, and the factors that fired
pub(crate) fn build_confidence_section(confidence: &ConfidenceSummary) -> ReportSection {
    use super::formatter;

    let level_indicator = match confidence.level {
        ConfidenceLevel::High => "🟢 high",
        ConfidenceLevel::Medium => "🟡 medium",
        ConfidenceLevel::Low => "🔴 low",
    };

    let mut section = formatter::build_section_header("Metric Confidence", 2);
    section.push_str(&format!(
        "Trust score: **{:.0}/100** ({})\n\n",
        confidence.score, level_indicator
    ));

    if confidence.notes.is_empty() {
        section.push_str("All coverage and volume checks passed.\n\n");
    } else {
        section.push_str(&formatter::build_list(&confidence.notes, false));
        section.push('\n');
    }

    ReportSection {
        name: "confidence".to_string(),
        title: "Metric Confidence".to_string(),
        content: Ok(section),
    }
}

/// Build the conversion funnel section
///
/// Renders "No funnel data available." when the source returned an empty
/// pipeline; degrades only when the source itself was unreachable.
pub(crate) fn build_funnel_section(funnel: Option<&FunnelData>) -> ReportSection {
    use super::formatter;

    let content = match funnel {
        Some(data) if data.steps.is_empty() => {
            let mut section = formatter::build_section_header("Conversion Funnel", 2);
            section.push_str("No funnel data available.\n\n");
            Ok(section)
        }
        Some(data) => {
            let mut section = formatter::build_section_header("Conversion Funnel", 2);

            let headers = vec!["Stage", "Count", "Conversion", "Drop-off"];
            let rows = data
                .steps
                .iter()
                .map(|step| {
                    vec![
                        step.label.clone(),
                        formatter::format_count(step.count),
                        step.conversion_rate
                            .map(|rate| formatter::format_percentage(rate as f64))
                            .unwrap_or_else(|| "—".to_string()),
                        step.drop_off_rate
                            .map(|rate| formatter::format_percentage(rate as f64))
                            .unwrap_or_else(|| "—".to_string()),
                    ]
                })
                .collect::<Vec<_>>();

            section.push_str(&formatter::build_table(&headers, &rows));
            if data.is_estimated {
                section.push_str("\nCounts backfilled from sampled data.\n");
            }
            section.push('\n');

            Ok(section)
        }
        None => Err(SectionError::DataSourceUnavailable("funnel".to_string())),
    };

    ReportSection {
        name: "funnel".to_string(),
        title: "Conversion Funnel".to_string(),
        content,
    }
}

/// Build the growth blockers section
///
/// Includes: detected friction points with severity indicators, most severe
/// first
pub(crate) fn build_blockers_section(blockers: Option<&[GrowthBlocker]>) -> ReportSection {
    use super::formatter;

    let content = match blockers {
        Some([]) => {
            let mut section = formatter::build_section_header("Growth Blockers", 2);
            section.push_str("No growth blockers detected.\n\n");
            Ok(section)
        }
        Some(items) => {
            let mut section = formatter::build_section_header("Growth Blockers", 2);

            let lines: Vec<String> = items
                .iter()
                .map(|blocker| {
                    let indicator = match blocker.severity {
                        Severity::High => "🔴",
                        Severity::Medium => "🟡",
                        Severity::Low => "🟢",
                    };
                    format!(
                        "{} **{}** — {}",
                        indicator, blocker.title, blocker.description
                    )
                })
                .collect();

            section.push_str(&formatter::build_list(&lines, false));
            section.push('\n');

            Ok(section)
        }
        None => Err(SectionError::DataSourceUnavailable(
            "growth blockers".to_string(),
        )),
    };

    ReportSection {
        name: "growth_blockers".to_string(),
        title: "Growth Blockers".to_string(),
        content,
    }
}

/// Build the briefing footer
pub(crate) fn build_report_footer(generation_time_ms: u64, cache_hit: bool) -> String {
    let source = if cache_hit { "cache" } else { "live data" };
    format!(
        "---\n\n_Generated in {} ms from {}._\n",
        generation_time_ms, source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::compute_confidence;
    use crate::insights::funnel::{compute_funnel, FunnelOptions};
    use crate::insights::types::{ConfidenceSignals, StepCount};

    #[test]
    fn test_header_contains_selection() {
        let section = build_report_header(Track::Digital, Period::SevenDays, 1_754_000_000_000);
        let rendered = section.render();
        assert!(rendered.contains("digital"));
        assert!(rendered.contains("7d"));
    }

    #[test]
    fn test_funnel_section_empty_pipeline_message() {
        let funnel = compute_funnel(&[], FunnelOptions::default());
        let section = build_funnel_section(Some(&funnel));
        assert!(section.content.is_ok());
        assert!(section.render().contains("No funnel data available."));
    }

    #[test]
    fn test_funnel_section_unavailable_source_degrades() {
        let section = build_funnel_section(None);
        assert!(section.content.is_err());
        assert!(section.render().contains("[Data Unavailable]"));
    }

    #[test]
    fn test_funnel_section_renders_rates() {
        let counts = vec![
            StepCount {
                step: "visit".to_string(),
                label: "Visit".to_string(),
                count: 1000,
            },
            StepCount {
                step: "registration".to_string(),
                label: "Registration".to_string(),
                count: 400,
            },
        ];
        let funnel = compute_funnel(&counts, FunnelOptions::default());
        let rendered = build_funnel_section(Some(&funnel)).render();
        assert!(rendered.contains("| Registration | 400 | 40% | 60% |"));
    }

    #[test]
    fn test_blockers_section_empty_is_positive_message() {
        let section = build_blockers_section(Some(&[]));
        assert!(section.render().contains("No growth blockers detected."));
    }

    #[test]
    fn test_confidence_section_always_renders() {
        let confidence = compute_confidence(&ConfidenceSignals::default());
        let section = build_confidence_section(&confidence);
        let rendered = section.render();
        assert!(rendered.contains("0/100"));
        assert!(rendered.contains("No analytics coverage available."));
    }
}
