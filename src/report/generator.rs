// Briefing generator - main orchestrator for assembling the founder briefing

use super::sections;
use super::{FounderReport, ReportCache, ReportOptions};
use crate::datastore::DatastoreClient;
use crate::insights::funnel::FunnelOptions;
use crate::insights::types::{ConfidenceSignals, Track};
use crate::insights::{compute_confidence, compute_funnel, detect_blockers};
use std::sync::Arc;
use std::time::Instant;

/// Main service for generating founder briefings
pub struct ReportGenerator {
    datastore: Arc<DatastoreClient>,
    cache: Arc<ReportCache>,
}

impl ReportGenerator {
    /// Create new briefing generator with dependencies injected
    pub fn new(datastore: Arc<DatastoreClient>, cache_ttl_secs: u64) -> Self {
        Self {
            datastore,
            cache: Arc::new(ReportCache::new(cache_ttl_secs)),
        }
    }

    /// Generate the founder briefing for the selected track/period
    ///
    /// Every data source degrades per-section; only invalid options return
    /// an error.
    pub async fn generate_report(&self, options: ReportOptions) -> Result<FounderReport, String> {
        let start_time = Instant::now();

        options.validate()?;
        let cache_key = options.to_cache_key();

        if let Some(cached_report) = self.cache.get(&cache_key) {
            // Cached briefings are stored with their footer; only the
            // retrieval time changes
            return Ok(FounderReport {
                generation_time_ms: start_time.elapsed().as_millis() as u64,
                ..cached_report
            });
        }

        // Fetch all data sources in parallel
        let (step_counts, signals, baseline, engagement, risk) = tokio::join!(
            self.datastore
                .funnel_step_counts(options.period, options.track),
            self.datastore.confidence_signals(),
            self.datastore.baseline_metrics(options.track),
            self.datastore.engagement_signals(),
            self.datastore.risk_signals(),
        );

        // Missing confidence signals degrade to the zero-coverage sentinel
        let confidence = compute_confidence(
            signals
                .value
                .as_ref()
                .unwrap_or(&ConfidenceSignals::default()),
        );

        let funnel = step_counts.value.as_ref().map(|counts| {
            compute_funnel(
                counts,
                FunnelOptions {
                    period: options.period,
                    track: options.track,
                    is_estimated: step_counts.is_estimated,
                },
            )
        });

        let blockers = funnel
            .as_ref()
            .map(|data| detect_blockers(data, engagement.value(), risk.value()));

        let now_ms = chrono::Utc::now().timestamp_millis();

        // Build all sections first
        let header = sections::build_report_header(options.track, options.period, now_ms);
        let key_metrics = sections::build_key_metrics_section(baseline.value());
        let confidence_section = sections::build_confidence_section(&confidence);
        let funnel_section = sections::build_funnel_section(funnel.as_ref());
        let blockers_section = sections::build_blockers_section(blockers.as_deref());

        let all_sections = [
            &key_metrics,
            &confidence_section,
            &funnel_section,
            &blockers_section,
        ];

        // Collect degraded sections (only those actually included)
        let mut failed_sections = Vec::new();
        for section in all_sections {
            if options.includes(&section.name) && section.content.is_err() {
                failed_sections.push(section.name.clone());
            }
        }

        // Assemble markdown, honoring the include list
        let mut markdown = String::new();
        markdown.push_str(&header.render()); // Header always included
        for section in all_sections {
            if options.includes(&section.name) {
                markdown.push_str(&section.render());
            }
        }

        let generation_time_ms = start_time.elapsed().as_millis() as u64;
        markdown.push_str(&sections::build_report_footer(generation_time_ms, false));

        let report = FounderReport {
            markdown_content: markdown,
            track: options.track,
            period: options.period,
            generated_at: now_ms,
            failed_sections,
            generation_time_ms,
        };

        self.cache.set(cache_key, report.clone());

        Ok(report)
    }

    /// Clear cached briefings for a track
    pub fn invalidate_cache(&self, track: Track) {
        self.cache.invalidate(track);
    }
}
