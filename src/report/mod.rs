// Report module for the founder briefing
//
// This module provides a unified interface for generating the founder
// briefing in markdown format: key metrics, confidence, funnel, and growth
// blockers assembled with per-section graceful degradation.

pub mod formatter;
pub mod generator;
pub mod sections;

// Re-export main types
pub use generator::ReportGenerator;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::insights::types::{Period, Track};

/// Section names known to the briefing, in render order
pub const SECTION_NAMES: [&str; 4] = [
    "key_metrics",
    "confidence",
    "funnel",
    "growth_blockers",
];

/// Configuration options for briefing generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    /// List of section names to include in the briefing.
    /// If None or empty, all sections are included.
    pub include_sections: Option<Vec<String>>,

    pub period: Period,
    pub track: Track,
}

impl ReportOptions {
    /// Validates the report options.
    ///
    /// # Validation Rules
    /// - `include_sections`: every name must be one of `SECTION_NAMES`
    ///
    /// `period`/`track` cannot be invalid here; unknown parameter values
    /// already normalized during deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(sections) = &self.include_sections {
            for name in sections {
                if !SECTION_NAMES.contains(&name.as_str()) {
                    return Err(format!(
                        "unknown section '{}'; known sections: {}",
                        name,
                        SECTION_NAMES.join(", ")
                    ));
                }
            }
        }
        Ok(())
    }

    /// Generates a deterministic cache key from the options.
    ///
    /// Format: `"{track}:{period};sections:{sections}"` where `sections` is
    /// the sorted comma-separated include list or "all". Section names are
    /// sorted so logically identical selections share a cache entry.
    pub fn to_cache_key(&self) -> String {
        let sections_key = match &self.include_sections {
            None => "all".to_string(),
            Some(sections) if sections.is_empty() => "all".to_string(),
            Some(sections) => {
                let mut sorted = sections.clone();
                sorted.sort();
                sorted.join(",")
            }
        };

        format!(
            "{}:{};sections:{}",
            self.track.as_str(),
            self.period.as_str(),
            sections_key
        )
    }

    /// Whether a section should be rendered under these options
    pub(crate) fn includes(&self, section_name: &str) -> bool {
        match &self.include_sections {
            None => true,
            Some(list) if list.is_empty() => true,
            Some(list) => list.iter().any(|name| name == section_name),
        }
    }
}

/// The complete generated founder briefing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderReport {
    /// The complete markdown-formatted briefing
    pub markdown_content: String,

    pub track: Track,
    pub period: Period,

    /// Unix timestamp (milliseconds) when the briefing was generated
    pub generated_at: i64,

    /// List of sections that degraded due to missing data (if any)
    pub failed_sections: Vec<String>,

    /// Briefing generation duration in milliseconds
    pub generation_time_ms: u64,
}

/// Internal representation of a briefing section
#[derive(Debug, Clone)]
pub(crate) struct ReportSection {
    pub name: String,
    pub title: String,
    pub content: Result<String, SectionError>,
}

impl ReportSection {
    pub fn render(&self) -> String {
        match &self.content {
            Ok(markdown) => markdown.clone(),
            Err(err) => self.render_error(err),
        }
    }

    fn render_error(&self, err: &SectionError) -> String {
        format!(
            "## {}\n\n**[Data Unavailable]**\n\n{}\n\n",
            self.title,
            err.user_message()
        )
    }
}

/// Errors that can occur when building a section
#[derive(Debug, Clone)]
pub(crate) enum SectionError {
    DataSourceUnavailable(String),
}

impl SectionError {
    pub fn user_message(&self) -> String {
        match self {
            SectionError::DataSourceUnavailable(source) => {
                format!(
                    "The {} section could not be generated due to missing data. \
                    This may be temporary while analytics coverage catches up.",
                    source
                )
            }
        }
    }
}

/// TTL-based in-memory cache for briefings
pub struct ReportCache {
    cache: Mutex<HashMap<String, (FounderReport, Instant)>>,
    ttl: Duration,
}

impl ReportCache {
    /// Creates a new cache with the specified time-to-live
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Retrieves a cached briefing if it exists and is not expired.
    ///
    /// Expired entries are removed on access.
    pub fn get(&self, key: &str) -> Option<FounderReport> {
        let mut cache = self.cache.lock().unwrap();
        if let Some((report, timestamp)) = cache.get(key) {
            if timestamp.elapsed() < self.ttl {
                return Some(report.clone());
            }
            cache.remove(key);
        }
        None
    }

    /// Stores a briefing with the current timestamp, replacing any existing
    /// entry under the same key.
    pub fn set(&self, key: String, report: FounderReport) {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(key, (report, Instant::now()));
    }

    /// Invalidates all cached briefings for a track across all option
    /// combinations (keys are prefixed `"{track}:"`).
    pub fn invalidate(&self, track: Track) {
        let mut cache = self.cache.lock().unwrap();
        let prefix = format!("{}:", track.as_str());
        cache.retain(|key, _| !key.starts_with(&prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        let options = ReportOptions {
            include_sections: Some(vec!["funnel".to_string(), "confidence".to_string()]),
            period: Period::SevenDays,
            track: Track::Digital,
        };
        assert_eq!(options.to_cache_key(), "digital:7d;sections:confidence,funnel");

        let reordered = ReportOptions {
            include_sections: Some(vec!["confidence".to_string(), "funnel".to_string()]),
            ..options
        };
        assert_eq!(options.to_cache_key(), reordered.to_cache_key());
    }

    #[test]
    fn test_empty_include_list_means_all() {
        let options = ReportOptions {
            include_sections: Some(vec![]),
            ..ReportOptions::default()
        };
        assert_eq!(options.to_cache_key(), "all:30d;sections:all");
        assert!(options.includes("funnel"));
    }

    #[test]
    fn test_validate_rejects_unknown_sections() {
        let options = ReportOptions {
            include_sections: Some(vec!["valuations".to_string()]),
            ..ReportOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(ReportOptions::default().validate().is_ok());
    }

    #[test]
    fn test_cache_roundtrip_and_invalidation() {
        let cache = ReportCache::new(60);
        let report = FounderReport {
            markdown_content: "# Founder Briefing".to_string(),
            track: Track::All,
            period: Period::ThirtyDays,
            generated_at: 1_754_000_000_000,
            failed_sections: vec![],
            generation_time_ms: 12,
        };

        cache.set("all:30d;sections:all".to_string(), report);
        assert!(cache.get("all:30d;sections:all").is_some());

        cache.invalidate(Track::All);
        assert!(cache.get("all:30d;sections:all").is_none());
    }
}
