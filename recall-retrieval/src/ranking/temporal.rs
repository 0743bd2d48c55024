//! Time-decay reranking.
//!
//! Active only when the query carries a resolved time window. Results dated
//! inside the window are boosted (most at the midpoint, least at the edges);
//! results outside decay exponentially with their distance in days. Results
//! with no extractable timestamp keep their score.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use tracing::debug;

use recall_core::config::TemporalConfig;
use recall_core::models::{FusedResult, TimeWindow};

/// Applies the window boost / decay curve to fused scores.
pub struct TemporalReranker {
    config: TemporalConfig,
    /// Matches `YYYY-MM-DD` (also `/` or `_` separators) inside file paths.
    date_pattern: Regex,
}

impl TemporalReranker {
    pub fn new(config: TemporalConfig) -> Self {
        // The pattern is a literal; a compile failure here is a bug, not input.
        let date_pattern = Regex::new(r"(\d{4})[-/_](\d{2})[-/_](\d{2})")
            .unwrap_or_else(|e| panic!("invalid date pattern: {e}"));
        Self {
            config,
            date_pattern,
        }
    }

    /// Extract a result timestamp from `metadata.date`, falling back to a
    /// date embedded in the source-file path.
    pub fn extract_timestamp(&self, result: &FusedResult) -> Option<DateTime<Utc>> {
        if let Some(date) = result.result.metadata.get("date").and_then(|v| v.as_str()) {
            if let Ok(ts) = DateTime::parse_from_rfc3339(date) {
                return Some(ts.with_timezone(&Utc));
            }
            if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
            }
        }

        let path = result.result.source_file.as_deref()?;
        let caps = self.date_pattern.captures(path)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt))
    }

    /// Multiplier for a timestamp relative to the window.
    fn multiplier(&self, ts: DateTime<Utc>, window: &TimeWindow) -> f64 {
        if window.contains(ts) {
            let half_span = window.half_span_ms();
            let distance = if half_span == 0 {
                0.0
            } else {
                (ts - window.midpoint()).num_milliseconds().abs() as f64 / half_span as f64
            };
            return self.config.in_range_boost * (1.0 - self.config.edge_falloff * distance);
        }

        if !self.config.recency_boost {
            return 1.0;
        }
        let outside_ms = if ts < window.start {
            (window.start - ts).num_milliseconds()
        } else {
            (ts - window.end).num_milliseconds()
        };
        let days_outside = outside_ms as f64 / 86_400_000.0;
        (-self.config.decay_lambda * days_outside).exp()
    }

    /// Adjust every result's fused score by its temporal multiplier and
    /// re-sort the list.
    pub fn rerank(&self, results: &mut Vec<FusedResult>, window: &TimeWindow) {
        let mut adjusted = 0usize;
        for result in results.iter_mut() {
            if let Some(ts) = self.extract_timestamp(result) {
                result.fused_score *= self.multiplier(ts, window);
                adjusted += 1;
            }
        }
        results.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        debug!(adjusted, total = results.len(), "temporal rerank applied");
    }
}
