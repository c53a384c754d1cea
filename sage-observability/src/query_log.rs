//! Fusion query logging: query text, intent, latency, result count, failed engines.

use std::time::Duration;

use sage_core::models::FusionReport;
use sage_core::Intent;
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub request_id: String,
    pub query: String,
    pub intent: Intent,
    pub latency: Duration,
    pub result_count: usize,
    pub failed_engines: usize,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Build an entry from a finished fusion, timestamped now.
    pub fn from_report(query: impl Into<String>, report: &FusionReport) -> Self {
        Self {
            request_id: report.request_id.to_string(),
            query: query.into(),
            intent: report.intent,
            latency: report.elapsed,
            result_count: report.nodes.len(),
            failed_engines: report.failed_engines().count(),
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded, append-only log of fusion calls.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            request_id = %entry.request_id,
            query = %entry.query,
            intent = %entry.intent,
            latency_ms = crate::tracing_setup::events::millis(entry.latency),
            result_count = entry.result_count,
            failed_engines = entry.failed_engines,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
