//! [`ObservabilityEngine`]: owns the degradation tracker and the query log.

use sage_core::models::FusionReport;

use crate::degradation::DegradationTracker;
use crate::query_log::{QueryLog, QueryLogEntry};

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub degradation: DegradationTracker,
    pub query_log: QueryLog,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished fusion: one log entry, plus each engine's outcome.
    pub fn ingest(&mut self, query: &str, report: &FusionReport) {
        for outcome in &report.outcomes {
            self.degradation.observe(outcome);
        }
        self.query_log.record(QueryLogEntry::from_report(query, report));
    }

    /// Engine ids currently failing, deduplicated, in first-failure order.
    pub fn degraded_engines(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for tracked in self.degradation.active_degradations() {
            if !ids.contains(&tracked.event.component) {
                ids.push(tracked.event.component.clone());
            }
        }
        ids
    }
}
