//! Record every engine that dropped out of a fusion: engine id, failure kind,
//! fallback used, timestamp, recovery status.

use chrono::{DateTime, Utc};
use sage_core::models::EngineOutcome;
use serde::{Deserialize, Serialize};

/// Fallback applied whenever an engine fails: its candidates are left out.
pub const ENGINE_FALLBACK: &str = "omitted from fusion";

/// A degradation event when an engine fails and fusion continues without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still failing.
    Active,
    /// Succeeded again since.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Events retained by [`DegradationTracker::new`].
pub const DEFAULT_MAX_EVENTS: usize = 1_000;

/// Tracks engine degradation across fusion calls. Holds at most
/// `max_events` entries; recovered entries are evicted first, oldest first.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    max_events: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_EVENTS)
    }

    /// Create with a custom capacity. A capacity of zero is treated as one.
    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events: max_events.max(1),
        }
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        self.evict();
    }

    fn evict(&mut self) {
        let mut excess = self.events.len().saturating_sub(self.max_events);
        if excess == 0 {
            return;
        }
        self.events.retain(|t| {
            if excess > 0 && t.recovery_status == RecoveryStatus::Recovered {
                excess -= 1;
                false
            } else {
                true
            }
        });
        if excess > 0 {
            self.events.drain(..excess);
        }
    }

    /// Fold one engine outcome in: failures open a degradation,
    /// successes close any active ones for that engine.
    pub fn observe(&mut self, outcome: &EngineOutcome) {
        match outcome.failure() {
            Some(failure) => self.record(DegradationEvent {
                component: outcome.engine_id.clone(),
                failure: failure.kind().to_string(),
                fallback_used: ENGINE_FALLBACK.to_string(),
                timestamp: Utc::now(),
            }),
            None => self.mark_recovered(&outcome.engine_id),
        }
    }

    /// Mark every active degradation of a component as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        let mut recovered = false;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                recovered = true;
            }
        }
        if recovered {
            crate::tracing_setup::events::degradation_recovered(component);
        }
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Get active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        })
    }

    /// Count events in the last N seconds for a given component.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Duration a component has been continuously degraded, or None if not degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}
