//! In-memory request tracking.
//!
//! Counts chat requests, per-agent outcomes, and cumulative latency. The
//! numbers back `/api/monitoring/stats`; they reset on restart and are not
//! exported anywhere else.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Default)]
struct TrackerInner {
    chat_requests: u64,
    agent_successes: u64,
    agent_failures: u64,
    per_agent_successes: BTreeMap<String, u64>,
    per_agent_failures: BTreeMap<String, u64>,
    total_latency: Duration,
}

/// Point-in-time snapshot of tracker counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringStats {
    /// Chat requests handled since startup
    pub chat_requests: u64,
    /// Agent invocations that succeeded
    pub agent_successes: u64,
    /// Agent invocations that failed
    pub agent_failures: u64,
    /// Success fraction across all agent invocations (0.0 when idle)
    pub success_rate: f64,
    /// Mean fan-out latency in milliseconds (0.0 when idle)
    pub average_response_time_ms: f64,
    /// Successes keyed by agent id
    pub per_agent_successes: BTreeMap<String, u64>,
    /// Failures keyed by agent id
    pub per_agent_failures: BTreeMap<String, u64>,
    /// Process start time
    pub started_at: DateTime<Utc>,
    /// Seconds since process start
    pub uptime_seconds: u64,
    /// When the snapshot was taken
    pub last_updated: DateTime<Utc>,
}

/// Thread-safe request counter shared across handlers.
#[derive(Debug)]
pub struct RequestTracker {
    inner: Mutex<TrackerInner>,
    started_at: DateTime<Utc>,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    /// Create a tracker; startup time is recorded now
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackerInner::default()),
            started_at: Utc::now(),
        }
    }

    /// Record one completed chat fan-out
    pub fn record_chat(&self, total_time: Duration) {
        let mut inner = self.inner.lock();
        inner.chat_requests += 1;
        inner.total_latency += total_time;
    }

    /// Record one agent invocation outcome
    pub fn record_agent_outcome(&self, agent_id: &str, success: bool) {
        let mut inner = self.inner.lock();
        if success {
            inner.agent_successes += 1;
            *inner
                .per_agent_successes
                .entry(agent_id.to_string())
                .or_default() += 1;
        } else {
            inner.agent_failures += 1;
            *inner
                .per_agent_failures
                .entry(agent_id.to_string())
                .or_default() += 1;
        }
    }

    /// Snapshot the counters
    #[must_use]
    pub fn stats(&self) -> MonitoringStats {
        let inner = self.inner.lock();
        let total_outcomes = inner.agent_successes + inner.agent_failures;
        let success_rate = if total_outcomes == 0 {
            0.0
        } else {
            inner.agent_successes as f64 / total_outcomes as f64
        };
        let average_response_time_ms = if inner.chat_requests == 0 {
            0.0
        } else {
            inner.total_latency.as_millis() as f64 / inner.chat_requests as f64
        };
        let now = Utc::now();

        MonitoringStats {
            chat_requests: inner.chat_requests,
            agent_successes: inner.agent_successes,
            agent_failures: inner.agent_failures,
            success_rate,
            average_response_time_ms,
            per_agent_successes: inner.per_agent_successes.clone(),
            per_agent_failures: inner.per_agent_failures.clone(),
            started_at: self.started_at,
            uptime_seconds: (now - self.started_at).num_seconds().max(0) as u64,
            last_updated: now,
        }
    }
}
