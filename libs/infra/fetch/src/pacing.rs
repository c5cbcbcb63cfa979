// [libs/infra/fetch/src/pacing.rs]
//! =================================================================
//! APARATO: PER-HOST PACING STATE (V1.0)
//! RESPONSABILIDAD: MEMORIA DE CORTESÍA Y DETECCIÓN DE BLOQUEO POR HOST
//! =================================================================

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Rolling state kept per remote host so politeness and block-detection
/// decisions survive across individual `fetch` calls on the same client.
#[derive(Debug, Default)]
struct HostState {
    last_request_at: Option<Instant>,
    successful_request_count: u32,
    /// Timestamps of recent non-retryable 4xx responses, pruned to the
    /// trailing 60-second window on every observation (§4.2 block detection).
    recent_non_retryable_4xx: VecDeque<Instant>,
    blocked_until: Option<Instant>,
}

pub struct PacingRegistry {
    hosts: Mutex<HashMap<String, HostState>>,
}

impl PacingRegistry {
    pub fn new() -> Self {
        Self { hosts: Mutex::new(HashMap::new()) }
    }

    pub async fn last_request_at(&self, host: &str) -> Option<Instant> {
        self.hosts.lock().await.get(host).and_then(|s| s.last_request_at)
    }

    pub async fn record_request(&self, host: &str, at: Instant) {
        let mut hosts = self.hosts.lock().await;
        hosts.entry(host.to_string()).or_default().last_request_at = Some(at);
    }

    /// Returns the count *before* incrementing, so callers can decide
    /// whether this request crosses the `random_page_interval` boundary.
    pub async fn bump_success_count(&self, host: &str) -> u32 {
        let mut hosts = self.hosts.lock().await;
        let state = hosts.entry(host.to_string()).or_default();
        let previous = state.successful_request_count;
        state.successful_request_count = previous.wrapping_add(1);
        previous
    }

    /// Records a non-retryable 4xx and reports whether the trailing
    /// 60-second window now holds three or more.
    pub async fn observe_non_retryable_4xx(&self, host: &str, at: Instant) -> bool {
        let mut hosts = self.hosts.lock().await;
        let state = hosts.entry(host.to_string()).or_default();
        state.recent_non_retryable_4xx.push_back(at);
        while let Some(&oldest) = state.recent_non_retryable_4xx.front() {
            if at.duration_since(oldest) > Duration::from_secs(60) {
                state.recent_non_retryable_4xx.pop_front();
            } else {
                break;
            }
        }
        state.recent_non_retryable_4xx.len() >= 3
    }

    pub async fn mark_blocked(&self, host: &str, cooldown: Duration) {
        let mut hosts = self.hosts.lock().await;
        hosts.entry(host.to_string()).or_default().blocked_until = Some(Instant::now() + cooldown);
    }

    pub async fn is_blocked(&self, host: &str) -> bool {
        let hosts = self.hosts.lock().await;
        match hosts.get(host).and_then(|s| s.blocked_until) {
            Some(until) => Instant::now() < until,
            None => false,
        }
    }
}

impl Default for PacingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
