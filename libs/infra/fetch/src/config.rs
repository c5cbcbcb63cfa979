// [libs/infra/fetch/src/config.rs]
//! =================================================================
//! APARATO: POLITE FETCHER CONFIGURATION (V1.0)
//! RESPONSABILIDAD: PARAMETRIZACIÓN DEL CONTRATO DE CORTESÍA (§4.2)
//! =================================================================

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PoliteFetcherConfig {
    /// Floor and ceiling of the uniform inter-request delay, in seconds.
    /// `min_delay` must never be below 1.0 — this is the politeness floor.
    pub min_delay: f64,
    pub max_delay: f64,
    /// Independent uniform jitter added on top of the inter-request wait.
    pub jitter: f64,
    /// Emit camouflage traffic once every this many successful requests.
    pub random_page_interval: u32,
    /// Probability of actually emitting the camouflage request when the
    /// interval is reached.
    pub p_random_page: f64,
    /// A "random legitimate page" URL to hit for camouflage traffic.
    pub random_page_url: Option<String>,
    /// Body substrings that, when present in a 200 response, indicate a
    /// soft block. Empty by default (§9 Open Question — Decision: leave
    /// empty, operators supply markers observed in the field).
    pub block_markers: Vec<String>,
    pub block_cooldown: Duration,
    pub initial_backoff: Duration,
    pub backoff_factor: f64,
    pub max_backoff: Duration,
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub overall_timeout: Duration,
}

impl Default for PoliteFetcherConfig {
    fn default() -> Self {
        Self {
            min_delay: 1.5,
            max_delay: 4.0,
            jitter: 0.5,
            random_page_interval: 25,
            p_random_page: 0.1,
            random_page_url: None,
            block_markers: Vec::new(),
            block_cooldown: Duration::from_secs(4 * 3600),
            initial_backoff: Duration::from_secs(2),
            backoff_factor: 2.0,
            max_backoff: Duration::from_secs(60),
            max_retries: 3,
            request_timeout: Duration::from_secs(20),
            overall_timeout: Duration::from_secs(90),
        }
    }
}
