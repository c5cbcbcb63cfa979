// [libs/infra/fetch/src/client.rs]
/*!
 * =================================================================
 * APARATO: POLITE FETCHER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: EJECUCIÓN DE PETICIONES HTTP BAJO CONTRATO DE CORTESÍA
 *
 * VISION HIPER-HOLÍSTICA:
 * Reutilizado por cada adaptador de fuente (Discovery, Registry, Scraped).
 * Ninguna decisión de negocio (404 vs Bloqueo) se toma aquí — el Fetcher
 * sólo gobierna el ritmo, las cabeceras y la capa de transporte.
 * =================================================================
 */

use rand::Rng;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::PoliteFetcherConfig;
use crate::errors::FetchError;
use crate::headers::browser_like_headers;
use crate::outcome::FetchOutcome;
use crate::pacing::PacingRegistry;

pub struct PoliteFetcher {
    http_session: Client,
    config: PoliteFetcherConfig,
    pacing: PacingRegistry,
}

impl PoliteFetcher {
    pub fn new(config: PoliteFetcherConfig) -> Result<Self, FetchError> {
        if config.min_delay < 1.0 {
            return Err(FetchError::ConfigurationError(
                "min_delay below the 1.0s politeness floor".into(),
            ));
        }

        let http_session = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::NetworkFault)?;

        Ok(Self { http_session, config, pacing: PacingRegistry::new() })
    }

    /// Executes a single polite GET. Transport-level failures are retried
    /// internally per §4.2's backoff policy; the caller only sees the final
    /// `TransientError` if every attempt is exhausted.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let host = match host_of(url) {
            Some(h) => h,
            None => return FetchOutcome::TransientError { reason: "unparseable URL".into() },
        };

        if self.pacing.is_blocked(&host).await {
            return FetchOutcome::Blocked { reason: "host still in cool-down".into() };
        }

        self.wait_for_pacing_slot(&host).await;

        let overall_deadline = Instant::now() + self.config.overall_timeout;
        let mut attempt: u32 = 0;
        let mut backoff = self.config.initial_backoff;

        loop {
            attempt += 1;
            let started_at = Instant::now();
            let send_result = self
                .http_session
                .get(url)
                .headers(browser_like_headers())
                .send()
                .await;

            self.pacing.record_request(&host, started_at).await;

            match send_result {
                Ok(response) => {
                    let status = response.status();
                    let elapsed_ms = started_at.elapsed().as_millis() as u64;

                    if status == StatusCode::NOT_FOUND {
                        return FetchOutcome::NotFound;
                    }

                    if self.is_block_status(status) {
                        self.pacing.mark_blocked(&host, self.config.block_cooldown).await;
                        warn!("🛑 [FETCHER]: {} returned block status {}", host, status);
                        return FetchOutcome::Blocked { reason: format!("status {status}") };
                    }

                    if status.is_client_error() {
                        let window_tripped = self.pacing.observe_non_retryable_4xx(&host, Instant::now()).await;
                        if window_tripped {
                            self.pacing.mark_blocked(&host, self.config.block_cooldown).await;
                            warn!("🛑 [FETCHER]: {} tripped the 3-in-60s 4xx block window", host);
                            return FetchOutcome::Blocked { reason: "repeated 4xx within 60s".into() };
                        }
                        return FetchOutcome::TransientError { reason: format!("status {status}") };
                    }

                    if status.is_server_error() {
                        if attempt > self.config.max_retries || Instant::now() > overall_deadline {
                            return FetchOutcome::TransientError { reason: format!("status {status}") };
                        }
                        self.sleep_backoff(&mut backoff).await;
                        continue;
                    }

                    let body = match response.bytes().await {
                        Ok(b) => b.to_vec(),
                        Err(e) => return FetchOutcome::TransientError { reason: e.to_string() },
                    };

                    if self.body_contains_block_marker(&body) {
                        self.pacing.mark_blocked(&host, self.config.block_cooldown).await;
                        warn!("🛑 [FETCHER]: {} body matched a configured block marker", host);
                        return FetchOutcome::Blocked { reason: "block marker in body".into() };
                    }

                    let success_count = self.pacing.bump_success_count(&host).await;
                    self.maybe_emit_camouflage(&host, success_count).await;

                    debug!("✅ [FETCHER]: {} -> {} in {}ms", url, status, elapsed_ms);
                    return FetchOutcome::Ok { body, status: status.as_u16(), response_time_ms: elapsed_ms };
                }
                Err(network_fault) => {
                    if attempt > self.config.max_retries || Instant::now() > overall_deadline {
                        return FetchOutcome::TransientError { reason: network_fault.to_string() };
                    }
                    self.sleep_backoff(&mut backoff).await;
                }
            }
        }
    }

    fn is_block_status(&self, status: StatusCode) -> bool {
        matches!(status.as_u16(), 403 | 429 | 503)
    }

    fn body_contains_block_marker(&self, body: &[u8]) -> bool {
        if self.config.block_markers.is_empty() {
            return false;
        }
        let text = String::from_utf8_lossy(body);
        self.config.block_markers.iter().any(|marker| text.contains(marker.as_str()))
    }

    async fn wait_for_pacing_slot(&self, host: &str) {
        let Some(last) = self.pacing.last_request_at(host).await else { return };

        let mut rng = rand::thread_rng();
        let base_delay = rng.gen_range(self.config.min_delay..=self.config.max_delay);
        let jitter = rng.gen_range(0.0..=self.config.jitter);
        let required_wait = Duration::from_secs_f64((base_delay + jitter).max(0.0));

        let elapsed_since_last = last.elapsed();
        if elapsed_since_last < required_wait {
            tokio::time::sleep(required_wait - elapsed_since_last).await;
        }
    }

    async fn sleep_backoff(&self, backoff: &mut Duration) {
        let mut rng = rand::thread_rng();
        let jitter_factor = rng.gen_range(0.75..=1.25);
        let sleep_for = Duration::from_secs_f64((backoff.as_secs_f64() * jitter_factor).max(0.0));
        tokio::time::sleep(sleep_for.min(self.config.max_backoff)).await;

        let scaled = backoff.as_secs_f64() * self.config.backoff_factor;
        *backoff = Duration::from_secs_f64(scaled).min(self.config.max_backoff);
    }

    /// §4.2 camouflage traffic: after `random_page_interval` successes,
    /// roll the dice and optionally fetch-and-discard a decoy page.
    async fn maybe_emit_camouflage(&self, host: &str, success_count_before_this_one: u32) {
        let next_count = success_count_before_this_one + 1;
        if self.config.random_page_interval == 0 || next_count % self.config.random_page_interval != 0 {
            return;
        }

        let roll: f64 = rand::thread_rng().gen_range(0.0..1.0);
        if roll > self.config.p_random_page {
            return;
        }

        let Some(decoy_url) = &self.config.random_page_url else { return };

        info!("🎭 [FETCHER]: Emitting camouflage traffic to {}", host);
        if let Ok(response) = self.http_session.get(decoy_url).headers(browser_like_headers()).send().await {
            let _ = response.bytes().await;
        }
    }
}

fn host_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string))
}
