// [libs/infra/adapters/src/registry.rs]
/*!
 * =================================================================
 * APARATO: REGISTRY ADAPTER (V1.0)
 * CLASIFICACIÓN: ADAPTADOR DE FUENTE (ESTRATO L3)
 * RESPONSABILIDAD: API REST AUTENTICADA OAUTH2 CON LÍMITE DE TASA ESTRICTO (§4.5.2)
 *
 * VISION HIPER-HOLÍSTICA:
 * Tres operaciones comparten un único caché de token, protegido por mutex
 * para que llamadores concurrentes no disparen cada uno su propia solicitud
 * de token redundante. Una puerta de elegibilidad por prefijo evita llamadas
 * inútiles para orgnrs que este registro casi con certeza no conoce.
 * =================================================================
 */

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sentinel_domain_models::OrgNumber;

use crate::errors::AdapterError;
use crate::outcome::AdapterOutcome;

/// Inter-request floor on top of the Polite Fetcher's general pacing — the
/// registry API enforces its own server-side limiter (§5 "Rate-limit
/// enforcement").
pub const DEFAULT_REGISTRY_MIN_DELAY_SECS: f64 = 1.5;
const TOKEN_EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;
const RATE_LIMIT_COOLDOWN_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RegistryCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInfo {
    pub document_id: String,
    pub file_format: String,
    pub reporting_period_end: Option<String>,
    pub registration_date: Option<String>,
}

struct PacingGate {
    last_request_at: Mutex<Option<Instant>>,
    min_delay: Duration,
}

impl PacingGate {
    fn new(min_delay_secs: f64) -> Self {
        Self { last_request_at: Mutex::new(None), min_delay: Duration::from_secs_f64(min_delay_secs.max(0.0)) }
    }

    async fn wait_for_slot(&self) {
        let mut guard = self.last_request_at.lock().await;
        if let Some(last) = *guard {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *guard = Some(Instant::now());
    }
}

/// Static prefix table classifying 10-digit orgnrs as "likely registered
/// with this registry" — transcribed from the source's
/// `is_bolagsverket_registered` prefix tables (`scripts/bolagsverket_full_enrich.py`).
pub fn is_registry_eligible(orgnr: &OrgNumber) -> bool {
    let digits = orgnr.as_str();
    if digits.len() < 4 {
        return false;
    }

    let prefix2 = orgnr.prefix_2();
    let prefix3 = orgnr.prefix_3();
    let prefix4 = orgnr.prefix_4();

    // Personnummer-based (Enskild firma) ranges never appear in this registry.
    if prefix2 == "19" || prefix2 == "20" {
        return false;
    }
    if digits.starts_with('0') {
        return false;
    }

    const PREFIX3_MATCHES: &[&str] = &[
        "556", "559", // Aktiebolag
        "502", "516", "517", // Handelsbolag / Kommanditbolag
        "716", "717", "769", // Bostadsrättsföreningar
        "802", "822", "835", "857", // Föreningar, banker
        "916", "917", "918", "919", "934", // Stiftelser
        "969", // Utländska filialer
    ];
    if PREFIX3_MATCHES.contains(&prefix3) {
        return true;
    }

    const PREFIX4_MATCHES: &[&str] = &["7164", "7179", "7696", "8024", "8025"];
    if PREFIX4_MATCHES.contains(&prefix4) {
        return true;
    }

    if let Ok(leading) = prefix2.parse::<u32>() {
        if leading < 30 {
            return false;
        }
    }

    true
}

pub struct RegistryAdapter {
    http: Client,
    base_url: String,
    credentials: RegistryCredentials,
    token: Arc<Mutex<Option<CachedToken>>>,
    pacing: PacingGate,
}

impl RegistryAdapter {
    pub fn new(base_url: String, credentials: RegistryCredentials, registry_min_delay_secs: f64) -> Result<Self, AdapterError> {
        let http = Client::builder()
            .user_agent("sentinel-registry-adapter/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(AdapterError::Network)?;

        Ok(Self {
            http,
            base_url,
            credentials,
            token: Arc::new(Mutex::new(None)),
            pacing: PacingGate::new(registry_min_delay_secs),
        })
    }

    /// Lazily acquires and caches a bearer token via the client-credentials
    /// grant, refreshing `>= 60s` before expiry. Guarded by the same mutex
    /// that holds the cache so concurrent callers never each trigger a
    /// redundant token request.
    async fn bearer_token(&self) -> Result<String, AdapterError> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        debug!("🔌 [REGISTRY]: acquiring fresh OAuth2 client-credentials token");
        let response = self
            .http
            .post(&self.credentials.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(AdapterError::Network)?;

        if !response.status().is_success() {
            return Err(AdapterError::TokenFault(format!("token endpoint returned {}", response.status())));
        }

        let body: TokenResponse = response.json().await.map_err(AdapterError::Network)?;
        let ttl = (body.expires_in - TOKEN_EXPIRY_SAFETY_MARGIN_SECS).max(0);

        *guard = Some(CachedToken {
            access_token: body.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl as u64),
        });

        info!("✅ [REGISTRY]: token refreshed, valid for {}s (margin applied)", ttl);
        Ok(body.access_token)
    }

    async fn authenticated_get(&self, path: &str) -> Result<AdapterOutcome<serde_json::Value>, AdapterError> {
        self.pacing.wait_for_slot().await;
        let token = self.bearer_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(AdapterError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(AdapterOutcome::NotFound);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("🛑 [REGISTRY]: rate-limited on {}, cooling down {}s", path, RATE_LIMIT_COOLDOWN_SECS);
            tokio::time::sleep(Duration::from_secs(RATE_LIMIT_COOLDOWN_SECS)).await;
            return Ok(AdapterOutcome::RateLimited { retry_after_secs: RATE_LIMIT_COOLDOWN_SECS });
        }
        if status.is_server_error() {
            return Ok(AdapterOutcome::TransientError { reason: format!("server returned {status}") });
        }
        if !status.is_success() {
            return Ok(AdapterOutcome::TransientError { reason: format!("unexpected status {status}") });
        }

        let body = response.json::<serde_json::Value>().await.map_err(AdapterError::Network)?;
        Ok(AdapterOutcome::Completed(body))
    }

    /// `FetchCompany(orgnr) -> CompanyRecord?` (§4.5.2). Gated by
    /// `is_registry_eligible`: ineligible orgnrs skip directly to
    /// `Completed` with no record, matching "Completed on this stage"
    /// without ever touching the network.
    pub async fn fetch_company_raw(&self, orgnr: &OrgNumber) -> Result<AdapterOutcome<serde_json::Value>, AdapterError> {
        if !is_registry_eligible(orgnr) {
            debug!("♻️ [REGISTRY]: {} fails eligibility gate, skipping FetchCompany", orgnr);
            return Ok(AdapterOutcome::NotFound);
        }
        self.authenticated_get(&format!("/organisationer/{orgnr}")).await
    }

    /// `ListAnnualReports(orgnr) -> list of DocumentInfo` (§4.5.2).
    pub async fn list_annual_reports(&self, orgnr: &OrgNumber) -> Result<AdapterOutcome<Vec<DocumentInfo>>, AdapterError> {
        match self.authenticated_get(&format!("/dokumentlista/{orgnr}")).await? {
            AdapterOutcome::Completed(body) => {
                let documents: Vec<DocumentInfo> = serde_json::from_value(body)?;
                Ok(AdapterOutcome::Completed(documents))
            }
            AdapterOutcome::NotFound => Ok(AdapterOutcome::NotFound),
            AdapterOutcome::Blocked { reason } => Ok(AdapterOutcome::Blocked { reason }),
            AdapterOutcome::RateLimited { retry_after_secs } => Ok(AdapterOutcome::RateLimited { retry_after_secs }),
            AdapterOutcome::TransientError { reason } => Ok(AdapterOutcome::TransientError { reason }),
        }
    }

    /// `DownloadDocument(document_id) -> bytes` (§4.5.2). Returns raw bytes;
    /// delegation to the Document Extractor happens one layer up.
    pub async fn download_document(&self, document_id: &str) -> Result<AdapterOutcome<Vec<u8>>, AdapterError> {
        self.pacing.wait_for_slot().await;
        let token = self.bearer_token().await?;

        let response = self
            .http
            .get(format!("{}/dokument/{}", self.base_url, document_id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(AdapterError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(AdapterOutcome::NotFound);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tokio::time::sleep(Duration::from_secs(RATE_LIMIT_COOLDOWN_SECS)).await;
            return Ok(AdapterOutcome::RateLimited { retry_after_secs: RATE_LIMIT_COOLDOWN_SECS });
        }
        if status.is_server_error() {
            return Ok(AdapterOutcome::TransientError { reason: format!("server returned {status}") });
        }
        if !status.is_success() {
            return Ok(AdapterOutcome::TransientError { reason: format!("unexpected status {status}") });
        }

        let bytes = response.bytes().await.map_err(AdapterError::Network)?;
        Ok(AdapterOutcome::Completed(bytes.to_vec()))
    }
}
