// [libs/shared/config/src/pipeline_config.rs]
/*!
 * APARATO: PIPELINE CONFIG (V1.0)
 * RESPONSABILIDAD: SUPERFICIE ÚNICA DE CONFIGURACIÓN ESTRUCTURADA (§6.1/§10.3)
 */

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::secret::Secret;

/// Non-secret, TOML/env/default-loadable configuration surface (§6.1).
///
/// Secret fields (`registry_client_id`, `registry_client_secret`,
/// `discovery_cert_path`, `discovery_cert_password`) live on `PipelineSecrets`
/// instead, which is read only from environment/secret files and never from
/// the TOML document (§10.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // --- Storage ---
    pub database_path: PathBuf,
    pub raw_doc_dir: Option<PathBuf>,
    pub store_raw_docs: bool,
    pub compress_raw_docs: bool,

    // --- Timing ---
    pub min_delay: f64,
    pub max_delay: f64,
    pub request_timeout_secs: u64,
    pub overall_timeout_secs: u64,
    pub active_hours_start: u8,
    pub active_hours_end: u8,
    pub skip_weekends: bool,
    pub reading_time_min: f64,
    pub reading_time_max: f64,

    // --- Retry ---
    pub max_retries: u32,
    pub initial_backoff_secs: u64,
    pub backoff_factor: f64,
    pub max_backoff_secs: u64,
    pub block_cooldown_secs: u64,

    // --- Concurrency ---
    pub discovery_workers: u32,
    pub registry_workers: u32,
    pub scraped_workers: u32,
    pub batch_size: u32,

    // --- Limits ---
    pub max_jobs: Option<u64>,
    pub stage_timeout_secs: u64,

    // --- Behavior ---
    pub random_page_interval: u32,
    pub p_random_page: f64,
    pub min_confidence: f64,

    // --- Source endpoints (not enumerated in the field table, but the
    // orchestrator cannot construct an adapter without them) ---
    pub registry_base_url: String,
    pub registry_token_url: String,
    pub registry_min_delay_secs: f64,
    pub scraped_host: String,
    pub source_tag: String,
    pub enable_person_pass: bool,

    // --- Orchestrator operational knobs ---
    pub shutdown_grace_secs: u64,
    pub progress_report_every: u64,
    pub maintenance_interval_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/sentinel.db"),
            raw_doc_dir: None,
            store_raw_docs: false,
            compress_raw_docs: true,

            min_delay: 3.0,
            max_delay: 8.0,
            request_timeout_secs: 30,
            overall_timeout_secs: 120,
            active_hours_start: 9,
            active_hours_end: 18,
            skip_weekends: true,
            reading_time_min: 1.0,
            reading_time_max: 3.0,

            max_retries: 3,
            initial_backoff_secs: 5,
            backoff_factor: 2.0,
            max_backoff_secs: 300,
            block_cooldown_secs: 6 * 3600,

            discovery_workers: 1,
            registry_workers: 1,
            scraped_workers: 1,
            batch_size: 50,

            max_jobs: None,
            stage_timeout_secs: 5 * 60,

            random_page_interval: 25,
            p_random_page: 0.1,
            min_confidence: 0.5,

            registry_base_url: String::new(),
            registry_token_url: String::new(),
            registry_min_delay_secs: 1.5,
            scraped_host: "www.allabolag.se".to_string(),
            source_tag: "sentinel-pipeline".to_string(),
            enable_person_pass: false,

            shutdown_grace_secs: 30,
            progress_report_every: 50,
            maintenance_interval_secs: 60,
        }
    }
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_secs(self.initial_backoff_secs)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }

    pub fn block_cooldown(&self) -> Duration {
        Duration::from_secs(self.block_cooldown_secs)
    }

    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }
}

/// Secret fields (§6.1, §10.3). Read only from environment/secret files;
/// `Debug` never leaks a value.
#[derive(Debug, Clone, Default)]
pub struct PipelineSecrets {
    pub registry_client_id: Option<Secret<String>>,
    pub registry_client_secret: Option<Secret<String>>,
    pub discovery_cert_path: Option<Secret<PathBuf>>,
    pub discovery_cert_password: Option<Secret<String>>,
}
