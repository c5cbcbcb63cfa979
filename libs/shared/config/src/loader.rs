// [libs/shared/config/src/loader.rs]
/*!
 * APARATO: CONFIG LOADER (V1.0)
 * RESPONSABILIDAD: PRECEDENCIA DEFAULT -> TOML -> ENTORNO (§10.3)
 */

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::pipeline_config::{PipelineConfig, PipelineSecrets};
use crate::secret::Secret;

/// Loads `PipelineConfig` in increasing precedence: built-in `Default`, an
/// optional TOML document (`config_path`, falling back to
/// `PIPELINE_CONFIG_PATH`), then environment variables
/// (`PIPELINE_<FIELD_UPPER>`). `.env` is hydrated via `dotenvy` before the
/// environment pass runs (§10.3).
pub fn load(config_path: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let mut config = PipelineConfig::default();

    let resolved_path = config_path
        .map(PathBuf::from)
        .or_else(|| env::var("PIPELINE_CONFIG_PATH").ok().map(PathBuf::from));

    if let Some(path) = resolved_path {
        if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            config = toml::from_str(&raw)?;
        }
    }

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Secrets are read only from environment/secret files, never the TOML
/// document (§10.3). A field absent from the environment stays `None`; the
/// Registry/Discovery adapters surface `FatalError` if a secret they require
/// is missing at the point of use, per §7.
pub fn load_secrets() -> PipelineSecrets {
    PipelineSecrets {
        registry_client_id: env::var("PIPELINE_REGISTRY_CLIENT_ID").ok().map(Secret::new),
        registry_client_secret: env::var("PIPELINE_REGISTRY_CLIENT_SECRET").ok().map(Secret::new),
        discovery_cert_path: env::var("PIPELINE_DISCOVERY_CERT_PATH").ok().map(PathBuf::from).map(Secret::new),
        discovery_cert_password: env::var("PIPELINE_DISCOVERY_CERT_PASSWORD").ok().map(Secret::new),
    }
}

fn env_field<T>(field: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(format!("PIPELINE_{field}")) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidEnvValue { field: field.to_string(), reason: err.to_string() }),
        Err(_) => Ok(None),
    }
}

fn apply_env_overrides(config: &mut PipelineConfig) -> Result<(), ConfigError> {
    if let Some(value) = env_field("DATABASE_PATH")? {
        config.database_path = value;
    }
    if let Ok(raw) = env::var("PIPELINE_RAW_DOC_DIR") {
        config.raw_doc_dir = Some(PathBuf::from(raw));
    }
    if let Some(value) = env_field("STORE_RAW_DOCS")? {
        config.store_raw_docs = value;
    }
    if let Some(value) = env_field("COMPRESS_RAW_DOCS")? {
        config.compress_raw_docs = value;
    }

    if let Some(value) = env_field("MIN_DELAY")? {
        config.min_delay = value;
    }
    if let Some(value) = env_field("MAX_DELAY")? {
        config.max_delay = value;
    }
    if let Some(value) = env_field("REQUEST_TIMEOUT_SECS")? {
        config.request_timeout_secs = value;
    }
    if let Some(value) = env_field("OVERALL_TIMEOUT_SECS")? {
        config.overall_timeout_secs = value;
    }
    if let Some(value) = env_field("ACTIVE_HOURS_START")? {
        config.active_hours_start = value;
    }
    if let Some(value) = env_field("ACTIVE_HOURS_END")? {
        config.active_hours_end = value;
    }
    if let Some(value) = env_field("SKIP_WEEKENDS")? {
        config.skip_weekends = value;
    }
    if let Some(value) = env_field("READING_TIME_MIN")? {
        config.reading_time_min = value;
    }
    if let Some(value) = env_field("READING_TIME_MAX")? {
        config.reading_time_max = value;
    }

    if let Some(value) = env_field("MAX_RETRIES")? {
        config.max_retries = value;
    }
    if let Some(value) = env_field("INITIAL_BACKOFF_SECS")? {
        config.initial_backoff_secs = value;
    }
    if let Some(value) = env_field("BACKOFF_FACTOR")? {
        config.backoff_factor = value;
    }
    if let Some(value) = env_field("MAX_BACKOFF_SECS")? {
        config.max_backoff_secs = value;
    }
    if let Some(value) = env_field("BLOCK_COOLDOWN_SECS")? {
        config.block_cooldown_secs = value;
    }

    if let Some(value) = env_field("DISCOVERY_WORKERS")? {
        config.discovery_workers = value;
    }
    if let Some(value) = env_field("REGISTRY_WORKERS")? {
        config.registry_workers = value;
    }
    if let Some(value) = env_field("SCRAPED_WORKERS")? {
        config.scraped_workers = value;
    }
    if let Some(value) = env_field("BATCH_SIZE")? {
        config.batch_size = value;
    }

    if let Some(value) = env_field("MAX_JOBS")? {
        config.max_jobs = Some(value);
    }
    if let Some(value) = env_field("STAGE_TIMEOUT_SECS")? {
        config.stage_timeout_secs = value;
    }

    if let Some(value) = env_field("RANDOM_PAGE_INTERVAL")? {
        config.random_page_interval = value;
    }
    if let Some(value) = env_field("P_RANDOM_PAGE")? {
        config.p_random_page = value;
    }
    if let Some(value) = env_field("MIN_CONFIDENCE")? {
        config.min_confidence = value;
    }

    if let Some(value) = env_field("REGISTRY_BASE_URL")? {
        config.registry_base_url = value;
    }
    if let Some(value) = env_field("REGISTRY_TOKEN_URL")? {
        config.registry_token_url = value;
    }
    if let Some(value) = env_field("REGISTRY_MIN_DELAY_SECS")? {
        config.registry_min_delay_secs = value;
    }
    if let Some(value) = env_field("SCRAPED_HOST")? {
        config.scraped_host = value;
    }
    if let Some(value) = env_field("SOURCE_TAG")? {
        config.source_tag = value;
    }
    if let Some(value) = env_field("ENABLE_PERSON_PASS")? {
        config.enable_person_pass = value;
    }

    if let Some(value) = env_field("SHUTDOWN_GRACE_SECS")? {
        config.shutdown_grace_secs = value;
    }
    if let Some(value) = env_field("PROGRESS_REPORT_EVERY")? {
        config.progress_report_every = value;
    }
    if let Some(value) = env_field("MAINTENANCE_INTERVAL_SECS")? {
        config.maintenance_interval_secs = value;
    }

    Ok(())
}
