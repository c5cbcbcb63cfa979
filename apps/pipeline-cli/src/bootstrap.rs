// [apps/pipeline-cli/src/bootstrap.rs]
/*!
 * APARATO: BOOTSTRAP (V1.0)
 * RESPONSABILIDAD: ENSAMBLAJE DE ADAPTADORES Y CONEXIÓN AL JOB STORE
 *
 * Punto único donde config + secretos se convierten en las piezas vivas
 * (adaptadores, repositorio, extractor) que el orquestador y los comandos
 * de mantenimiento comparten.
 */

use std::sync::Arc;

use anyhow::{Context, Result};

use sentinel_domain_extraction::DocumentExtractor;
use sentinel_infra_adapters::{RegistryAdapter, RegistryCredentials, ScrapedAdapter};
use sentinel_infra_fetch::{PoliteFetcher, PoliteFetcherConfig};
use sentinel_infra_jobstore::{JobRepository, JobStoreClient};
use sentinel_shared_config::{PipelineConfig, PipelineSecrets};

use crate::graph_sink::{GraphSink, LoggingGraphSink};

pub struct PipelineContext<S: GraphSink = LoggingGraphSink> {
    pub config: PipelineConfig,
    pub jobstore: JobStoreClient,
    pub registry: RegistryAdapter,
    pub scraped: ScrapedAdapter,
    pub extractor: DocumentExtractor,
    pub graph_sink: Arc<S>,
}

impl PipelineContext<LoggingGraphSink> {
    /// Wires every adapter from `config`/`secrets`, connecting the Job Store
    /// as a side effect. The Registry Adapter is constructed even when no
    /// credentials are present — its calls will simply fault at the point of
    /// use (§7 `FatalError` on missing credentials), not at startup, so
    /// `stats`/`export`/`reset` keep working without Registry access.
    pub async fn bootstrap(config: PipelineConfig, secrets: PipelineSecrets) -> Result<Self> {
        let database_url = config
            .database_path
            .to_str()
            .context("database_path is not valid UTF-8")?
            .to_string();

        let jobstore = JobStoreClient::connect(&database_url, None)
            .await
            .context("failed to connect to the Job Store")?;

        let credentials = RegistryCredentials {
            token_url: config.registry_token_url.clone(),
            client_id: secrets
                .registry_client_id
                .map(|s| s.into_inner())
                .unwrap_or_default(),
            client_secret: secrets
                .registry_client_secret
                .map(|s| s.into_inner())
                .unwrap_or_default(),
        };
        let registry = RegistryAdapter::new(config.registry_base_url.clone(), credentials, config.registry_min_delay_secs)
            .context("failed to build the Registry Adapter")?;

        let fetcher_config = PoliteFetcherConfig {
            min_delay: config.min_delay,
            max_delay: config.max_delay,
            random_page_interval: config.random_page_interval,
            p_random_page: config.p_random_page,
            block_cooldown: config.block_cooldown(),
            initial_backoff: config.initial_backoff(),
            backoff_factor: config.backoff_factor,
            max_backoff: config.max_backoff(),
            max_retries: config.max_retries,
            request_timeout: config.request_timeout(),
            overall_timeout: config.overall_timeout(),
            ..PoliteFetcherConfig::default()
        };
        let fetcher = PoliteFetcher::new(fetcher_config).context("failed to build the Polite Fetcher")?;
        let scraped = ScrapedAdapter::new(fetcher, config.scraped_host.clone(), config.source_tag.clone(), config.enable_person_pass);

        let extractor = DocumentExtractor::new(config.min_confidence);

        Ok(Self { config, jobstore, registry, scraped, extractor, graph_sink: Arc::new(LoggingGraphSink) })
    }
}

impl<S: GraphSink> PipelineContext<S> {
    pub fn job_repository(&self) -> Result<JobRepository> {
        let connection = self.jobstore.get_connection().context("failed to allocate a Job Store connection")?;
        Ok(JobRepository::new(connection))
    }
}
