// [libs/infra/jobstore/src/client.rs]
/*!
 * =================================================================
 * APARATO: JOB STORE CONNECTION CLIENT (V1.0)
 * RESPONSABILIDAD: GESTIÓN DE ENLACES Y PERSISTENCIA ACID
 *
 * En modo memoria, el cliente ancla una conexión viva para que el esquema
 * siga siendo visible entre hilos — SQLite purga bases de datos en RAM en
 * cuanto la última conexión se cierra.
 * =================================================================
 */

use crate::errors::JobStoreError;
use crate::schema::apply_job_store_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Clone)]
pub struct JobStoreClient {
    database_driver: Arc<Database>,
    _memory_persistence_anchor: Option<Arc<Connection>>,
}

impl JobStoreClient {
    #[instrument(skip(access_token))]
    pub async fn connect(database_url: &str, access_token: Option<String>) -> Result<Self, JobStoreError> {
        if database_url.is_empty() {
            return Err(JobStoreError::ConnectionError("DATABASE_URL_UNDEFINED".into()));
        }

        info!("🔌 [JOBSTORE]: Connecting to [{}]", database_url);

        let is_remote = database_url.starts_with("libsql://") || database_url.starts_with("https://");
        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let database_driver = if is_remote {
            let token = access_token.ok_or_else(|| {
                JobStoreError::ConnectionError("Remote access denied (token missing)".into())
            })?;
            Builder::new_remote(database_url.to_string(), token).build().await
        } else {
            Builder::new_local(database_url).build().await
        }
        .map_err(|e| JobStoreError::ConnectionError(format!("driver ignition failure: {e}")))?;

        let shared_driver = Arc::new(database_driver);
        let mut anchor = None;

        if is_memory {
            let anchor_conn = shared_driver
                .connect()
                .map_err(|e| JobStoreError::ConnectionError(format!("anchor fault: {e}")))?;
            apply_job_store_schema(&anchor_conn).await?;
            anchor = Some(Arc::new(anchor_conn));
        } else {
            let bootstrap_conn = shared_driver
                .connect()
                .map_err(|e| JobStoreError::ConnectionError(format!("bootstrap link fault: {e}")))?;
            apply_job_store_schema(&bootstrap_conn).await?;
        }

        Ok(Self {
            database_driver: shared_driver,
            _memory_persistence_anchor: anchor,
        })
    }

    pub fn get_connection(&self) -> Result<Connection, JobStoreError> {
        self.database_driver.connect().map_err(|e| {
            error!("⚠️ [JOBSTORE]: Connection allocation failed: {}", e);
            JobStoreError::ConnectionError(e.to_string())
        })
    }
}
