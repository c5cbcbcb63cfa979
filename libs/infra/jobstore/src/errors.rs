// [libs/infra/jobstore/src/errors.rs]
/*!
 * APARATO: JOB STORE ERROR CATALOG (V1.0)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobStoreError {
    #[error("[L3_DB_NET_FAULT]: DATABASE_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    #[error("[L3_DB_CONFIG_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),

    #[error("[L3_DB_QUERY_FAULT]: SQL_QUERY_REJECTED -> {0}")]
    QueryError(#[from] libsql::Error),

    #[error("[L3_DB_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    MappingError(String),

    #[error("[L3_JOB_FAULT]: ORGNR_NOT_FOUND -> {0}")]
    JobNotFound(String),

    #[error("[L3_DB_FAULT]: TRANSACTION_COLLAPSE -> {0}")]
    TransactionError(String),
}
