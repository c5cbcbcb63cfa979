// [libs/infra/fetch/src/errors.rs]
//! =================================================================
//! APARATO: POLITE FETCHER ERROR CATALOG (V1.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE RED Y DE CORTESÍA
//! =================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("[L4_NET_FAULT]: UPLINK_UNREACHABLE -> {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("[L4_NET_FAULT]: REQUEST_TIMEOUT after {0}ms")]
    Timeout(u64),

    #[error("[L4_CONFIG_FAULT]: FETCHER_MISCONFIGURED -> {0}")]
    ConfigurationError(String),
}
