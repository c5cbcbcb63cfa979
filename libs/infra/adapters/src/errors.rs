// [libs/infra/adapters/src/errors.rs]
/*!
 * APARATO: ERRORES DE ADAPTADOR (V1.0)
 */

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("adapter misconfigured: {0}")]
    Configuration(String),
    #[error("network fault: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io fault: {0}")]
    Io(#[from] std::io::Error),
    #[error("OAuth token request failed: {0}")]
    TokenFault(String),
}
