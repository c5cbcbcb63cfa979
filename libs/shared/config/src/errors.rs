// [libs/shared/config/src/errors.rs]
/*!
 * APARATO: CONFIG ERROR CATALOG (V1.0)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE CARGA DE CONFIGURACIÓN
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("[L4_CFG_IO_FAULT]: CONFIG_FILE_UNREADABLE -> {0}")]
    Io(#[from] std::io::Error),

    #[error("[L4_CFG_TOML_FAULT]: TOML_PARSE_REJECTED -> {0}")]
    Toml(#[from] toml::de::Error),

    #[error("[L4_CFG_ENV_FAULT]: ENV_VALUE_MALFORMED -> {field}: {reason}")]
    InvalidEnvValue { field: String, reason: String },

    #[error("[L4_CFG_SECRET_FAULT]: REQUIRED_SECRET_MISSING -> {0}")]
    MissingSecret(String),
}
