// [libs/shared/config/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CONFIG KERNEL (V1.0)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: CARGA ESTRUCTURADA + BLINDAJE DE SECRETOS (§6.1/§10.3)
 * =================================================================
 */

mod errors;
mod loader;
mod pipeline_config;
mod secret;

pub use errors::ConfigError;
pub use loader::{load, load_secrets};
pub use pipeline_config::{PipelineConfig, PipelineSecrets};
pub use secret::Secret;
