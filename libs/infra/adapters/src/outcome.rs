// [libs/infra/adapters/src/outcome.rs]
/*!
 * APARATO: RESULTADO DE ADAPTADOR (V1.0)
 * RESPONSABILIDAD: COLAPSAR LA RESPUESTA DE UN ADAPTADOR AL VOCABULARIO DE ERRORES (§7)
 *
 * Cada adaptador traduce su propio fracaso (HTTP, parseo, red) a exactamente
 * uno de estos casos; el Orquestador es el único lugar que lo convierte en
 * una transición del Job Store.
 */

use sentinel_domain_models::ErrorKind;

#[derive(Debug)]
pub enum AdapterOutcome<T> {
    Completed(T),
    NotFound,
    Blocked { reason: String },
    RateLimited { retry_after_secs: u64 },
    TransientError { reason: String },
}

impl<T> AdapterOutcome<T> {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            AdapterOutcome::Completed(_) => None,
            AdapterOutcome::NotFound => Some(ErrorKind::NotFound),
            AdapterOutcome::Blocked { .. } => Some(ErrorKind::Blocked),
            AdapterOutcome::RateLimited { .. } => Some(ErrorKind::RateLimited),
            AdapterOutcome::TransientError { .. } => Some(ErrorKind::TransientError),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AdapterOutcome::Completed(_))
    }
}
