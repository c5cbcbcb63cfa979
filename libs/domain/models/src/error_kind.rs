// [libs/domain/models/src/error_kind.rs]
/*!
 * APARATO: ERROR TAXONOMY (L2)
 * RESPONSABILIDAD: VOCABULARIO COMPARTIDO DE FALLOS DE LA TUBERÍA
 *
 * Cada crate de infraestructura define su propio enum `thiserror` rico en
 * contexto, pero todos colapsan, en la frontera del Orquestador, a uno de
 * estos kinds — el único vocabulario que decide la transición en el Job
 * Store. Ningún otro estrato debe reinterpretar un kind.
 */

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Resource does not exist. Terminal success for that job at that stage.
    NotFound,
    /// Upstream has refused traffic. Triggers cool-down; non-terminal.
    Blocked,
    /// Explicit 429 or equivalent. Sleep + re-queue Pending without bumping attempts.
    RateLimited,
    /// Network, 5xx, timeout. Retry up to max_retries, else Failed.
    TransientError,
    /// Malformed document. Job completes with an empty extraction.
    ParseError,
    /// Unrecoverable misconfiguration. Stops the orchestrator.
    FatalError,
    /// Cooperative cancellation. Job returns to Pending; attempts untouched.
    Cancelled,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::TransientError)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Blocked => "blocked",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::TransientError => "transient_error",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::FatalError => "fatal_error",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
