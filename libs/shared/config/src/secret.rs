// [libs/shared/config/src/secret.rs]
/*!
 * APARATO: SECRET WRAPPER (V1.0)
 * RESPONSABILIDAD: BLINDAJE DE VALORES SENSIBLES CONTRA FUGA POR LOGGING (§10.1/§10.3)
 */

use std::fmt;

/// Wraps a sensitive configuration value so its `Debug`/`Display` never leak
/// the underlying value into a log line (registry client secret, discovery
/// certificate password, bearer tokens).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(REDACTED)")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("REDACTED")
    }
}
