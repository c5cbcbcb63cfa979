// [libs/domain/models/src/orgnr.rs]
/*!
 * APARATO: ORGANISATION NUMBER VALUE TYPE (L2)
 * RESPONSABILIDAD: CANONICALIZACIÓN Y VALIDACIÓN DEL IDENTIFICADOR PRIMARIO
 *
 * Un OrgNumber sueco aparece en la naturaleza con guiones, espacios y a
 * veces un prefijo de país ("SE"). Esta es la única frontera donde esa
 * variación se colapsa a la forma canónica de 10 dígitos.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OrgNumber(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrgNumberError {
    #[error("orgnr is empty")]
    Empty,
    #[error("orgnr '{0}' does not resolve to 10 digits after canonicalization")]
    WrongLength(String),
    #[error("orgnr '{0}' contains a non-digit character after canonicalization")]
    NonDigit(String),
}

impl OrgNumber {
    /// Strips separators (`-`, space) and a leading `SE` country prefix, then
    /// requires exactly 10 remaining digits.
    pub fn parse(raw: &str) -> Result<Self, OrgNumberError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrgNumberError::Empty);
        }

        let without_prefix = trimmed
            .strip_prefix("SE")
            .or_else(|| trimmed.strip_prefix("se"))
            .unwrap_or(trimmed);

        let digits: String = without_prefix
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if digits.len() != 10 {
            return Err(OrgNumberError::WrongLength(digits));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(OrgNumberError::NonDigit(digits));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First two digits; used as a sharding key for the raw-document side
    /// output (`<raw_doc_dir>/<prefix_2>/<orgnr>.<ext>`).
    pub fn prefix_2(&self) -> &str {
        &self.0[0..2]
    }

    /// First three and four digits; used by the Registry eligibility gate.
    pub fn prefix_3(&self) -> &str {
        &self.0[0..3]
    }

    pub fn prefix_4(&self) -> &str {
        &self.0[0..4]
    }
}

impl fmt::Display for OrgNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for OrgNumber {
    type Error = OrgNumberError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for OrgNumber {
    type Error = OrgNumberError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
