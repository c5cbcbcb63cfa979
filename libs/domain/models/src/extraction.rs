// [libs/domain/models/src/extraction.rs]
/*!
 * APARATO: EXTRACTION RESULT DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: CONTENEDOR DE SALIDA DEL DOCUMENT EXTRACTOR
 */

use serde::{Deserialize, Serialize};

use crate::director::{DirectorRecord, NormalizedRole};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TaggedFields,
    RegexFallback,
    PdfSignaturePage,
    JsonEmbedded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialAccount {
    pub year: i32,
    pub period_start: Option<chrono::NaiveDate>,
    pub period_end: Option<chrono::NaiveDate>,
    pub currency: Option<String>,
    pub accounts: std::collections::HashMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub orgnr: String,
    pub document_id: String,
    pub directors: Vec<DirectorRecord>,
    pub signature_date: Option<chrono::NaiveDate>,
    pub reporting_period_end: Option<chrono::NaiveDate>,
    pub overall_confidence: f64,
    pub method: ExtractionMethod,
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    pub fn auditors(&self) -> impl Iterator<Item = &DirectorRecord> {
        self.directors
            .iter()
            .filter(|d| d.normalized_role.is_auditor_family())
    }

    pub fn has_directors(&self) -> bool {
        self.directors.iter().any(|d| !d.normalized_role.is_auditor_family())
    }

    pub fn has_vd(&self) -> bool {
        self.directors.iter().any(|d| d.normalized_role == NormalizedRole::Ceo)
    }

    pub fn has_ordforande(&self) -> bool {
        self.directors
            .iter()
            .any(|d| d.normalized_role == NormalizedRole::BoardChair)
    }
}
