// [libs/domain/extraction/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOCUMENT EXTRACTOR (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PRODUCIR UN ExtractionResult A PARTIR DE UN BLOB OPACO (§4.3)
 *
 * VISION HIPER-HOLÍSTICA:
 * Tres métodos se intentan en orden hasta que uno produce directores:
 * campos etiquetados (ZIP), respaldo regex, respaldo de página de firma PDF.
 * =================================================================
 */

mod confidence;
mod container;
mod errors;
mod pdf_signature_page;
mod regex_fallback;
mod tagged_fields;

pub use errors::ExtractionError;

use sentinel_domain_models::{ExtractionMethod, ExtractionResult, OrgNumber};
use std::time::Instant;
use tracing::{info, warn};

pub struct DocumentExtractor {
    pub min_confidence: f64,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self { min_confidence: 0.5 }
    }
}

impl DocumentExtractor {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn extract(&self, orgnr: &OrgNumber, document_id: &str, blob: &[u8]) -> ExtractionResult {
        let started_at = Instant::now();
        let mut warnings = Vec::new();

        let unwrapped = container::unwrap_document(blob);

        let mut method = ExtractionMethod::TaggedFields;
        let mut directors = Vec::new();
        let mut signature_date = None;

        if let Some(markup) = &unwrapped.markup {
            directors = tagged_fields::extract_tagged_field_directors(markup);
            signature_date = tagged_fields::extract_signature_date(markup);

            if directors.is_empty() {
                method = ExtractionMethod::RegexFallback;
                directors = regex_fallback::extract_directors(markup);
            }
        } else {
            warnings.push("no markup file found in archive".to_string());
        }

        if directors.is_empty() {
            if let Some(pdf_bytes) = &unwrapped.pdf_bytes {
                method = ExtractionMethod::PdfSignaturePage;
                match pdf_signature_page::extract_directors_from_pdf(pdf_bytes) {
                    Ok(pdf_directors) => directors = pdf_directors,
                    Err(fault) => {
                        warn!("⚠️ [EXTRACTOR]: PDF fallback failed for {}/{}: {}", orgnr, document_id, fault);
                        warnings.push(format!("pdf fallback failed: {fault}"));
                    }
                }
            } else if unwrapped.markup.is_none() {
                warnings.push("no PDF or markup present; nothing to extract".to_string());
            }
        }

        directors = confidence::dedup_by_name_key(directors);
        directors = confidence::filter_min_confidence(directors, self.min_confidence);

        let overall_confidence = confidence::overall_confidence(&directors);

        info!(
            "📑 [EXTRACTOR]: {}/{} -> {} director(s), method={:?}, confidence={:.2}",
            orgnr, document_id, directors.len(), method, overall_confidence
        );

        ExtractionResult {
            orgnr: orgnr.as_str().to_string(),
            document_id: document_id.to_string(),
            directors,
            signature_date,
            reporting_period_end: None,
            overall_confidence,
            method,
            warnings,
            processing_time_ms: started_at.elapsed().as_millis() as u64,
        }
    }
}
