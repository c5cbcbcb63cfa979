// [libs/domain/extraction/src/errors.rs]
//! =================================================================
//! APARATO: EXTRACTOR ERROR CATALOG (V1.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE EXTRACCIÓN DOCUMENTAL
//! =================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("[L2_ZIP_FAULT]: ARCHIVE_UNREADABLE -> {0}")]
    InvalidZip(String),

    #[error("[L2_DOC_FAULT]: NO_SUPPORTED_DOCUMENT_IN_ARCHIVE")]
    NoSupportedDocument,

    #[error("[L2_PDF_FAULT]: PDF_ENGINE_FAULT -> {0}")]
    PdfFault(String),
}
