// [libs/domain/extraction/src/container.rs]
/*!
 * APARATO: DOCUMENT CONTAINER UNWRAPPER (V1.0)
 * RESPONSABILIDAD: LOCALIZAR EL MARKUP Y/O PDF DENTRO DEL ZIP DE ENTRADA
 */

use std::io::{Cursor, Read};
use zip::ZipArchive;

#[derive(Debug, Default)]
pub struct UnwrappedDocument {
    pub markup: Option<String>,
    pub pdf_bytes: Option<Vec<u8>>,
}

const MARKUP_EXTENSIONS: &[&str] = &[".xhtml", ".html", ".xml"];

/// Opens the blob as a ZIP and pulls out the first markup file and/or PDF
/// it contains. If the blob is not a valid ZIP, it is treated as a raw PDF
/// (§4.3 step 3 "...or the input is raw PDF").
pub fn unwrap_document(blob: &[u8]) -> UnwrappedDocument {
    match ZipArchive::new(Cursor::new(blob)) {
        Ok(mut archive) => {
            let mut unwrapped = UnwrappedDocument::default();

            for index in 0..archive.len() {
                let Ok(mut entry) = archive.by_index(index) else { continue };
                let name = entry.name().to_lowercase();

                if unwrapped.markup.is_none() && MARKUP_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                    let mut text = String::new();
                    if entry.read_to_string(&mut text).is_ok() {
                        unwrapped.markup = Some(text);
                    }
                } else if unwrapped.pdf_bytes.is_none() && name.ends_with(".pdf") {
                    let mut bytes = Vec::new();
                    if entry.read_to_end(&mut bytes).is_ok() {
                        unwrapped.pdf_bytes = Some(bytes);
                    }
                }
            }

            unwrapped
        }
        Err(_) => UnwrappedDocument { markup: None, pdf_bytes: Some(blob.to_vec()) },
    }
}
