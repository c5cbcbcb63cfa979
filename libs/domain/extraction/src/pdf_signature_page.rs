// [libs/domain/extraction/src/pdf_signature_page.rs]
/*!
 * =================================================================
 * APARATO: PDF SIGNATURE-PAGE FALLBACK (V1.0)
 * RESPONSABILIDAD: RESPALDO DE ÚLTIMO RECURSO SOBRE PÁGINAS DE FIRMA (§4.3.3)
 *
 * Sólo se invoca cuando los dos métodos anteriores no produjeron ningún
 * director. Menor confianza que los métodos estructurados, pero aporta
 * cobertura para informes antiguos sin iXBRL.
 * =================================================================
 */

use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use regex::Regex;
use sentinel_domain_models::{DirectorRecord, NormalizedRole, PersonType};
use std::collections::HashSet;
use tracing::debug;

use crate::errors::ExtractionError;

const SIGNATURE_PAGE_FALLBACK_COUNT: usize = 5;
const CONFIDENCE_FLOOR: f64 = 0.5;
const CONFIDENCE_AT_ZERO_DISTANCE: f64 = 0.8;
const CONFIDENCE_DECAY_PER_LINE: f64 = 0.15;
const LINE_SEARCH_RADIUS: i64 = 2;

static SIGNATURE_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)undertecknas?\s+med|underskrift|undertecknad|årsredovisningen\s+har\s+undertecknats|styrelsen\s+och\s+verkställande|ort\s+och\s+datum|har\s+avgetts",
    )
    .expect("static signature-marker pattern is valid")
});

const SKIP_SECTION_MARKERS: &[&str] = &[
    "revisionsberättelse",
    "bolagsstyrningsrapport",
    "revisors yttrande",
    "granskning av",
];

static ROLE_KEYWORD_PATTERNS: Lazy<Vec<(NormalizedRole, Regex)>> = Lazy::new(|| {
    vec![
        (NormalizedRole::Ceo, Regex::new(r"(?i)verkställande\s+direktör|\bv\.?d\.?\b|chief\s+executive|\bceo\b").unwrap()),
        (NormalizedRole::BoardChair, Regex::new(r"(?i)styrelseordförande|styrelsens\s+ordförande|ordförande|chairman").unwrap()),
        (NormalizedRole::BoardMember, Regex::new(r"(?i)styrelseledamot|ledamot(?!\s*suppleant)|board\s+member").unwrap()),
        (NormalizedRole::BoardAlternate, Regex::new(r"(?i)styrelsesuppleant|suppleant|alternate").unwrap()),
        (NormalizedRole::ViceCeo, Regex::new(r"(?i)vice\s+verkställande\s+direktör|vice\s+v\.?d\.?").unwrap()),
    ]
});

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-ZÅÄÖÉ][a-zåäöéèü]+(?:[\s-]+[A-ZÅÄÖÉ][a-zåäöéèü]+)*")
        .expect("static capitalized-name pattern is valid")
});

static EXCLUDE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "verkställande direktör", "styrelseordförande", "styrelseledamot",
        "styrelsesuppleant", "stockholm", "göteborg", "malmö", "uppsala",
        "örebro", "linköping", "västerås", "helsingborg", "norrköping",
        "revisionsberättelse", "den svenska", "enligt not", "på uppdrag",
        "auktoriserad revisor", "godkänd revisor", "registrerat revisionsbolag",
        "ernst young", "kpmg", "deloitte", "pwc", "grant thornton",
    ])
});

/// Extracts text per page of a PDF using the bundled pdfium engine.
fn extract_page_texts(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let bindings = Pdfium::bind_to_system_library()
        .or_else(|_| Pdfium::bind_to_statically_linked_library())
        .map_err(|e| ExtractionError::PdfFault(e.to_string()))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| ExtractionError::PdfFault(e.to_string()))?;

    let mut pages = Vec::new();
    for page in document.pages().iter() {
        let text = page
            .text()
            .map(|t| t.all())
            .unwrap_or_default();
        pages.push(text);
    }
    Ok(pages)
}

fn find_signature_pages(pages: &[String]) -> Vec<usize> {
    pages
        .iter()
        .enumerate()
        .filter_map(|(idx, text)| {
            let lower = text.to_lowercase();
            if SKIP_SECTION_MARKERS.iter().any(|marker| lower.contains(marker)) {
                return None;
            }
            if !SIGNATURE_MARKER_PATTERN.is_match(&lower) {
                return None;
            }
            let has_role_keyword = ROLE_KEYWORD_PATTERNS.iter().any(|(_, pattern)| pattern.is_match(&lower));
            has_role_keyword.then_some(idx)
        })
        .collect()
}

fn role_label(role: NormalizedRole) -> &'static str {
    match role {
        NormalizedRole::Ceo => "Verkställande direktör",
        NormalizedRole::ViceCeo => "Vice verkställande direktör",
        NormalizedRole::BoardChair => "Styrelseordförande",
        NormalizedRole::BoardMember => "Styrelseledamot",
        NormalizedRole::BoardAlternate => "Styrelsesuppleant",
        NormalizedRole::EmployeeRep => "Arbetstagarrepresentant",
        NormalizedRole::ExternalMember => "Extern ledamot",
        NormalizedRole::Auditor | NormalizedRole::AuditorPrincipal
        | NormalizedRole::AuditorApproved | NormalizedRole::AuditorAuthorized => "Revisor",
        NormalizedRole::Unknown => "Okänd",
    }
}

fn extract_names(line: &str) -> Vec<String> {
    NAME_PATTERN
        .find_iter(line)
        .filter_map(|m| {
            let name = m.as_str().trim().to_string();
            let parts: Vec<&str> = name.split_whitespace().collect();
            if parts.len() < 2 {
                return None;
            }
            if parts.iter().any(|p| EXCLUDE_NAMES.contains(p.to_lowercase().as_str())) {
                return None;
            }
            Some(name)
        })
        .collect()
}

fn parse_directors_from_page(text: &str) -> Vec<DirectorRecord> {
    let lines: Vec<&str> = text.lines().collect();
    let mut directors = Vec::new();

    let mut role_positions: Vec<(usize, NormalizedRole)> = Vec::new();
    for (line_idx, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        for (role, pattern) in ROLE_KEYWORD_PATTERNS.iter() {
            if pattern.is_match(&lower) {
                role_positions.push((line_idx, *role));
            }
        }
    }

    for (role_line_idx, role) in role_positions {
        let lower_bound = role_line_idx.saturating_sub(LINE_SEARCH_RADIUS as usize);
        let upper_bound = (role_line_idx + LINE_SEARCH_RADIUS as usize + 1).min(lines.len());

        for search_idx in lower_bound..upper_bound {
            for name in extract_names(lines[search_idx]) {
                if name.len() < 4 {
                    continue;
                }

                let distance = (search_idx as i64 - role_line_idx as i64).unsigned_abs();
                let confidence = (CONFIDENCE_AT_ZERO_DISTANCE - CONFIDENCE_DECAY_PER_LINE * distance as f64)
                    .max(CONFIDENCE_FLOOR);

                let mut parts = name.split_whitespace();
                let first_name = parts.next().unwrap_or_default().to_string();
                let last_name = parts.collect::<Vec<_>>().join(" ");

                directors.push(DirectorRecord {
                    first_name,
                    last_name,
                    raw_role: role_label(role).to_string(),
                    normalized_role: role,
                    person_type: PersonType::Person,
                    external_id: None,
                    birth_date: None,
                    birth_year: None,
                    confidence,
                    source_field: "pdf_signature_page".to_string(),
                });
            }
        }
    }

    directors
}

/// §4.3 step 3: iterate pages, select qualifying signature pages (or the
/// last five as fallback), and pair nearby names with role-keyword hits.
pub fn extract_directors_from_pdf(pdf_bytes: &[u8]) -> Result<Vec<DirectorRecord>, ExtractionError> {
    let pages = extract_page_texts(pdf_bytes)?;

    let mut signature_pages = find_signature_pages(&pages);
    if signature_pages.is_empty() {
        debug!("📄 [EXTRACTOR]: no signature page matched, falling back to last {} pages", SIGNATURE_PAGE_FALLBACK_COUNT);
        let start = pages.len().saturating_sub(SIGNATURE_PAGE_FALLBACK_COUNT);
        signature_pages = (start..pages.len()).collect();
    }

    let mut directors = Vec::new();
    for page_idx in signature_pages {
        directors.extend(parse_directors_from_page(&pages[page_idx]));
    }
    Ok(directors)
}
