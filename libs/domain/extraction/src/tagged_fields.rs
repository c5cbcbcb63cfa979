// [libs/domain/extraction/src/tagged_fields.rs]
/*!
 * =================================================================
 * APARATO: TAGGED-FIELD SCANNER (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: LECTURA DE CAMPOS ETIQUETADOS EMBEBIDOS EN MARKUP (§4.3.1)
 *
 * El ZIP de un informe anual sueco embebe datos estructurados como elementos
 * autodescriptivos dentro del XHTML/XML (inline data). Cada elemento lleva
 * un atributo `name=` cuyo sufijo identifica el campo semántico.
 * =================================================================
 */

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use sentinel_domain_models::director::{name_key, normalize_role};
use sentinel_domain_models::{DirectorRecord, PersonType};
use tracing::debug;

/// Substring every inline-data element's tag-name must contain to be
/// considered a candidate field (e.g. `ix:nonNumeric` in the source markup).
const INLINE_DATA_TAG_MARKER: &str = "nonNumeric";

const FIRST_NAME_SUFFIXES: &[&str] = &[
    "UnderskriftFaststallelseintygForetradareTilltalsnamn",
    "UnderskriftHandlingTilltalsnamn",
    "ForetradareTilltalsnamn",
    "Tilltalsnamn",
];

const LAST_NAME_SUFFIXES: &[&str] = &[
    "UnderskriftFaststallelseintygForetradareEfternamn",
    "UnderskriftHandlingEfternamn",
    "ForetradareEfternamn",
    "Efternamn",
];

const ROLE_SUFFIXES: &[&str] = &[
    "UnderskriftFaststallelseintygForetradareForetradarroll",
    "UnderskriftHandlingForetradarroll",
    "ForetradareForetradarroll",
    "Foretradarroll",
];

const SIGNATURE_DATE_FIELD_NAMES: &[&str] = &[
    "UnderskriftFastallelseintygDatum",
    "UnderskriftDatum",
    "UndertecknandeDatum",
];

const SWEDISH_MONTHS: &[(&str, u32)] = &[
    ("januari", 1), ("februari", 2), ("mars", 3), ("april", 4),
    ("maj", 5), ("juni", 6), ("juli", 7), ("augusti", 8),
    ("september", 9), ("oktober", 10), ("november", 11), ("december", 12),
];

#[derive(Debug, Clone)]
struct RawField {
    name: String,
    value: String,
}

/// Scans the markup for tagged fields. If the document does not parse as
/// well-formed XML/XHTML, falls back to a tolerant regex element scan
/// instead of aborting — this is the parser-level fallback from §4.3 step 1,
/// distinct from the method-level regex fallback in step 2.
fn scan_fields(markup: &str) -> Vec<RawField> {
    match scan_fields_xml(markup) {
        Ok(fields) if !fields.is_empty() => fields,
        Ok(_) => Vec::new(),
        Err(parse_fault) => {
            debug!("⚠️ [EXTRACTOR]: markup parse failed ({}), falling back to tolerant regex scan", parse_fault);
            scan_fields_regex(markup)
        }
    }
}

fn scan_fields_xml(markup: &str) -> Result<Vec<RawField>, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut fields = Vec::new();
    let mut capturing_name: Option<String> = None;
    let mut capture_buf = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref tag)) => {
                let local_name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
                if local_name.contains(INLINE_DATA_TAG_MARKER) {
                    let name_attr = tag
                        .attributes()
                        .flatten()
                        .find(|attr| attr.key.as_ref() == b"name")
                        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());
                    if let Some(name) = name_attr {
                        capturing_name = Some(name);
                        capture_buf.clear();
                    }
                }
            }
            Ok(Event::Text(text)) => {
                if capturing_name.is_some() {
                    if let Ok(unescaped) = text.unescape() {
                        capture_buf.push_str(&unescaped);
                    }
                }
            }
            Ok(Event::End(ref tag)) => {
                let local_name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
                if local_name.contains(INLINE_DATA_TAG_MARKER) {
                    if let Some(name) = capturing_name.take() {
                        let value = capture_buf.trim().to_string();
                        if !name.is_empty() && !value.is_empty() {
                            fields.push(RawField { name, value });
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
        buf.clear();
    }

    Ok(fields)
}

fn scan_fields_regex(markup: &str) -> Vec<RawField> {
    let pattern = Regex::new(r#"(?is)<[\w:.-]*nonNumeric[^>]*name="([^"]+)"[^>]*>([^<]*)<"#)
        .expect("static tolerant tagged-field pattern is valid");

    pattern
        .captures_iter(markup)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().trim().to_string();
            let value = caps.get(2)?.as_str().trim().to_string();
            (!name.is_empty() && !value.is_empty()).then_some(RawField { name, value })
        })
        .collect()
}

fn local_field_name(full_name: &str) -> &str {
    full_name.rsplit(':').next().unwrap_or(full_name)
}

/// Positional pairing: the i-th first-name tag pairs with the i-th last-name
/// tag and the i-th role tag (§4.3 step 1) — the only reliable grouping when
/// XBRL contexts are absent from the document.
pub fn extract_tagged_field_directors(markup: &str) -> Vec<DirectorRecord> {
    let fields = scan_fields(markup);
    if fields.is_empty() {
        return Vec::new();
    }

    let mut first_names = Vec::new();
    let mut last_names = Vec::new();
    let mut roles = Vec::new();

    for field in &fields {
        let local = local_field_name(&field.name);
        if FIRST_NAME_SUFFIXES.iter().any(|s| local.contains(s)) {
            first_names.push(field);
        } else if LAST_NAME_SUFFIXES.iter().any(|s| local.contains(s)) {
            last_names.push(field);
        } else if ROLE_SUFFIXES.iter().any(|s| local.contains(s)) {
            roles.push(field);
        }
    }

    let mut directors = Vec::new();
    for (index, first_name_field) in first_names.iter().enumerate() {
        let first_name = first_name_field.value.clone();
        let last_name = last_names.get(index).map(|f| f.value.clone()).unwrap_or_default();
        let raw_role = roles.get(index).map(|f| f.value.clone()).unwrap_or_default();

        if first_name.is_empty() || (last_name.is_empty() && raw_role.is_empty()) {
            continue;
        }

        let normalized_role = normalize_role(&raw_role);
        if normalized_role.is_auditor_family() {
            continue;
        }

        let mut director = DirectorRecord {
            first_name,
            last_name,
            raw_role,
            normalized_role,
            person_type: PersonType::Person,
            external_id: None,
            birth_date: None,
            birth_year: None,
            confidence: 0.0,
            source_field: first_name_field.name.clone(),
        };
        director.confidence = director.compute_confidence();
        directors.push(director);
    }

    directors
}

/// §4.3 step 1: signature date, accepting ISO `YYYY-MM-DD` or localized
/// `D <swedish-month> YYYY`.
pub fn extract_signature_date(markup: &str) -> Option<chrono::NaiveDate> {
    let fields = scan_fields(markup);
    let localized_date_pattern = Regex::new(r"(?i)(\d{1,2})\s+(\w+)\s+(\d{4})")
        .expect("static localized date pattern is valid");

    for field in &fields {
        let local = local_field_name(&field.name);
        if !SIGNATURE_DATE_FIELD_NAMES.iter().any(|s| local.contains(s)) {
            continue;
        }

        if let Ok(date) = chrono::NaiveDate::parse_from_str(field.value.trim(), "%Y-%m-%d") {
            return Some(date);
        }

        if let Some(caps) = localized_date_pattern.captures(&field.value) {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let month_name = caps.get(2)?.as_str().to_lowercase();
            let year: i32 = caps.get(3)?.as_str().parse().ok()?;
            if let Some((_, month)) = SWEDISH_MONTHS.iter().find(|(name, _)| *name == month_name) {
                if let Some(date) = chrono::NaiveDate::from_ymd_opt(year, *month, day) {
                    return Some(date);
                }
            }
        }
    }

    None
}

/// Exposed for the deduplication pass shared across all three extraction
/// methods (§4.3 "Deduplication").
pub fn dedup_key(director: &DirectorRecord) -> String {
    name_key(&director.full_name())
}
