// [libs/domain/scraped/src/parsing.rs]
/*!
 * APARATO: PRIMITIVAS DE PARSEO SUECO (V1.0)
 * RESPONSABILIDAD: FECHAS Y MONTOS EN EL FORMATO DEL SITIO SCRAPEADO (§4.4 pasos 4-5)
 */

use chrono::NaiveDate;
use serde_json::Value;

/// Parses "DD.MM.YYYY" (the birth-date format used inside `roleGroups`
/// entries on company pages).
pub fn parse_birth_date_dotted(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses "YYYY-MM-DD" (the full birth-date format used on person pages).
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Dispatches on separator: `-` implies ISO, `.` implies dotted DD.MM.YYYY
/// (§4.4 step 2 "parse_swedish_date").
pub fn parse_swedish_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if raw.contains('-') {
        parse_iso_date(raw)
    } else if raw.contains('.') {
        parse_birth_date_dotted(raw)
    } else {
        None
    }
}

/// Normalizes a Swedish-formatted monetary amount: strips spaces (including
/// non-breaking space `\u{a0}`), accepts a leading `-`, converts decimal `,`
/// to `.`, truncates to integer. Returns `None` on any parse failure (§4.4
/// step 5).
pub fn parse_swedish_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().map(|f| f as i64)
}

/// Mirrors `parse_int` over a loosely-typed JSON value: native numbers pass
/// through, strings are run through `parse_swedish_amount`, anything else
/// yields `None`.
pub fn parse_int_value(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_swedish_amount(s),
        _ => None,
    }
}

/// Strips separators from an orgnr-shaped string without going through the
/// full `OrgNumber::parse` validation — used while still inside raw JSON
/// navigation, before a value is promoted to a validated `OrgNumber`.
pub fn normalize_org_nr(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}
