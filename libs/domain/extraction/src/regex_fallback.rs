// [libs/domain/extraction/src/regex_fallback.rs]
/*!
 * APARATO: REGEX FALLBACK SCANNER (V1.0)
 * RESPONSABILIDAD: EXTRACCIÓN DE DIRECTORES POR PATRÓN "Nombre, Rol" (§4.3.2)
 *
 * Invocado sólo cuando el escaneo de campos etiquetados no produjo ningún
 * director. Confianza fija en 0.6, método RegexFallback.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use sentinel_domain_models::director::normalize_role;
use sentinel_domain_models::{DirectorRecord, PersonType};

const REGEX_FALLBACK_CONFIDENCE: f64 = 0.6;

static NAME_ROLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)>([A-ZÅÄÖ][a-zåäöéè]+(?:\s+[A-ZÅÄÖ][a-zåäöéè]+){1,3})\s*,?\s*(Styrelse(?:ledamot|ns ordförande|suppleant)?|VD|Verkställande direktör)[^<]*<",
    )
    .expect("static name/role fallback pattern is valid")
});

pub fn extract_directors(markup: &str) -> Vec<DirectorRecord> {
    NAME_ROLE_PATTERN
        .captures_iter(markup)
        .filter_map(|caps| {
            let full_name = caps.get(1)?.as_str().trim();
            let raw_role = caps.get(2)?.as_str().trim().to_string();

            let mut parts = full_name.split_whitespace();
            let first_name = parts.next().unwrap_or_default().to_string();
            let last_name = parts.collect::<Vec<_>>().join(" ");

            let normalized_role = normalize_role(&raw_role);
            if normalized_role.is_auditor_family() {
                return None;
            }

            Some(DirectorRecord {
                first_name,
                last_name,
                raw_role,
                normalized_role,
                person_type: PersonType::Person,
                external_id: None,
                birth_date: None,
                birth_year: None,
                confidence: REGEX_FALLBACK_CONFIDENCE,
                source_field: "regex_fallback".to_string(),
            })
        })
        .collect()
}
