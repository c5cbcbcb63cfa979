// [libs/domain/scraped/src/person_url.rs]
/*!
 * APARATO: CONSTRUCTOR DE URL DE PERSONA (V1.0)
 * RESPONSABILIDAD: SLUG CANÓNICO PARA EL SEGUNDO PASE DEL SCRAPED ADAPTER (§4.5.3)
 */

/// Builds `/befattning/<name-slug>/-/<person_id>` off the scraped site's
/// host: lowercase the name, replace spaces with `-`, percent-encode
/// everything but the dashes.
pub fn build_person_path(name: &str, person_id: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .map(|c| match c {
            '-' => "-".to_string(),
            other => percent_encode_char(other),
        })
        .collect();
    format!("/befattning/{slug}/-/{person_id}")
}

fn percent_encode_char(c: char) -> String {
    if c.is_ascii_alphanumeric() {
        c.to_string()
    } else {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf)
            .bytes()
            .map(|b| format!("%{b:02X}"))
            .collect()
    }
}
