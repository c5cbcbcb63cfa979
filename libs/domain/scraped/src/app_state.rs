// [libs/domain/scraped/src/app_state.rs]
/*!
 * APARATO: EXTRACTOR DEL ESTADO __NEXT_DATA__ (V1.0)
 * RESPONSABILIDAD: LOCALIZAR Y DESERIALIZAR EL SCRIPT DE ESTADO DE LA PÁGINA (§4.4 paso 1-2)
 */

use scraper::{Html, Selector};
use serde_json::Value;

use crate::errors::ScrapedParseError;

const APP_STATE_SELECTOR: &str = "script#__NEXT_DATA__";

/// Locates the `<script id="__NEXT_DATA__">` element and parses its text
/// content as JSON. Returns `NoAppState` if the element is absent or empty.
pub fn extract_app_state(document_html: &str) -> Result<Value, ScrapedParseError> {
    let document = Html::parse_document(document_html);
    let selector = Selector::parse(APP_STATE_SELECTOR).expect("static selector is valid");

    let script_text = document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .ok_or(ScrapedParseError::NoAppState)?;

    Ok(serde_json::from_str(&script_text)?)
}

/// Navigates `props.pageProps.<key>`, returning `None` if any hop is absent
/// or not an object/null — mirrors the source's tolerant `dict.get` chains.
pub fn page_prop<'a>(app_state: &'a Value, key: &str) -> Option<&'a Value> {
    app_state.get("props")?.get("pageProps")?.get(key).filter(|v| !v.is_null())
}
