// [libs/domain/scraped/src/errors.rs]
/*!
 * APARATO: ERRORES DEL PARSER DE PÁGINAS SCRAPEADAS (V1.0)
 */

#[derive(Debug, thiserror::Error)]
pub enum ScrapedParseError {
    #[error("no __NEXT_DATA__ script tag found in document")]
    NoAppState,
    #[error("__NEXT_DATA__ payload is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("JSON payload is missing the expected 'company' page-prop")]
    MissingCompany,
    #[error("JSON payload is missing the expected 'rolePerson' page-prop")]
    MissingRolePerson,
}
