// [libs/domain/scraped/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SCRAPED-PAGE PARSER (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROYECTAR EL ESTADO EMBEBIDO DE PÁGINAS SCRAPEADAS (§4.4)
 *
 * VISION HIPER-HOLÍSTICA:
 * El sitio scrapeado incrusta todo su estado de página en un único script
 * de aplicación como JSON. Este crate lo localiza, lo parsea y proyecta sus
 * dos formas (página de empresa, página de persona) a los modelos de dominio.
 * =================================================================
 */

mod app_state;
mod company;
mod errors;
mod financials;
mod parsing;
mod person;
mod person_url;

pub use app_state::{extract_app_state, page_prop};
pub use company::{parse_company_page, ParsedCompanyPage};
pub use errors::ScrapedParseError;
pub use financials::{extract_financial_history, latest_account_amount};
pub use parsing::{normalize_org_nr, parse_birth_date_dotted, parse_iso_date, parse_swedish_amount, parse_swedish_date};
pub use person::parse_person_page;
pub use person_url::build_person_path;
