// [libs/infra/adapters/src/scraped_adapter.rs]
/*!
 * =================================================================
 * APARATO: SCRAPED ADAPTER (V1.0)
 * CLASIFICACIÓN: ADAPTADOR DE FUENTE (ESTRATO L3)
 * RESPONSABILIDAD: URL CANÓNICA + POLITE FETCHER + SCRAPED-PAGE PARSER (§4.5.3)
 * =================================================================
 */

use tracing::{debug, info};

use sentinel_domain_models::{CompanyRecord, OrgNumber, PersonProfile};
use sentinel_domain_scraped::{build_person_path, parse_company_page, parse_person_page};
use sentinel_infra_fetch::{FetchOutcome, PoliteFetcher};

use crate::errors::AdapterError;
use crate::outcome::AdapterOutcome;

pub struct ScrapedAdapter {
    fetcher: PoliteFetcher,
    host: String,
    source_tag: String,
    enable_person_pass: bool,
}

impl ScrapedAdapter {
    pub fn new(fetcher: PoliteFetcher, host: String, source_tag: String, enable_person_pass: bool) -> Self {
        Self { fetcher, host, source_tag, enable_person_pass }
    }

    pub fn enable_person_pass(&self) -> bool {
        self.enable_person_pass
    }

    /// §4.5.3: `https://<host>/<orgnr>`.
    pub fn canonical_company_url(&self, orgnr: &OrgNumber) -> String {
        format!("https://{}/{}", self.host, orgnr.as_str())
    }

    /// §4.5.3: `https://<host>/befattning/<name-slug>/-/<person-id>`.
    pub fn canonical_person_url(&self, name: &str, person_id: &str) -> String {
        format!("https://{}{}", self.host, build_person_path(name, person_id))
    }

    /// Fetches and parses the company page for `orgnr` (§4.5.3). A 404 is
    /// terminal success with no record; a block propagates as `Blocked`.
    pub async fn fetch_company(&self, orgnr: &OrgNumber) -> Result<AdapterOutcome<CompanyRecord>, AdapterError> {
        let url = self.canonical_company_url(orgnr);
        match self.fetcher.fetch(&url).await {
            FetchOutcome::Ok { body, .. } => match parse_company_page(&body, &self.source_tag) {
                Ok(parsed) => {
                    info!("🕸️ [SCRAPED-ADAPTER]: fetched company page for {}", orgnr);
                    Ok(AdapterOutcome::Completed(parsed.record))
                }
                Err(fault) => {
                    debug!("⚠️ [SCRAPED-ADAPTER]: {} parsed with no app-state ({}), treating as NotFound", orgnr, fault);
                    Ok(AdapterOutcome::NotFound)
                }
            },
            FetchOutcome::NotFound => Ok(AdapterOutcome::NotFound),
            FetchOutcome::Blocked { reason } => Ok(AdapterOutcome::Blocked { reason }),
            FetchOutcome::TransientError { reason } => Ok(AdapterOutcome::TransientError { reason }),
        }
    }

    /// Second-pass person lookup (§4.5.3, §10.6). Orthogonal to the owning
    /// company job's stage machine: a failure here never fails or blocks
    /// that job, it just yields `None`/`Err` to a caller who logs and moves on.
    pub async fn fetch_person(&self, name: &str, person_id: &str) -> Result<AdapterOutcome<PersonProfile>, AdapterError> {
        let url = self.canonical_person_url(name, person_id);
        match self.fetcher.fetch(&url).await {
            FetchOutcome::Ok { body, .. } => match parse_person_page(&body) {
                Ok(profile) => Ok(AdapterOutcome::Completed(profile)),
                Err(fault) => {
                    debug!("⚠️ [SCRAPED-ADAPTER]: person page for {} parsed with no app-state ({})", person_id, fault);
                    Ok(AdapterOutcome::NotFound)
                }
            },
            FetchOutcome::NotFound => Ok(AdapterOutcome::NotFound),
            FetchOutcome::Blocked { reason } => Ok(AdapterOutcome::Blocked { reason }),
            FetchOutcome::TransientError { reason } => Ok(AdapterOutcome::TransientError { reason }),
        }
    }
}
