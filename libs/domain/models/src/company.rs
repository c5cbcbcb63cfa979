// [libs/domain/models/src/company.rs]
/*!
 * APARATO: COMPANY RECORD DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: FORMA UNIFORME DE SALIDA HACIA EL GRAPH SINK
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::director::DirectorRecord;
use crate::orgnr::OrgNumber;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryCode {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Financials {
    pub revenue: Option<i64>,
    pub profit: Option<i64>,
    pub employees: Option<i64>,
    pub share_capital: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    // Identity
    pub orgnr: OrgNumber,
    pub primary_name: String,
    pub legal_name: Option<String>,

    // Legal
    pub legal_form: Option<String>,
    pub status_code: Option<String>,
    pub status_date: Option<chrono::NaiveDate>,
    pub registration_date: Option<chrono::NaiveDate>,

    // Location
    pub postal_address: PostalAddress,
    pub visitor_address: Option<PostalAddress>,
    pub municipality: Option<String>,
    pub county: Option<String>,

    // Contact
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,

    // Industry
    pub industries: Vec<IndustryCode>,
    pub primary_code: Option<String>,

    // Financials (latest year only)
    pub financials: Option<Financials>,

    pub purpose: Option<String>,

    pub directors: Vec<DirectorRecord>,

    // Structure
    pub parent_orgnr: Option<String>,
    pub parent_name: Option<String>,
    pub num_subsidiaries: Option<i64>,

    // Provenance
    pub source_tag: String,
    pub fetched_at: DateTime<Utc>,
    pub raw_payload_ref: Option<String>,
}

impl CompanyRecord {
    /// First non-empty address wins: postal/location set preferred over
    /// visitor/domicile (§4.4 step 3).
    pub fn resolved_address(&self) -> &PostalAddress {
        if self.postal_address.street.is_some() || self.postal_address.city.is_some() {
            &self.postal_address
        } else {
            self.visitor_address.as_ref().unwrap_or(&self.postal_address)
        }
    }
}
