// [libs/infra/adapters/src/registry_projection.rs]
/*!
 * APARATO: REGISTRY COMPANY PROJECTION (V1.0)
 * RESPONSABILIDAD: PROYECTAR EL JSON CRUDO DE FetchCompany A CompanyRecord
 *
 * El esquema exacto del payload de la API del registro no está documentado
 * en la fuente (§9 "Dynamic record shapes"); esta proyección usa navegación
 * tolerante a `.get()`, igual que el Scraped-Page Parser, en vez de asumir
 * un esquema rígido que un 404 de campo convertiría en un fallo de parseo.
 */

use chrono::Utc;
use serde_json::Value;

use sentinel_domain_models::{CompanyRecord, Financials, IndustryCode, OrgNumber, PostalAddress};
use sentinel_domain_scraped::{parse_swedish_amount, parse_swedish_date};

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string).filter(|s| !s.is_empty())
}

fn address_field(value: &Value, key: &str) -> PostalAddress {
    let Some(node) = value.get(key) else {
        return PostalAddress::default();
    };
    PostalAddress {
        street: str_field(node, "street").or_else(|| str_field(node, "streetAddress")),
        postal_code: str_field(node, "postalCode").or_else(|| str_field(node, "zip")),
        city: str_field(node, "city").or_else(|| str_field(node, "postOrt")),
    }
}

fn amount_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => parse_swedish_amount(s),
        _ => None,
    }
}

/// Projects the JSON body returned by `RegistryAdapter::fetch_company_raw`
/// into a `CompanyRecord`. Absent fields fall back to `None`/empty per
/// field, never a parse failure (§7 ParseError policy).
pub fn project_registry_company(orgnr: &OrgNumber, raw: &Value, source_tag: &str) -> CompanyRecord {
    let industries = raw
        .get("industries")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let code = str_field(item, "code")?;
                    let description = str_field(item, "description").unwrap_or_default();
                    Some(IndustryCode { code, description })
                })
                .collect()
        })
        .unwrap_or_default();

    let financials = if raw.get("revenue").is_some() || raw.get("employees").is_some() {
        Some(Financials {
            revenue: amount_field(raw, "revenue"),
            profit: amount_field(raw, "profit"),
            employees: amount_field(raw, "employees"),
            share_capital: amount_field(raw, "shareCapital"),
        })
    } else {
        None
    };

    CompanyRecord {
        orgnr: orgnr.clone(),
        primary_name: str_field(raw, "name").unwrap_or_else(|| orgnr.to_string()),
        legal_name: str_field(raw, "legalName"),
        legal_form: str_field(raw, "legalForm"),
        status_code: str_field(raw, "statusCode"),
        status_date: str_field(raw, "statusDate").and_then(|s| parse_swedish_date(&s)),
        registration_date: str_field(raw, "registrationDate").and_then(|s| parse_swedish_date(&s)),
        postal_address: address_field(raw, "postalAddress"),
        visitor_address: raw.get("visitorAddress").map(|_| address_field(raw, "visitorAddress")),
        municipality: str_field(raw, "municipality"),
        county: str_field(raw, "county"),
        phone: str_field(raw, "phone"),
        email: str_field(raw, "email"),
        website: str_field(raw, "website"),
        industries,
        primary_code: str_field(raw, "primaryIndustryCode"),
        financials,
        purpose: str_field(raw, "purpose"),
        directors: Vec::new(),
        parent_orgnr: str_field(raw, "parentOrgnr"),
        parent_name: str_field(raw, "parentName"),
        num_subsidiaries: raw.get("numSubsidiaries").and_then(Value::as_i64),
        source_tag: source_tag.to_string(),
        fetched_at: Utc::now(),
        raw_payload_ref: None,
    }
}
