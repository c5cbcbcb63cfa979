// [libs/domain/scraped/src/company.rs]
/*!
 * =================================================================
 * APARATO: PARSER DE PÁGINA DE EMPRESA (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROYECCIÓN DEL ESTADO __NEXT_DATA__ A CompanyRecord (§4.4)
 * =================================================================
 */

use chrono::Utc;
use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

use sentinel_domain_models::director::{name_key, normalize_role};
use sentinel_domain_models::{CompanyRecord, DirectorRecord, IndustryCode, OrgNumber, PersonType, PostalAddress};

use crate::app_state::{extract_app_state, page_prop};
use crate::errors::ScrapedParseError;
use crate::parsing::{normalize_org_nr, parse_int_value, parse_swedish_date};

/// Output of a company-page parse: the projected record plus the raw
/// `company` JSON object for callers that want to persist it verbatim
/// (§4.4 step 7).
pub struct ParsedCompanyPage {
    pub record: CompanyRecord,
    pub raw_company: Value,
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

/// JSON ids appear as either a bare number or a quoted string; strip the
/// quotes so both shapes fold into the same dedup key.
fn raw_id_key(value: &Value) -> String {
    value.to_string().trim_matches('"').to_string()
}

fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = parts.collect();
    (first, rest.join(" "))
}

fn build_director(entry: &Value, person_type: PersonType, source_field: &str) -> Option<DirectorRecord> {
    let name = str_field(entry, "name")?.trim();
    if name.is_empty() {
        return None;
    }
    let (first_name, last_name) = split_name(name);
    let raw_role = str_field(entry, "role").unwrap_or_default().to_string();
    let external_id = entry.get("id").map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }).filter(|s| !s.is_empty());

    let mut director = DirectorRecord {
        first_name,
        last_name,
        normalized_role: normalize_role(&raw_role),
        raw_role,
        person_type,
        external_id,
        birth_date: str_field(entry, "birthDate").and_then(crate::parsing::parse_birth_date_dotted),
        birth_year: None,
        confidence: 0.0,
        source_field: source_field.to_string(),
    };
    director.confidence = director.compute_confidence();
    Some(director)
}

/// Walks `roles.roleGroups[*].roles[*]`, then merges the top-level
/// `chairman`/`manager` shortcuts avoiding duplicates already seen by id
/// (§4.4 step 6).
fn extract_directors(company_data: &Value) -> Vec<DirectorRecord> {
    let mut directors = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    let roles_root = company_data.get("roles").cloned().unwrap_or(Value::Null);
    let role_groups = roles_root.get("roleGroups").and_then(Value::as_array).cloned().unwrap_or_default();

    for group in &role_groups {
        let Some(entries) = group.get("roles").and_then(Value::as_array) else { continue };
        for entry in entries {
            let entry_type = str_field(entry, "type").unwrap_or_default();
            let person_type = match entry_type {
                "Person" => PersonType::Person,
                "Entity" => PersonType::Entity,
                _ => continue,
            };
            let Some(director) = build_director(entry, person_type, "role_groups") else { continue };
            if let Some(id) = entry.get("id") {
                seen_ids.insert(raw_id_key(id));
            }
            directors.push(director);
        }
    }

    for key in ["chairman", "manager"] {
        let Some(entry) = roles_root.get(key) else { continue };
        if str_field(entry, "type") != Some("Person") {
            continue;
        }
        let id_key = entry.get("id").map(raw_id_key).unwrap_or_default();
        if seen_ids.contains(&id_key) {
            continue;
        }
        if let Some(director) = build_director(entry, PersonType::Person, key) {
            seen_ids.insert(id_key);
            directors.push(director);
        }
    }

    let mut deduped: std::collections::HashMap<String, DirectorRecord> = std::collections::HashMap::new();
    for director in directors {
        let key = name_key(&director.full_name());
        match deduped.get(&key) {
            Some(existing) if existing.confidence >= director.confidence => {}
            _ => {
                deduped.insert(key, director);
            }
        }
    }
    deduped.into_values().collect()
}

/// Parses industry strings of the form `"<code> <description words>"`,
/// falling back to a separate industry array if the primary source is
/// empty (§4.4 step 4).
fn extract_industries(company_data: &Value) -> (Vec<IndustryCode>, Option<String>) {
    let current = company_data.get("currentIndustry");
    if let Some(current) = current {
        if let (Some(code), Some(name)) = (str_field(current, "code"), str_field(current, "name")) {
            if !code.is_empty() {
                return (vec![IndustryCode { code: code.to_string(), description: name.to_string() }], Some(code.to_string()));
            }
        }
    }

    let fallback: Vec<IndustryCode> = company_data
        .get("industries")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|entry| {
                    let raw = entry.as_str()?;
                    let mut split = raw.splitn(2, char::is_whitespace);
                    let code = split.next()?.to_string();
                    let description = split.next().unwrap_or_default().trim().to_string();
                    (!code.is_empty()).then_some(IndustryCode { code, description })
                })
                .collect()
        })
        .unwrap_or_default();

    let primary_code = fallback.first().map(|i| i.code.clone());
    (fallback, primary_code)
}

fn extract_address(root: &Value, key: &str) -> Option<PostalAddress> {
    let address = root.get(key)?;
    let street = str_field(address, "street").map(String::from);
    let postal_code = str_field(address, "zipCode").or_else(|| str_field(address, "postalCode")).map(String::from);
    let city = str_field(address, "city").map(String::from);
    if street.is_none() && postal_code.is_none() && city.is_none() {
        return None;
    }
    Some(PostalAddress { street, postal_code, city })
}

/// §4.4: projects the `company` page-prop JSON into a `CompanyRecord` plus
/// its director list. Returns `None` when the app-state or `company` prop
/// is absent (propagated as `MissingCompany` by the caller when it matters).
pub fn parse_company_page(document_html: &str, source_tag: &str) -> Result<ParsedCompanyPage, ScrapedParseError> {
    let app_state = extract_app_state(document_html)?;
    let company_data = page_prop(&app_state, "company").ok_or(ScrapedParseError::MissingCompany)?;

    let orgnr_raw = str_field(company_data, "orgnr").unwrap_or_default();
    let orgnr = OrgNumber::parse(&normalize_org_nr(orgnr_raw))
        .map_err(|_| ScrapedParseError::MissingCompany)?;

    let status = company_data.get("status");
    let status_code = status.and_then(|s| str_field(s, "status")).map(String::from);
    let status_date = status.and_then(|s| str_field(s, "statusDate")).and_then(parse_swedish_date);
    let registration_date = str_field(company_data, "registrationDate").and_then(parse_swedish_date);

    let corp_structure = company_data.get("corporateStructure");
    let parent_orgnr = corp_structure
        .and_then(|c| str_field(c, "parentCompanyOrganisationNumber"))
        .map(normalize_org_nr)
        .filter(|s| !s.is_empty());
    let parent_name = corp_structure.and_then(|c| str_field(c, "parentCompanyName")).map(String::from);

    let location = company_data.get("location");
    let domicile = company_data.get("domicile");
    let municipality = domicile
        .and_then(|d| str_field(d, "municipality"))
        .or_else(|| location.and_then(|l| str_field(l, "municipality")))
        .map(String::from);
    let county = domicile
        .and_then(|d| str_field(d, "county"))
        .or_else(|| location.and_then(|l| str_field(l, "county")))
        .map(String::from);

    let (industries, primary_code) = extract_industries(company_data);

    let postal_address = extract_address(company_data, "postalAddress").unwrap_or_default();
    let visitor_address = extract_address(company_data, "visitorAddress");

    let financials = {
        let revenue = parse_int_value(company_data.get("revenue"));
        let profit = parse_int_value(company_data.get("profit"));
        let employees = parse_int_value(company_data.get("employees"));
        let share_capital = parse_int_value(company_data.get("shareCapital"));
        (revenue.is_some() || profit.is_some() || employees.is_some() || share_capital.is_some())
            .then_some(sentinel_domain_models::Financials { revenue, profit, employees, share_capital })
    };

    let directors = extract_directors(company_data);

    let record = CompanyRecord {
        orgnr,
        primary_name: str_field(company_data, "name").unwrap_or_default().to_string(),
        legal_name: str_field(company_data, "legalName").map(String::from),
        legal_form: company_data.get("companyType").and_then(|t| str_field(t, "name")).map(String::from),
        status_code,
        status_date,
        registration_date,
        postal_address,
        visitor_address,
        municipality,
        county,
        phone: str_field(company_data, "phoneNumber").map(String::from),
        email: str_field(company_data, "email").map(String::from),
        website: str_field(company_data, "homepage").map(String::from),
        industries,
        primary_code,
        financials,
        purpose: str_field(company_data, "purpose").map(String::from),
        directors,
        parent_orgnr,
        parent_name,
        num_subsidiaries: company_data.get("numberOfSubsidiaries").and_then(Value::as_i64),
        source_tag: source_tag.to_string(),
        fetched_at: Utc::now(),
        raw_payload_ref: None,
    };

    info!("🕸️ [SCRAPED]: parsed company page for {} -> {} director(s)", record.orgnr, record.directors.len());

    Ok(ParsedCompanyPage { record, raw_company: company_data.clone() })
}
