// [libs/domain/scraped/src/person.rs]
/*!
 * APARATO: PARSER DE PÁGINA DE PERSONA (V1.0)
 * RESPONSABILIDAD: PROYECCIÓN DE pageProps.rolePerson A PersonProfile (§4.4, §4.5.3, §10.6)
 */

use serde_json::Value;
use tracing::info;

use sentinel_domain_models::director::normalize_role;
use sentinel_domain_models::{PersonConnection, PersonProfile, PersonRole};

use crate::app_state::{extract_app_state, page_prop};
use crate::errors::ScrapedParseError;
use crate::financials::latest_account_amount;
use crate::parsing::{normalize_org_nr, parse_int_value, parse_iso_date};

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

fn extract_roles(role_person: &Value) -> Vec<PersonRole> {
    let Some(roles) = role_person.get("roles").and_then(Value::as_array) else { return Vec::new() };

    roles
        .iter()
        .filter(|entry| str_field(entry, "type") == Some("Company"))
        .map(|entry| {
            let revenue = entry
                .get("companyAccounts")
                .and_then(|accounts| latest_account_amount(accounts, "SDI"));
            let employees = entry.get("companyNumberOfEmployees").and_then(parse_employee_count);
            let status = entry.get("status").and_then(|s| str_field(s, "status")).map(String::from);
            let raw_id = entry.get("id").map(|v| v.to_string().trim_matches('"').to_string()).unwrap_or_default();
            let company_orgnr = normalize_org_nr(&raw_id);
            let raw_role = str_field(entry, "role").unwrap_or_default().to_string();

            PersonRole {
                company_orgnr,
                company_name: str_field(entry, "name").unwrap_or_default().to_string(),
                normalized_role: normalize_role(&raw_role),
                raw_role,
                revenue,
                employees,
                status,
            }
        })
        .collect()
}

fn parse_employee_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(_) => parse_int_value(Some(value)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

fn extract_connections(role_person: &Value) -> Vec<PersonConnection> {
    let Some(connections) = role_person.get("connections").and_then(Value::as_array) else { return Vec::new() };

    connections
        .iter()
        .map(|entry| PersonConnection {
            person_id: entry.get("personId").map(|v| v.to_string().trim_matches('"').to_string()).unwrap_or_default(),
            name: str_field(entry, "name").unwrap_or_default().to_string(),
            gender: str_field(entry, "gender").map(String::from),
            num_connections: entry.get("numberOfConnections").and_then(Value::as_i64).unwrap_or(0),
        })
        .collect()
}

/// §4.4 tertiary operation: parses `pageProps.rolePerson` from a person-page
/// `__NEXT_DATA__` payload into a `PersonProfile`.
pub fn parse_person_page(document_html: &str) -> Result<PersonProfile, ScrapedParseError> {
    let app_state = extract_app_state(document_html)?;
    let role_person = page_prop(&app_state, "rolePerson").ok_or(ScrapedParseError::MissingRolePerson)?;

    let person_id = role_person.get("personId").map(|v| v.to_string().trim_matches('"').to_string()).unwrap_or_default();
    let birth_date = str_field(role_person, "birthDate").and_then(parse_iso_date);

    let profile = PersonProfile {
        person_id,
        name: str_field(role_person, "name").unwrap_or_default().to_string(),
        birth_date,
        gender: str_field(role_person, "gender").map(String::from),
        roles: extract_roles(role_person),
        connections: extract_connections(role_person),
    };

    info!("🕸️ [SCRAPED]: parsed person page for {} -> {} role(s), {} connection(s)", profile.person_id, profile.roles.len(), profile.connections.len());

    Ok(profile)
}
