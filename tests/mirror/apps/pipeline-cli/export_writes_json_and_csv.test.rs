// [tests/mirror/apps/pipeline-cli/export_writes_json_and_csv.test.rs]
use chrono::Utc;
use sentinel_domain_models::{
    CompanyRecord, DirectorRecord, NormalizedRole, OrgNumber, PersonType, PostalAddress,
};
use sentinel_pipeline_lib::commands::write_export;
use std::fs;

fn sample_records() -> Vec<CompanyRecord> {
    vec![CompanyRecord {
        orgnr: OrgNumber::parse("5566778899").unwrap(),
        primary_name: "Testbolaget AB".to_string(),
        legal_name: None,
        legal_form: Some("AB".to_string()),
        status_code: Some("active".to_string()),
        status_date: None,
        registration_date: None,
        postal_address: PostalAddress::default(),
        visitor_address: None,
        municipality: Some("Stockholm".to_string()),
        county: None,
        phone: None,
        email: None,
        website: None,
        industries: Vec::new(),
        primary_code: None,
        financials: None,
        purpose: None,
        directors: vec![DirectorRecord {
            first_name: "Anna".to_string(),
            last_name: "Andersson".to_string(),
            raw_role: "Styrelseordförande".to_string(),
            normalized_role: NormalizedRole::BoardChair,
            person_type: PersonType::Person,
            external_id: None,
            birth_date: None,
            birth_year: None,
            confidence: 0.9,
            source_field: "test".to_string(),
        }],
        parent_orgnr: None,
        parent_name: None,
        num_subsidiaries: None,
        source_tag: "test".to_string(),
        fetched_at: Utc::now(),
        raw_payload_ref: None,
    }]
}

#[test]
fn writes_valid_json_array() {
    let records = sample_records();
    let output = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let written = write_export(&records, output.path(), "json").unwrap();
    assert_eq!(written, 1);

    let contents = fs::read_to_string(output.path()).unwrap();
    let parsed: Vec<CompanyRecord> = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].primary_name, "Testbolaget AB");
}

#[test]
fn writes_csv_with_a_header_and_one_row_per_company() {
    let records = sample_records();
    let output = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write_export(&records, output.path(), "csv").unwrap();

    let contents = fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("orgnr"));
    assert!(lines[1].contains("5566778899"));
    assert!(lines[1].contains("Anna Andersson"));
}

#[test]
fn rejects_unknown_format() {
    let records = sample_records();
    let output = tempfile::Builder::new().tempfile().unwrap();
    assert!(write_export(&records, output.path(), "yaml").is_err());
}
