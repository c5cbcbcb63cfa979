// [tests/mirror/libs/infra/adapters/registry_projection_tolerant_navigation.test.rs]
use sentinel_domain_models::OrgNumber;
use sentinel_infra_adapters::project_registry_company;
use serde_json::json;

#[test]
fn full_payload_projects_every_field() {
    let orgnr = OrgNumber::parse("5560360793").unwrap();
    let raw = json!({
        "name": "Exempel Aktiebolag",
        "legalName": "Exempel Aktiebolag",
        "legalForm": "Aktiebolag",
        "statusCode": "ACTIVE",
        "statusDate": "2020-01-15",
        "registrationDate": "1998-06-01",
        "postalAddress": { "street": "Kungsgatan 1", "postalCode": "111 43", "city": "Stockholm" },
        "municipality": "Stockholm",
        "county": "Stockholms län",
        "phone": "08-1234567",
        "email": "info@exempel.se",
        "website": "https://exempel.se",
        "industries": [{ "code": "62010", "description": "Dataprogrammering" }],
        "primaryIndustryCode": "62010",
        "revenue": "1 250 000",
        "profit": 95000,
        "employees": 12,
        "shareCapital": 50000,
        "purpose": "Att bedriva konsultverksamhet inom IT.",
        "parentOrgnr": "5560000001",
        "parentName": "Exempel Holding AB",
        "numSubsidiaries": 2
    });

    let record = project_registry_company(&orgnr, &raw, "registry");

    assert_eq!(record.orgnr, orgnr);
    assert_eq!(record.primary_name, "Exempel Aktiebolag");
    assert_eq!(record.legal_form.as_deref(), Some("Aktiebolag"));
    assert_eq!(record.postal_address.city.as_deref(), Some("Stockholm"));
    assert_eq!(record.industries.len(), 1);
    assert_eq!(record.industries[0].code, "62010");
    let financials = record.financials.expect("financials present");
    assert_eq!(financials.revenue, Some(1_250_000));
    assert_eq!(financials.employees, Some(12));
    assert_eq!(record.parent_orgnr.as_deref(), Some("5560000001"));
    assert_eq!(record.num_subsidiaries, Some(2));
    assert_eq!(record.source_tag, "registry");
    assert!(record.directors.is_empty());
}

#[test]
fn sparse_payload_never_panics_and_falls_back_to_orgnr() {
    let orgnr = OrgNumber::parse("5560360793").unwrap();
    let raw = json!({});

    let record = project_registry_company(&orgnr, &raw, "registry");

    assert_eq!(record.primary_name, orgnr.to_string());
    assert!(record.legal_name.is_none());
    assert!(record.industries.is_empty());
    assert!(record.financials.is_none());
    assert!(record.postal_address.street.is_none());
}

#[test]
fn malformed_industry_entries_are_skipped_not_fatal() {
    let orgnr = OrgNumber::parse("5560360793").unwrap();
    let raw = json!({
        "industries": [
            { "description": "missing its code" },
            { "code": "47110", "description": "Butikshandel" },
        ]
    });

    let record = project_registry_company(&orgnr, &raw, "registry");

    assert_eq!(record.industries.len(), 1);
    assert_eq!(record.industries[0].code, "47110");
}
