// [tests/mirror/libs/domain/models/role_normalization.test.rs]
use sentinel_domain_models::{normalize_role, NormalizedRole};

#[test]
fn recognizes_exact_swedish_role_strings() {
    assert_eq!(normalize_role("Verkställande direktör"), NormalizedRole::Ceo);
    assert_eq!(normalize_role("Styrelseordförande"), NormalizedRole::BoardChair);
    assert_eq!(normalize_role("Styrelseledamot"), NormalizedRole::BoardMember);
    assert_eq!(normalize_role("Styrelsesuppleant"), NormalizedRole::BoardAlternate);
    assert_eq!(normalize_role("Arbetstagarrepresentant"), NormalizedRole::EmployeeRep);
}

#[test]
fn recognizes_common_short_forms() {
    assert_eq!(normalize_role("VD"), NormalizedRole::Ceo);
    assert_eq!(normalize_role("vd"), NormalizedRole::Ceo);
    assert_eq!(normalize_role("Ordförande"), NormalizedRole::BoardChair);
    assert_eq!(normalize_role("Ledamot"), NormalizedRole::BoardMember);
    assert_eq!(normalize_role("Suppleant"), NormalizedRole::BoardAlternate);
}

#[test]
fn falls_back_to_a_substring_match_when_no_exact_key_fits() {
    // The raw role sometimes carries extra qualifying text the registry adds.
    assert_eq!(normalize_role("Styrelseledamot och firmatecknare"), NormalizedRole::BoardMember);
}

#[test]
fn recognizes_the_auditor_family_and_its_is_auditor_family_helper() {
    assert_eq!(normalize_role("Revisor"), NormalizedRole::Auditor);
    assert_eq!(normalize_role("Huvudansvarig revisor"), NormalizedRole::AuditorPrincipal);
    assert_eq!(normalize_role("Godkänd revisor"), NormalizedRole::AuditorApproved);
    assert_eq!(normalize_role("Auktoriserad revisor"), NormalizedRole::AuditorAuthorized);

    assert!(NormalizedRole::Auditor.is_auditor_family());
    assert!(NormalizedRole::AuditorAuthorized.is_auditor_family());
    assert!(!NormalizedRole::BoardMember.is_auditor_family());
}

#[test]
fn an_unrecognized_or_empty_role_normalizes_to_unknown() {
    assert_eq!(normalize_role(""), NormalizedRole::Unknown);
    assert_eq!(normalize_role("   "), NormalizedRole::Unknown);
    assert_eq!(normalize_role("Kaffebryggaransvarig"), NormalizedRole::Unknown);
}
