// [tests/mirror/libs/domain/models/orgnr_canonicalization.test.rs]
use sentinel_domain_models::{OrgNumber, OrgNumberError};

#[test]
fn strips_dashes_and_spaces() {
    let parsed = OrgNumber::parse("556677-8899").unwrap();
    assert_eq!(parsed.as_str(), "5566778899");

    let spaced = OrgNumber::parse("55 66 77 88 99").unwrap();
    assert_eq!(spaced.as_str(), "5566778899");
}

#[test]
fn strips_a_leading_se_country_prefix_case_insensitively() {
    assert_eq!(OrgNumber::parse("SE5566778899").unwrap().as_str(), "5566778899");
    assert_eq!(OrgNumber::parse("se556677-8899").unwrap().as_str(), "5566778899");
}

#[test]
fn rejects_an_empty_string() {
    assert_eq!(OrgNumber::parse("   ").unwrap_err(), OrgNumberError::Empty);
}

#[test]
fn rejects_the_wrong_digit_count() {
    let result = OrgNumber::parse("12345");
    assert!(matches!(result, Err(OrgNumberError::WrongLength(_))));
}

#[test]
fn rejects_non_digit_characters_that_survive_canonicalization() {
    let result = OrgNumber::parse("55667788XY");
    assert!(matches!(result, Err(OrgNumberError::NonDigit(_))));
}

#[test]
fn prefix_helpers_read_leading_digits() {
    let orgnr = OrgNumber::parse("5566778899").unwrap();
    assert_eq!(orgnr.prefix_2(), "55");
    assert_eq!(orgnr.prefix_3(), "556");
    assert_eq!(orgnr.prefix_4(), "5566");
}

#[test]
fn two_equivalent_spellings_canonicalize_to_the_same_value() {
    let dashed = OrgNumber::parse("556677-8899").unwrap();
    let prefixed = OrgNumber::parse("SE 5566778899").unwrap();
    assert_eq!(dashed, prefixed);
}
