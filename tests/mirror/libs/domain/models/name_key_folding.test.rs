// [tests/mirror/libs/domain/models/name_key_folding.test.rs]
use sentinel_domain_models::{name_key, DirectorRecord, NormalizedRole, PersonType};

#[test]
fn lowercases_and_folds_swedish_diacritics() {
    assert_eq!(name_key("Åsa Öberg"), "asa oberg");
    assert_eq!(name_key("André Ångström"), "andre angstrom");
    assert_eq!(name_key("Müller"), "muller");
}

#[test]
fn collapses_hyphens_and_repeated_whitespace() {
    assert_eq!(name_key("Anna-Karin  Svensson"), "anna karin svensson");
    assert_eq!(name_key("  Bo   Lindqvist  "), "bo lindqvist");
}

#[test]
fn two_differently_spelled_names_fold_to_the_same_key() {
    assert_eq!(name_key("Åke Söderström"), name_key("åke söderström"));
    assert_eq!(name_key("Anna-Karin Svensson"), name_key("Anna Karin  Svensson"));
}

fn director(first: &str, last: &str) -> DirectorRecord {
    DirectorRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        raw_role: "Styrelseledamot".to_string(),
        normalized_role: NormalizedRole::BoardMember,
        person_type: PersonType::Person,
        external_id: None,
        birth_date: None,
        birth_year: None,
        confidence: 0.0,
        source_field: "test".to_string(),
    }
}

#[test]
fn full_name_joins_first_and_last_with_a_single_space() {
    assert_eq!(director("Anna", "Andersson").full_name(), "Anna Andersson");
}

#[test]
fn full_name_tolerates_a_missing_half() {
    assert_eq!(director("", "Andersson").full_name(), "Andersson");
    assert_eq!(director("Anna", "").full_name(), "Anna");
}

#[test]
fn name_normalized_runs_full_name_through_the_same_folding() {
    let director = director("Åsa", "Öberg");
    assert_eq!(director.name_normalized(), "asa oberg");
}

#[test]
fn compute_confidence_rewards_complete_well_formed_records() {
    let mut complete = director("Anna", "Andersson");
    assert_eq!(complete.compute_confidence(), 0.5 + 0.25 + 0.20 + 0.05);

    complete.normalized_role = NormalizedRole::Unknown;
    assert_eq!(complete.compute_confidence(), 0.5 + 0.25 + 0.05);

    let mut last_name_only = director("", "Andersson");
    last_name_only.normalized_role = NormalizedRole::Unknown;
    assert_eq!(last_name_only.compute_confidence(), 0.5);
}

#[test]
fn compute_confidence_never_exceeds_one() {
    let director = director("Anna", "Andersson");
    assert!(director.compute_confidence() <= 1.0);
}
