// [tests/mirror/libs/infra/adapters/discovery_file_loading.test.rs]
use sentinel_infra_adapters::{filter_unseen, load_from_json_file, load_from_text_file};
use std::collections::HashSet;
use std::io::Write;

#[test]
fn loads_bare_string_array() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"["5566778899", "556677-8800"]"#).unwrap();

    let loaded = load_from_json_file(file.path(), 0).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].orgnr.as_str(), "5566778899");
    assert_eq!(loaded[1].orgnr.as_str(), "5566778800");
}

#[test]
fn loads_tagged_object_array_with_priority() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"[{{"orgnr": "5566778899", "priority": 5}}]"#).unwrap();

    let loaded = load_from_json_file(file.path(), 0).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].priority, 5);
}

#[test]
fn skips_malformed_entries_without_failing_the_batch() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"["not-ten-digits", "5566778899"]"#).unwrap();

    let loaded = load_from_json_file(file.path(), 0).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].orgnr.as_str(), "5566778899");
}

#[test]
fn loads_newline_delimited_text_file_skipping_blanks_and_comments() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "# header comment").unwrap();
    writeln!(file, "5566778899").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "556677-8800").unwrap();

    let loaded = load_from_text_file(file.path(), 1).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|d| d.priority == 1));
}

#[test]
fn filter_unseen_excludes_known_orgnrs() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"["5566778899", "5566778800"]"#).unwrap();
    let loaded = load_from_json_file(file.path(), 0).unwrap();

    let mut known = HashSet::new();
    known.insert("5566778899".to_string());

    let remaining = filter_unseen(loaded, &known);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].orgnr.as_str(), "5566778800");
}
