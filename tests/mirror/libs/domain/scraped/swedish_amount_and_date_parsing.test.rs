// [tests/mirror/libs/domain/scraped/swedish_amount_and_date_parsing.test.rs]
use sentinel_domain_scraped::{parse_birth_date_dotted, parse_swedish_amount, parse_swedish_date};

#[test]
fn parses_dotted_birth_date() {
    let date = parse_birth_date_dotted("14.02.1980").expect("should parse");
    assert_eq!(date.to_string(), "1980-02-14");
}

#[test]
fn parse_swedish_date_dispatches_on_separator() {
    assert_eq!(parse_swedish_date("2020-01-15").unwrap().to_string(), "2020-01-15");
    assert_eq!(parse_swedish_date("15.01.2020").unwrap().to_string(), "2020-01-15");
    assert!(parse_swedish_date("").is_none());
}

#[test]
fn strips_non_breaking_space_and_converts_decimal_comma() {
    assert_eq!(parse_swedish_amount("1\u{a0}234"), Some(1234));
    assert_eq!(parse_swedish_amount("1 234,50"), Some(1234));
    assert_eq!(parse_swedish_amount("-500"), Some(-500));
}

#[test]
fn returns_none_on_unparseable_amount() {
    assert_eq!(parse_swedish_amount("not a number"), None);
    assert_eq!(parse_swedish_amount(""), None);
}
