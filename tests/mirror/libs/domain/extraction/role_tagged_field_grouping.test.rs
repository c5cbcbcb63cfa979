// [tests/mirror/libs/domain/extraction/role_tagged_field_grouping.test.rs]
use sentinel_domain_extraction::DocumentExtractor;
use sentinel_domain_models::{ExtractionMethod, NormalizedRole, OrgNumber};
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn annual_report_zip(xhtml_body: &str) -> Vec<u8> {
    let markup = format!(
        r#"<html xmlns:ix="http://www.xbrl.org/2008/inlineXBRL"><body>{xhtml_body}</body></html>"#
    );
    let mut archive = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut archive));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("arsredovisning.xhtml", options).unwrap();
        zip.write_all(markup.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    archive
}

#[test]
fn pairs_first_name_last_name_and_role_by_position() {
    let body = r#"
        <ix:nonNumeric name="se-gen-base:ForetradareTilltalsnamn1">Anna</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareEfternamn1">Karlsson</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:Foretradarroll1">Styrelseordförande</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareTilltalsnamn2">Bo</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareEfternamn2">Bengtsson</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:Foretradarroll2">Verkställande direktör</ix:nonNumeric>
    "#;
    let blob = annual_report_zip(body);
    let orgnr = OrgNumber::parse("5560000070").unwrap();

    let result = DocumentExtractor::default().extract(&orgnr, "doc-1", &blob);

    assert_eq!(result.method, ExtractionMethod::TaggedFields);
    assert_eq!(result.directors.len(), 2);
    assert_eq!(result.directors[0].full_name(), "Anna Karlsson");
    assert_eq!(result.directors[0].normalized_role, NormalizedRole::BoardChair);
    assert_eq!(result.directors[1].full_name(), "Bo Bengtsson");
    assert_eq!(result.directors[1].normalized_role, NormalizedRole::Ceo);
}

#[test]
fn auditor_family_roles_are_excluded_from_the_director_list() {
    let body = r#"
        <ix:nonNumeric name="se-gen-base:ForetradareTilltalsnamn1">Anna</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareEfternamn1">Karlsson</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:Foretradarroll1">Styrelseordförande</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareTilltalsnamn2">Eva</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:ForetradareEfternamn2">Eriksson</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:Foretradarroll2">Revisor</ix:nonNumeric>
    "#;
    let blob = annual_report_zip(body);
    let orgnr = OrgNumber::parse("5560000071").unwrap();

    let result = DocumentExtractor::default().extract(&orgnr, "doc-1", &blob);

    assert_eq!(result.directors.len(), 1);
    assert_eq!(result.directors[0].full_name(), "Anna Karlsson");
}

#[test]
fn a_field_with_no_first_name_pairing_is_dropped() {
    let body = r#"
        <ix:nonNumeric name="se-gen-base:ForetradareEfternamn1">Karlsson</ix:nonNumeric>
        <ix:nonNumeric name="se-gen-base:Foretradarroll1">Styrelseledamot</ix:nonNumeric>
    "#;
    let blob = annual_report_zip(body);
    let orgnr = OrgNumber::parse("5560000072").unwrap();

    let result = DocumentExtractor::default().extract(&orgnr, "doc-1", &blob);

    assert!(result.directors.is_empty());
}

#[test]
fn a_document_with_no_markup_or_pdf_produces_a_warning_and_zero_confidence() {
    let mut archive = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut archive));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("readme.txt", options).unwrap();
        zip.write_all(b"no markup here").unwrap();
        zip.finish().unwrap();
    }
    let orgnr = OrgNumber::parse("5560000073").unwrap();

    let result = DocumentExtractor::default().extract(&orgnr, "doc-1", &archive);

    assert!(result.directors.is_empty());
    assert_eq!(result.overall_confidence, 0.0);
    assert!(!result.warnings.is_empty());
}
