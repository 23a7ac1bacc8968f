use chrono::NaiveDate;
use scholar_babel::assembler::{assemble, default_selections, ReportOptions};
use scholar_babel::formats::docx::{write_package, DocxOptions};
use scholar_babel::ir::nodes::Document;
use scholar_babel::model::{ChatTurn, ResearchMode};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const PARTS: [&str; 8] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "word/document.xml",
    "word/styles.xml",
    "word/numbering.xml",
    "word/header1.xml",
    "word/footer1.xml",
    "word/_rels/document.xml.rels",
];

fn sample_report() -> Document {
    let retrieval = ChatTurn::model(
        "**Key Studies**\n- **Smith (2021):** heat & <health> outcomes\n| Year | Count |\n|---|---|\n| 2020 | 45 |",
        Some(ResearchMode::Retrieve),
        Some(vec![
            "https://doi.org/10.1000/xyz".to_string(),
            "https://example.org/paper?id=1&v=2".to_string(),
        ]),
    );
    let design = ChatTurn::model(
        "```mermaid\ngraph TD\nA[\"Input\"] --> B\n```\n```json-chart\n{ broken\n```",
        Some(ResearchMode::DesignMap),
        None,
    );
    let turns = vec![retrieval, design];
    assemble(
        "Urban heat",
        "Key studies on urban heat.",
        &default_selections(&turns),
        &ReportOptions::default(),
    )
}

fn dated_options() -> DocxOptions {
    DocxOptions {
        generated_on: NaiveDate::from_ymd_opt(2025, 3, 7),
        ..DocxOptions::default()
    }
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut part = archive.by_name(name).expect("part present");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("utf-8 part");
    xml
}

#[test]
fn test_package_contains_all_parts() {
    let bytes = write_package(&sample_report(), &dated_options()).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    let mut expected = PARTS.to_vec();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[test]
fn test_every_part_is_well_formed() {
    let bytes = write_package(&sample_report(), &dated_options()).unwrap();
    for name in PARTS {
        let xml = read_part(&bytes, name);
        roxmltree::Document::parse(&xml)
            .unwrap_or_else(|err| panic!("{name} is not well-formed: {err}"));
    }
}

#[test]
fn test_body_text_and_structure() {
    let bytes = write_package(&sample_report(), &dated_options()).unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let text: String = doc
        .descendants()
        .filter(|n| n.has_tag_name("t"))
        .filter_map(|n| n.text())
        .collect();
    assert!(text.contains("ScholarSync Academic Analysis Report"));
    assert!(text.contains("URBAN HEAT"));
    assert!(text.contains("EXECUTIVE SUMMARY"));
    assert!(text.contains("INTRODUCTION"));
    assert!(text.contains("heat & <health> outcomes"));
    assert!(text.contains("Visual Model Specification:"));
    assert!(text.contains("Source Code/Data:"));
    assert!(text.contains("{ broken"));
    assert!(text.contains("CITED REFERENCES"));
    assert!(text.contains("[2] "));

    // one data table plus one box per fenced block
    assert_eq!(doc.descendants().filter(|n| n.has_tag_name("tbl")).count(), 3);
    assert_eq!(
        doc.descendants()
            .filter(|n| n.has_tag_name("hyperlink"))
            .count(),
        2
    );
    let margins = doc
        .descendants()
        .find(|n| n.has_tag_name("pgMar"))
        .expect("page margins");
    assert_eq!(
        margins.attribute(("http://schemas.openxmlformats.org/wordprocessingml/2006/main", "top")),
        Some("1440")
    );
}

#[test]
fn test_hyperlinks_resolve_to_relationships() {
    let bytes = write_package(&sample_report(), &dated_options()).unwrap();
    let rels_xml = read_part(&bytes, "word/_rels/document.xml.rels");
    let rels = roxmltree::Document::parse(&rels_xml).unwrap();
    let targets: Vec<(&str, &str)> = rels
        .descendants()
        .filter(|n| n.has_tag_name("Relationship"))
        .filter(|n| n.attribute("TargetMode") == Some("External"))
        .map(|n| (n.attribute("Id").unwrap(), n.attribute("Target").unwrap()))
        .collect();
    assert_eq!(
        targets,
        vec![
            ("rId5", "https://doi.org/10.1000/xyz"),
            ("rId6", "https://example.org/paper?id=1&v=2"),
        ]
    );
}

#[test]
fn test_running_header_and_footer() {
    let options = DocxOptions {
        prefix: "Lab".to_string(),
        ..dated_options()
    };
    let bytes = write_package(&sample_report(), &options).unwrap();

    let header = read_part(&bytes, "word/header1.xml");
    assert!(header.contains("Lab | Urban heat | Confidential Research Analysis"));

    let footer = read_part(&bytes, "word/footer1.xml");
    assert!(footer.contains("Analysis Generated on March 7, 2025 | Page "));
    assert!(footer.contains("NUMPAGES"));
}

#[test]
fn test_margins_follow_options() {
    let options = DocxOptions {
        margin_twips: 720,
        ..dated_options()
    };
    let bytes = write_package(&Document::default(), &options).unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"w:left="720""#));
}
