use super::model_turn;
use scholar_babel::assembler::{
    assemble, default_selections, ReportOptions, REFERENCES_HEADING, SUMMARY_HEADING,
};
use scholar_babel::common::inline::parse_inline;
use scholar_babel::ir::nodes::{Alignment, DocNode, Document, HeadingLevel, TextRun};
use scholar_babel::model::ResearchMode;

fn section_headings(doc: &Document) -> Vec<String> {
    doc.headings()
        .filter(|h| h.level == HeadingLevel::Section)
        .map(|h| h.text())
        .collect()
}

#[test]
fn test_bold_lead_in_splits_into_two_runs() {
    assert_eq!(
        parse_inline("**Finding:** Citations rose 20% in Q1 journals."),
        vec![
            TextRun::bold("Finding:"),
            TextRun::plain(" Citations rose 20% in Q1 journals."),
        ]
    );
}

#[test]
fn test_sections_follow_imrad_order() {
    let turns = vec![
        model_turn("g", "Gaps text", Some(ResearchMode::Gaps)),
        model_turn("b", "Bibliometric text", Some(ResearchMode::Bibliometric)),
        model_turn("m", "Methodology text", Some(ResearchMode::Methodology)),
    ];
    let doc = assemble(
        "Topic",
        "",
        &default_selections(&turns),
        &ReportOptions::default(),
    );
    assert_eq!(section_headings(&doc), vec!["METHODS", "RESULTS", "DISCUSSION"]);
}

#[test]
fn test_table_in_turn_becomes_one_table() {
    let turns = vec![model_turn(
        "t",
        "| Year | Count |\n|---|---|\n| 2020 | 45 |",
        Some(ResearchMode::Bibliometric),
    )];
    let doc = assemble("Topic", "", &default_selections(&turns), &ReportOptions::default());
    let tables: Vec<_> = doc.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].rows.len(), 2);
    assert!(tables[0].rows[0].header);
    assert_eq!(tables[0].rows[0].cells, vec!["Year", "Count"]);
    assert!(!tables[0].rows[1].header);
}

#[test]
fn test_no_sources_means_no_references() {
    let turns = vec![model_turn("a", "Text", Some(ResearchMode::Retrieve))];
    let doc = assemble("Topic", "", &default_selections(&turns), &ReportOptions::default());
    assert!(!section_headings(&doc).contains(&REFERENCES_HEADING.to_string()));
    assert_eq!(doc.references().count(), 0);
}

#[test]
fn test_empty_abstract_means_no_summary() {
    let turns = vec![model_turn("a", "Text", Some(ResearchMode::Retrieve))];
    let doc = assemble("Topic", "", &default_selections(&turns), &ReportOptions::default());
    assert!(!section_headings(&doc).contains(&SUMMARY_HEADING.to_string()));

    let doc = assemble(
        "Topic",
        "A summary.",
        &default_selections(&turns),
        &ReportOptions::default(),
    );
    assert_eq!(section_headings(&doc)[0], SUMMARY_HEADING);
}

#[test]
fn test_front_matter() {
    let doc = assemble("urban heat", "", &[], &ReportOptions::default());
    assert_eq!(doc.topic, "urban heat");
    assert_eq!(doc.children.len(), 2);
    match &doc.children[0] {
        DocNode::Title(title) => assert_eq!(title.text, "ScholarSync Academic Analysis Report"),
        other => panic!("expected title, got {other:?}"),
    }
    match &doc.children[1] {
        DocNode::Paragraph(para) => {
            assert_eq!(para.alignment, Alignment::Center);
            assert_eq!(para.content[0], TextRun::bold("URBAN HEAT"));
            assert!(para.content[1].italic);
            assert!(para.content[1].line_break);
            assert_eq!(
                para.content[1].text,
                "Subject Area: Systemic Review & Academic Synthesis"
            );
        }
        other => panic!("expected topic paragraph, got {other:?}"),
    }
}

#[test]
fn test_empty_topic_uses_default() {
    let doc = assemble("   ", "", &[], &ReportOptions::default());
    assert_eq!(doc.topic, "Research Analysis");
}

#[test]
fn test_references_numbered_from_one() {
    let mut first = model_turn("a", "Text", Some(ResearchMode::Retrieve));
    first.sources = Some(vec!["https://x.org/1".into(), "https://x.org/2".into()]);
    let mut second = model_turn("b", "More", Some(ResearchMode::Gaps));
    second.sources = Some(vec!["https://x.org/2".into(), "https://x.org/3".into()]);
    let turns = vec![first, second];

    let doc = assemble("Topic", "", &default_selections(&turns), &ReportOptions::default());
    let refs: Vec<_> = doc.references().map(|r| (r.index, r.uri.as_str())).collect();
    assert_eq!(
        refs,
        vec![
            (1, "https://x.org/1"),
            (2, "https://x.org/2"),
            (3, "https://x.org/3"),
        ]
    );
    assert_eq!(
        section_headings(&doc).last().map(String::as_str),
        Some(REFERENCES_HEADING)
    );
}

#[test]
fn test_turn_content_maps_to_nodes() {
    let content = "### Study design\n- **Sample:** 120 cities\nClosing remark.\n```mermaid\ngraph TD\nA-->B\n```";
    let turns = vec![model_turn("a", content, Some(ResearchMode::Methodology))];
    let doc = assemble("Topic", "", &default_selections(&turns), &ReportOptions::default());

    // title, topic, METHODS heading, then the four content nodes
    let body = &doc.children[3..];
    assert_eq!(body.len(), 4);
    match &body[0] {
        DocNode::Heading(h) => {
            assert_eq!(h.level, HeadingLevel::SubHeading);
            assert_eq!(h.text(), "Study design");
        }
        other => panic!("expected heading, got {other:?}"),
    }
    match &body[1] {
        DocNode::Paragraph(p) => {
            assert!(p.bullet);
            assert_eq!(p.content[0], TextRun::bold("Sample:"));
        }
        other => panic!("expected bullet, got {other:?}"),
    }
    match &body[3] {
        DocNode::CodeBlock(block) => {
            assert!(block.diagram);
            assert_eq!(block.content, "graph TD\nA-->B");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}
