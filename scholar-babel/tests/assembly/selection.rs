use super::model_turn;
use scholar_babel::assembler::{assemble, resolve_selections, ReportOptions};
use scholar_babel::ir::nodes::{DocNode, HeadingLevel};
use scholar_babel::model::{ChatTurn, ResearchMode, SectionAssignment, Transcript};
use scholar_babel::{assemble_transcript, AssemblyError, Section};

const TRANSCRIPT: &str = r#"{
  "topic": "Urban heat islands",
  "turns": [
    {"id": "u1", "role": "user", "content": "Find studies"},
    {"id": "m1", "role": "model", "mode": "retreive",
     "content": "**Top studies**\nStudy one.\nStudy two.\nStudy three.",
     "sources": ["https://doi.org/10.1/a"]},
    {"id": "m2", "role": "model", "mode": "gaps", "content": "Few longitudinal designs."}
  ]
}"#;

fn section_headings(turns: &[ChatTurn], assignments: &[SectionAssignment]) -> Vec<String> {
    let selections = resolve_selections(turns, assignments).unwrap();
    assemble("t", "", &selections, &ReportOptions::default())
        .headings()
        .filter(|h| h.level == HeadingLevel::Section)
        .map(|h| h.text())
        .collect()
}

#[test]
fn test_custom_sections_follow_canonical_ones() {
    let turns = vec![
        model_turn("a", "A", None),
        model_turn("b", "B", None),
        model_turn("c", "C", None),
        model_turn("d", "D", None),
    ];
    let assignments = vec![
        SectionAssignment::new("a", Section::Uncategorized),
        SectionAssignment::new("b", Section::parse("Policy Notes")),
        SectionAssignment::new("c", Section::Conclusion),
        SectionAssignment::new("d", Section::parse("Appendix")),
    ];
    assert_eq!(
        section_headings(&turns, &assignments),
        vec!["CONCLUSION", "POLICY NOTES", "APPENDIX", "UNCATEGORIZED"]
    );
}

#[test]
fn test_each_section_heading_appears_once() {
    let turns = vec![
        model_turn("a", "A", Some(ResearchMode::Bibliometric)),
        model_turn("b", "B", Some(ResearchMode::DesignMap)),
    ];
    let assignments = vec![
        SectionAssignment::new("a", Section::Results),
        SectionAssignment::new("b", Section::Results),
    ];
    assert_eq!(section_headings(&turns, &assignments), vec!["RESULTS"]);
}

#[test]
fn test_reassigned_turn_keeps_last_section() {
    let turns = vec![
        model_turn("a", "Alpha content", None),
        model_turn("b", "B", None),
    ];
    let assignments = vec![
        SectionAssignment::new("a", Section::Methods),
        SectionAssignment::new("b", Section::Discussion),
        SectionAssignment::new("a", Section::Results),
    ];

    let selections = resolve_selections(&turns, &assignments).unwrap();
    let resolved: Vec<(&str, Section)> = selections
        .iter()
        .map(|s| (s.turn.id.as_str(), s.section.clone()))
        .collect();
    assert_eq!(
        resolved,
        vec![("a", Section::Results), ("b", Section::Discussion)]
    );

    assert_eq!(
        section_headings(&turns, &assignments),
        vec!["RESULTS", "DISCUSSION"]
    );
    let doc = assemble("t", "", &selections, &ReportOptions::default());
    let copies = doc
        .children
        .iter()
        .filter(|node| matches!(node, DocNode::Paragraph(p) if p.text() == "Alpha content"))
        .count();
    assert_eq!(copies, 1);
}

#[test]
fn test_unknown_turn_is_rejected() {
    let turns = vec![model_turn("a", "A", None)];
    let result = resolve_selections(&turns, &[SectionAssignment::new("zz", Section::Methods)]);
    assert_eq!(result.unwrap_err(), AssemblyError::UnknownTurn("zz".to_string()));
}

#[test]
fn test_transcript_defaults() {
    let transcript = Transcript::from_json(TRANSCRIPT).unwrap();
    let doc = assemble_transcript(&transcript, None, &ReportOptions::default()).unwrap();

    assert_eq!(doc.topic, "Urban heat islands");
    let headings: Vec<String> = doc
        .headings()
        .filter(|h| h.level == HeadingLevel::Section)
        .map(|h| h.text())
        .collect();
    assert_eq!(
        headings,
        vec![
            "EXECUTIVE SUMMARY",
            "INTRODUCTION",
            "DISCUSSION",
            "CITED REFERENCES"
        ]
    );
    assert_eq!(doc.references().count(), 1);
}

#[test]
fn test_transcript_selection_and_topic_override() {
    let mut transcript = Transcript::from_json(TRANSCRIPT).unwrap();
    transcript.selections = Some(vec![SectionAssignment::new("m2", Section::Conclusion)]);

    let doc =
        assemble_transcript(&transcript, Some("Cooling"), &ReportOptions::default()).unwrap();
    assert_eq!(doc.topic, "Cooling");
    // the abstract still comes from the retrieval turn, selected or not
    let headings: Vec<String> = doc
        .headings()
        .filter(|h| h.level == HeadingLevel::Section)
        .map(|h| h.text())
        .collect();
    assert_eq!(headings, vec!["EXECUTIVE SUMMARY", "CONCLUSION"]);
    assert_eq!(doc.references().count(), 0);
}

#[test]
fn test_transcript_unknown_selection() {
    let mut transcript = Transcript::from_json(TRANSCRIPT).unwrap();
    transcript.selections = Some(vec![SectionAssignment::new("missing", Section::Methods)]);
    assert!(assemble_transcript(&transcript, None, &ReportOptions::default()).is_err());
}
