use crate::support::{failure, reply, ScriptedGenerator};
use scholar_babel::{assemble_transcript, ReportOptions, ResearchMode, Role};
use scholar_genai::{ChatSession, Conversation, Precision, QUICK_ACTIONS, ERROR_TEXT};

fn conversation(
    replies: Vec<Result<scholar_genai::GeneratedText, scholar_genai::GenAiError>>,
) -> (
    Conversation<ScriptedGenerator>,
    std::sync::Arc<std::sync::Mutex<Vec<String>>>,
) {
    let generator = ScriptedGenerator::new(replies);
    let prompts = generator.prompts();
    (
        Conversation::new(generator, ChatSession::new("sys")),
        prompts,
    )
}

#[tokio::test]
async fn test_first_request_is_a_retrieval() {
    let (mut conv, prompts) = conversation(vec![reply("Five studies.")]);

    let turn = conv.ask("soil carbon").await.unwrap();
    assert_eq!(turn.mode, Some(ResearchMode::Retrieve));
    assert_eq!(turn.content, "Five studies.");

    assert_eq!(conv.topic(), Some("soil carbon"));
    assert!(conv.has_results());
    assert_eq!(conv.turns().len(), 2);
    assert_eq!(conv.turns()[0].role, Role::User);
    assert_eq!(conv.turns()[0].content, "soil carbon");

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].starts_with("Act as a senior researcher."));
    assert!(prompts[0].contains("about \"soil carbon\""));
    assert!(prompts[0].contains("(IF > 2.0)"));
}

#[tokio::test]
async fn test_follow_up_is_sent_verbatim() {
    let (mut conv, prompts) = conversation(vec![reply("a"), reply("b")]);
    conv.ask("soil carbon").await;

    let turn = conv.ask("Which used field trials?").await.unwrap();
    assert_eq!(turn.mode, None);
    assert_eq!(prompts.lock().unwrap()[1], "Which used field trials?");
    assert_eq!(conv.topic(), Some("soil carbon"));
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let (mut conv, prompts) = conversation(vec![]);
    assert!(conv.ask("   ").await.is_none());
    assert!(conv.turns().is_empty());
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quick_action_uses_canned_prompt_and_mode() {
    let (mut conv, prompts) = conversation(vec![reply("r"), reply("| a |\n| 1 |")]);
    conv.ask("soil carbon").await;

    let turn = conv.run_action(ResearchMode::Bibliometric).await.unwrap();
    assert_eq!(turn.mode, Some(ResearchMode::Bibliometric));

    let action = &QUICK_ACTIONS[3];
    assert_eq!(action.mode, ResearchMode::Bibliometric);
    assert_eq!(prompts.lock().unwrap()[1], action.prompt);
    assert_eq!(conv.turns()[2].content, action.prompt);
}

#[tokio::test]
async fn test_retrieve_has_no_quick_action() {
    let (mut conv, _) = conversation(vec![]);
    assert!(conv.run_action(ResearchMode::Retrieve).await.is_none());
    assert!(conv.turns().is_empty());
}

#[tokio::test]
async fn test_failure_appends_error_turn() {
    let (mut conv, prompts) = conversation(vec![failure(), reply("ok")]);

    let turn = conv.ask("soil carbon").await.unwrap();
    assert_eq!(turn.content, ERROR_TEXT);
    assert_eq!(turn.mode, None);
    assert_eq!(turn.sources, None);
    assert!(!conv.has_results());
    assert_eq!(conv.topic(), Some("soil carbon"));
    assert!(conv.session().is_empty());

    // still no results, so the next request is wrapped again
    let turn = conv.ask("soil carbon stocks").await.unwrap();
    assert_eq!(turn.mode, Some(ResearchMode::Retrieve));
    assert!(prompts.lock().unwrap()[1].contains("about \"soil carbon stocks\""));
}

#[tokio::test]
async fn test_precision_shapes_the_filter() {
    let (conv, prompts) = conversation(vec![reply("r")]);
    let mut conv = conv.with_precision(Precision::Ultra);
    conv.ask("coral bleaching").await;
    assert!(prompts.lock().unwrap()[0].contains("(IF > 5.0)"));
}

#[tokio::test]
async fn test_reset_starts_over() {
    let (conv, prompts) = conversation(vec![reply("a"), reply("b")]);
    let mut conv = conv.with_precision(Precision::Broad);
    conv.ask("first topic").await;
    let old_session = conv.session().id();

    conv.reset();
    assert!(conv.turns().is_empty());
    assert_eq!(conv.topic(), None);
    assert!(!conv.has_results());
    assert_eq!(conv.precision(), Precision::High);
    assert_ne!(conv.session().id(), old_session);
    assert_eq!(conv.session().system_instruction(), "sys");

    conv.ask("second topic").await;
    assert!(prompts.lock().unwrap()[1].contains("about \"second topic\""));
}

#[tokio::test]
async fn test_transcript_feeds_the_report() {
    let (mut conv, _) = conversation(vec![
        reply("**Finding:** warming raises emissions.\nSee https://doi.org/10.1/x"),
        reply("Gaps remain."),
    ]);
    conv.ask("soil carbon").await;
    conv.run_action(ResearchMode::Gaps).await;

    let transcript = conv.into_transcript();
    assert_eq!(transcript.topic.as_deref(), Some("soil carbon"));

    let doc = assemble_transcript(&transcript, None, &ReportOptions::default()).unwrap();
    let headings: Vec<String> = doc.headings().map(|h| h.text()).collect();
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
