// Command-line interface for ScholarSync
//
// This binary runs research conversations against Gemini and compiles their transcripts
// into IMRAD-ordered reports. The report pipeline lives in scholar-babel; this crate only
// reads transcripts, layers configuration and picks where output goes.
//
// Usage:
//  scholar export <transcript.json> [--to <format>] [-o <file>] [--topic <topic>] [--section <id>=<name>]...
//  scholar inspect <transcript.json>            - Outline of the report, plus chart block errors
//  scholar research <topic> [--action <mode>]... [--precision <level>] [-o <file>] [--transcript <file>]
//  scholar --list-formats                       - List available output formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  scholar export chat.json --extra-date 2025-03-07 --extra-margin 720

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use scholar_babel::common::chart::chart_errors;
use scholar_babel::ir::nodes::Document;
use scholar_babel::publish::{export_file_name, publish_with, PublishArtifact, PublishSpec};
use scholar_babel::{
    assemble_transcript, FormatRegistry, ResearchMode, Section, SectionAssignment, Transcript,
};
use scholar_config::{Loader, ScholarConfig, LOCAL_CONFIG_FILE};
use scholar_genai::{Conversation, GeminiClient, Precision};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FORMAT: &str = "docx";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

/// Parse `--section <turn id>=<section name>` values into an export selection.
fn parse_section_args(values: &[String]) -> Result<Vec<SectionAssignment>, String> {
    values
        .iter()
        .map(|value| {
            let (id, name) = value.split_once('=').ok_or_else(|| {
                format!("Invalid --section '{value}' (expected <turn id>=<section>)")
            })?;
            let (id, name) = (id.trim(), name.trim());
            if id.is_empty() || name.is_empty() {
                return Err(format!(
                    "Invalid --section '{value}' (turn id and section must be non-empty)"
                ));
            }
            Ok(SectionAssignment::new(id, Section::parse(name)))
        })
        .collect()
}

fn transcript_arg() -> Arg {
    Arg::new("transcript")
        .help("Path to a transcript JSON file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("scholar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Research conversations compiled into IMRAD reports")
        .long_about(
            "scholar drives literature-review conversations with Gemini and compiles\n\
            the resulting chat turns into a Word report ordered by IMRAD section.\n\n\
            Commands:\n  \
            - export:   Assemble a transcript into a report (docx, treeviz, json)\n  \
            - inspect:  Outline the report a transcript would produce\n  \
            - research: Run a live session and export it\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n\n\
            Examples:\n  \
            scholar export chat.json                       # Write <prefix>_Analysis_<topic>.docx\n  \
            scholar export chat.json --to treeviz          # Outline to stdout\n  \
            scholar research \"urban heat islands\" --action gaps",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a scholar.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .about("Assemble a transcript into a report")
                .long_about(
                    "Assemble the model turns of a transcript into a report.\n\n\
                    Without --section, the transcript's own selection is used, or every\n\
                    model turn in the section its mode maps to. Each --section replaces\n\
                    that selection with explicit assignments, in the order given.\n\n\
                    docx output defaults to <prefix>_Analysis_<topic>.docx in the current\n\
                    directory; text formats default to stdout.\n\n\
                    Extra Parameters (docx):\n  \
                    --extra-date YYYY-MM-DD     Footer date\n  \
                    --extra-margin <twips>      Page margin\n  \
                    --extra-prefix <text>       Header prefix\n  \
                    --extra-confidential-label <text>",
                )
                .arg(transcript_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (detected from -o, else docx)")
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg())
                .arg(
                    Arg::new("topic")
                        .long("topic")
                        .help("Topic printed on the report (overrides the transcript's)"),
                )
                .arg(
                    Arg::new("section")
                        .long("section")
                        .value_name("ID=NAME")
                        .help("Place a turn into a section (repeatable)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Outline the report a transcript would produce")
                .arg(transcript_arg()),
        )
        .subcommand(
            Command::new("research")
                .about("Run a research session and export it")
                .long_about(
                    "Runs a live session: the topic is sent as a retrieval request, then\n\
                    each --action in order. Every model turn is exported to docx.\n\n\
                    The API key is read from the environment variable named by\n\
                    genai.api_key_env (GEMINI_API_KEY by default).",
                )
                .arg(
                    Arg::new("topic")
                        .help("Research topic")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .help("Follow-up analysis (repeatable)")
                        .action(ArgAction::Append)
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "methodology",
                            "framework",
                            "design_map",
                            "bibliometric",
                            "gaps",
                        ])),
                )
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .help("Journal rank filter for the retrieval request")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "broad", "high", "ultra",
                        ])),
                )
                .arg(output_arg())
                .arg(
                    Arg::new("save-transcript")
                        .long("transcript")
                        .value_name("PATH")
                        .help("Also save the session transcript as JSON")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    let precision_override = matches
        .subcommand_matches("research")
        .and_then(|sub| sub.get_one::<String>("precision"))
        .map(|s| s.as_str());
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        precision_override,
    );

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("export", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("transcript")
                .expect("transcript is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            // --to wins, then the output extension, then docx
            let to = match sub_matches.get_one::<String>("to") {
                Some(to) => to.clone(),
                None => output
                    .and_then(|o| FormatRegistry::default().detect_format_from_filename(o))
                    .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            };
            let topic = sub_matches.get_one::<String>("topic").map(|s| s.as_str());
            let sections = many(sub_matches, "section");
            handle_export_command(path, &to, output, topic, &sections, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("transcript")
                .expect("transcript is required");
            handle_inspect_command(path, &config);
        }
        Some(("research", sub_matches)) => {
            let topic = sub_matches
                .get_one::<String>("topic")
                .expect("topic is required");
            let actions: Vec<ResearchMode> = many(sub_matches, "action")
                .iter()
                .filter_map(|tag| ResearchMode::from_tag(tag))
                .collect();
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let transcript_out = sub_matches
                .get_one::<String>("save-transcript")
                .map(|s| s.as_str());
            handle_research_command(
                topic,
                &actions,
                output,
                transcript_out,
                &extra_params,
                &config,
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Logs go to stderr so stdout stays clean for text output. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_cli_config(explicit_path: Option<&str>, precision: Option<&str>) -> ScholarConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match precision {
        Some(level) => loader.set_override("genai.precision", level),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn read_transcript(path: &str) -> Transcript {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    Transcript::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Invalid transcript '{path}': {e}");
        std::process::exit(1);
    })
}

fn assemble_or_exit(
    transcript: &Transcript,
    topic: Option<&str>,
    config: &ScholarConfig,
) -> Document {
    assemble_transcript(transcript, topic, &config.report_options()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Handle the export command
fn handle_export_command(
    path: &str,
    to: &str,
    output: Option<&str>,
    topic: Option<&str>,
    sections: &[String],
    extra_params: &HashMap<String, String>,
    config: &ScholarConfig,
) {
    let registry = FormatRegistry::with_docx_options(config.docx_options());
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut transcript = read_transcript(path);
    if !sections.is_empty() {
        let assignments = parse_section_args(sections).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        transcript.selections = Some(assignments);
    }

    let doc = assemble_or_exit(&transcript, topic, config);
    let output = output.map(PathBuf::from).or_else(|| {
        (to == DEFAULT_FORMAT).then(|| default_report_path(&doc, extra_params, config))
    });
    publish_document(&registry, &doc, to, output, extra_params);
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, config: &ScholarConfig) {
    let transcript = read_transcript(path);
    let doc = assemble_or_exit(&transcript, None, config);

    let registry = FormatRegistry::with_docx_options(config.docx_options());
    let outline = registry.serialize(&doc, "treeviz").unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    print!("{outline}");

    let errors = chart_errors(&doc);
    if !errors.is_empty() {
        println!("\nChart blocks kept as data ({}):", errors.len());
        for err in errors {
            println!("  - {err}");
        }
    }
}

/// Handle the research command
fn handle_research_command(
    topic: &str,
    actions: &[ResearchMode],
    output: Option<&str>,
    transcript_out: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &ScholarConfig,
) {
    let client = GeminiClient::from_env(&config.genai.api_key_env, config.client_settings())
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to start async runtime: {e}");
        std::process::exit(1);
    });
    let transcript = runtime
        .block_on(run_session(client, topic, actions, config.genai.precision))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    if let Some(path) = transcript_out {
        let json = transcript.to_json().unwrap_or_else(|e| {
            eprintln!("Error serializing transcript: {e}");
            std::process::exit(1);
        });
        fs::write(path, json).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        });
    }

    let doc = assemble_or_exit(&transcript, None, config);
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_report_path(&doc, extra_params, config));
    let registry = FormatRegistry::with_docx_options(config.docx_options());
    publish_document(&registry, &doc, DEFAULT_FORMAT, Some(output), extra_params);
}

async fn run_session(
    client: GeminiClient,
    topic: &str,
    actions: &[ResearchMode],
    precision: Precision,
) -> Result<Transcript, String> {
    let session = client.create_session();
    let mut conversation = Conversation::new(client, session).with_precision(precision);

    conversation.ask(topic).await;
    if !conversation.has_results() {
        return Err(format!("retrieval for \"{topic}\" failed; nothing to export"));
    }

    for mode in actions {
        if let Some(turn) = conversation.run_action(*mode).await {
            info!(mode = %mode, chars = turn.content.len(), "analysis completed");
        }
    }

    Ok(conversation.into_transcript())
}

fn default_report_path(
    doc: &Document,
    extra_params: &HashMap<String, String>,
    config: &ScholarConfig,
) -> PathBuf {
    let prefix = extra_params.get("prefix").unwrap_or(&config.report.prefix);
    PathBuf::from(export_file_name(prefix, &doc.topic, DEFAULT_FORMAT))
}

fn publish_document(
    registry: &FormatRegistry,
    doc: &Document,
    format: &str,
    output: Option<PathBuf>,
    extra_params: &HashMap<String, String>,
) {
    let mut spec = PublishSpec::new(doc, format);
    if let Some(path) = &output {
        spec = spec.with_output_path(path);
    }
    for (key, value) in extra_params {
        spec = spec.with_option(key.clone(), value.clone());
    }

    match publish_with(registry, spec) {
        Ok(result) => match result.artifact {
            PublishArtifact::InMemory(text) => print!("{text}"),
            PublishArtifact::File(path) => println!("Report written to {}", path.display()),
        },
        Err(err) => {
            error!(format, "export failed: {err}");
            eprintln!("Export error: {err}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &ScholarConfig) {
    println!("Available formats:\n");
    let registry = FormatRegistry::with_docx_options(config.docx_options());
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|format| format.description().to_string())
            .unwrap_or_default();
        println!("  {name:<10} {description}");
    }
}
