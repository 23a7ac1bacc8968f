use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirrors the values accepted by src/main.rs; build scripts can't reach the crate's
// dependencies, so the lists are duplicated here.
const FORMATS: &[&str] = &["docx", "json", "treeviz"];
const ACTIONS: &[&str] = &[
    "methodology",
    "framework",
    "design_map",
    "bibliometric",
    "gaps",
];
const PRECISIONS: &[&str] = &["broad", "high", "ultra"];

fn transcript_arg() -> Arg {
    Arg::new("transcript")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("scholar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Research conversations compiled into IMRAD reports")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .arg(transcript_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("topic").long("topic"))
                .arg(Arg::new("section").long("section").action(ArgAction::Append)),
        )
        .subcommand(Command::new("inspect").arg(transcript_arg()))
        .subcommand(
            Command::new("research")
                .arg(Arg::new("topic").required(true).index(1))
                .arg(
                    Arg::new("action")
                        .long("action")
                        .action(ArgAction::Append)
                        .value_parser(clap::builder::PossibleValuesParser::new(ACTIONS)),
                )
                .arg(
                    Arg::new("precision")
                        .long("precision")
                        .value_parser(clap::builder::PossibleValuesParser::new(PRECISIONS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("save-transcript")
                        .long("transcript")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "scholar", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "scholar", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "scholar", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
