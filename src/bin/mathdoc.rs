//! Command-line interface for mathdoc
//! This binary is used to inspect mathdoc files by converting them into text, tree or JSON form.
//!
//! Usage:
//!   mathdoc convert `<path>` [--format `<format>`]  - Parse a file and print it
//!   mathdoc check `<path>`                        - Parse a file and report warnings

use clap::{Arg, Command};
use mathdoc::parsing::Parser;
use mathdoc::ParserConfig;

fn main() {
    let matches = Command::new("mathdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting mathdoc markup files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Parse a mathdoc file and print the presentation tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the mathdoc file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text', 'tree' or 'json')")
                        .default_value("tree"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a mathdoc file and report diagnostics")
                .arg(
                    Arg::new("path")
                        .help("Path to the mathdoc file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let path = convert_matches.get_one::<String>("path").unwrap();
            let format = convert_matches.get_one::<String>("format").unwrap();
            handle_convert_command(path, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

fn parse_file(path: &str) -> mathdoc::ParseOutcome {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    Parser::new(ParserConfig::default())
        .parse_document(&source)
        .unwrap_or_else(|e| {
            eprintln!("Markup error: {}", e);
            std::process::exit(1);
        })
}

/// Handle the convert command
fn handle_convert_command(path: &str, format: &str) {
    let outcome = parse_file(path);
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
    match format {
        "text" => println!("{}", outcome.text()),
        "tree" => print!("{}", outcome.treeviz()),
        "json" => {
            let json = serde_json::to_string_pretty(&outcome).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Unknown format '{}'; expected 'text', 'tree' or 'json'", other);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let outcome = parse_file(path);
    if outcome.warnings.is_empty() {
        let nodes = outcome.tree.len();
        println!("ok: {} nodes", nodes);
    } else {
        for warning in &outcome.warnings {
            println!("warning: {}", warning);
        }
        std::process::exit(2);
    }
}
