//! Command-line interface for gxml
//! This binary converts, checks and inspects gxml documents.
//!
//! Usage:
//!   gxml convert `<path>` [--from `<format>`] [--to `<format>`]  - Convert between formats
//!   gxml check `<path>`                                        - Parse, re-serialize and compare
//!   gxml tokens `<path>` [--json]                              - Dump the scanner's token stream
//!   gxml formats                                             - List available formats
//!
//! A path of `-` reads standard input. Settings come from the built-in defaults, then
//! `gxml.toml` in the working directory, then `--config <file>`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use gxml_babel::formats::JsonFormat;
use gxml_babel::FormatRegistry;
use gxml_config::{GxmlConfig, Loader, LOCAL_CONFIG_FILE};
use gxml_parser::gxml::scanning::tokenize;
use gxml_parser::{parse, to_gxml};
use std::io::Read;
use std::path::Path;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the input file, or '-' for stdin")
        .required(true)
        .index(1)
}

fn cli() -> Command {
    Command::new("gxml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and checking gxml documents")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults and ./gxml.toml"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr (RUST_LOG takes precedence)"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document between formats")
                .arg(path_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .short('f')
                        .help("Input format (default: from the file extension, else gxml)"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Output format (default: convert.default_output)"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a gxml document and verify it serializes back stably")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a gxml document")
                .arg(path_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the tokens as a JSON array"),
                ),
        )
        .subcommand(Command::new("formats").about("List available formats"))
}

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("convert", sub)) => handle_convert_command(sub, &config),
        Some(("check", sub)) => handle_check_command(sub, &config),
        Some(("tokens", sub)) => handle_tokens_command(sub, &config),
        Some(("formats", _)) => handle_formats_command(&config),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(explicit: Option<&String>) -> GxmlConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = explicit {
        log::debug!("loading configuration from {}", path);
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("invalid configuration: {}", e)))
}

fn registry(config: &GxmlConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    if !config.convert.pretty {
        registry.register(JsonFormat::compact());
    }
    registry
}

fn read_input(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| fail(format!("cannot read {}: {}", path, e)))
}

fn required_path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_else(|| fail("missing input path"))
}

fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &GxmlConfig) {
    let path = required_path(matches);
    let registry = registry(config);

    let from = match matches.get_one::<String>("from") {
        Some(name) => name.clone(),
        None if path == "-" => "gxml".to_string(),
        None => registry
            .detect(Path::new(path))
            .unwrap_or("gxml")
            .to_string(),
    };
    let to = matches
        .get_one::<String>("to")
        .cloned()
        .unwrap_or_else(|| config.convert.default_output.clone());
    log::debug!("converting {} from {} to {}", path, from, to);

    let source = read_input(path);
    let output = registry
        .convert(&source, &from, &to)
        .unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    print_text(&output);
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches, config: &GxmlConfig) {
    let path = required_path(matches);
    let source = read_input(path);

    let value = parse(&source).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
    let first = to_gxml(&value);

    if config.check.second_generation {
        let reparsed = parse(&first).unwrap_or_else(|e| {
            fail(format!("{}: serialized output does not parse: {}", path, e))
        });
        if reparsed != value {
            fail(format!("{}: value changed after a round trip", path));
        }
        let second = to_gxml(&reparsed);
        if second != first {
            fail(format!("{}: second generation differs from the first", path));
        }
    }

    println!(
        "ok: {} ({}, {} children, depth {})",
        path,
        value.kind_name(),
        value.len(),
        value.depth()
    );
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches, config: &GxmlConfig) {
    let path = required_path(matches);
    let source = read_input(path);
    let tokens = tokenize(&source);

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&tokens)
            .unwrap_or_else(|e| fail(format!("Error formatting tokens: {}", e)));
        println!("{}", json);
        return;
    }

    for token in tokens {
        if config.tokens.show_positions {
            println!("{}\t{}", token.position, token);
        } else {
            println!("{}", token);
        }
    }
}

/// Handle the formats command
fn handle_formats_command(config: &GxmlConfig) {
    let registry = registry(config);
    println!("Available formats:\n");

    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        println!("  {:<8} {:<7} {}", name, direction, format.description());
    }
}
