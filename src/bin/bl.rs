//! Command-line interface for BL
//! This binary parses BL source files and prints them in different formats.
//!
//! Usage:
//!   bl parse `<path>` [--format `<format>`] [--config `<file>`] [--statement]  - Parse and print a program
//!            [--max-depth `<n>`] [--strict-closers] [--allow-primitive-redefinition]
//!   bl tokens `<path>`                                                   - Print the token stream
//!   bl list-formats                                                     - List all available formats
//!
//! `--verbose` (or `RUST_LOG`) turns on parser logging on stderr.

use bl_parser::bl::config::{BlConfig, Loader, ParserOverrides};
use bl_parser::bl::formats::FormatRegistry;
use bl_parser::bl::loader::{LoaderError, ProgramLoader};
use bl_parser::bl::token::{Token, TokenKind};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("bl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and inspecting BL programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a BL file and print it in the given format")
                .arg(
                    Arg::new("path")
                        .help("Path to the BL file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'bl', 'treeviz', 'json')"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML file layered over the default configuration"),
                )
                .arg(
                    Arg::new("statement")
                        .long("statement")
                        .help("Parse the file as a single statement instead of a program")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .help("Maximum number of nested IF/WHILE levels")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("strict-closers")
                        .long("strict-closers")
                        .help("Require END IF after IF and END WHILE after WHILE")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("allow-primitive-redefinition")
                        .long("allow-primitive-redefinition")
                        .help("Accept instructions named after primitives such as move")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens").about("Print the token stream of a BL file").arg(
                Arg::new("path")
                    .help("Path to the BL file")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("tokens", tokens_matches)) => {
            let path = required(tokens_matches, "path");
            handle_tokens_command(path);
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").is_ok();
    if !verbose && !rust_log {
        return;
    }
    let filter = if rust_log {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("bl_parser=debug")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    // clap enforces required positional arguments before we get here
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn parser_overrides(matches: &ArgMatches) -> ParserOverrides {
    let flag = |name: &str| matches.get_flag(name).then_some(true);
    ParserOverrides {
        max_nesting_depth: matches.get_one::<usize>("max-depth").copied(),
        strict_closers: flag("strict-closers"),
        allow_primitive_redefinition: flag("allow-primitive-redefinition"),
    }
}

fn load_config(matches: &ArgMatches) -> BlConfig {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .with_parser_overrides(&parser_overrides(matches))
        .and_then(Loader::build)
        .unwrap_or_else(|e| fail(format!("invalid configuration: {e}")))
}

fn load_source(path: &str) -> ProgramLoader {
    ProgramLoader::from_path(path).unwrap_or_else(|e| fail(e))
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let path = required(matches, "path");
    let config = load_config(matches);
    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.formatting.default_format.clone());

    let registry = FormatRegistry::with_config(&config.formatting);
    if !registry.has(&format) {
        fail(format!(
            "unknown format '{}' (available: {})",
            format,
            registry.list_formats().join(", ")
        ));
    }

    let loader = load_source(path).with_config(config.parser.clone());
    let output = if matches.get_flag("statement") {
        loader
            .parse_statement()
            .map(|statement| registry.serialize_block(&vec![statement].into(), &format))
    } else {
        loader
            .parse()
            .map(|program| registry.serialize(&program, &format))
    };

    match output {
        Ok(Ok(text)) => print!("{}", text),
        Ok(Err(e)) => fail(e),
        Err(LoaderError::Parse(e)) => {
            eprintln!("Error: {}: {}", path, e);
            eprint!("{}", loader.error_context(&e));
            process::exit(1);
        }
        Err(e) => fail(e),
    }
}

fn category(token: &Token) -> &'static str {
    match token.kind {
        TokenKind::Keyword(_) => "keyword",
        TokenKind::Condition(_) => "condition",
        TokenKind::Identifier => "identifier",
        TokenKind::EndOfInput => "end",
        TokenKind::Error => "error",
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let loader = load_source(path);
    for (index, token) in loader.tokenize().iter().enumerate() {
        println!(
            "{:>4}  {:<10}  {:<12}  {:?}",
            index,
            category(token),
            token.text,
            token.span
        );
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}
