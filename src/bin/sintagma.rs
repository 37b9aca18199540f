//! Command-line interface for sintagma
//!
//! Usage:
//!   sintagma analyze `<sentence>` [--format `<format>`]   - Full analysis of one sentence
//!   sintagma table                                       - FIRST/FOLLOW sets and prediction table
//!   sintagma simulate `<automaton>` `<input>`              - Run a built-in automaton step by step
//!   sintagma stem `<word>`...                              - Stem words
//!   sintagma formats                                     - List output formats
//!
//! Global options: `--config <FILE>` layers a TOML file over the defaults,
//! `--set key=value` overrides single keys, `--verbose` enables debug logs.
//!
//! Exit codes: 0 on success, 1 on configuration or construction errors, 2 when
//! the sentence (or automaton input) is rejected.

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use sintagma::automata::builtin;
use sintagma::config::Loader;
use sintagma::error::ConfigError;
use sintagma::formats::FormatRegistry;
use sintagma::semantic::stem;
use sintagma::{Analyzer, SintagmaConfig};

const EXIT_REJECTED: u8 = 2;

fn cli() -> Command {
    Command::new("sintagma")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Automata, LL(1) parsing and derivation trees for Spanish sentences")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .help("TOML file layered over the built-in configuration"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .global(true)
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Override a single configuration key, e.g. grammar.conflict_policy=reject"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("analyze")
                .about("Classify, parse and match one sentence")
                .arg(Arg::new("sentence").required(true).index(1))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (default: output.format from the configuration)"),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Print FIRST/FOLLOW sets, the prediction table and conflicts"),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run a built-in automaton over an input")
                .arg(
                    Arg::new("automaton")
                        .required(true)
                        .index(1)
                        .value_parser(builtin::NAMES),
                )
                .arg(Arg::new("input").required(true).index(2)),
        )
        .subcommand(
            Command::new("stem")
                .about("Print the stem of each word")
                .arg(Arg::new("words").required(true).num_args(1..).index(1)),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> sintagma::Result<ExitCode> {
    match matches.subcommand() {
        Some(("analyze", sub)) => handle_analyze_command(matches, sub),
        Some(("table", _)) => handle_table_command(matches),
        Some(("simulate", sub)) => handle_simulate_command(sub),
        Some(("stem", sub)) => Ok(handle_stem_command(sub)),
        Some(("formats", _)) => Ok(handle_formats_command()),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<SintagmaConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(overrides) = matches.get_many::<String>("set") {
        for pair in overrides {
            let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
            loader = loader.set_override(key.trim(), value.trim())?;
        }
    }
    loader.build()
}

fn handle_analyze_command(matches: &ArgMatches, sub: &ArgMatches) -> sintagma::Result<ExitCode> {
    let config = load_config(matches)?;
    let format = sub
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.output.format.clone());

    let registry = FormatRegistry::with_defaults();
    // fail before doing any work
    if !registry.has(&format) {
        return Err(sintagma::formats::FormatError::FormatNotFound(format).into());
    }

    let analyzer = Analyzer::from_config(&config)?;
    let sentence = sub
        .get_one::<String>("sentence")
        .map(String::as_str)
        .unwrap_or_default();
    let analysis = analyzer.analyze(sentence);

    let rendered = registry.serialize(&analysis, &format)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    if analysis.accepted() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_REJECTED))
    }
}

fn handle_table_command(matches: &ArgMatches) -> sintagma::Result<ExitCode> {
    let config = load_config(matches)?;
    let analyzer = Analyzer::from_config(&config)?;
    let table = analyzer.table();
    let grammar = table.grammar();
    let sets = table.sets();

    println!("grammar (start {}):", grammar.start());
    for production in grammar.productions() {
        println!("  {production}");
    }

    println!();
    println!("sets:");
    let width = grammar
        .nonterminals()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);
    for nonterminal in grammar.nonterminals() {
        let first = sets
            .first(nonterminal)
            .map(ToString::to_string)
            .unwrap_or_default();
        let follow = sets
            .follow(nonterminal)
            .map(|set| {
                set.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("  {nonterminal:<width$}  FIRST {first}  FOLLOW {{{follow}}}");
    }

    println!();
    println!("table:");
    for (nonterminal, lookahead, productions) in table.entries() {
        let bodies: Vec<String> = productions.iter().map(|p| p.body_text()).collect();
        println!("  [{nonterminal}, {lookahead}] → {}", bodies.join(" | "));
    }

    println!();
    let conflicts = table.conflicts();
    if conflicts.is_empty() {
        println!("conflicts: none (grammar is LL(1))");
    } else {
        println!("conflicts ({}, policy {:?}):", conflicts.len(), table.policy());
        for conflict in &conflicts {
            println!("  {conflict}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_simulate_command(sub: &ArgMatches) -> sintagma::Result<ExitCode> {
    let name = sub
        .get_one::<String>("automaton")
        .map(String::as_str)
        .unwrap_or_default();
    let input = sub
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or_default();
    let Some(automaton) = builtin::by_name(name) else {
        unreachable!("clap restricts the automaton name");
    };
    let automaton = automaton?;

    let simulation = automaton.simulate(input);
    println!("{}: {}", automaton.name(), automaton.description());
    for (i, step) in simulation.steps.iter().enumerate() {
        println!("  {:>3}  {} --{}--> {}", i + 1, step.state, step.symbol, step.next);
    }
    match &simulation.error {
        None => {
            println!("accepted");
            Ok(ExitCode::SUCCESS)
        }
        Some(error) => {
            println!("rejected: {error}");
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}

fn handle_stem_command(sub: &ArgMatches) -> ExitCode {
    if let Some(words) = sub.get_many::<String>("words") {
        for word in words {
            println!("{word} → {}", stem(word));
        }
    }
    ExitCode::SUCCESS
}

fn handle_formats_command() -> ExitCode {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {name}");
            println!("    {}", formatter.description());
            println!();
        }
    }
    ExitCode::SUCCESS
}
