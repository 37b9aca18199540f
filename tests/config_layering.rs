//! Configuration layering: user files over the embedded defaults

use std::io::Write;

use sintagma::config::Loader;
use sintagma::error::{ConfigError, Error};
use sintagma::grammar::{ConflictPolicy, GrammarError};
use sintagma::Analyzer;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_user_grammar_replaces_default() {
    let file = toml_file(
        r#"
[grammar]
terminals = ["art", "sust", "verbo"]
rules = """
S  -> SN SV
SN -> Det N
SV -> V SN
Det -> art
N -> sust
V -> verbo
"""
"#,
    );
    let config = Loader::new().with_file(file.path()).build().unwrap();
    // untouched sections keep their defaults
    assert_eq!(config.grammar.start, "S");
    assert_eq!(config.output.format, "treeviz");
    assert!(!config.semantic.concepts.is_empty());

    let analyzer = Analyzer::from_config(&config).unwrap();
    assert!(analyzer.analyze("el balón cuesta la plata").accepted());
    assert!(!analyzer.analyze("el balón cuesta").accepted());
}

#[test]
fn test_later_layers_win() {
    let file = toml_file("[output]\nformat = \"tag\"\n");
    let config = Loader::new()
        .with_file(file.path())
        .set_override("output.format", "yaml")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.output.format, "yaml");

    let config = Loader::new().with_file(file.path()).build().unwrap();
    assert_eq!(config.output.format, "tag");
}

#[test]
fn test_optional_file_may_be_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = Loader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .build()
        .unwrap();
    assert_eq!(config.grammar.conflict_policy, ConflictPolicy::FirstListed);
}

#[test]
fn test_reject_policy_refuses_conflicting_grammar() {
    let file = toml_file(
        r#"
[grammar]
terminals = ["art", "sust", "verbo", "adv"]
conflict_policy = "reject"
rules = """
S  -> SN SV
SN -> Det N
SV -> V | V SN | V Adv | V Adv SN
Det -> art
N -> sust
V -> verbo
Adv -> adv
"""
"#,
    );
    let config = Loader::new().with_file(file.path()).build().unwrap();
    match Analyzer::from_config(&config) {
        Err(Error::Grammar(GrammarError::Conflicts(conflicts))) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].nonterminal, "SV");
        }
        other => panic!("expected conflicts, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_notation_error_reports_line() {
    let config = Loader::new()
        .set_override("grammar.rules", "S -> SN SV\nSN -> ->")
        .unwrap()
        .build()
        .unwrap();
    match Analyzer::from_config(&config) {
        Err(Error::Grammar(GrammarError::Notation { line, .. })) => assert_eq!(line, 2),
        other => panic!("expected notation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_undeclared_symbol() {
    let config = Loader::new()
        .set_override("grammar.rules", "S -> sust verbo foo")
        .unwrap()
        .build()
        .unwrap();
    match Analyzer::from_config(&config) {
        Err(Error::Grammar(GrammarError::UnknownSymbol { head, symbol })) => {
            assert_eq!(head, "S");
            assert_eq!(symbol, "foo");
        }
        other => panic!("expected unknown symbol, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_bad_lexicon_pattern() {
    let file = toml_file(
        r#"
[[lexicon.rules]]
category = "adv"
pattern = "[a-z+mente"
"#,
    );
    let config = Loader::new().with_file(file.path()).build().unwrap();
    match Analyzer::from_config(&config) {
        Err(Error::Config(ConfigError::Pattern { category, .. })) => assert_eq!(category, "adv"),
        other => panic!("expected pattern error, got {:?}", other.map(|_| ())),
    }
}
