//! End-to-end tests for the `sintagma` binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn sintagma() -> Command {
    let mut cmd = Command::cargo_bin("sintagma").expect("binary to build");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_analyze_accepted_sentence() {
    sintagma()
        .args(["analyze", "El balón cuesta la plata."])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: accepted"))
        .stdout(predicate::str::contains("art sust verbo art sust punt"))
        .stdout(predicate::str::contains("└── sust \"plata\""));
}

#[test]
fn test_analyze_rejected_sentence_exits_with_two() {
    sintagma()
        .args(["analyze", "cuesta el balón"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("status: rejected: no production for S"))
        .stdout(predicate::str::contains("fallback:"));
}

#[test]
fn test_analyze_json_format() {
    let output = sintagma()
        .args(["analyze", "--format", "json", "Yo quiero programar un algoritmo"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sentence"], "Yo quiero programar un algoritmo");
    assert_eq!(value["semantic"]["concepts"][0]["concept"], "programar");
}

#[test]
fn test_analyze_tag_format_from_override() {
    sintagma()
        .args(["--set", "output.format=tag", "analyze", "el balón cuesta"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<analysis status=\"accepted\">"));
}

#[test]
fn test_unknown_format_is_an_error() {
    sintagma()
        .args(["analyze", "-f", "svg", "el balón cuesta"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Format 'svg' not found"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    sintagma()
        .args(["--config", "/nonexistent/sintagma.toml", "table"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_table_lists_sets_and_no_conflicts() {
    sintagma()
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("S → SN SV SPOpt Cierre"))
        .stdout(predicate::str::contains("[SVc, adv] → Adv AdvC"))
        .stdout(predicate::str::contains("conflicts: none"));
}

fn grammar_file(rules: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[grammar]\nconflict_policy = \"first-listed\"\nrules = \"\"\"\n{rules}\"\"\"")
        .expect("write config");
    file
}

#[test]
fn test_table_reports_conflicts_under_first_listed() {
    let file = grammar_file(
        "S -> SN SV\nSN -> Det N\nSV -> V | V SN | V Adv | V Adv SN\n\
         Det -> art\nN -> sust\nV -> verbo\nAdv -> adv\n",
    );
    sintagma()
        .arg("--config")
        .arg(file.path())
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("conflicts (1, policy FirstListed):"))
        .stdout(predicate::str::contains("[SV, verbo] has 4 candidates"))
        .stdout(predicate::str::contains("conflicts: none").not());

    // the first-listed candidate is still applied
    sintagma()
        .arg("--config")
        .arg(file.path())
        .args(["analyze", "el balón cuesta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: accepted"));
}

#[test]
fn test_left_recursive_grammar_is_refused() {
    let file = grammar_file("S -> S adv | art sust verbo\n");
    sintagma()
        .arg("--config")
        .arg(file.path())
        .args(["analyze", "el balón cuesta"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nonterminal 'S' is left-recursive"));
}

#[test]
fn test_simulate_verb() {
    sintagma()
        .args(["simulate", "verb", "comer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q1 --r--> q2"))
        .stdout(predicate::str::ends_with("accepted\n"));

    sintagma()
        .args(["simulate", "identifier", "9lives"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("rejected: no transition from state 'q0' on '9'"));
}

#[test]
fn test_simulate_unknown_automaton() {
    sintagma()
        .args(["simulate", "adverb", "muy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'adverb'"));
}

#[test]
fn test_stem_words() {
    sintagma()
        .args(["stem", "computadoras", "programando"])
        .assert()
        .success()
        .stdout("computadoras → computador\nprogramando → program\n");
}

#[test]
fn test_formats_listing() {
    sintagma()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("Text tree with derivation and parser trace"));
}
