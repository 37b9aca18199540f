//! Semantic matching through the full pipeline

use rstest::rstest;
use sintagma::semantic::stem;
use sintagma::Analyzer;

#[rstest]
#[case("computadoras", "computador")]
#[case("ordenadores", "ordenador")]
#[case("programando", "program")]
#[case("rápidamente", "rapida")]
#[case("Café", "cafe")]
#[case("felicidad", "felic")]
#[case("virus", "virus")]
#[case("yo", "yo")]
fn test_stems(#[case] word: &str, #[case] expected: &str) {
    assert_eq!(stem(word), expected);
}

#[test]
fn test_restemming_common_nouns_is_a_no_op() {
    for word in [
        "computadoras",
        "ordenadores",
        "perros",
        "balones",
        "algoritmo",
        "felicidad",
        "tecnologías",
    ] {
        let once = stem(word);
        assert_eq!(stem(&once), once, "{word}");
    }
}

#[test]
fn test_sentence_concepts_relations_and_suggestions() {
    let analyzer = Analyzer::with_defaults().unwrap();
    let report = analyzer
        .analyze("Quiero programar un algoritmo en mi computadora.")
        .semantic;

    // punctuation never reaches the matcher
    assert!(!report.relevant.iter().any(|w| w == "."));
    assert!(!report.relevant.iter().any(|w| w == "un" || w == "en" || w == "mi"));

    let ranked: Vec<&str> = report.concepts.iter().map(|m| m.concept.as_str()).collect();
    assert_eq!(&ranked[..3], ["computadora", "programar", "algoritmo"]);

    let pairs: Vec<(&str, &str)> = report
        .relations
        .iter()
        .map(|r| (r.from.as_str(), r.to.as_str()))
        .collect();
    assert_eq!(pairs, [("programar", "algoritmo")]);

    // associations of matched concepts, in knowledge-base order, minus the matches
    assert_eq!(
        &report.suggestions[..4],
        ["tecnología", "hardware", "software", "dispositivo"]
    );
    assert!(report.suggestions.contains(&"código".to_string()));
    assert!(!report.suggestions.contains(&"algoritmo".to_string()));
    let software = report.suggestions.iter().filter(|s| *s == "software").count();
    assert_eq!(software, 1);
}

#[test]
fn test_synonym_match() {
    let analyzer = Analyzer::with_defaults().unwrap();
    let report = analyzer.analyze("el ordenador cuesta").semantic;
    assert_eq!(report.concepts[0].concept, "computadora");
}

#[test]
fn test_no_concepts() {
    let analyzer = Analyzer::with_defaults().unwrap();
    let report = analyzer.analyze("el balón cuesta").semantic;
    assert!(report.is_empty());
    assert!(report.relations.is_empty());
    assert!(report.suggestions.is_empty());
}
