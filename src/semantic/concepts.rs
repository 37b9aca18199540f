//! Knowledge base and concept scoring.
//!
//! Scores accumulate per concept, comparing lowercase text:
//!
//! | match                                       | weight |
//! |---------------------------------------------|--------|
//! | relevant word equals the concept name       | 3      |
//! | relevant word equals a synonym              | 2      |
//! | stem inside the name, or name inside stem   | 1      |
//! | stem inside a synonym, or synonym inside it | 0.5 each |
//!
//! Ranking is by score, highest first; equal scores keep knowledge-base order.

use serde::Serialize;
use std::cmp::Ordering;

use crate::config::ConceptConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    pub name: String,
    pub synonyms: Vec<String>,
    pub associations: Vec<String>,
    pub description: String,
}

impl Concept {
    /// Whether `other` is listed among this concept's associations.
    pub fn is_associated_with(&self, other: &str) -> bool {
        let other = other.to_lowercase();
        self.associations.iter().any(|a| a.to_lowercase() == other)
    }
}

/// Ordered list of concepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeBase {
    concepts: Vec<Concept>,
}

impl KnowledgeBase {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self { concepts }
    }

    pub fn from_config(concepts: &[ConceptConfig]) -> Self {
        Self::new(
            concepts
                .iter()
                .map(|c| Concept {
                    name: c.name.clone(),
                    synonyms: c.synonyms.clone(),
                    associations: c.associations.clone(),
                    description: c.description.clone(),
                })
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.name == name)
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptMatch {
    pub concept: String,
    pub score: f64,
}

/// Scores every concept against the relevant words and their stems and
/// returns the ones that matched at all, ranked.
pub fn score_concepts<W, S>(kb: &KnowledgeBase, words: &[W], stems: &[S]) -> Vec<ConceptMatch>
where
    W: AsRef<str>,
    S: AsRef<str>,
{
    let mut scores: Vec<Option<f64>> = vec![None; kb.len()];
    let mut add = |index: usize, weight: f64| {
        *scores[index].get_or_insert(0.0) += weight;
    };

    let lowered: Vec<(String, Vec<String>)> = kb
        .concepts()
        .iter()
        .map(|c| {
            (
                c.name.to_lowercase(),
                c.synonyms.iter().map(|s| s.to_lowercase()).collect(),
            )
        })
        .collect();

    for word in words {
        let word = word.as_ref().to_lowercase();
        for (index, (name, synonyms)) in lowered.iter().enumerate() {
            if *name == word {
                add(index, 3.0);
            } else if synonyms.contains(&word) {
                add(index, 2.0);
            }
        }
    }

    for stem in stems {
        let stem = stem.as_ref().to_lowercase();
        if stem.is_empty() {
            continue;
        }
        for (index, (name, synonyms)) in lowered.iter().enumerate() {
            if name.contains(&stem) || stem.contains(name.as_str()) {
                add(index, 1.0);
            }
            for synonym in synonyms {
                if synonym.contains(&stem) || stem.contains(synonym.as_str()) {
                    add(index, 0.5);
                }
            }
        }
    }

    let mut matches: Vec<ConceptMatch> = kb
        .concepts()
        .iter()
        .zip(scores)
        .filter_map(|(concept, score)| {
            score.map(|score| ConceptMatch {
                concept: concept.name.clone(),
                score,
            })
        })
        .collect();
    // stable: ties stay in knowledge-base order
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(name: &str, synonyms: &[&str], associations: &[&str]) -> Concept {
        Concept {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            associations: associations.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new(vec![
            concept("computadora", &["ordenador", "PC", "computador"], &["software"]),
            concept("programar", &["codificar"], &["software", "algoritmo"]),
            concept("algoritmo", &["procedimiento"], &["lógica"]),
        ])
    }

    #[test]
    fn test_exact_name_beats_synonym() {
        let matches = score_concepts(&kb(), &["algoritmo", "pc"], &[] as &[&str]);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].concept, "algoritmo");
        assert_eq!(matches[0].score, 3.0);
        assert_eq!(matches[1].concept, "computadora");
        assert_eq!(matches[1].score, 2.0);
    }

    #[test]
    fn test_stem_containment() {
        // "computador" is inside the name (+1) and equal to a synonym (+0.5)
        let matches = score_concepts(&kb(), &[] as &[&str], &["computador"]);
        assert_eq!(matches[0].concept, "computadora");
        assert_eq!(matches[0].score, 1.5);
    }

    #[test]
    fn test_ties_keep_knowledge_base_order() {
        let matches = score_concepts(&kb(), &["codificar", "procedimiento"], &[] as &[&str]);
        let names: Vec<&str> = matches.iter().map(|m| m.concept.as_str()).collect();
        assert_eq!(names, ["programar", "algoritmo"]);
    }

    #[test]
    fn test_no_match() {
        assert!(score_concepts(&kb(), &["balón"], &["balon"]).is_empty());
    }

    #[test]
    fn test_association_lookup() {
        let kb = kb();
        assert!(kb.get("programar").unwrap().is_associated_with("Algoritmo"));
        assert!(!kb.get("algoritmo").unwrap().is_associated_with("programar"));
    }
}
