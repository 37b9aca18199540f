//! Semantic matching
//!
//! Filters stopwords, stems the remaining words and ranks knowledge-base
//! concepts against them. The [`SemanticReport`] also lists relations between
//! the matched concepts and associated concepts worth suggesting.

pub mod concepts;
pub mod stemmer;
pub mod stopwords;

use serde::Serialize;

pub use concepts::{score_concepts, Concept, ConceptMatch, KnowledgeBase};
pub use stemmer::{normalize, stem};
pub use stopwords::Stopwords;

use crate::config::SemanticConfig;

/// Two matched concepts linked by an association (in either direction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticReport {
    pub relevant: Vec<String>,
    pub stems: Vec<String>,
    pub concepts: Vec<ConceptMatch>,
    pub relations: Vec<Relation>,
    pub suggestions: Vec<String>,
}

impl SemanticReport {
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SemanticMatcher {
    stopwords: Stopwords,
    knowledge: KnowledgeBase,
}

impl SemanticMatcher {
    pub fn new(stopwords: Stopwords, knowledge: KnowledgeBase) -> Self {
        Self {
            stopwords,
            knowledge,
        }
    }

    pub fn from_config(config: &SemanticConfig) -> Self {
        Self::new(
            Stopwords::new(&config.stopwords),
            KnowledgeBase::from_config(&config.concepts),
        )
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn analyze<S: AsRef<str>>(&self, words: &[S]) -> SemanticReport {
        let relevant: Vec<String> = words
            .iter()
            .map(AsRef::as_ref)
            .filter(|w| !self.stopwords.contains(w))
            .map(str::to_string)
            .collect();
        let stems: Vec<String> = relevant.iter().map(|w| stem(w)).collect();
        let concepts = score_concepts(&self.knowledge, &relevant, &stems);

        let matched: Vec<&Concept> = concepts
            .iter()
            .filter_map(|m| self.knowledge.get(&m.concept))
            .collect();

        let mut relations = Vec::new();
        for (i, first) in matched.iter().enumerate() {
            for second in &matched[i + 1..] {
                if first.is_associated_with(&second.name) || second.is_associated_with(&first.name) {
                    relations.push(Relation {
                        from: first.name.clone(),
                        to: second.name.clone(),
                    });
                }
            }
        }

        let is_matched = |name: &str| {
            let name = name.to_lowercase();
            matched.iter().any(|c| c.name.to_lowercase() == name)
        };
        let mut suggestions: Vec<String> = Vec::new();
        for concept in self.knowledge.concepts() {
            if !is_matched(&concept.name) {
                continue;
            }
            for association in &concept.associations {
                if !is_matched(association) && !suggestions.contains(association) {
                    suggestions.push(association.clone());
                }
            }
        }

        SemanticReport {
            relevant,
            stems,
            concepts,
            relations,
            suggestions,
        }
    }
}
