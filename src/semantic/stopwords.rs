use std::collections::HashSet;

/// Case-insensitive stopword set.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let stopwords = Stopwords::new(["el", "Qué", "tú"]);
        assert!(stopwords.contains("El"));
        assert!(stopwords.contains("qué"));
        assert!(stopwords.contains("TÚ"));
        assert!(!stopwords.contains("balón"));
        assert_eq!(stopwords.len(), 3);
    }
}
