//! Suffix-stripping stemmer for Spanish.
//!
//! After lowercasing and removing diacritics, at most one suffix is removed per
//! group, in this order: plural, diminutive, `-mente`, verbal, nominal. Within a
//! group the longest matching suffix wins. Except for the plural and `-mente`
//! steps, a suffix is only removed if at least two characters remain.

const DIMINUTIVE: &[&str] = &["citos", "citas", "cito", "cita", "itos", "itas", "ito", "ita"];

const VERBAL: &[&str] = &[
    "ando", "endo", "ado", "ido", "iendo", "ar", "er", "ir", "as", "abas", "adas", "idas", "aras",
    "ases", "ieses", "aste", "iste", "an", "aban", "ian", "aran", "ieran", "asen", "iesen", "aron",
    "ieron", "io",
];

const NOMINAL: &[&str] = &[
    "anza", "anzas", "ico", "ica", "icos", "icas", "ismo", "ismos", "able", "ables", "ible",
    "ibles", "ista", "istas", "oso", "osa", "osos", "osas", "amiento", "amientos", "imiento",
    "imientos", "acion", "aciones", "cion", "ciones", "dad", "dades", "idad", "idades",
];

/// Lowercases and maps `á é í ó ú ü ñ` to `a e i o u u n`.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Removes the longest suffix in `suffixes` that leaves more than
/// `min_rest` characters.
fn strip_longest(word: &mut String, suffixes: &[&str], min_rest: usize) -> bool {
    let mut candidates: Vec<&str> = suffixes.to_vec();
    candidates.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for suffix in candidates {
        if word.ends_with(suffix) && char_len(word) > char_len(suffix) + min_rest {
            word.truncate(word.len() - suffix.len());
            return true;
        }
    }
    false
}

fn strip_plural(word: &mut String) {
    let len = char_len(word);
    if len > 4 && ["es", "as", "os"].iter().any(|s| word.ends_with(s)) {
        word.truncate(word.len() - 2);
    } else if len > 3 && word.ends_with('s') && !word.ends_with("us") && !word.ends_with("is") {
        word.truncate(word.len() - 1);
    }
}

pub fn stem(word: &str) -> String {
    let mut word = normalize(word);
    if char_len(&word) <= 2 {
        return word;
    }

    strip_plural(&mut word);
    strip_longest(&mut word, DIMINUTIVE, 1);
    if char_len(&word) > 5 && word.ends_with("mente") {
        word.truncate(word.len() - "mente".len());
    }
    strip_longest(&mut word, VERBAL, 1);
    strip_longest(&mut word, NOMINAL, 1);

    word
}
