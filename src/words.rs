//! Word validation and de-duplication across a run.

use std::collections::{BTreeMap, BTreeSet};

/// Words already written to some card in this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenWords {
    words: BTreeSet<String>,
}

impl SeenWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Record words that were actually drawn.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Outcome of [`select_words`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSelection {
    /// Words to draw, sorted.
    pub words: Vec<String>,
    /// Words listed more than once in the group; one copy is kept.
    pub repeated: Vec<String>,
    /// Words dropped because an earlier group already emitted them.
    pub already_seen: Vec<String>,
}

/// Pick the words of a group that should become cards.
///
/// Words are trimmed and blank entries dropped. With `allow_repeated` the
/// sorted input is returned as is, duplicates included. Otherwise the result
/// is the sorted set of words that `seen` does not contain yet.
pub fn select_words<S: AsRef<str>>(
    words: &[S],
    seen: &SeenWords,
    allow_repeated: bool,
) -> WordSelection {
    let cleaned = words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty());

    if allow_repeated {
        let mut words: Vec<String> = cleaned.map(str::to_string).collect();
        words.sort();
        return WordSelection {
            words,
            ..WordSelection::default()
        };
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in cleaned {
        *counts.entry(word).or_default() += 1;
    }

    let mut selection = WordSelection::default();
    for (word, count) in counts {
        if count > 1 {
            selection.repeated.push(word.to_string());
        }
        if seen.contains(word) {
            selection.already_seen.push(word.to_string());
        } else {
            selection.words.push(word.to_string());
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_in_group_kept_once() {
        let sel = select_words(&["vaca", "vaca", "cachorro"], &SeenWords::new(), false);
        assert_eq!(sel.words, vec!["cachorro", "vaca"]);
        assert_eq!(sel.repeated, vec!["vaca"]);
        assert!(sel.already_seen.is_empty());
    }

    #[test]
    fn seen_words_are_dropped() {
        let mut seen = SeenWords::new();
        seen.extend(["vaca", "mosca"]);
        let sel = select_words(&["vaca", "girafa", "cabra"], &seen, false);
        assert_eq!(sel.words, vec!["cabra", "girafa"]);
        assert_eq!(sel.already_seen, vec!["vaca"]);
        assert!(sel.repeated.is_empty());
    }

    #[test]
    fn allow_repeated_returns_sorted_input() {
        let mut seen = SeenWords::new();
        seen.extend(["vaca"]);
        let sel = select_words(&["vaca", "cabra", "vaca"], &seen, true);
        assert_eq!(sel.words, vec!["cabra", "vaca", "vaca"]);
        assert!(sel.repeated.is_empty());
        assert!(sel.already_seen.is_empty());
    }

    #[test]
    fn blank_words_and_padding() {
        let sel = select_words(&["  pé ", "", "   ", "pé", "mão"], &SeenWords::new(), false);
        assert_eq!(sel.words, vec!["mão", "pé"]);
        assert_eq!(sel.repeated, vec!["pé"]);
    }

    #[test]
    fn emitted_never_contains_seen() {
        let mut seen = SeenWords::new();
        seen.extend(["b", "d"]);
        let input = ["a", "b", "c", "d", "d", "e", "a"];
        let sel = select_words(&input, &seen, false);
        for word in &sel.words {
            assert!(!seen.contains(word));
        }
        assert_eq!(sel.words, vec!["a", "c", "e"]);
        assert_eq!(sel.already_seen, vec!["b", "d"]);
        assert_eq!(sel.repeated, vec!["a", "d"]);
    }

    #[test]
    fn seen_words_only_grow() {
        let mut seen = SeenWords::new();
        assert!(seen.is_empty());
        seen.extend(["vaca", "gato"]);
        seen.extend(["vaca", "pato"]);
        assert_eq!(seen.len(), 3);
        assert!(!seen.is_empty());
        assert!(seen.contains("pato"));
    }
}
