//! Business glossary as an optional context augmenter.

use std::collections::BTreeMap;

use schemalink_core::models::RetrievalBundle;
use schemalink_core::traits::IContextAugmenter;

/// Adds the definition of every glossary term the question mentions.
///
/// Matching is case-insensitive on whole words. Terms are emitted in
/// alphabetical order so prompts stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct GlossaryAugmenter {
    terms: BTreeMap<String, String>,
}

impl GlossaryAugmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: &str, definition: &str) -> Self {
        self.terms
            .insert(term.trim().to_lowercase(), definition.trim().to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, S)> for GlossaryAugmenter {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |g, (t, d)| g.with_term(t.as_ref(), d.as_ref()))
    }
}

impl IContextAugmenter for GlossaryAugmenter {
    fn augment(&self, question: &str, _bundle: &RetrievalBundle) -> Option<String> {
        let words: Vec<String> = question
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let lines: Vec<String> = self
            .terms
            .iter()
            .filter(|(term, _)| mentions(&words, term))
            .map(|(term, def)| format!("- {term}: {def}"))
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }
}

/// Multi-word terms must appear as consecutive words.
fn mentions(words: &[String], term: &str) -> bool {
    let parts: Vec<&str> = term.split_whitespace().collect();
    if parts.is_empty() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|w| w.iter().zip(&parts).all(|(a, b)| a == b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossary() -> GlossaryAugmenter {
        [
            ("revenue", "sum of Orders.amount for shipped orders"),
            ("active customer", "a customer with an order in the last 90 days"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn mentioned_terms_are_defined() {
        let ctx = glossary()
            .augment("What was total Revenue in 2024?", &RetrievalBundle::default())
            .unwrap();
        assert_eq!(ctx, "- revenue: sum of Orders.amount for shipped orders");
    }

    #[test]
    fn multi_word_terms_need_adjacent_words() {
        let g = glossary();
        let b = RetrievalBundle::default();
        assert!(g.augment("how many active customers?", &b).is_none());
        assert!(g.augment("list every active customer", &b).is_some());
        assert!(g.augment("customer is active", &b).is_none());
    }

    #[test]
    fn unrelated_question_adds_nothing() {
        assert!(glossary()
            .augment("list products", &RetrievalBundle::default())
            .is_none());
    }
}
