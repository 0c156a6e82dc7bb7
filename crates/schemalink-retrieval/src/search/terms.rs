//! Lexical term extraction shared by BM25 indexing and querying.

const STOPWORDS: &[&str] = &[
    "a", "all", "an", "and", "any", "are", "as", "at", "be", "by", "can", "did", "do", "does",
    "each", "for", "from", "give", "has", "have", "how", "i", "in", "is", "it", "list", "many",
    "me", "much", "of", "on", "or", "per", "show", "that", "the", "their", "there", "this", "to",
    "was", "we", "were", "what", "when", "where", "which", "who", "with", "you",
];

/// Lowercased alphanumeric tokens. `snake_case` tokens also emit their parts.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in text.split(|c: char| !c.is_alphanumeric() && c != '_') {
        let word = raw.trim_matches('_').to_lowercase();
        if word.is_empty() {
            continue;
        }
        if word.contains('_') {
            tokens.extend(
                word.split('_')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            );
        }
        tokens.push(word);
    }
    tokens
}

/// Query terms for keyword search: tokens minus stopwords, with a naive
/// singular form added for plural words. Deduplicated, first-seen order.
pub fn extract_query_terms(question: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let mut push = |term: String| {
        if !terms.contains(&term) {
            terms.push(term);
        }
    };
    for token in tokenize(question) {
        if token.len() < 2 || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if let Some(stem) = singular(&token) {
            push(stem);
        }
        push(token);
    }
    terms
}

fn singular(token: &str) -> Option<String> {
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        Some(token[..token.len() - 1].to_string())
    } else {
        None
    }
}
