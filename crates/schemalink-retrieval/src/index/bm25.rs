//! Okapi BM25 over each chunk's keyword terms plus its tokenized text.

use std::collections::HashMap;

use schemalink_core::models::SchemaChunk;

use crate::search::tokenize;

const K1: f64 = 1.2;
const B: f64 = 0.75;

#[derive(Debug, Default)]
struct Document {
    id: String,
    term_freqs: HashMap<String, u32>,
    length: usize,
}

#[derive(Debug, Default)]
pub struct Bm25Index {
    documents: Vec<Document>,
    doc_freqs: HashMap<String, usize>,
    total_length: usize,
}

impl Bm25Index {
    pub fn add(&mut self, chunk: &SchemaChunk) {
        let mut term_freqs: HashMap<String, u32> = HashMap::new();
        let mut length = 0;
        let terms = chunk
            .keyword_terms
            .iter()
            .map(|t| t.to_lowercase())
            .chain(tokenize(&chunk.text));
        for term in terms {
            *term_freqs.entry(term).or_default() += 1;
            length += 1;
        }
        for term in term_freqs.keys() {
            *self.doc_freqs.entry(term.clone()).or_default() += 1;
        }
        self.total_length += length;
        self.documents.push(Document {
            id: chunk.id.clone(),
            term_freqs,
            length,
        });
    }

    /// Ids with a positive score, best first, ties by id.
    pub fn search(&self, terms: &[String], limit: usize) -> Vec<String> {
        if self.documents.is_empty() || terms.is_empty() || limit == 0 {
            return Vec::new();
        }
        let n = self.documents.len() as f64;
        let avg_len = (self.total_length as f64 / n).max(1.0);

        let mut scored: Vec<(&str, f64)> = self
            .documents
            .iter()
            .map(|doc| {
                let score: f64 = terms
                    .iter()
                    .filter_map(|term| {
                        let tf = *doc.term_freqs.get(term)? as f64;
                        let df = *self.doc_freqs.get(term)? as f64;
                        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
                        let norm = K1 * (1.0 - B + B * doc.length as f64 / avg_len);
                        Some(idf * tf * (K1 + 1.0) / (tf + norm))
                    })
                    .sum();
                (doc.id.as_str(), score)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored.truncate(limit);
        scored.into_iter().map(|(id, _)| id.to_string()).collect()
    }
}
