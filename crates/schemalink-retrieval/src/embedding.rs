//! Hashed term-frequency embedder.
//!
//! Deterministic dense vectors from FNV-1a bucketed term frequencies. No
//! model, no network; always available.

use std::collections::HashMap;

use schemalink_core::errors::RetrievalError;
use schemalink_core::traits::IEmbeddingProvider;

use crate::search::tokenize;

pub const DEFAULT_DIMENSIONS: usize = 256;

pub struct HashedTfEmbedder {
    dimensions: usize,
}

impl HashedTfEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens: Vec<String> = tokenize(text).into_iter().filter(|t| t.len() >= 2).collect();
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }
        let total = tokens.len() as f32;
        for (term, count) in tf {
            // Longer terms carry more signal than short ones.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl Default for HashedTfEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl IEmbeddingProvider for HashedTfEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        if self.dimensions == 0 {
            return Err(RetrievalError::EmbeddingFailed {
                reason: "embedder configured with zero dimensions".to_string(),
            });
        }
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_returns_zero_vector() {
        let v = HashedTfEmbedder::new(64).embed("").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_normalized() {
        let v = HashedTfEmbedder::default().embed("orders placed by customers").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = HashedTfEmbedder::default();
        assert_eq!(p.embed("total revenue").unwrap(), p.embed("total revenue").unwrap());
    }

    #[test]
    fn zero_dimensions_fail() {
        assert!(HashedTfEmbedder::new(0).embed("x").is_err());
    }

    #[test]
    fn shared_terms_raise_similarity() {
        let p = HashedTfEmbedder::default();
        let a = p.embed("customer email address").unwrap();
        let b = p.embed("customer email").unwrap();
        let c = p.embed("shipment carrier weight").unwrap();
        let cos_ab: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let cos_ac: f32 = a.iter().zip(&c).map(|(x, y)| x * y).sum();
        assert!(cos_ab > cos_ac);
    }
}
