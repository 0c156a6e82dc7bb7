use schemalink_core::traits::ITokenizer;

/// `ceil(chars / chars_per_token)`. Cheap and deterministic; used where the
/// reasoning engine's tokenizer is unknown.
#[derive(Debug, Clone, Copy)]
pub struct CharsPerTokenTokenizer {
    chars_per_token: usize,
}

impl CharsPerTokenTokenizer {
    /// A ratio of 0 is treated as 1.
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl ITokenizer for CharsPerTokenTokenizer {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }

    fn name(&self) -> &str {
        "chars_per_token"
    }
}
