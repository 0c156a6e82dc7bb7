/// Counts tokens for budget enforcement. Must be the same counter the
/// reasoning engine's context limit is measured in.
pub trait ITokenizer: Send + Sync {
    fn count(&self, text: &str) -> usize;

    fn name(&self) -> &str;
}
