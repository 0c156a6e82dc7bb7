use schemalink_core::traits::ITokenizer;

/// Token budget tracking and allocation.
pub struct TokenBudget<'a> {
    tokenizer: &'a dyn ITokenizer,
}

/// Result of allocating tokens across items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Index of the item in the input slice.
    pub index: usize,
    /// Tokens allocated to this item.
    pub tokens: usize,
}

impl<'a> TokenBudget<'a> {
    pub fn new(tokenizer: &'a dyn ITokenizer) -> Self {
        Self { tokenizer }
    }

    /// How many tokens remain from a total budget after using `used`.
    pub fn remaining(total: usize, used: usize) -> usize {
        total.saturating_sub(used)
    }

    /// Whether the given text fits within the budget.
    pub fn fits(&self, text: &str, budget: usize) -> bool {
        self.tokenizer.count(text) <= budget
    }

    /// Take items in order while they fit. Stops at the first item that
    /// would overflow; nothing after it is considered.
    pub fn pack_prefix<S: AsRef<str>>(&self, items: &[S], budget: usize) -> Vec<Allocation> {
        let mut remaining = budget;
        let mut allocations = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let tokens = self.tokenizer.count(item.as_ref());
            if tokens > remaining {
                break;
            }
            remaining -= tokens;
            allocations.push(Allocation { index, tokens });
        }

        allocations
    }

    /// Sum of allocated tokens.
    pub fn used(allocations: &[Allocation]) -> usize {
        allocations.iter().map(|a| a.tokens).sum()
    }
}
