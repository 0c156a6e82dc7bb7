use proptest::prelude::*;
use schemalink_core::traits::ITokenizer;
use schemalink_tokens::{CharsPerTokenTokenizer, TokenBudget, TokenCounter};

proptest! {
    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let counter = TokenCounter::new(100).unwrap();
        prop_assert_eq!(counter.count_uncached(&s), counter.count_cached(&s));
    }

    #[test]
    fn subadditivity(a in ".{0,100}", b in ".{0,100}") {
        let counter = TokenCounter::new(100).unwrap();
        let combined = format!("{a}{b}");
        prop_assert!(counter.count(&combined) <= counter.count(&a) + counter.count(&b) + 1);
    }

    #[test]
    fn packed_prefix_never_exceeds_budget(
        items in prop::collection::vec("[a-z ]{0,40}", 0..20),
        budget in 0usize..60,
        ratio in 1usize..6,
    ) {
        let tokenizer = CharsPerTokenTokenizer::new(ratio);
        let packer = TokenBudget::new(&tokenizer);
        let allocations = packer.pack_prefix(&items, budget);
        prop_assert!(TokenBudget::used(&allocations) <= budget);
        for (i, a) in allocations.iter().enumerate() {
            prop_assert_eq!(a.index, i);
        }
    }
}
