use proptest::prelude::*;
use schemalink_privacy::ScrubEngine;

proptest! {
    #[test]
    fn scrubbed_text_contains_no_sensitive_match(
        prefix in "[a-z ]{0,20}",
        user in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
        suffix in "[a-z ]{0,20}",
    ) {
        let engine = ScrubEngine::new();
        let text = format!("{prefix} {user}@{domain}.com {suffix}");
        let out = engine.scrub(&text);
        prop_assert!(!engine.contains_sensitive(&out.text));
    }

    #[test]
    fn scrubbing_is_idempotent(s in ".{0,120}") {
        let engine = ScrubEngine::new();
        let once = engine.scrub(&s).text;
        let twice = engine.scrub(&once).text;
        prop_assert_eq!(once, twice);
    }
}
