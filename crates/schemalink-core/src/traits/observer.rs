use crate::models::{AttemptRecord, RetrievalBundle};

/// Extra business context appended to the prompt (glossary terms, metric
/// definitions). Optional collaborator of the correction loop.
pub trait IContextAugmenter: Send + Sync {
    fn augment(&self, question: &str, bundle: &RetrievalBundle) -> Option<String>;
}

/// Receives each attempt as soon as it is complete.
pub trait IAttemptObserver: Send + Sync {
    fn on_attempt(&self, record: &AttemptRecord);
}
