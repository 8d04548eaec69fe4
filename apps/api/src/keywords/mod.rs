// Keyword detection: the categorized dictionary, the word-boundary-safe
// matcher and the per-category technology extractor.

pub mod dictionary;
pub mod extractor;
pub mod matcher;
