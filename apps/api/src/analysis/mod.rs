// Scoring and feedback over the mined résumé signals.
// Both analyzers are pure functions of the document text and what was detected.

pub mod ats;
pub mod suggestions;
