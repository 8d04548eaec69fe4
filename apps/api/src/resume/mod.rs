// Résumé analysis: the end-to-end pipeline and its HTTP handlers.

pub mod handlers;
pub mod pipeline;
