// Tidings: sort news headlines into topics with a simulated quantum NLP pipeline.
//
// This is the library root. Each module corresponds to one step of the
// scrape → preprocess → classify → present flow, plus the shared plumbing.

pub mod classify;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod preprocess;
pub mod qnlp;
pub mod scrape;
pub mod session;

#[cfg(feature = "web")]
pub mod web;
