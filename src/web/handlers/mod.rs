pub mod categorize;
pub mod download;
pub mod index;
pub mod scrape;
pub mod session;
