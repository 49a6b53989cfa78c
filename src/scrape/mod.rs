// Headline scraping: one HTTP GET plus a CSS selector.
//
// The client fetches the configured source page; extraction is a pure
// function over the HTML so it can be tested without the network.

pub mod client;
pub mod extract;
