use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scrape::client::DEFAULT_SOURCE_URL;
use crate::scrape::extract::DEFAULT_HEADING_SELECTOR;

/// Default sentence register size: 4 qubits → 16 outcomes, enough for 13 topics.
pub const DEFAULT_SENTENCE_QUBITS: usize = 4;

/// Default number of IQP layers per word.
pub const DEFAULT_ANSATZ_LAYERS: usize = 1;

/// Central configuration loaded from environment variables.
///
/// Every variable is optional. The defaults scrape ScienceDaily's top
/// science page and classify with a 4-qubit, single-layer ansatz. The .env
/// file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Page to scrape (TIDINGS_SOURCE_URL)
    pub source_url: String,
    /// CSS selector for headline elements (TIDINGS_HEADING_SELECTOR)
    pub heading_selector: String,
    /// Qubits on the sentence wire (TIDINGS_SENTENCE_QUBITS)
    pub sentence_qubits: usize,
    /// IQP layers per word (TIDINGS_ANSATZ_LAYERS)
    pub ansatz_layers: usize,
    /// Optional JSON file of trained circuit parameters (TIDINGS_WEIGHTS_PATH)
    pub weights_path: Option<PathBuf>,
    /// Secret for HMAC session cookie signing (TIDINGS_SESSION_SECRET).
    /// A random secret is generated per process when unset, so sessions
    /// don't survive a restart.
    #[cfg(feature = "web")]
    pub session_secret: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            sentence_qubits: DEFAULT_SENTENCE_QUBITS,
            ansatz_layers: DEFAULT_ANSATZ_LAYERS,
            weights_path: None,
            #[cfg(feature = "web")]
            session_secret: random_secret(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let sentence_qubits = parse_var("TIDINGS_SENTENCE_QUBITS")?
            .unwrap_or(defaults.sentence_qubits);
        let ansatz_layers =
            parse_var("TIDINGS_ANSATZ_LAYERS")?.unwrap_or(defaults.ansatz_layers);

        Ok(Self {
            source_url: env::var("TIDINGS_SOURCE_URL").unwrap_or(defaults.source_url),
            heading_selector: env::var("TIDINGS_HEADING_SELECTOR")
                .unwrap_or(defaults.heading_selector),
            sentence_qubits,
            ansatz_layers,
            weights_path: env::var("TIDINGS_WEIGHTS_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            #[cfg(feature = "web")]
            session_secret: env::var("TIDINGS_SESSION_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.session_secret),
        })
    }

    /// Check that the configured weight file exists before the first
    /// categorization tries to read it.
    pub fn require_weights(&self) -> Result<()> {
        if let Some(path) = &self.weights_path {
            if !path.exists() {
                anyhow::bail!(
                    "TIDINGS_WEIGHTS_PATH points to {}, which does not exist.\n\
                     Unset it to use the built-in parameter initializer.",
                    path.display()
                );
            }
        }
        Ok(())
    }
}

fn parse_var(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a positive integer, got {raw:?}")),
        _ => Ok(None),
    }
}

#[cfg(feature = "web")]
fn random_secret() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
