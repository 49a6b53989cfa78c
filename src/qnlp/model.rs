// CircuitModel: binds circuit symbols to angles and predicts label
// probabilities through a backend.
//
// The model is built once from every circuit it will be asked about. That
// fixes its symbol vocabulary: predicting on a circuit with a symbol the
// model was not built with is an error, not a silent zero.

use std::collections::HashMap;
use std::f64::consts::TAU;

use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::info;

use super::backend::Backend;
use super::circuit::{Circuit, Symbol};
use super::weights::Weights;

pub struct CircuitModel {
    backend: Box<dyn Backend>,
    params: HashMap<Symbol, f64>,
    n_labels: usize,
}

impl CircuitModel {
    /// Build a model over the symbols of `circuits`, predicting over the first
    /// `n_labels` basis states. Performs the backend handshake.
    pub fn from_circuits(
        circuits: &[Circuit],
        backend: Box<dyn Backend>,
        weights: Option<&Weights>,
        n_labels: usize,
    ) -> Result<Self> {
        if n_labels == 0 {
            anyhow::bail!("A model needs at least one label to predict");
        }

        backend.connect()?;

        let mut params = HashMap::new();
        let mut from_weights = 0usize;
        for circuit in circuits {
            for symbol in circuit.free_symbols() {
                if params.contains_key(symbol) {
                    continue;
                }
                let value = match weights.and_then(|w| w.get(symbol.name())) {
                    Some(v) => {
                        from_weights += 1;
                        v
                    }
                    None => initial_angle(symbol),
                };
                params.insert(symbol.clone(), value);
            }
        }

        info!(
            backend = backend.name(),
            circuits = circuits.len(),
            symbols = params.len(),
            from_weights,
            "Circuit model ready"
        );

        Ok(Self {
            backend,
            params,
            n_labels,
        })
    }

    pub fn symbol_count(&self) -> usize {
        self.params.len()
    }

    pub fn value_of(&self, symbol: &Symbol) -> Option<f64> {
        self.params.get(symbol).copied()
    }

    /// Probability distribution over the model's labels for one circuit.
    ///
    /// The backend's basis-state probabilities are cut down to the first
    /// `n_labels` states and renormalized. If none of the mass lands on a
    /// label state the result is uniform.
    pub fn predict_probabilities(&self, circuit: &Circuit) -> Result<Vec<f64>> {
        if let Some(unknown) = circuit
            .free_symbols()
            .into_iter()
            .find(|s| !self.params.contains_key(*s))
        {
            anyhow::bail!("Circuit symbol {unknown} is not part of the model");
        }

        let full = self.backend.probabilities(circuit, &self.params)?;
        if full.len() < self.n_labels {
            anyhow::bail!(
                "Circuit has {} outcomes but the model predicts {} labels",
                full.len(),
                self.n_labels
            );
        }

        let mut probs: Vec<f64> = full[..self.n_labels].to_vec();
        let mass: f64 = probs.iter().sum();
        if mass > f64::EPSILON {
            for p in &mut probs {
                *p /= mass;
            }
        } else {
            probs.fill(1.0 / self.n_labels as f64);
        }
        Ok(probs)
    }
}

/// Deterministic starting angle in [0, 2π) derived from the symbol name.
pub fn initial_angle(symbol: &Symbol) -> f64 {
    let digest = Sha256::digest(symbol.name().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    // Top 53 bits fit an f64 mantissa exactly, keeping the fraction below 1.0
    let fraction = (u64::from_be_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64;
    fraction * TAU
}
