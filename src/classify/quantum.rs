// Quantum NLP topic classifier.
//
// One shared pipeline is built per batch: parser, IQP ansatz, and a circuit
// model over the circuits of every title that survives preprocessing (this
// is where the backend handshake happens). Each title is then classified on
// its own:
//
//   preprocess → (no tokens? Uncategorized) → diagram of the cleaned text
//   → circuit → label probabilities → arg-max label
//
// Simulation is CPU-bound, so the async trait method runs the batch on
// tokio's blocking pool.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use super::labels::{argmax, Category, TopicLabel};
use super::traits::TopicClassifier;
use crate::config::Config;
use crate::preprocess::Preprocessor;
use crate::qnlp::ansatz::IqpAnsatz;
use crate::qnlp::backend::{StatevectorBackend, DEFAULT_MAX_QUBITS};
use crate::qnlp::model::CircuitModel;
use crate::qnlp::parser::SentenceParser;
use crate::qnlp::types::AtomicType;
use crate::qnlp::weights::Weights;

#[derive(Clone)]
pub struct QuantumClassifier {
    preprocessor: Arc<Preprocessor>,
    ansatz: IqpAnsatz,
    weights: Option<Arc<Weights>>,
    max_qubits: usize,
}

impl QuantumClassifier {
    /// Build a classifier whose sentence register has `sentence_qubits`
    /// qubits. The register needs a basis state for every topic label.
    pub fn new(
        preprocessor: Arc<Preprocessor>,
        sentence_qubits: usize,
        n_layers: usize,
    ) -> Result<Self> {
        let outcomes = 1usize.checked_shl(sentence_qubits as u32).unwrap_or(usize::MAX);
        if outcomes < TopicLabel::ALL.len() {
            anyhow::bail!(
                "{sentence_qubits} sentence qubits give {outcomes} outcomes, \
                 fewer than the {} topic labels (use at least 4)",
                TopicLabel::ALL.len()
            );
        }
        if sentence_qubits > DEFAULT_MAX_QUBITS {
            anyhow::bail!(
                "{sentence_qubits} sentence qubits exceed the simulator limit of {DEFAULT_MAX_QUBITS}"
            );
        }

        Ok(Self {
            preprocessor,
            ansatz: IqpAnsatz::new(sentence_qubits, n_layers)?,
            weights: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        })
    }

    /// Build a classifier from the loaded configuration, reading the weight
    /// file if one is configured.
    pub fn from_config(config: &Config, preprocessor: Arc<Preprocessor>) -> Result<Self> {
        let classifier = Self::new(preprocessor, config.sentence_qubits, config.ansatz_layers)
            .context("Invalid classifier configuration")?;
        match &config.weights_path {
            Some(path) => Ok(classifier.with_weights(Weights::load(path)?)),
            None => Ok(classifier),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(Arc::new(weights));
        self
    }

    /// Classify a batch synchronously. See the module docs for the pipeline.
    pub fn classify_blocking(&self, titles: &[String]) -> Result<Vec<Category>> {
        let cleaned: Vec<Option<String>> = titles
            .iter()
            .map(|t| {
                let tokens = self.preprocessor.clean(t);
                (!tokens.is_empty()).then(|| tokens.join(" "))
            })
            .collect();

        let sentences: Vec<&String> = cleaned.iter().flatten().collect();
        if sentences.is_empty() {
            debug!(titles = titles.len(), "No classifiable titles in batch");
            return Ok(vec![Category::Uncategorized; titles.len()]);
        }

        let parser = SentenceParser::new(AtomicType::Sentence);
        let circuits = parser
            .sentences_to_diagrams(&sentences)?
            .iter()
            .map(|d| self.ansatz.compile(d))
            .collect::<Result<Vec<_>>>()?;

        let model = CircuitModel::from_circuits(
            &circuits,
            Box::new(StatevectorBackend::new(self.max_qubits)),
            self.weights.as_deref(),
            TopicLabel::ALL.len(),
        )
        .context("Failed to build the circuit model")?;

        let mut categories = Vec::with_capacity(titles.len());
        for sentence in &cleaned {
            let Some(sentence) = sentence else {
                categories.push(Category::Uncategorized);
                continue;
            };

            let diagram = parser.sentence_to_diagram(sentence)?;
            let circuit = self.ansatz.compile(&diagram)?;
            let probabilities = model
                .predict_probabilities(&circuit)
                .with_context(|| format!("Failed to classify {sentence:?}"))?;

            let label = argmax(&probabilities)
                .and_then(TopicLabel::from_index)
                .ok_or_else(|| anyhow::anyhow!("No valid prediction for {sentence:?}"))?;
            categories.push(Category::Topic(label));
        }

        info!(
            titles = titles.len(),
            classified = sentences.len(),
            "Categorized titles"
        );

        Ok(categories)
    }
}

#[async_trait]
impl TopicClassifier for QuantumClassifier {
    async fn classify(&self, titles: &[String]) -> Result<Vec<Category>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let this = self.clone();
        let titles = titles.to_vec();

        tokio::task::spawn_blocking(move || this.classify_blocking(&titles))
            .await
            .context("spawn_blocking panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> QuantumClassifier {
        QuantumClassifier::new(Arc::new(Preprocessor::english()), 4, 1).unwrap()
    }

    #[test]
    fn test_too_few_qubits_rejected() {
        let pre = Arc::new(Preprocessor::english());
        assert!(QuantumClassifier::new(pre.clone(), 3, 1).is_err());
        assert!(QuantumClassifier::new(pre, 4, 1).is_ok());
    }

    #[test]
    fn test_one_category_per_title() {
        let titles = vec![
            "Astronomers map dark matter filaments".to_string(),
            "The And Of".to_string(),
            "Astronomers map dark matter filaments".to_string(),
        ];
        let cats = classifier().classify_blocking(&titles).unwrap();
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[1], Category::Uncategorized);
        assert!(matches!(cats[0], Category::Topic(_)));
        // Same title, same pipeline → same label
        assert_eq!(cats[0], cats[2]);
    }

    #[test]
    fn test_all_stopwords_batch_skips_model() {
        let titles = vec!["of the".to_string(), "!!!".to_string()];
        let cats = classifier().classify_blocking(&titles).unwrap();
        assert_eq!(cats, vec![Category::Uncategorized, Category::Uncategorized]);
    }

    #[tokio::test]
    async fn test_async_classify_matches_blocking() {
        let c = classifier();
        let titles = vec!["Coral reefs recover after heatwave".to_string()];
        let a = c.classify(&titles).await.unwrap();
        let b = c.classify_blocking(&titles).unwrap();
        assert_eq!(a, b);
    }
}
