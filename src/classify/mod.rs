// Topic classification: trait-based abstraction for swappable classifiers.
//
// The TopicClassifier trait defines the interface. QuantumClassifier
// implements it with the simulated quantum NLP pipeline in `crate::qnlp`.

pub mod labels;
pub mod quantum;
pub mod traits;
