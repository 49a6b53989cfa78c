// Simulated quantum NLP: sentence diagrams, IQP circuits, statevector backend.
//
// Data flow: SentenceParser turns cleaned text into a Diagram, IqpAnsatz
// compiles the Diagram into a parameterized Circuit, and CircuitModel binds
// the circuit's symbols to angles and asks a Backend for the outcome
// probabilities.

pub mod ansatz;
pub mod backend;
pub mod circuit;
pub mod model;
pub mod parser;
pub mod types;
pub mod weights;
