// IQP ansatz: compiles a diagram into a parameterized circuit.
//
// The sentence wire is a register of `sentence_qubits` qubits. The circuit
// opens with a Hadamard layer, then every word (in reading order) applies
// `n_layers` IQP blocks to the register: an Rx rotation on each qubit
// followed by a CRz ladder between neighbouring qubits. A closing Hadamard
// layer maps the accumulated phases back onto the computational basis.
//
// Each rotation gets its own symbol named `{word}__{type}_{layer}_{index}`,
// so a word shares its parameters across every sentence it appears in.

use anyhow::Result;

use super::circuit::{Circuit, Gate, Symbol};
use super::parser::{Diagram, Word};
use super::types::AtomicType;

#[derive(Debug, Clone)]
pub struct IqpAnsatz {
    sentence_qubits: usize,
    n_layers: usize,
}

impl IqpAnsatz {
    pub fn new(sentence_qubits: usize, n_layers: usize) -> Result<Self> {
        if sentence_qubits == 0 {
            anyhow::bail!("IQP ansatz needs at least one qubit for the sentence wire");
        }
        if n_layers == 0 {
            anyhow::bail!("IQP ansatz needs at least one layer");
        }
        Ok(Self {
            sentence_qubits,
            n_layers,
        })
    }

    pub fn sentence_qubits(&self) -> usize {
        self.sentence_qubits
    }

    pub fn n_layers(&self) -> usize {
        self.n_layers
    }

    /// Number of symbols each word contributes to a circuit.
    pub fn symbols_per_word(&self) -> usize {
        self.n_layers * (2 * self.sentence_qubits - 1)
    }

    /// Compile a sentence-rooted diagram into a circuit.
    pub fn compile(&self, diagram: &Diagram) -> Result<Circuit> {
        if diagram.root != AtomicType::Sentence {
            anyhow::bail!(
                "IQP ansatz compiles sentence diagrams only, got root type {}",
                diagram.root
            );
        }
        if diagram.is_empty() {
            anyhow::bail!("Cannot compile a diagram with no words");
        }

        let n = self.sentence_qubits;
        let mut circuit = Circuit::new(n);

        for q in 0..n {
            circuit.push(Gate::H(q))?;
        }

        for word in &diagram.words {
            self.push_word(&mut circuit, word)?;
        }

        for q in 0..n {
            circuit.push(Gate::H(q))?;
        }

        Ok(circuit)
    }

    fn push_word(&self, circuit: &mut Circuit, word: &Word) -> Result<()> {
        let n = self.sentence_qubits;
        for layer in 0..self.n_layers {
            let mut index = 0;
            for q in 0..n {
                circuit.push(Gate::Rx(q, word_symbol(word, layer, index)))?;
                index += 1;
            }
            for q in 0..n.saturating_sub(1) {
                circuit.push(Gate::CRz {
                    control: q,
                    target: q + 1,
                    theta: word_symbol(word, layer, index),
                })?;
                index += 1;
            }
        }
        Ok(())
    }
}

fn word_symbol(word: &Word, layer: usize, index: usize) -> Symbol {
    Symbol::new(format!("{}__{}_{}_{}", word.name, word.ty.tag(), layer, index))
}
