// Parameterized quantum circuits.
//
// Gates reference their rotation angles by Symbol rather than by value, so
// one compiled circuit can be evaluated against any parameter assignment.

use std::collections::HashSet;
use std::fmt;

use anyhow::Result;

/// A named free parameter of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The gate set used by the IQP ansatz.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// X rotation by a symbolic angle (radians)
    Rx(usize, Symbol),
    /// Controlled Z rotation
    CRz {
        control: usize,
        target: usize,
        theta: Symbol,
    },
}

impl Gate {
    fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::H(q) | Gate::Rx(q, _) => vec![*q],
            Gate::CRz {
                control, target, ..
            } => vec![*control, *target],
        }
    }

    fn symbol(&self) -> Option<&Symbol> {
        match self {
            Gate::H(_) => None,
            Gate::Rx(_, s) => Some(s),
            Gate::CRz { theta, .. } => Some(theta),
        }
    }
}

/// An ordered gate list over a fixed register of qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    n_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            gates: Vec::new(),
        }
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Append a gate, rejecting out-of-range qubits and a controlled gate
    /// whose control and target coincide.
    pub fn push(&mut self, gate: Gate) -> Result<()> {
        let qubits = gate.qubits();
        if let Some(q) = qubits.iter().find(|&&q| q >= self.n_qubits) {
            anyhow::bail!(
                "Gate {gate:?} addresses qubit {q} on a {}-qubit register",
                self.n_qubits
            );
        }
        if qubits.len() == 2 && qubits[0] == qubits[1] {
            anyhow::bail!("Controlled gate {gate:?} uses the same qubit twice");
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Free symbols in order of first appearance.
    pub fn free_symbols(&self) -> Vec<&Symbol> {
        let mut seen = HashSet::new();
        self.gates
            .iter()
            .filter_map(Gate::symbol)
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_out_of_range_qubit() {
        let mut c = Circuit::new(2);
        assert!(c.push(Gate::H(1)).is_ok());
        assert!(c.push(Gate::H(2)).is_err());
        assert!(c
            .push(Gate::CRz {
                control: 0,
                target: 0,
                theta: Symbol::new("a"),
            })
            .is_err());
        assert_eq!(c.gates().len(), 1);
    }

    #[test]
    fn test_free_symbols_deduplicated_in_order() {
        let mut c = Circuit::new(2);
        c.push(Gate::Rx(0, Symbol::new("b"))).unwrap();
        c.push(Gate::Rx(1, Symbol::new("a"))).unwrap();
        c.push(Gate::Rx(1, Symbol::new("b"))).unwrap();
        let names: Vec<&str> = c.free_symbols().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
