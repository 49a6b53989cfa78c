// Circuit backends: the swap-ready abstraction over circuit execution.
//
// A backend takes a compiled circuit plus an assignment of its symbols and
// returns the probability of every computational basis state. The default
// implementation is an exact statevector simulator that runs in-process.

use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::ops::{Add, Mul};

use anyhow::Result;
use tracing::debug;

use super::circuit::{Circuit, Gate, Symbol};

/// Default register limit for the statevector simulator (4096 amplitudes).
pub const DEFAULT_MAX_QUBITS: usize = 12;

/// Trait for executing parameterized circuits.
pub trait Backend: Send + Sync {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// One-time handshake before the first circuit runs.
    fn connect(&self) -> Result<()>;

    /// Run `circuit` with `params` bound and return the probability of each
    /// basis state, indexed so that bit `q` of the index is qubit `q`.
    fn probabilities(&self, circuit: &Circuit, params: &HashMap<Symbol, f64>) -> Result<Vec<f64>>;
}

/// Exact statevector simulator.
#[derive(Debug, Clone)]
pub struct StatevectorBackend {
    max_qubits: usize,
}

impl Default for StatevectorBackend {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl StatevectorBackend {
    pub fn new(max_qubits: usize) -> Self {
        Self { max_qubits }
    }
}

impl Backend for StatevectorBackend {
    fn name(&self) -> &str {
        "statevector"
    }

    fn connect(&self) -> Result<()> {
        debug!(max_qubits = self.max_qubits, "Statevector simulator ready");
        Ok(())
    }

    fn probabilities(&self, circuit: &Circuit, params: &HashMap<Symbol, f64>) -> Result<Vec<f64>> {
        let n = circuit.n_qubits();
        if n > self.max_qubits {
            anyhow::bail!(
                "Circuit needs {n} qubits but the simulator is limited to {}",
                self.max_qubits
            );
        }

        let mut state = vec![Amplitude::ZERO; 1 << n];
        state[0] = Amplitude::ONE;

        for gate in circuit.gates() {
            match gate {
                Gate::H(q) => apply_single(&mut state, *q, hadamard()),
                Gate::Rx(q, s) => apply_single(&mut state, *q, rx(angle(params, s)?)),
                Gate::CRz {
                    control,
                    target,
                    theta,
                } => apply_controlled(&mut state, *control, *target, rz(angle(params, theta)?)),
            }
        }

        Ok(state.iter().map(|a| a.norm_sqr()).collect())
    }
}

fn angle(params: &HashMap<Symbol, f64>, symbol: &Symbol) -> Result<f64> {
    params
        .get(symbol)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("No value bound for circuit symbol {symbol}"))
}

// -- Complex amplitudes and 2x2 gate matrices --

#[derive(Debug, Clone, Copy, PartialEq)]
struct Amplitude {
    re: f64,
    im: f64,
}

impl Amplitude {
    const ZERO: Amplitude = Amplitude { re: 0.0, im: 0.0 };
    const ONE: Amplitude = Amplitude { re: 1.0, im: 0.0 };

    fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl Add for Amplitude {
    type Output = Amplitude;
    fn add(self, rhs: Amplitude) -> Amplitude {
        Amplitude::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Mul for Amplitude {
    type Output = Amplitude;
    fn mul(self, rhs: Amplitude) -> Amplitude {
        Amplitude::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Row-major 2x2 unitary: [[m00, m01], [m10, m11]].
type Matrix2 = [Amplitude; 4];

fn hadamard() -> Matrix2 {
    let h = Amplitude::new(FRAC_1_SQRT_2, 0.0);
    [h, h, h, Amplitude::new(-FRAC_1_SQRT_2, 0.0)]
}

fn rx(theta: f64) -> Matrix2 {
    let c = Amplitude::new((theta / 2.0).cos(), 0.0);
    let s = Amplitude::new(0.0, -(theta / 2.0).sin());
    [c, s, s, c]
}

fn rz(theta: f64) -> Matrix2 {
    let half = theta / 2.0;
    [
        Amplitude::new(half.cos(), -half.sin()),
        Amplitude::ZERO,
        Amplitude::ZERO,
        Amplitude::new(half.cos(), half.sin()),
    ]
}

fn apply_single(state: &mut [Amplitude], qubit: usize, m: Matrix2) {
    let bit = 1 << qubit;
    for i in 0..state.len() {
        if i & bit == 0 {
            mix(state, i, i | bit, m);
        }
    }
}

fn apply_controlled(state: &mut [Amplitude], control: usize, target: usize, m: Matrix2) {
    let cbit = 1 << control;
    let tbit = 1 << target;
    for i in 0..state.len() {
        if i & cbit != 0 && i & tbit == 0 {
            mix(state, i, i | tbit, m);
        }
    }
}

fn mix(state: &mut [Amplitude], zero: usize, one: usize, m: Matrix2) {
    let a = state[zero];
    let b = state[one];
    state[zero] = m[0] * a + m[1] * b;
    state[one] = m[2] * a + m[3] * b;
}
