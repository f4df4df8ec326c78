// SPDX-License-Identifier: Apache-2.0

//! The fixed cell vocabulary that lowered arithmetic is expressed in.
//!
//! There are exactly three kinds of cell: a half adder, a two-input OR and an
//! inverter. Every other structure (full adders, ripple chains) is composed
//! out of these.

use serde::{Deserialize, Serialize};

/// Handle for a single boolean wire.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Signal {
    pub id: usize,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.id)
    }
}

/// The reserved logic-0 / logic-1 nets, owned by the surrounding circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constants {
    pub zero: Signal,
    pub one: Signal,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum CellKind {
    HalfAdder,
    Or2,
    Not,
}

impl CellKind {
    pub fn input_ports(&self) -> &'static [&'static str] {
        match self {
            CellKind::HalfAdder => &["A", "B"],
            CellKind::Or2 => &["A", "B"],
            CellKind::Not => &["A"],
        }
    }

    pub fn output_ports(&self) -> &'static [&'static str] {
        match self {
            CellKind::HalfAdder => &["SUM", "COUT"],
            CellKind::Or2 => &["X"],
            CellKind::Not => &["Y"],
        }
    }

    /// Evaluates the cell's truth table. `inputs` is in `input_ports()` order
    /// and the result is in `output_ports()` order.
    pub fn eval(&self, inputs: &[bool]) -> Vec<bool> {
        assert_eq!(
            inputs.len(),
            self.input_ports().len(),
            "{:?} takes {} inputs",
            self,
            self.input_ports().len()
        );
        match self {
            CellKind::HalfAdder => vec![inputs[0] ^ inputs[1], inputs[0] & inputs[1]],
            CellKind::Or2 => vec![inputs[0] | inputs[1]],
            CellKind::Not => vec![!inputs[0]],
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CellKind::HalfAdder => "half_adder",
            CellKind::Or2 => "or2",
            CellKind::Not => "not",
        };
        write!(f, "{}", s)
    }
}

/// One placed cell. Port bindings are fixed by the variant, so a malformed
/// instance cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellInstance {
    HalfAdder {
        a: Signal,
        b: Signal,
        sum: Signal,
        cout: Signal,
    },
    Or2 {
        a: Signal,
        b: Signal,
        x: Signal,
    },
    Not {
        a: Signal,
        y: Signal,
    },
}

impl CellInstance {
    pub fn kind(&self) -> CellKind {
        match self {
            CellInstance::HalfAdder { .. } => CellKind::HalfAdder,
            CellInstance::Or2 { .. } => CellKind::Or2,
            CellInstance::Not { .. } => CellKind::Not,
        }
    }

    /// Input signals in `kind().input_ports()` order.
    pub fn inputs(&self) -> Vec<Signal> {
        match *self {
            CellInstance::HalfAdder { a, b, .. } => vec![a, b],
            CellInstance::Or2 { a, b, .. } => vec![a, b],
            CellInstance::Not { a, .. } => vec![a],
        }
    }

    /// Output signals in `kind().output_ports()` order.
    pub fn outputs(&self) -> Vec<Signal> {
        match *self {
            CellInstance::HalfAdder { sum, cout, .. } => vec![sum, cout],
            CellInstance::Or2 { x, .. } => vec![x],
            CellInstance::Not { y, .. } => vec![y],
        }
    }

    /// `(port name, signal)` pairs for every port, inputs first.
    pub fn port_bindings(&self) -> Vec<(&'static str, Signal)> {
        let kind = self.kind();
        let ins = kind.input_ports().iter().copied().zip(self.inputs());
        let outs = kind.output_ports().iter().copied().zip(self.outputs());
        ins.chain(outs).collect()
    }
}
