// SPDX-License-Identifier: Apache-2.0

//! Bit-level simulation of a lowered network.

use std::collections::HashMap;

use crate::cell::{Constants, Signal};
use crate::chain::{ArithOp, OpDescriptor};
use crate::network::Network;
use crate::operand::Operand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// An instance read a signal that had no value yet.
    UndefinedInput {
        instance_index: usize,
        signal: Signal,
    },
    /// A result bit is not driven by anything that was evaluated.
    UndefinedResult { signal: Signal },
    /// Integer convenience wrappers only handle up to 64 bits.
    TooWide { width: usize },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::UndefinedInput {
                instance_index,
                signal,
            } => write!(
                f,
                "instance #{} reads {} before it has a value",
                instance_index, signal
            ),
            SimError::UndefinedResult { signal } => {
                write!(f, "result bit {} has no value", signal)
            }
            SimError::TooWide { width } => {
                write!(f, "width {} exceeds the 64-bit simulation limit", width)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Evaluates `network` with `env` holding the values of every signal the
/// network reads but does not drive (constants and operand bits). Returns the
/// result bits, LSb first.
pub fn eval(network: &Network, mut env: HashMap<Signal, bool>) -> Result<Vec<bool>, SimError> {
    // Instances only ever read earlier outputs, so a single pass in creation
    // order suffices.
    for (instance_index, instance) in network.instances.iter().enumerate() {
        let mut inputs = Vec::with_capacity(2);
        for signal in instance.inputs() {
            match env.get(&signal) {
                Some(value) => inputs.push(*value),
                None => {
                    return Err(SimError::UndefinedInput {
                        instance_index,
                        signal,
                    })
                }
            }
        }
        let values = instance.kind().eval(&inputs);
        for (signal, value) in instance.outputs().into_iter().zip(values) {
            env.insert(signal, value);
        }
    }
    network
        .result_bits
        .iter()
        .map(|signal| {
            env.get(signal)
                .copied()
                .ok_or(SimError::UndefinedResult { signal: *signal })
        })
        .collect()
}

/// Binds each bit of `operand` to the corresponding bit of `value`.
pub fn seed_operand(
    env: &mut HashMap<Signal, bool>,
    operand: &Operand,
    value: u64,
) -> Result<(), SimError> {
    if operand.width() > 64 {
        return Err(SimError::TooWide {
            width: operand.width(),
        });
    }
    for (i, signal) in operand.bits().iter().enumerate() {
        env.insert(*signal, (value >> i) & 1 == 1);
    }
    Ok(())
}

pub fn seed_constants(env: &mut HashMap<Signal, bool>, constants: &Constants) {
    env.insert(constants.zero, false);
    env.insert(constants.one, true);
}

/// Packs result bits (LSb first) into an integer.
pub fn bits_to_u64(bits: &[bool]) -> Result<u64, SimError> {
    if bits.len() > 64 {
        return Err(SimError::TooWide { width: bits.len() });
    }
    Ok(bits
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, bit)| acc | ((*bit as u64) << i)))
}

/// Runs the lowered `network` for `descriptor` on integer operand values and
/// returns the raw `result_width`-bit result.
///
/// Operand values are taken modulo their declared widths. For an increment
/// `b` is ignored and the literal operand (if any) is bound to 1.
pub fn simulate(
    descriptor: &OpDescriptor,
    network: &Network,
    constants: &Constants,
    a: u64,
    b: u64,
) -> Result<u64, SimError> {
    let mut env = HashMap::new();
    seed_constants(&mut env, constants);
    match &descriptor.op {
        ArithOp::Add { a: lhs, b: rhs } | ArithOp::Subtract { a: lhs, b: rhs } => {
            seed_operand(&mut env, lhs, a)?;
            seed_operand(&mut env, rhs, b)?;
        }
        ArithOp::Increment { a: lhs, literal } => {
            seed_operand(&mut env, lhs, a)?;
            if let Some(literal) = literal {
                seed_operand(&mut env, literal, 1)?;
            }
        }
    }
    let bits = eval(network, env)?;
    bits_to_u64(&bits)
}
