// SPDX-License-Identifier: Apache-2.0

//! Ripple-carry chains for the arithmetic operations we lower:
//!
//! * `lower_add`: half adder at bit 0, composed full adders above it
//! * `lower_subtract`: `a + !b + 1`, the `+1` folded into the carry-in
//! * `lower_increment`: a chain of half adders seeded by the literal's bit
//!
//! All three walk bit positions `0..result_width`, reading operand bits
//! through `Operand::bit_at` (so narrower operands are zero/sign extended and
//! wider ones are truncated) and threading carries through a vector one
//! element longer than the result. The final carry-out is built but never
//! exposed as a result bit.

use serde::{Deserialize, Serialize};

use crate::cell::{Constants, Signal};
use crate::full_adder::full_adder;
use crate::lower_error::WidthError;
use crate::network::{Network, NetworkBuilder, SignalAllocator};
use crate::operand::Operand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Add,
    Subtract,
    Increment,
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OpKind::Add => "add",
            OpKind::Subtract => "sub",
            OpKind::Increment => "inc",
        };
        write!(f, "{}", s)
    }
}

/// An arithmetic operation together with its operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add {
        a: Operand,
        b: Operand,
    },
    Subtract {
        a: Operand,
        b: Operand,
    },
    /// `a + 1`.
    ///
    /// Only select this when the second operand of the original addition is
    /// statically known to be the literal 1; nothing here verifies that.
    /// `literal` is the 1-bit operand carrying that literal as it is
    /// represented upstream; when absent the logic-1 constant stands in for
    /// it.
    Increment { a: Operand, literal: Option<Operand> },
}

impl ArithOp {
    pub fn kind(&self) -> OpKind {
        match self {
            ArithOp::Add { .. } => OpKind::Add,
            ArithOp::Subtract { .. } => OpKind::Subtract,
            ArithOp::Increment { .. } => OpKind::Increment,
        }
    }

    pub fn operand_a(&self) -> &Operand {
        match self {
            ArithOp::Add { a, .. } | ArithOp::Subtract { a, .. } | ArithOp::Increment { a, .. } => {
                a
            }
        }
    }

    /// The second operand, if the operation has an explicit one.
    pub fn operand_b(&self) -> Option<&Operand> {
        match self {
            ArithOp::Add { b, .. } | ArithOp::Subtract { b, .. } => Some(b),
            ArithOp::Increment { literal, .. } => literal.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpDescriptor {
    pub op: ArithOp,
    pub result_width: usize,
}

fn check_result_width(result_width: usize) -> Result<(), WidthError> {
    if result_width == 0 {
        Err(WidthError::ZeroResultWidth)
    } else {
        Ok(())
    }
}

/// Emits `a + b` truncated to `result_width` bits.
pub fn lower_add(
    builder: &mut NetworkBuilder,
    a: &Operand,
    b: &Operand,
    result_width: usize,
    constants: &Constants,
) -> Result<Vec<Signal>, WidthError> {
    check_result_width(result_width)?;
    if result_width == 1 {
        // The carry out of this half adder is dropped along with the rest of
        // the high-order result.
        let ha = builder.add_half_adder(a.bit_at(0, constants)?, b.bit_at(0, constants)?);
        return Ok(vec![ha.sum]);
    }

    let mut carries: Vec<Signal> = Vec::with_capacity(result_width + 1);
    carries.push(constants.zero);
    let mut sums: Vec<Signal> = Vec::with_capacity(result_width);
    for i in 0..result_width {
        let a_bit = a.bit_at(i, constants)?;
        let b_bit = b.bit_at(i, constants)?;
        let (sum, carry) = if i == 0 {
            // carry[0] is structurally zero, so there is no carry-in to add.
            let ha = builder.add_half_adder(a_bit, b_bit);
            (ha.sum, ha.carry)
        } else {
            let fa = full_adder(builder, a_bit, b_bit, carries[i]);
            (fa.sum, fa.carry)
        };
        sums.push(sum);
        carries.push(carry);
    }
    debug_assert_eq!(carries.len(), result_width + 1);
    Ok(sums)
}

/// Emits `a - b` (as `a + !b + 1`) truncated to `result_width` bits.
pub fn lower_subtract(
    builder: &mut NetworkBuilder,
    a: &Operand,
    b: &Operand,
    result_width: usize,
    constants: &Constants,
) -> Result<Vec<Signal>, WidthError> {
    check_result_width(result_width)?;
    let mut carries: Vec<Signal> = Vec::with_capacity(result_width + 1);
    carries.push(constants.one);
    let mut diffs: Vec<Signal> = Vec::with_capacity(result_width);
    for i in 0..result_width {
        let a_bit = a.bit_at(i, constants)?;
        // Extend b under its own signedness, then invert.
        let b_inv = builder.add_not(b.bit_at(i, constants)?);
        let fa = full_adder(builder, a_bit, b_inv, carries[i]);
        diffs.push(fa.sum);
        carries.push(fa.carry);
    }
    debug_assert_eq!(carries.len(), result_width + 1);
    Ok(diffs)
}

/// Emits `a + 1` truncated to `result_width` bits, where `literal_bit` is the
/// single bit of the literal 1.
///
/// The caller is responsible for only choosing this lowering when the addend
/// really is the literal 1.
pub fn lower_increment(
    builder: &mut NetworkBuilder,
    a: &Operand,
    literal_bit: Signal,
    result_width: usize,
    constants: &Constants,
) -> Result<Vec<Signal>, WidthError> {
    check_result_width(result_width)?;
    let mut carries: Vec<Signal> = Vec::with_capacity(result_width + 1);
    carries.push(literal_bit);
    let mut sums: Vec<Signal> = Vec::with_capacity(result_width);
    for i in 0..result_width {
        let ha = builder.add_half_adder(a.bit_at(i, constants)?, carries[i]);
        sums.push(ha.sum);
        carries.push(ha.carry);
    }
    debug_assert_eq!(carries.len(), result_width + 1);
    Ok(sums)
}

/// Lowers a single operation into a fresh `Network`, allocating its signals
/// from `allocator`.
pub fn lower(
    descriptor: &OpDescriptor,
    constants: &Constants,
    allocator: &SignalAllocator,
) -> Result<Network, WidthError> {
    check_result_width(descriptor.result_width)?;
    let result_width = descriptor.result_width;
    let mut builder = NetworkBuilder::new(allocator);
    let result_bits = match &descriptor.op {
        ArithOp::Add { a, b } => lower_add(&mut builder, a, b, result_width, constants)?,
        ArithOp::Subtract { a, b } => {
            lower_subtract(&mut builder, a, b, result_width, constants)?
        }
        ArithOp::Increment { a, literal } => {
            let literal_bit = match literal {
                Some(literal) => literal.bit_at(0, constants)?,
                None => constants.one,
            };
            lower_increment(&mut builder, a, literal_bit, result_width, constants)?
        }
    };
    let network = builder.build(result_bits);
    log::debug!(
        "lowered {} a_width={} b_width={:?} result_width={} into {} instances",
        descriptor.op.kind(),
        descriptor.op.operand_a().width(),
        descriptor.op.operand_b().map(|b| b.width()),
        result_width,
        network.instances.len()
    );
    Ok(network)
}
