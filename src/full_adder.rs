// SPDX-License-Identifier: Apache-2.0

//! A 1-bit full adder composed from the cell library: two half adders and an
//! OR of their carries.
//!
//! ```text
//!   (sum1, c1) = HA(a, b)            sum1 = a ^ b,  c1 = a & b
//!   (sum,  c2) = HA(sum1, carry_in)  sum = a ^ b ^ cin, c2 = (a ^ b) & cin
//!   carry_out  = OR2(c1, c2)
//! ```
//!
//! `c1` and `c2` can never both be true, so the OR computes the majority
//! function exactly.

use crate::cell::Signal;
use crate::network::NetworkBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullAdderOutput {
    pub sum: Signal,
    pub carry: Signal,
}

/// Appends exactly two half adders and one OR2, in that order.
pub fn full_adder(
    builder: &mut NetworkBuilder,
    a: Signal,
    b: Signal,
    carry_in: Signal,
) -> FullAdderOutput {
    let first = builder.add_half_adder(a, b);
    let second = builder.add_half_adder(first.sum, carry_in);
    let carry = builder.add_or2(first.carry, second.carry);
    FullAdderOutput {
        sum: second.sum,
        carry,
    }
}
