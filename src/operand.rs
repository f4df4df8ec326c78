// SPDX-License-Identifier: Apache-2.0

//! Operands and their (conceptually infinite) zero/sign extension.

use serde::{Deserialize, Serialize};

use crate::cell::{Constants, Signal};
use crate::lower_error::WidthError;
use crate::network::SignalAllocator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    /// In this representation index 0 is the LSb, the last index is the MSb.
    bits: Vec<Signal>,
    pub signed: bool,
}

impl Operand {
    pub fn new(bits: Vec<Signal>, signed: bool) -> Self {
        Self { bits, signed }
    }

    pub fn unsigned(bits: Vec<Signal>) -> Self {
        Self::new(bits, false)
    }

    pub fn signed(bits: Vec<Signal>) -> Self {
        Self::new(bits, true)
    }

    /// An operand whose bits are `width` freshly minted primary-input signals.
    pub fn fresh(allocator: &SignalAllocator, width: usize, signed: bool) -> Self {
        Self::new(allocator.fresh_vec(width), signed)
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &[Signal] {
        &self.bits
    }

    /// Returns the signal for bit `position`, extending past the declared
    /// width: sign extension reuses the MSb signal itself, zero extension
    /// yields the caller's logic-0 net. No cells are created.
    pub fn bit_at(&self, position: usize, constants: &Constants) -> Result<Signal, WidthError> {
        let Some(msb) = self.bits.last() else {
            return Err(WidthError::ZeroWidthOperand { position });
        };
        if let Some(bit) = self.bits.get(position) {
            Ok(*bit)
        } else if self.signed {
            Ok(*msb)
        } else {
            Ok(constants.zero)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn setup() -> (SignalAllocator, Constants) {
        let allocator = SignalAllocator::new();
        let constants = allocator.fresh_constants();
        (allocator, constants)
    }

    #[test]
    fn test_in_range_bits_are_returned_unchanged() {
        let (allocator, constants) = setup();
        let operand = Operand::fresh(&allocator, 3, false);
        for i in 0..3 {
            assert_eq!(operand.bit_at(i, &constants).unwrap(), operand.bits()[i]);
        }
    }

    #[test_case(3; "just past the msb")]
    #[test_case(64; "far past the msb")]
    fn test_signed_extension_reuses_msb(position: usize) {
        let (allocator, constants) = setup();
        let operand = Operand::fresh(&allocator, 3, true);
        let msb = operand.bit_at(2, &constants).unwrap();
        assert_eq!(operand.bit_at(position, &constants).unwrap(), msb);
    }

    #[test_case(3)]
    #[test_case(17)]
    fn test_unsigned_extension_is_logic_zero(position: usize) {
        let (allocator, constants) = setup();
        let operand = Operand::fresh(&allocator, 3, false);
        assert_eq!(operand.bit_at(position, &constants).unwrap(), constants.zero);
    }

    #[test_case(false, 0)]
    #[test_case(true, 0)]
    #[test_case(true, 5)]
    fn test_zero_width_is_rejected(signed: bool, position: usize) {
        let (_, constants) = setup();
        let operand = Operand::new(vec![], signed);
        assert_eq!(
            operand.bit_at(position, &constants),
            Err(WidthError::ZeroWidthOperand { position })
        );
    }
}
