// SPDX-License-Identifier: Apache-2.0

/// The one failure mode of lowering: an operand (or requested result) with no
/// bits in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidthError {
    /// An operand of declared width zero was read through bit extraction.
    ZeroWidthOperand { position: usize },
    /// An operation descriptor asked for a zero-bit result.
    ZeroResultWidth,
}

impl std::fmt::Display for WidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthError::ZeroWidthOperand { position } => write!(
                f,
                "width error: cannot extract bit {} from a zero-width operand",
                position
            ),
            WidthError::ZeroResultWidth => {
                write!(f, "width error: result width must be greater than zero")
            }
        }
    }
}

impl std::error::Error for WidthError {}
