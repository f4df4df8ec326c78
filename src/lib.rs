// SPDX-License-Identifier: Apache-2.0

//! Lowers add, subtract and increment over arbitrary-width signed or unsigned
//! operands into ripple-carry networks built only from half-adder, two-input
//! OR and inverter cells.
//!
//! ```
//! use adder_lower::chain::{lower, ArithOp, OpDescriptor};
//! use adder_lower::gate_sim;
//! use adder_lower::network::SignalAllocator;
//! use adder_lower::operand::Operand;
//!
//! let allocator = SignalAllocator::new();
//! let constants = allocator.fresh_constants();
//! let descriptor = OpDescriptor {
//!     op: ArithOp::Add {
//!         a: Operand::fresh(&allocator, 4, false),
//!         b: Operand::fresh(&allocator, 4, false),
//!     },
//!     result_width: 4,
//! };
//! let network = lower(&descriptor, &constants, &allocator).unwrap();
//! assert_eq!(gate_sim::simulate(&descriptor, &network, &constants, 5, 3).unwrap(), 8);
//! ```

pub mod cell;
pub mod chain;
pub mod emit_netlist;
pub mod full_adder;
pub mod gate_sim;
pub mod get_summary_stats;
pub mod integrity;
pub mod lower_config;
pub mod lower_error;
pub mod network;
pub mod operand;
pub mod parallel;
pub mod report_cli_error;

pub use cell::{CellInstance, CellKind, Constants, Signal};
pub use chain::{lower, ArithOp, OpDescriptor, OpKind};
pub use lower_error::WidthError;
pub use network::{Network, NetworkBuilder, SignalAllocator};
pub use operand::Operand;
