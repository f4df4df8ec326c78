// SPDX-License-Identifier: Apache-2.0

//! The `NetworkBuilder` accumulates cell instances as a lowering runs and
//! hands back an immutable `Network` when it is done.
//!
//! Signals are minted from a `SignalAllocator`, an atomic counter that may be
//! shared across threads, so fragments built concurrently never collide on a
//! signal id and can be merged afterwards.
//!
//! Basic example usage:
//! ```
//! use adder_lower::network::{NetworkBuilder, SignalAllocator};
//!
//! let allocator = SignalAllocator::new();
//! let a = allocator.fresh();
//! let b = allocator.fresh();
//! let mut builder = NetworkBuilder::new(&allocator);
//! let ha = builder.add_half_adder(a, b);
//! let network = builder.build(vec![ha.sum]);
//! assert_eq!(network.instances.len(), 1);
//! assert_eq!(network.result_width(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::cell::{CellInstance, CellKind, Constants, Signal};

/// Globally unique signal-id source.
#[derive(Debug, Default)]
pub struct SignalAllocator {
    next_id: AtomicUsize,
}

impl SignalAllocator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(0),
        }
    }

    /// Starts allocation at `first_id`, e.g. to continue numbering after the
    /// signals of an enclosing circuit.
    pub fn starting_at(first_id: usize) -> Self {
        Self {
            next_id: AtomicUsize::new(first_id),
        }
    }

    pub fn fresh(&self) -> Signal {
        Signal {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn fresh_vec(&self, count: usize) -> Vec<Signal> {
        (0..count).map(|_| self.fresh()).collect()
    }

    /// Mints a logic-0 / logic-1 pair. Callers that already own constant nets
    /// should build `Constants` directly instead.
    pub fn fresh_constants(&self) -> Constants {
        let zero = self.fresh();
        let one = self.fresh();
        Constants { zero, one }
    }

    /// Number of ids handed out so far (assuming allocation started at zero).
    pub fn allocated(&self) -> usize {
        self.next_id.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfAdderOutput {
    pub sum: Signal,
    pub carry: Signal,
}

/// A lowered fragment: the instances in creation order plus the result bits
/// (LSb at index 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub instances: Vec<CellInstance>,
    pub result_bits: Vec<Signal>,
}

impl Network {
    pub fn result_width(&self) -> usize {
        self.result_bits.len()
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.instances.iter().filter(|i| i.kind() == kind).count()
    }

    /// Every signal driven by some instance of this network.
    pub fn produced_signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.instances.iter().flat_map(|i| i.outputs())
    }
}

pub struct NetworkBuilder<'a> {
    allocator: &'a SignalAllocator,
    instances: Vec<CellInstance>,
}

impl<'a> NetworkBuilder<'a> {
    pub fn new(allocator: &'a SignalAllocator) -> Self {
        Self {
            allocator,
            instances: Vec::new(),
        }
    }

    fn emit(&mut self, instance: CellInstance) {
        log::trace!("emit #{}: {:?}", self.instances.len(), instance);
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Emits a 1-bit half adder: `sum = a ^ b`, `carry = a & b`.
    pub fn add_half_adder(&mut self, a: Signal, b: Signal) -> HalfAdderOutput {
        let sum = self.allocator.fresh();
        let cout = self.allocator.fresh();
        self.emit(CellInstance::HalfAdder { a, b, sum, cout });
        HalfAdderOutput { sum, carry: cout }
    }

    pub fn add_or2(&mut self, a: Signal, b: Signal) -> Signal {
        let x = self.allocator.fresh();
        self.emit(CellInstance::Or2 { a, b, x });
        x
    }

    pub fn add_not(&mut self, a: Signal) -> Signal {
        let y = self.allocator.fresh();
        self.emit(CellInstance::Not { a, y });
        y
    }

    pub fn build(self, result_bits: Vec<Signal>) -> Network {
        Network {
            instances: self.instances,
            result_bits,
        }
    }
}
