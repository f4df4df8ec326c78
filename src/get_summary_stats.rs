// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use serde::Serialize;

use crate::cell::{CellKind, Signal};
use crate::network::Network;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SummaryStats {
    pub instances: usize,
    pub half_adders: usize,
    pub or2s: usize,
    pub nots: usize,
    pub result_width: usize,
    /// Number of cells on the longest path from any primary to a result bit.
    pub deepest_path: usize,
}

/// Returns the cell depth of every signal driven in `network`. Signals not
/// driven by the network (constants, operand bits) are at depth 0.
pub fn get_signal_depths(network: &Network) -> HashMap<Signal, usize> {
    let mut depths: HashMap<Signal, usize> = HashMap::new();
    for instance in network.instances.iter() {
        let depth = 1 + instance
            .inputs()
            .iter()
            .map(|s| depths.get(s).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        for output in instance.outputs() {
            depths.insert(output, depth);
        }
    }
    depths
}

pub fn get_summary_stats(network: &Network) -> SummaryStats {
    let depths = get_signal_depths(network);
    let deepest_path = network
        .result_bits
        .iter()
        .map(|s| depths.get(s).copied().unwrap_or(0))
        .max()
        .unwrap_or(0);
    log::info!("Deepest result bit depth: {}", deepest_path);
    SummaryStats {
        instances: network.instances.len(),
        half_adders: network.count_kind(CellKind::HalfAdder),
        or2s: network.count_kind(CellKind::Or2),
        nots: network.count_kind(CellKind::Not),
        result_width: network.result_width(),
        deepest_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{lower, ArithOp, OpDescriptor};
    use crate::network::SignalAllocator;
    use crate::operand::Operand;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_for_four_bit_add() {
        let allocator = SignalAllocator::new();
        let constants = allocator.fresh_constants();
        let descriptor = OpDescriptor {
            op: ArithOp::Add {
                a: Operand::fresh(&allocator, 4, false),
                b: Operand::fresh(&allocator, 4, false),
            },
            result_width: 4,
        };
        let network = lower(&descriptor, &constants, &allocator).unwrap();
        // Bit 0's carry is at depth 1; each full adder adds two levels of
        // carry (HA then OR2) and the top sum sits one HA past the incoming
        // carry.
        assert_eq!(
            get_summary_stats(&network),
            SummaryStats {
                instances: 10,
                half_adders: 7,
                or2s: 3,
                nots: 0,
                result_width: 4,
                deepest_path: 6,
            }
        );
    }
}
