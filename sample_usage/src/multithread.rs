// SPDX-License-Identifier: Apache-2.0

//! Example of lowering independent operations on several threads that share
//! one signal allocator.

use rayon::prelude::*;

use adder_lower::chain::{lower, ArithOp, OpDescriptor};
use adder_lower::gate_sim;
use adder_lower::network::SignalAllocator;
use adder_lower::operand::Operand;
use adder_lower::parallel::merge_networks;

pub fn validate_all_threads_lower_increment() {
    let allocator = SignalAllocator::new();
    let constants = allocator.fresh_constants();

    // One 32-bit increment per available core, each built on its own thread.
    let lowered: Vec<_> = (0..num_cpus::get() as u64)
        .into_par_iter()
        .map(|i| {
            let descriptor = OpDescriptor {
                op: ArithOp::Increment {
                    a: Operand::fresh(&allocator, 32, false),
                    literal: None,
                },
                result_width: 32,
            };
            let network = lower(&descriptor, &constants, &allocator).expect("lower failed");
            let result = gate_sim::simulate(&descriptor, &network, &constants, i, 0)
                .expect("simulate failed");
            (i, result, network)
        })
        .collect();

    for (i, result, _) in lowered.iter() {
        assert_eq!(*result, i + 1);
    }

    let merged = merge_networks(lowered.into_iter().map(|(_, _, n)| n).collect());
    assert_eq!(merged.instances.len(), 32 * num_cpus::get());
}
