// SPDX-License-Identifier: Apache-2.0

mod multithread;

use adder_lower::chain::{lower, ArithOp, OpDescriptor};
use adder_lower::gate_sim;
use adder_lower::get_summary_stats::get_summary_stats;
use adder_lower::network::SignalAllocator;
use adder_lower::operand::Operand;

/// Lowers an 8-bit signed subtract and checks it computes `20 - 62`.
fn validate_sub8() -> Result<(), Box<dyn std::error::Error>> {
    let allocator = SignalAllocator::new();
    let constants = allocator.fresh_constants();
    let descriptor = OpDescriptor {
        op: ArithOp::Subtract {
            a: Operand::fresh(&allocator, 8, true),
            b: Operand::fresh(&allocator, 8, true),
        },
        result_width: 8,
    };
    let network = lower(&descriptor, &constants, &allocator)?;
    log::info!("sub8 stats: {:?}", get_summary_stats(&network));
    let result = gate_sim::simulate(&descriptor, &network, &constants, 20, 62)?;
    let want = (20i8 - 62i8) as u8 as u64;
    if result != want {
        return Err(format!("sub8 produced {:#x}, want {:#x}", result, want).into());
    }
    Ok(())
}

fn main() {
    let _ = env_logger::try_init();
    let result = validate_sub8();
    println!("sub8 validation result: {:?}", result);
    multithread::validate_all_threads_lower_increment();
    println!("multithreaded increment lowering validated");
}

#[test]
fn test_validate_sub8() {
    let _ = env_logger::try_init();
    validate_sub8().expect("validation should succeed");
}
