// SPDX-License-Identifier: Apache-2.0

//! Structural integrity checks for lowered networks.
//!
//! These confirm the properties every lowering is supposed to guarantee: each
//! signal is driven at most once, no instance reads a signal before it exists
//! (so the network is acyclic), and every result bit has a source.

use std::collections::HashSet;

use crate::cell::{Constants, Signal};
use crate::chain::OpDescriptor;
use crate::network::Network;
use crate::operand::Operand;

/// A specific integrity problem found during checking.
#[derive(Debug, PartialEq, Eq)]
pub enum IntegrityFinding {
    /// An instance reads a signal that is neither a primary (constant or
    /// operand bit) nor the output of an earlier instance.
    ForwardReference {
        instance_index: usize,
        signal: Signal,
    },
    /// A signal is driven by more than one instance, or an instance drives a
    /// constant or operand bit.
    MultipleDrivers {
        instance_index: usize,
        signal: Signal,
    },
    /// A result bit is not available anywhere in the network.
    UndrivenResult { signal: Signal },
}

/// Result of running the integrity checker over a network.
#[derive(Debug, PartialEq, Eq)]
pub enum IntegritySummary {
    /// No issues were found.
    Clean,
    /// One or more problems were detected.
    Findings(Vec<IntegrityFinding>),
}

/// Check `network` given the primary signals it is allowed to read.
pub fn check_network(
    network: &Network,
    constants: &Constants,
    operands: &[&Operand],
) -> IntegritySummary {
    let mut available: HashSet<Signal> = HashSet::new();
    available.insert(constants.zero);
    available.insert(constants.one);
    for operand in operands {
        available.extend(operand.bits().iter().copied());
    }

    let mut findings = Vec::new();
    for (instance_index, instance) in network.instances.iter().enumerate() {
        for signal in instance.inputs() {
            if !available.contains(&signal) {
                findings.push(IntegrityFinding::ForwardReference {
                    instance_index,
                    signal,
                });
            }
        }
        for signal in instance.outputs() {
            if !available.insert(signal) {
                findings.push(IntegrityFinding::MultipleDrivers {
                    instance_index,
                    signal,
                });
            }
        }
    }
    for signal in network.result_bits.iter() {
        if !available.contains(signal) {
            findings.push(IntegrityFinding::UndrivenResult { signal: *signal });
        }
    }

    if findings.is_empty() {
        IntegritySummary::Clean
    } else {
        log::warn!("integrity check found {} problem(s)", findings.len());
        IntegritySummary::Findings(findings)
    }
}

/// Checks a network produced by lowering `descriptor`.
pub fn check_lowered(
    descriptor: &OpDescriptor,
    network: &Network,
    constants: &Constants,
) -> IntegritySummary {
    let mut operands = vec![descriptor.op.operand_a()];
    operands.extend(descriptor.op.operand_b());
    check_network(network, constants, &operands)
}
