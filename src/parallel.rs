// SPDX-License-Identifier: Apache-2.0

//! Lowering many independent operations at once.
//!
//! A single ripple chain is inherently sequential, but unrelated operations
//! share nothing except the signal-id source, which is atomic. Each worker
//! builds its own `Network` and the fragments are merged afterwards.

use rayon::prelude::*;
use serde::Serialize;

use crate::cell::{CellInstance, Constants, Signal};
use crate::chain::{lower, OpDescriptor};
use crate::lower_error::WidthError;
use crate::network::{Network, SignalAllocator};

/// Lowers each descriptor on the rayon pool. Results are returned in input
/// order; the first error encountered is reported.
pub fn lower_all(
    descriptors: &[OpDescriptor],
    constants: &Constants,
    allocator: &SignalAllocator,
) -> Result<Vec<Network>, WidthError> {
    log::debug!(
        "lowering {} operations on {} threads",
        descriptors.len(),
        rayon::current_num_threads()
    );
    descriptors
        .par_iter()
        .map(|descriptor| lower(descriptor, constants, allocator))
        .collect()
}

/// Several fragments concatenated into one instance list. `outputs[i]` holds
/// the result bits of the `i`th merged fragment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MergedNetwork {
    pub instances: Vec<CellInstance>,
    pub outputs: Vec<Vec<Signal>>,
}

/// Merges fragments in order. Each fragment only reads its own outputs and
/// primaries, so concatenation preserves the no-forward-reference property.
pub fn merge_networks(networks: Vec<Network>) -> MergedNetwork {
    let mut merged = MergedNetwork::default();
    for network in networks {
        merged.instances.extend(network.instances);
        merged.outputs.push(network.result_bits);
    }
    merged
}
