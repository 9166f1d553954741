#![deny(missing_docs)]
#![doc = "Core error, randomness and partition types shared by the netgen crates."]

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, NetgenError};
pub use rng::{derive_substream_seed, RngHandle};

/// Ordered, immutable sequence of block sizes for one matrix dimension.
///
/// Cloning is cheap and keeps pointing at the same storage. A square
/// configuration hands the row handle to the column dimension, so both
/// dimensions observably share one partition (see [`BlockSizes::shares_storage`]).
#[derive(Clone, PartialEq, Eq)]
pub struct BlockSizes(Arc<[usize]>);

impl BlockSizes {
    /// Wraps an already validated size sequence.
    pub fn new(sizes: Vec<usize>) -> Self {
        Self(Arc::from(sizes))
    }

    /// Returns the sizes as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of blocks in the sequence.
    pub fn block_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of nodes covered by the sequence.
    pub fn node_count(&self) -> usize {
        self.0.iter().sum()
    }

    /// Whether both handles point at the same underlying partition.
    pub fn shares_storage(&self, other: &BlockSizes) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Expands the sizes into a per-node label vector, blocks laid out contiguously.
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = Vec::with_capacity(self.node_count());
        for (block, &size) in self.0.iter().enumerate() {
            labels.extend(std::iter::repeat(block).take(size));
        }
        labels
    }
}

impl Deref for BlockSizes {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Debug for BlockSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Structural flavour of a generated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// Two disjoint node sets, edges only across them.
    Bipartite,
    /// A single node set with symmetric edges and no self loops.
    Unipartite,
}

impl NetworkKind {
    /// Maps the bipartite flag of a configuration onto a kind.
    pub fn from_bipartite(bipartite: bool) -> Self {
        if bipartite {
            NetworkKind::Bipartite
        } else {
            NetworkKind::Unipartite
        }
    }

    /// Lowercase label used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Bipartite => "bipartite",
            NetworkKind::Unipartite => "unipartite",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds `value` to `digits` decimal places.
///
/// Ties are resolved half-to-even on the exact binary value, so `0.125`
/// becomes `0.12` while `0.285` (stored slightly below the tie) becomes `0.28`.
pub fn quantize(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}
