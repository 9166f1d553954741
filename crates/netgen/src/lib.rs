//! Synthetic block-structured networks with connectance calibration.
//!
//! A [`NetworkGenerator`] partitions rows and columns into heterogeneous
//! blocks, resolves the calibration scalar (solving for it when a fixed
//! connectance is requested), builds the block probability matrix and
//! thresholds it against uniform draws. Unreachable connectance targets yield
//! [`GenerationOutcome::Infeasible`] instead of an error, so batch sweeps keep
//! running.

#![deny(missing_docs)]

mod config;
mod generator;
mod network;
mod patch;
mod sweep;

pub use config::NetworkConfig;
pub use generator::{resolve_xi, sample_network, NetworkGenerator, Partition};
pub use network::{
    AdjacencyMatrix, GenerationOutcome, NetworkParts, ProbabilityMatrix, SyntheticNetwork,
};
pub use patch::ConfigPatch;
pub use sweep::{sweep, JobStatus, SweepJobReport, SweepPlan, SweepReport};

pub use netgen_blocks::Calibration;
pub use netgen_core::{BlockSizes, NetgenError, NetworkKind};
