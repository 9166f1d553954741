#![deny(missing_docs)]

//! Numerical collaborators of the network generator: heterogeneous block
//! partitioning, the block probability model and the connectance calibrator.

mod calibrate;
mod partition;
mod probability;

pub use calibrate::{calibrate, max_connectance, Calibration, XI_MAX};
pub use partition::heterogeneous_block_sizes;
pub use probability::{probability_matrix, BlockAffinity, ExponentialBlockModel, ProbabilityModel};
