use netgen_core::errors::{ErrorInfo, NetgenError};
use netgen_core::rng::derive_substream_seed;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::NetworkConfig;
use crate::generator::NetworkGenerator;
use crate::network::GenerationOutcome;
use crate::patch::ConfigPatch;

/// Grid of block counts and densities explored from a base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Configuration every job starts from.
    pub base: NetworkConfig,
    /// Block counts to try; empty means the base value only.
    #[serde(default)]
    pub block_numbers: Vec<usize>,
    /// Densities to try; empty means the base value only.
    #[serde(default)]
    pub link_densities: Vec<f64>,
    /// Independently seeded runs per grid point.
    #[serde(default = "SweepPlan::default_replicates")]
    pub replicates: usize,
}

impl SweepPlan {
    const fn default_replicates() -> usize {
        1
    }

    /// Parses a plan from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self, NetgenError> {
        serde_yaml::from_str(input)
            .map_err(|err| NetgenError::Serde(ErrorInfo::new("yaml-decode", err.to_string())))
    }
}

/// How a sweep job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// A network was sampled.
    Generated,
    /// The connectance target exceeded the partition ceiling.
    Infeasible,
    /// The patched configuration was rejected.
    Error,
}

/// Summary of one sweep job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepJobReport {
    /// Position of the job in the sweep; also its substream id.
    pub index: usize,
    /// Block count used by the job.
    pub block_number: usize,
    /// Density target or scalar used by the job.
    pub link_density: f64,
    /// Replicate number within the grid point.
    pub replicate: usize,
    /// Seed derived for the job.
    pub seed: u64,
    /// Outcome of the job.
    pub status: JobStatus,
    /// Calibration scalar, when a network was generated.
    pub xi: Option<f64>,
    /// Connectance ceiling of the job's partition, when known.
    pub max_connectance: Option<f64>,
    /// Connectance of the sampled network.
    pub realized_connectance: Option<f64>,
    /// Error message for rejected jobs.
    pub error: Option<String>,
}

/// Per-job results of a sweep, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// One entry per job.
    pub jobs: Vec<SweepJobReport>,
}

impl SweepReport {
    /// Number of jobs that ended with `status`.
    pub fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }
}

/// Runs every `(block_number, link_density, replicate)` combination of `plan`.
///
/// Only an invalid base configuration aborts the sweep. Infeasible targets and
/// per-job configuration errors are recorded in the report and the sweep moves on.
pub fn sweep(plan: &SweepPlan) -> Result<SweepReport, NetgenError> {
    let mut generator = NetworkGenerator::new(plan.base.clone())?;
    let block_numbers = non_empty(&plan.block_numbers, plan.base.block_number);
    let densities = non_empty(&plan.link_densities, plan.base.link_density);

    let mut jobs = Vec::new();
    for &block_number in &block_numbers {
        for &link_density in &densities {
            for replicate in 0..plan.replicates.max(1) {
                let index = jobs.len();
                let seed = derive_substream_seed(plan.base.seed, index as u64);
                let patch = ConfigPatch {
                    block_number: Some(block_number),
                    link_density: Some(link_density),
                    seed: Some(seed),
                    ..ConfigPatch::default()
                };
                let mut job = SweepJobReport {
                    index,
                    block_number,
                    link_density,
                    replicate,
                    seed,
                    status: JobStatus::Error,
                    xi: None,
                    max_connectance: None,
                    realized_connectance: None,
                    error: None,
                };
                match generator.call(&patch) {
                    Ok(GenerationOutcome::Generated(network)) => {
                        job.status = JobStatus::Generated;
                        job.xi = Some(network.xi);
                        job.max_connectance = Some(generator.partition().max_connectance());
                        job.realized_connectance = Some(network.realized_connectance());
                    }
                    Ok(GenerationOutcome::Infeasible {
                        max_connectance, ..
                    }) => {
                        job.status = JobStatus::Infeasible;
                        job.max_connectance = Some(max_connectance);
                    }
                    Err(err) => job.error = Some(err.to_string()),
                }
                jobs.push(job);
            }
        }
    }

    let report = SweepReport { jobs };
    info!(
        jobs = report.jobs.len(),
        generated = report.count(JobStatus::Generated),
        infeasible = report.count(JobStatus::Infeasible),
        failed = report.count(JobStatus::Error),
        "sweep finished"
    );
    Ok(report)
}

fn non_empty<T: Copy>(values: &[T], fallback: T) -> Vec<T> {
    if values.is_empty() {
        vec![fallback]
    } else {
        values.to_vec()
    }
}
