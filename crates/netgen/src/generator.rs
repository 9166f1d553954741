use nalgebra::DMatrix;
use netgen_blocks::{
    calibrate, heterogeneous_block_sizes, max_connectance, probability_matrix, Calibration,
    ExponentialBlockModel, ProbabilityModel,
};
use netgen_core::errors::NetgenError;
use netgen_core::rng::RngHandle;
use netgen_core::{quantize, BlockSizes, NetworkKind};
use rand::Rng;
use tracing::debug;

use crate::config::NetworkConfig;
use crate::network::{GenerationOutcome, SyntheticNetwork};
use crate::patch::ConfigPatch;

/// Row and column block sizes of the current configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    rows: BlockSizes,
    columns: BlockSizes,
}

impl Partition {
    /// Draws the partition for `config`; square shapes reuse the row partition.
    pub fn compute(config: &NetworkConfig, rng: &mut RngHandle) -> Result<Self, NetgenError> {
        let rows = heterogeneous_block_sizes(
            config.rows,
            config.block_number,
            config.alpha,
            config.min_block_size,
            rng,
        )?;
        let columns = if config.rows == config.columns {
            rows.clone()
        } else {
            heterogeneous_block_sizes(
                config.columns,
                config.block_number,
                config.alpha,
                config.min_block_size,
                rng,
            )?
        };
        debug!(rows = ?rows, columns = ?columns, "computed block partition");
        Ok(Self { rows, columns })
    }

    /// Row block sizes.
    pub fn rows(&self) -> &BlockSizes {
        &self.rows
    }

    /// Column block sizes.
    pub fn columns(&self) -> &BlockSizes {
        &self.columns
    }

    /// Whether both dimensions share one partition.
    pub fn is_shared(&self) -> bool {
        self.rows.shares_storage(&self.columns)
    }

    /// Ceiling on connectance from pairing blocks by index.
    pub fn max_connectance(&self) -> f64 {
        max_connectance(
            &self.rows,
            &self.columns,
            self.rows.node_count(),
            self.columns.node_count(),
        )
    }
}

/// Resolves the calibration scalar for `config` over `partition`.
///
/// With a fixed connectance the calibrator solves for `xi`; otherwise
/// `link_density` rounded to two decimals is used as is.
pub fn resolve_xi(config: &NetworkConfig, partition: &Partition) -> Result<Calibration, NetgenError> {
    let model = ExponentialBlockModel::new(config.block_number, config.preference, config.mixing);
    if config.fixed_connectance {
        return calibrate(
            partition.rows(),
            partition.columns(),
            config.rows,
            config.columns,
            config.link_density,
            &model,
        );
    }
    let xi = quantize(config.link_density, 2);
    Ok(Calibration::Feasible {
        xi,
        max_connectance: partition.max_connectance(),
        expected_connectance: model.expected_connectance(partition.rows(), partition.columns(), xi),
    })
}

/// Thresholds the probability matrix against uniform draws.
///
/// Unipartite adjacency keeps the strict upper triangle and mirrors it, so the
/// draws below the diagonal are discarded.
pub fn sample_network(
    config: &NetworkConfig,
    partition: &Partition,
    xi: f64,
    rng: &mut RngHandle,
) -> Result<SyntheticNetwork, NetgenError> {
    let probabilities = probability_matrix(
        config.rows,
        config.columns,
        config.block_number,
        partition.rows(),
        partition.columns(),
        xi,
        config.preference,
        config.mixing,
    )?;
    let draws = DMatrix::<f64>::from_fn(config.rows, config.columns, |_, _| rng.gen::<f64>());
    let mut adjacency = probabilities.zip_map(&draws, |p, u| u8::from(p > u));

    let kind = config.net_type();
    if kind == NetworkKind::Unipartite {
        adjacency.fill_diagonal(0);
        let upper = adjacency.upper_triangle();
        adjacency = &upper + &upper.transpose();
    }

    Ok(SyntheticNetwork {
        adjacency,
        probabilities,
        row_labels: partition.rows().labels(),
        col_labels: partition.columns().labels(),
        kind,
        xi,
    })
}

/// Stateful, reconfigurable entry point for network generation.
///
/// The generator caches the block partition between calls and recomputes it
/// only when rows, columns or the block count change. Feasibility is resolved
/// afresh on every call.
#[derive(Debug, Clone)]
pub struct NetworkGenerator {
    config: NetworkConfig,
    partition: Partition,
    rng: RngHandle,
}

impl NetworkGenerator {
    /// Builds the generator and its initial partition.
    ///
    /// Squareness of unipartite configurations is checked on each call, not here.
    pub fn new(config: NetworkConfig) -> Result<Self, NetgenError> {
        let mut rng = RngHandle::from_seed(config.seed);
        let partition = Partition::compute(&config, &mut rng)?;
        config.check_density()?;
        Ok(Self {
            config,
            partition,
            rng,
        })
    }

    /// Builds a generator and runs a single generation with the given configuration.
    pub fn generate(config: NetworkConfig) -> Result<GenerationOutcome, NetgenError> {
        Self::new(config)?.call(&ConfigPatch::default())
    }

    /// Current configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Cached partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Row and column block sizes.
    pub fn block_sizes(&self) -> (&BlockSizes, &BlockSizes) {
        (self.partition.rows(), self.partition.columns())
    }

    /// Bipartite or unipartite.
    pub fn net_type(&self) -> NetworkKind {
        self.config.net_type()
    }

    /// Resolves the calibration scalar for the current state.
    pub fn resolve_xi(&self) -> Result<Calibration, NetgenError> {
        resolve_xi(&self.config, &self.partition)
    }

    /// Applies `patch` and generates a network.
    ///
    /// The patch is validated on a copy of the configuration; on error the
    /// generator keeps its previous configuration, partition and RNG state.
    /// Changing rows, columns or the block count recomputes the partition
    /// before feasibility is evaluated. `P` and `mu` are rounded to two
    /// decimals.
    pub fn call(&mut self, patch: &ConfigPatch) -> Result<GenerationOutcome, NetgenError> {
        let mut candidate = self.config.clone();
        let needs_repartition = patch.apply(&mut candidate);
        let mut rng = match patch.seed {
            Some(seed) => RngHandle::from_seed(seed),
            None => self.rng.clone(),
        };

        let partition = if needs_repartition {
            Partition::compute(&candidate, &mut rng)?
        } else {
            self.partition.clone()
        };

        candidate.preference = quantize(candidate.preference, 2);
        candidate.mixing = quantize(candidate.mixing, 2);
        candidate.check_density()?;
        candidate.check_shape()?;

        self.config = candidate;
        self.partition = partition;
        self.rng = rng;
        self.synthetic_network()
    }

    /// Runs calibration and sampling on the current state without changes.
    pub fn synthetic_network(&mut self) -> Result<GenerationOutcome, NetgenError> {
        match resolve_xi(&self.config, &self.partition)? {
            Calibration::Infeasible {
                max_connectance,
                target,
            } => Ok(GenerationOutcome::Infeasible {
                max_connectance,
                target,
            }),
            Calibration::Feasible { xi, .. } => {
                sample_network(&self.config, &self.partition, xi, &mut self.rng)
                    .map(GenerationOutcome::Generated)
            }
        }
    }
}
