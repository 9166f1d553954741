use nalgebra::DMatrix;
use netgen_core::errors::{ErrorInfo, NetgenError};
use serde::{Deserialize, Serialize};

/// Block-to-block linking propensities derived from preference and mixing.
///
/// Within-block affinity is always one. Between blocks `k != l` the affinity is
/// `(1 - P) * ((1 - mu) * 2^-(|k - l| - 1) + mu)`: `P` pulls mass back inside
/// the blocks, `mu` spreads the remaining cross-block mass uniformly instead of
/// concentrating it on neighbouring blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAffinity {
    block_number: usize,
    preference: f64,
    mixing: f64,
}

impl BlockAffinity {
    /// Creates the affinity table, clamping both parameters to `[0, 1]`.
    pub fn new(block_number: usize, preference: f64, mixing: f64) -> Self {
        Self {
            block_number,
            preference: clamp_unit(preference),
            mixing: clamp_unit(mixing),
        }
    }

    /// Number of blocks covered by the table.
    pub fn block_number(&self) -> usize {
        self.block_number
    }

    /// Clamped preference parameter.
    pub fn preference(&self) -> f64 {
        self.preference
    }

    /// Clamped mixing parameter.
    pub fn mixing(&self) -> f64 {
        self.mixing
    }

    /// Affinity between a row block and a column block.
    pub fn affinity(&self, row_block: usize, col_block: usize) -> f64 {
        if row_block == col_block {
            return 1.0;
        }
        let distance = row_block.abs_diff(col_block) as i32;
        let local = 0.5f64.powi(distance - 1);
        (1.0 - self.preference) * ((1.0 - self.mixing) * local + self.mixing)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Contract of a block-homogeneous edge probability model.
///
/// Implementations only provide the per-block-pair probability; matrix
/// construction and expected connectance follow from it. Probabilities must
/// stay in `[0, 1]` and must not decrease when `xi` grows.
pub trait ProbabilityModel {
    /// Number of blocks the model is defined over.
    fn block_count(&self) -> usize;

    /// Edge probability between a node of `row_block` and one of `col_block`.
    fn block_probability(&self, row_block: usize, col_block: usize, xi: f64) -> f64;

    /// Mean edge probability over all `rows x columns` cells.
    fn expected_connectance(&self, row_sizes: &[usize], col_sizes: &[usize], xi: f64) -> f64 {
        let rows: usize = row_sizes.iter().sum();
        let columns: usize = col_sizes.iter().sum();
        if rows == 0 || columns == 0 {
            return 0.0;
        }
        let mut mass = 0.0;
        for (k, &r) in row_sizes.iter().enumerate() {
            for (l, &c) in col_sizes.iter().enumerate() {
                mass += (r * c) as f64 * self.block_probability(k, l, xi);
            }
        }
        mass / (rows * columns) as f64
    }

    /// Materializes the dense `rows x columns` probability matrix.
    fn probability_matrix(
        &self,
        row_sizes: &[usize],
        col_sizes: &[usize],
        xi: f64,
    ) -> Result<DMatrix<f64>, NetgenError> {
        check_sizes("rows", row_sizes, self.block_count())?;
        check_sizes("columns", col_sizes, self.block_count())?;
        if !xi.is_finite() || xi < 0.0 {
            return Err(NetgenError::Model(
                ErrorInfo::new("invalid-xi", "calibration scalar must be finite and non-negative")
                    .with_context("xi", xi),
            ));
        }
        let row_labels = expand(row_sizes);
        let col_labels = expand(col_sizes);
        let table = DMatrix::from_fn(row_sizes.len(), col_sizes.len(), |k, l| {
            self.block_probability(k, l, xi)
        });
        Ok(DMatrix::from_fn(row_labels.len(), col_labels.len(), |i, j| {
            table[(row_labels[i], col_labels[j])]
        }))
    }
}

fn check_sizes(dimension: &str, sizes: &[usize], block_count: usize) -> Result<(), NetgenError> {
    if sizes.len() != block_count {
        return Err(NetgenError::Model(
            ErrorInfo::new("block-count-mismatch", "size sequence length differs from block count")
                .with_context("dimension", dimension)
                .with_context("sizes", sizes.len())
                .with_context("block_count", block_count),
        ));
    }
    Ok(())
}

fn expand(sizes: &[usize]) -> Vec<usize> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(block, &size)| std::iter::repeat(block).take(size))
        .collect()
}

/// Saturating block model: `p = 1 - exp(-xi * affinity)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialBlockModel {
    affinity: BlockAffinity,
}

impl ExponentialBlockModel {
    /// Creates the model over `block_number` blocks.
    pub fn new(block_number: usize, preference: f64, mixing: f64) -> Self {
        Self {
            affinity: BlockAffinity::new(block_number, preference, mixing),
        }
    }

    /// Affinity table backing the model.
    pub fn affinity(&self) -> &BlockAffinity {
        &self.affinity
    }
}

impl ProbabilityModel for ExponentialBlockModel {
    fn block_count(&self) -> usize {
        self.affinity.block_number()
    }

    fn block_probability(&self, row_block: usize, col_block: usize, xi: f64) -> f64 {
        let rate = xi * self.affinity.affinity(row_block, col_block);
        (-(-rate).exp_m1()).clamp(0.0, 1.0)
    }
}

/// Builds the `rows x columns` edge probability matrix for a partition.
#[allow(clippy::too_many_arguments)]
pub fn probability_matrix(
    rows: usize,
    columns: usize,
    block_number: usize,
    row_sizes: &[usize],
    col_sizes: &[usize],
    xi: f64,
    preference: f64,
    mixing: f64,
) -> Result<DMatrix<f64>, NetgenError> {
    let row_total: usize = row_sizes.iter().sum();
    let col_total: usize = col_sizes.iter().sum();
    if row_total != rows || col_total != columns {
        return Err(NetgenError::Model(
            ErrorInfo::new("size-mismatch", "block sizes do not cover the matrix dimensions")
                .with_context("rows", rows)
                .with_context("columns", columns)
                .with_context("row_total", row_total)
                .with_context("col_total", col_total),
        ));
    }
    ExponentialBlockModel::new(block_number, preference, mixing)
        .probability_matrix(row_sizes, col_sizes, xi)
}
