use netgen_core::errors::{ErrorInfo, NetgenError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::probability::ProbabilityModel;

/// Upper end of the bisection bracket for the calibration scalar.
pub const XI_MAX: f64 = 64.0;

const MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-10;

/// Outcome of resolving the calibration scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Calibration {
    /// A scalar was resolved.
    Feasible {
        /// Calibration scalar handed to the probability model.
        xi: f64,
        /// Ceiling implied by aligning row and column blocks pairwise.
        max_connectance: f64,
        /// Expected connectance of the probability matrix under `xi`.
        expected_connectance: f64,
    },
    /// The target exceeds the ceiling of the current partition.
    Infeasible {
        /// Ceiling implied by aligning row and column blocks pairwise.
        max_connectance: f64,
        /// Requested connectance.
        target: f64,
    },
}

impl Calibration {
    /// Whether a scalar was resolved.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Calibration::Feasible { .. })
    }

    /// The resolved scalar, if any.
    pub fn xi(&self) -> Option<f64> {
        match self {
            Calibration::Feasible { xi, .. } => Some(*xi),
            Calibration::Infeasible { .. } => None,
        }
    }

    /// Ceiling implied by aligning row and column blocks pairwise.
    pub fn max_connectance(&self) -> f64 {
        match self {
            Calibration::Feasible {
                max_connectance, ..
            }
            | Calibration::Infeasible {
                max_connectance, ..
            } => *max_connectance,
        }
    }

    /// Warning text for an infeasible target.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Calibration::Infeasible {
                max_connectance, ..
            } => Some(format!(
                "desired connectance not possible for parameters combination. max connectance {max_connectance:.3}"
            )),
            Calibration::Feasible { .. } => None,
        }
    }
}

/// Average connectance reachable when only index-aligned block pairs link.
///
/// Returns zero for empty dimensions.
pub fn max_connectance(
    row_sizes: &[usize],
    col_sizes: &[usize],
    rows: usize,
    columns: usize,
) -> f64 {
    if rows == 0 || columns == 0 {
        return 0.0;
    }
    let aligned: usize = row_sizes
        .iter()
        .zip(col_sizes.iter())
        .map(|(r, c)| r * c)
        .sum();
    aligned as f64 / (rows as f64 * columns as f64)
}

/// Solves for the scalar whose expected connectance under `model` matches `target`.
///
/// Targets above [`max_connectance`] are reported as [`Calibration::Infeasible`]
/// together with a warning; they are not errors.
pub fn calibrate<M: ProbabilityModel + ?Sized>(
    row_sizes: &[usize],
    col_sizes: &[usize],
    rows: usize,
    columns: usize,
    target: f64,
    model: &M,
) -> Result<Calibration, NetgenError> {
    if !target.is_finite() || target <= 0.0 || target > 1.0 {
        return Err(NetgenError::Calibration(
            ErrorInfo::new("target-out-of-range", "connectance target must lie in (0, 1]")
                .with_context("target", target),
        ));
    }

    let ceiling = max_connectance(row_sizes, col_sizes, rows, columns);
    if ceiling < target {
        let outcome = Calibration::Infeasible {
            max_connectance: ceiling,
            target,
        };
        if let Some(message) = outcome.diagnostic() {
            warn!(target_connectance = target, "{message}");
        }
        return Ok(outcome);
    }

    let connectance = |xi: f64| model.expected_connectance(row_sizes, col_sizes, xi);
    let xi = if connectance(XI_MAX) <= target {
        XI_MAX
    } else {
        let (mut low, mut high) = (0.0, XI_MAX);
        for _ in 0..MAX_ITERATIONS {
            let mid = 0.5 * (low + high);
            if connectance(mid) < target {
                low = mid;
            } else {
                high = mid;
            }
            if high - low < TOLERANCE {
                break;
            }
        }
        0.5 * (low + high)
    };

    info!("xi value for desired connectance {xi:.2}");
    Ok(Calibration::Feasible {
        xi,
        max_connectance: ceiling,
        expected_connectance: connectance(xi),
    })
}
