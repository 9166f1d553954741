use nalgebra::DMatrix;
use netgen_core::NetworkKind;

/// Binary adjacency matrix, `rows x columns`.
pub type AdjacencyMatrix = DMatrix<u8>;
/// Edge probability matrix, `rows x columns`.
pub type ProbabilityMatrix = DMatrix<f64>;

/// The four positional outputs of a generation call; all `None` when infeasible.
pub type NetworkParts = (
    Option<AdjacencyMatrix>,
    Option<ProbabilityMatrix>,
    Option<Vec<usize>>,
    Option<Vec<usize>>,
);

/// A sampled network together with the matrix it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticNetwork {
    /// Sampled adjacency matrix.
    pub adjacency: AdjacencyMatrix,
    /// Edge probabilities the adjacency was thresholded against.
    pub probabilities: ProbabilityMatrix,
    /// Block index of every row node.
    pub row_labels: Vec<usize>,
    /// Block index of every column node.
    pub col_labels: Vec<usize>,
    /// Structural flavour the adjacency follows.
    pub kind: NetworkKind,
    /// Calibration scalar used for the probabilities.
    pub xi: f64,
}

impl SyntheticNetwork {
    /// Number of edges; symmetric pairs count once in unipartite networks.
    pub fn edge_count(&self) -> usize {
        let ones: usize = self.adjacency.iter().map(|&v| usize::from(v)).sum();
        match self.kind {
            NetworkKind::Bipartite => ones,
            NetworkKind::Unipartite => ones / 2,
        }
    }

    /// Realized edges over the possible edge count of the network kind.
    pub fn realized_connectance(&self) -> f64 {
        let (rows, columns) = self.adjacency.shape();
        let possible = match self.kind {
            NetworkKind::Bipartite => rows * columns,
            NetworkKind::Unipartite => rows * rows.saturating_sub(1) / 2,
        };
        if possible == 0 {
            return 0.0;
        }
        self.edge_count() as f64 / possible as f64
    }
}

/// Result of one pass through the generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Matrices and labels were produced.
    Generated(SyntheticNetwork),
    /// The connectance target is out of reach for the current partition.
    Infeasible {
        /// Ceiling implied by aligning row and column blocks pairwise.
        max_connectance: f64,
        /// Requested connectance.
        target: f64,
    },
}

impl GenerationOutcome {
    /// The generated network, if any.
    pub fn network(&self) -> Option<&SyntheticNetwork> {
        match self {
            GenerationOutcome::Generated(network) => Some(network),
            GenerationOutcome::Infeasible { .. } => None,
        }
    }

    /// Whether no network was produced.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, GenerationOutcome::Infeasible { .. })
    }

    /// Splits the outcome into adjacency, probabilities, row labels and column labels.
    pub fn into_parts(self) -> NetworkParts {
        match self {
            GenerationOutcome::Generated(network) => (
                Some(network.adjacency),
                Some(network.probabilities),
                Some(network.row_labels),
                Some(network.col_labels),
            ),
            GenerationOutcome::Infeasible { .. } => (None, None, None, None),
        }
    }
}
