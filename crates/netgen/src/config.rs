use netgen_core::errors::{ErrorInfo, NetgenError};
use netgen_core::NetworkKind;
use serde::{Deserialize, Serialize};

/// Parameters of a block-structured network, loadable from YAML or JSON.
///
/// The short parameter names `P`, `mu` and `fixedConn` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of row nodes.
    pub rows: usize,
    /// Number of column nodes.
    pub columns: usize,
    /// Number of blocks in each dimension.
    pub block_number: usize,
    /// Preference for within-block links (`P`).
    #[serde(alias = "P", default = "default_preference")]
    pub preference: f64,
    /// Cross-block mixing (`mu`).
    #[serde(alias = "mu", default = "default_mixing")]
    pub mixing: f64,
    /// Block size heterogeneity exponent.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Whether rows and columns are distinct node sets.
    #[serde(default)]
    pub bipartite: bool,
    /// Smallest admissible block.
    #[serde(default = "default_min_block_size")]
    pub min_block_size: usize,
    /// Treat `link_density` as a connectance target to calibrate against.
    #[serde(alias = "fixedConn", default)]
    pub fixed_connectance: bool,
    /// Target connectance, or the calibration scalar itself when not fixed.
    pub link_density: f64,
    /// Master seed for partitioning and edge sampling.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_preference() -> f64 {
    0.5
}

fn default_mixing() -> f64 {
    0.5
}

fn default_alpha() -> f64 {
    1.0
}

fn default_min_block_size() -> usize {
    1
}

fn default_seed() -> u64 {
    0x5EED_B10C_0000_0001
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            columns: 100,
            block_number: 4,
            preference: default_preference(),
            mixing: default_mixing(),
            alpha: default_alpha(),
            bipartite: false,
            min_block_size: default_min_block_size(),
            fixed_connectance: false,
            link_density: 0.1,
            seed: default_seed(),
        }
    }
}

impl NetworkConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self, NetgenError> {
        serde_yaml::from_str(input)
            .map_err(|err| NetgenError::Serde(ErrorInfo::new("yaml-decode", err.to_string())))
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, NetgenError> {
        serde_json::from_str(input)
            .map_err(|err| NetgenError::Serde(ErrorInfo::new("json-decode", err.to_string())))
    }

    /// Bipartite or unipartite.
    pub fn net_type(&self) -> NetworkKind {
        NetworkKind::from_bipartite(self.bipartite)
    }

    /// A fixed connectance target cannot exceed one.
    pub fn check_density(&self) -> Result<(), NetgenError> {
        if self.fixed_connectance && self.link_density > 1.0 {
            return Err(NetgenError::Config(
                ErrorInfo::new(
                    "density-above-one",
                    "link_density cannot be greater than 1 when fixed_connectance is set",
                )
                .with_context("link_density", self.link_density),
            ));
        }
        Ok(())
    }

    /// Unipartite networks need as many rows as columns.
    pub fn check_shape(&self) -> Result<(), NetgenError> {
        if !self.bipartite && self.rows != self.columns {
            return Err(NetgenError::Config(
                ErrorInfo::new(
                    "unipartite-not-square",
                    "for unipartite configuration, the number of columns and rows must be the same",
                )
                .with_context("rows", self.rows)
                .with_context("columns", self.columns)
                .with_hint("set bipartite or make rows equal columns"),
            ));
        }
        Ok(())
    }
}
