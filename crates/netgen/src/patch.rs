use netgen_core::errors::{ErrorInfo, NetgenError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::NetworkConfig;

/// Partial override of a [`NetworkConfig`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// New row count.
    pub rows: Option<usize>,
    /// New column count.
    pub columns: Option<usize>,
    /// New block count.
    pub block_number: Option<usize>,
    /// New within-block preference.
    #[serde(alias = "P")]
    pub preference: Option<f64>,
    /// New cross-block mixing.
    #[serde(alias = "mu")]
    pub mixing: Option<f64>,
    /// New heterogeneity exponent.
    pub alpha: Option<f64>,
    /// New bipartite flag.
    pub bipartite: Option<bool>,
    /// New minimum block size.
    pub min_block_size: Option<usize>,
    /// New calibration mode.
    #[serde(alias = "fixedConn")]
    pub fixed_connectance: Option<bool>,
    /// New density target or scalar.
    pub link_density: Option<f64>,
    /// New sampling seed.
    pub seed: Option<u64>,
}

impl ConfigPatch {
    /// Builds a patch from string keyed values; keys that are not configuration
    /// fields are ignored, mistyped values are rejected.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, NetgenError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: Map<String, Value> = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        serde_json::from_value(Value::Object(map))
            .map_err(|err| NetgenError::Serde(ErrorInfo::new("patch-decode", err.to_string())))
    }

    /// Whether the patch changes the node counts or the block count.
    pub fn needs_repartition(&self) -> bool {
        self.rows.is_some() || self.columns.is_some() || self.block_number.is_some()
    }

    /// Whether the patch carries no overrides.
    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }

    /// Writes every present field into `config` and reports whether the
    /// partition has to be recomputed.
    pub fn apply(&self, config: &mut NetworkConfig) -> bool {
        set(&mut config.rows, self.rows);
        set(&mut config.columns, self.columns);
        set(&mut config.block_number, self.block_number);
        set(&mut config.preference, self.preference);
        set(&mut config.mixing, self.mixing);
        set(&mut config.alpha, self.alpha);
        set(&mut config.bipartite, self.bipartite);
        set(&mut config.min_block_size, self.min_block_size);
        set(&mut config.fixed_connectance, self.fixed_connectance);
        set(&mut config.link_density, self.link_density);
        set(&mut config.seed, self.seed);
        self.needs_repartition()
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
