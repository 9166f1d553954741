use netgen_core::errors::{ErrorInfo, NetgenError};
use netgen_core::rng::RngHandle;
use netgen_core::BlockSizes;
use rand::Rng;

/// Splits `node_count` nodes into `block_number` blocks of heterogeneous size.
///
/// Every block receives `min_block_size` nodes up front; the remainder is
/// apportioned according to weights `E^alpha` with `E ~ Exp(1)`, so `alpha = 0`
/// gives near-equal blocks and larger exponents give increasingly skewed ones.
/// Negative exponents behave like zero. Blocks are returned largest first.
pub fn heterogeneous_block_sizes(
    node_count: usize,
    block_number: usize,
    alpha: f64,
    min_block_size: usize,
    rng: &mut RngHandle,
) -> Result<BlockSizes, NetgenError> {
    validate(node_count, block_number, alpha, min_block_size)?;

    let exponent = alpha.max(0.0);
    let mut weights: Vec<f64> = (0..block_number)
        .map(|_| {
            let draw: f64 = rng.gen();
            let exponential = -(1.0 - draw).ln();
            exponential.powf(exponent)
        })
        .collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        weights.iter_mut().for_each(|w| *w = 1.0);
    }

    let spare = node_count - min_block_size * block_number;
    let mut sizes: Vec<usize> = apportion(spare, &weights)
        .into_iter()
        .map(|extra| extra + min_block_size)
        .collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(BlockSizes::new(sizes))
}

fn validate(
    node_count: usize,
    block_number: usize,
    alpha: f64,
    min_block_size: usize,
) -> Result<(), NetgenError> {
    if node_count == 0 {
        return Err(NetgenError::Partition(ErrorInfo::new(
            "empty-dimension",
            "a partition requires at least one node",
        )));
    }
    if block_number == 0 {
        return Err(NetgenError::Partition(ErrorInfo::new(
            "no-blocks",
            "a partition requires at least one block",
        )));
    }
    if min_block_size == 0 {
        return Err(NetgenError::Partition(ErrorInfo::new(
            "zero-min-block-size",
            "minimum block size must be at least one",
        )));
    }
    if !alpha.is_finite() {
        return Err(NetgenError::Partition(
            ErrorInfo::new("non-finite-alpha", "heterogeneity exponent must be finite")
                .with_context("alpha", alpha),
        ));
    }
    if min_block_size.saturating_mul(block_number) > node_count {
        return Err(NetgenError::Partition(
            ErrorInfo::new(
                "partition-infeasible",
                "minimum block size times block number exceeds node count",
            )
            .with_context("node_count", node_count)
            .with_context("block_number", block_number)
            .with_context("min_block_size", min_block_size)
            .with_hint("lower block_number or min_block_size"),
        ));
    }
    Ok(())
}

/// Largest-remainder apportionment of `total` units over `weights`.
fn apportion(total: usize, weights: &[f64]) -> Vec<usize> {
    let weight_sum: f64 = weights.iter().sum();
    let quotas: Vec<f64> = weights
        .iter()
        .map(|w| total as f64 * w / weight_sum)
        .collect();
    let mut shares: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = quotas[a] - quotas[a].floor();
        let frac_b = quotas[b] - quotas[b].floor();
        frac_b
            .partial_cmp(&frac_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut assigned: usize = shares.iter().sum();
    let mut cursor = 0;
    while assigned < total {
        shares[order[cursor % order.len()]] += 1;
        assigned += 1;
        cursor += 1;
    }
    // float drift can overshoot by a unit or two
    while assigned > total {
        if let Some(idx) = (0..shares.len()).max_by_key(|&i| shares[i]) {
            shares[idx] -= 1;
            assigned -= 1;
        }
    }
    shares
}
