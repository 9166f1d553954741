use netgen_core::{quantize, BlockSizes, NetworkKind};

#[test]
fn labels_repeat_block_indices_contiguously() {
    let sizes = BlockSizes::new(vec![3, 2, 1]);
    assert_eq!(sizes.labels(), vec![0, 0, 0, 1, 1, 2]);
    assert_eq!(sizes.node_count(), 6);
    assert_eq!(sizes.block_count(), 3);
}

#[test]
fn clones_share_storage_but_equal_copies_do_not() {
    let sizes = BlockSizes::new(vec![4, 4]);
    let alias = sizes.clone();
    let copy = BlockSizes::new(vec![4, 4]);
    assert!(sizes.shares_storage(&alias));
    assert!(!sizes.shares_storage(&copy));
    assert_eq!(sizes, copy);
}

#[test]
fn quantize_rounds_to_two_digits() {
    assert_eq!(quantize(0.123_456, 2), 0.12);
    assert_eq!(quantize(0.456, 2), 0.46);
    assert_eq!(quantize(0.2, 2), 0.2);
}

#[test]
fn quantize_breaks_exact_ties_to_even() {
    assert_eq!(quantize(0.125, 2), 0.12);
    assert_eq!(quantize(0.375, 2), 0.38);
    assert_eq!(quantize(0.625, 2), 0.62);
    assert_eq!(quantize(-0.125, 2), -0.12);
    // stored just below the tie
    assert_eq!(quantize(0.145, 2), 0.14);
}

#[test]
fn network_kind_labels() {
    assert_eq!(NetworkKind::from_bipartite(true).as_str(), "bipartite");
    assert_eq!(NetworkKind::from_bipartite(false).to_string(), "unipartite");
}
