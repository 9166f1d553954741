use netgen_blocks::{probability_matrix, BlockAffinity, ExponentialBlockModel, ProbabilityModel};
use netgen_core::errors::NetgenError;

#[test]
fn affinity_is_one_inside_blocks() {
    let affinity = BlockAffinity::new(4, 0.3, 0.2);
    for k in 0..4 {
        assert_eq!(affinity.affinity(k, k), 1.0);
    }
}

#[test]
fn full_preference_removes_cross_block_mass() {
    let affinity = BlockAffinity::new(3, 1.0, 0.5);
    assert_eq!(affinity.affinity(0, 1), 0.0);
    assert_eq!(affinity.affinity(2, 0), 0.0);
}

#[test]
fn mixing_flattens_distance_decay() {
    let local = BlockAffinity::new(4, 0.0, 0.0);
    assert_eq!(local.affinity(0, 1), 1.0);
    assert_eq!(local.affinity(0, 2), 0.5);
    assert_eq!(local.affinity(0, 3), 0.25);

    let mixed = BlockAffinity::new(4, 0.0, 1.0);
    assert_eq!(mixed.affinity(0, 1), mixed.affinity(0, 3));
}

#[test]
fn parameters_are_clamped() {
    let affinity = BlockAffinity::new(2, 1.7, -0.4);
    assert_eq!(affinity.preference(), 1.0);
    assert_eq!(affinity.mixing(), 0.0);
}

#[test]
fn matrix_is_bounded_and_block_homogeneous() {
    let rows = [3, 2];
    let cols = [2, 2];
    let m = probability_matrix(5, 4, 2, &rows, &cols, 1.3, 0.4, 0.6).unwrap();
    assert_eq!(m.shape(), (5, 4));
    assert!(m.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(m[(0, 0)], m[(2, 1)]);
    assert_eq!(m[(3, 2)], m[(4, 3)]);
    assert_eq!(m[(0, 2)], m[(1, 3)]);
    assert!(m[(0, 0)] > m[(0, 2)]);
}

#[test]
fn expected_connectance_grows_with_xi() {
    let model = ExponentialBlockModel::new(3, 0.5, 0.5);
    let rows = [10, 6, 4];
    let cols = [8, 8, 4];
    let mut previous = model.expected_connectance(&rows, &cols, 0.0);
    assert_eq!(previous, 0.0);
    for step in 1..40 {
        let current = model.expected_connectance(&rows, &cols, step as f64 * 0.25);
        assert!(current >= previous);
        previous = current;
    }
    assert!(previous <= 1.0);
}

#[test]
fn expected_connectance_matches_matrix_mean() {
    let model = ExponentialBlockModel::new(2, 0.2, 0.3);
    let rows = [4, 3];
    let cols = [5, 2];
    let matrix = model.probability_matrix(&rows, &cols, 0.8).unwrap();
    let mean = matrix.sum() / (7.0 * 7.0);
    let expected = model.expected_connectance(&rows, &cols, 0.8);
    assert!((mean - expected).abs() < 1e-12);
}

#[test]
fn mismatched_sizes_are_rejected() {
    let err = probability_matrix(6, 4, 2, &[3, 2], &[2, 2], 1.0, 0.5, 0.5).unwrap_err();
    assert_eq!(err.code(), "size-mismatch");

    let err = probability_matrix(5, 4, 3, &[3, 2], &[2, 2], 1.0, 0.5, 0.5).unwrap_err();
    match err {
        NetgenError::Model(info) => {
            assert_eq!(info.code, "block-count-mismatch");
            assert_eq!(info.context.get("dimension"), Some(&"rows".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_xi_is_rejected() {
    let err = probability_matrix(2, 2, 1, &[2], &[2], -0.1, 0.5, 0.5).unwrap_err();
    assert_eq!(err.code(), "invalid-xi");
}
