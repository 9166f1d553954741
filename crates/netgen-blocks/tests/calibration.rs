use std::io;
use std::sync::{Arc, Mutex};

use netgen_blocks::{calibrate, max_connectance, Calibration, ExponentialBlockModel, ProbabilityModel};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(run: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::INFO)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, run);
    (value, logs.contents())
}

#[test]
fn max_connectance_aligns_blocks_pairwise() {
    // 50*50 + 50*50 over 100*100
    assert_eq!(max_connectance(&[50, 50], &[50, 50], 100, 100), 0.5);
    // 60*10 + 40*30 over 100*40
    assert_eq!(max_connectance(&[60, 40], &[10, 30], 100, 40), 0.45);
}

#[test]
fn infeasible_target_reports_ceiling() {
    let model = ExponentialBlockModel::new(2, 0.5, 0.5);
    let outcome = calibrate(&[50, 50], &[50, 50], 100, 100, 0.9, &model).unwrap();
    assert!(!outcome.is_feasible());
    assert_eq!(outcome.xi(), None);
    assert_eq!(outcome.max_connectance(), 0.5);
    let message = outcome.diagnostic().unwrap();
    assert!(message.contains("0.500"), "{message}");
}

#[test]
fn infeasible_target_emits_warning() {
    let model = ExponentialBlockModel::new(2, 0.5, 0.5);
    let (outcome, logs) = with_captured_logs(|| {
        calibrate(&[50, 50], &[50, 50], 100, 100, 0.9, &model).unwrap()
    });
    assert!(!outcome.is_feasible());
    let line = logs
        .lines()
        .find(|line| line.contains("WARN"))
        .unwrap_or_else(|| panic!("no warning in {logs:?}"));
    assert!(
        line.contains("desired connectance not possible for parameters combination"),
        "{line}"
    );
    assert!(line.contains("max connectance 0.500"), "{line}");
}

#[test]
fn solved_xi_is_logged() {
    let model = ExponentialBlockModel::new(2, 0.5, 0.5);
    let (outcome, logs) = with_captured_logs(|| {
        calibrate(&[50, 50], &[50, 50], 100, 100, 0.2, &model).unwrap()
    });
    let xi = outcome.xi().unwrap();
    assert!(!logs.contains("WARN"), "{logs}");
    let expected = format!("xi value for desired connectance {xi:.2}");
    assert!(
        logs.lines().any(|line| line.contains("INFO") && line.contains(&expected)),
        "{logs}"
    );
}

#[test]
fn feasible_target_is_hit() {
    let model = ExponentialBlockModel::new(3, 0.6, 0.4);
    let rows = [40, 35, 25];
    let cols = [40, 35, 25];
    let outcome = calibrate(&rows, &cols, 100, 100, 0.2, &model).unwrap();
    match outcome {
        Calibration::Feasible {
            xi,
            expected_connectance,
            max_connectance,
        } => {
            assert!(xi > 0.0);
            assert!((expected_connectance - 0.2).abs() < 1e-6);
            assert!((model.expected_connectance(&rows, &cols, xi) - 0.2).abs() < 1e-6);
            assert!(max_connectance >= 0.2);
        }
        other => panic!("expected feasible calibration, got {other:?}"),
    }
    assert!(outcome.diagnostic().is_none());
}

#[test]
fn target_at_ceiling_is_feasible() {
    let model = ExponentialBlockModel::new(2, 1.0, 0.0);
    let outcome = calibrate(&[50, 50], &[50, 50], 100, 100, 0.5, &model).unwrap();
    assert!(outcome.is_feasible());
    assert!(outcome.xi().unwrap() > 10.0);
}

#[test]
fn bipartite_partitions_calibrate() {
    let model = ExponentialBlockModel::new(2, 0.5, 0.5);
    let outcome = calibrate(&[30, 10], &[15, 5], 40, 20, 0.1, &model).unwrap();
    assert!(outcome.is_feasible());
}

#[test]
fn out_of_range_targets_are_errors() {
    let model = ExponentialBlockModel::new(1, 0.5, 0.5);
    for target in [0.0, -0.2, 1.5, f64::NAN] {
        let err = calibrate(&[10], &[10], 10, 10, target, &model).unwrap_err();
        assert_eq!(err.code(), "target-out-of-range");
    }
}

#[test]
fn calibration_serializes_with_status_tag() {
    let outcome = Calibration::Infeasible {
        max_connectance: 0.5,
        target: 0.9,
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "infeasible");
}
