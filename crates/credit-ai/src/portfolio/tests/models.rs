use crate::portfolio::{
    best_threshold, confusion_matrix, f1_score, PortfolioSnapshot, ThresholdPoint, MODEL_METRICS,
};

#[test]
fn confusion_matrix_derives_rates() {
    let matrix = confusion_matrix("XGBoost").expect("known model");

    assert_eq!(matrix.total(), 6976);
    assert!((matrix.accuracy() - 0.8988).abs() < 1e-3);
    assert!((matrix.precision() - 0.8475).abs() < 1e-3);
    assert!((matrix.recall() - 0.789).abs() < 1e-9);
    assert!((matrix.f1() - 0.8172).abs() < 1e-3);
    assert!(confusion_matrix("Linear Probe").is_none());
}

#[test]
fn f1_handles_degenerate_inputs() {
    assert_eq!(f1_score(0.0, 0.0), 0.0);
    assert!((f1_score(0.5, 0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn roc_curves_are_anchored_and_bounded() {
    let snapshot = PortfolioSnapshot::generate(42);
    assert_eq!(snapshot.models.roc_curves.len(), MODEL_METRICS.len());

    for curve in &snapshot.models.roc_curves {
        assert_eq!(curve.points.len(), 21);
        let first = curve.points.first().expect("first point");
        let last = curve.points.last().expect("last point");
        assert_eq!((first.fpr, first.tpr), (0.0, 0.0));
        assert_eq!((last.fpr, last.tpr), (1.0, 1.0));

        for pair in curve.points.windows(2) {
            assert!(pair[0].fpr < pair[1].fpr);
            assert!(pair[0].tpr <= pair[1].tpr);
            assert!((0.0..=1.0).contains(&pair[1].tpr));
        }
    }
}

#[test]
fn threshold_sweep_covers_unit_interval() {
    let snapshot = PortfolioSnapshot::generate(42);
    let thresholds = &snapshot.models.thresholds;

    assert_eq!(thresholds.len(), 21);
    assert_eq!(thresholds[0].threshold, 0.0);
    assert_eq!(thresholds[10].threshold, 0.5);
    assert_eq!(thresholds[20].threshold, 1.0);

    for point in thresholds {
        let expected = f1_score(point.precision, point.recall);
        assert!((point.f1 - expected).abs() < 1e-3);
    }

    let best = snapshot.models.best_threshold.expect("best threshold");
    assert!(thresholds.iter().all(|point| point.f1 <= best.f1));
}

#[test]
fn best_threshold_prefers_earliest_tie() {
    let point = |threshold, f1| ThresholdPoint {
        threshold,
        precision: 0.7,
        recall: 0.7,
        f1,
    };
    let points = [point(0.1, 0.6), point(0.2, 0.8), point(0.3, 0.8)];

    let best = best_threshold(&points).expect("non-empty");
    assert_eq!(best.threshold, 0.2);
    assert!(best_threshold(&[]).is_none());
}
