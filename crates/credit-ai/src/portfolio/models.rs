use rand::Rng;
use serde::Serialize;

use crate::scoring::round_to;

const ROC_POINTS: usize = 21;
const THRESHOLD_STEPS: usize = 20;

/// Held-out evaluation metrics for one candidate model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub model: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub auc: f64,
    pub cross_val_mean: f64,
    pub cross_val_std: f64,
}

pub const MODEL_METRICS: [ModelMetrics; 4] = [
    ModelMetrics {
        model: "Logistic Regression",
        accuracy: 0.792,
        precision: 0.756,
        recall: 0.681,
        f1: 0.717,
        auc: 0.812,
        cross_val_mean: 0.788,
        cross_val_std: 0.015,
    },
    ModelMetrics {
        model: "Random Forest",
        accuracy: 0.841,
        precision: 0.823,
        recall: 0.748,
        f1: 0.784,
        auc: 0.856,
        cross_val_mean: 0.835,
        cross_val_std: 0.012,
    },
    ModelMetrics {
        model: "XGBoost",
        accuracy: 0.862,
        precision: 0.847,
        recall: 0.789,
        f1: 0.817,
        auc: 0.891,
        cross_val_mean: 0.857,
        cross_val_std: 0.009,
    },
    ModelMetrics {
        model: "KNN",
        accuracy: 0.743,
        precision: 0.712,
        recall: 0.634,
        f1: 0.671,
        auc: 0.768,
        cross_val_mean: 0.738,
        cross_val_std: 0.022,
    },
];

/// Model whose confusion matrix feeds the cost simulation.
pub const SELECTED_MODEL: &str = "XGBoost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: u32,
    pub false_positive: u32,
    pub true_negative: u32,
    pub false_negative: u32,
}

impl ConfusionMatrix {
    pub fn total(&self) -> u32 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        f1_score(self.precision(), self.recall())
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator)
}

/// Harmonic mean of precision and recall, zero when both are zero.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum <= 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / sum
}

pub const CONFUSION_MATRICES: [(&str, ConfusionMatrix); 4] = [
    (
        "Logistic Regression",
        ConfusionMatrix {
            true_positive: 1362,
            false_positive: 438,
            true_negative: 4538,
            false_negative: 638,
        },
    ),
    (
        "Random Forest",
        ConfusionMatrix {
            true_positive: 1496,
            false_positive: 322,
            true_negative: 4654,
            false_negative: 504,
        },
    ),
    (
        "XGBoost",
        ConfusionMatrix {
            true_positive: 1578,
            false_positive: 284,
            true_negative: 4692,
            false_negative: 422,
        },
    ),
    (
        "KNN",
        ConfusionMatrix {
            true_positive: 1268,
            false_positive: 514,
            true_negative: 4462,
            false_negative: 732,
        },
    ),
];

pub fn confusion_matrix(model: &str) -> Option<ConfusionMatrix> {
    CONFUSION_MATRICES
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, matrix)| *matrix)
}

/// Confusion matrix plus the rates derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct ConfusionSummary {
    pub model: &'static str,
    pub matrix: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ConfusionSummary {
    fn new(model: &'static str, matrix: ConfusionMatrix) -> Self {
        Self {
            model,
            matrix,
            accuracy: round_to(matrix.accuracy(), 3),
            precision: round_to(matrix.precision(), 3),
            recall: round_to(matrix.recall(), 3),
            f1: round_to(matrix.f1(), 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RocCurve {
    pub model: &'static str,
    pub points: Vec<RocPoint>,
}

/// Synthetic ROC curve shaped by `auc`. Anchored at (0,0) and (1,1); interior points are
/// jittered, clamped to `[0, 1]` and kept non-decreasing.
pub(crate) fn roc_curve<R: Rng>(rng: &mut R, auc: f64) -> Vec<RocPoint> {
    let last = ROC_POINTS - 1;
    let exponent = 1.0 / (auc * 2.5);

    let mut points = Vec::with_capacity(ROC_POINTS);
    points.push(RocPoint { fpr: 0.0, tpr: 0.0 });
    let mut floor = 0.0_f64;
    for step in 1..last {
        let fpr = step as f64 / last as f64;
        let jitter = (rng.gen::<f64>() - 0.5) * 0.03;
        let tpr = (fpr.powf(exponent) + jitter).clamp(floor, 1.0);
        floor = tpr;
        points.push(RocPoint {
            fpr: round_to(fpr, 3),
            tpr: round_to(tpr, 3),
        });
    }
    points.push(RocPoint { fpr: 1.0, tpr: 1.0 });
    points
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdPoint {
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Precision rises and recall falls as the decision threshold moves from 0 to 1.
pub(crate) fn threshold_sweep<R: Rng>(rng: &mut R) -> Vec<ThresholdPoint> {
    (0..=THRESHOLD_STEPS)
        .map(|step| {
            let threshold = step as f64 / THRESHOLD_STEPS as f64;
            let precision = round_to(0.55 + 0.4 * threshold + (rng.gen::<f64>() - 0.5) * 0.03, 3);
            let recall = round_to(0.95 - 0.6 * threshold + (rng.gen::<f64>() - 0.5) * 0.03, 3);
            ThresholdPoint {
                threshold: round_to(threshold, 2),
                precision,
                recall,
                f1: round_to(f1_score(precision, recall), 3),
            }
        })
        .collect()
}

/// Point with the highest F1. The earliest threshold wins ties.
pub fn best_threshold(points: &[ThresholdPoint]) -> Option<ThresholdPoint> {
    points.iter().copied().fold(None, |best, point| match best {
        Some(current) if current.f1 >= point.f1 => Some(current),
        _ => Some(point),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub selected_model: &'static str,
    pub metrics: Vec<ModelMetrics>,
    pub confusion_matrices: Vec<ConfusionSummary>,
    pub roc_curves: Vec<RocCurve>,
    pub thresholds: Vec<ThresholdPoint>,
    pub best_threshold: Option<ThresholdPoint>,
}

impl ModelReport {
    pub(crate) fn generate<R: Rng>(rng: &mut R) -> Self {
        let roc_curves = MODEL_METRICS
            .iter()
            .map(|metrics| RocCurve {
                model: metrics.model,
                points: roc_curve(rng, metrics.auc),
            })
            .collect();
        let thresholds = threshold_sweep(rng);

        Self {
            selected_model: SELECTED_MODEL,
            metrics: MODEL_METRICS.to_vec(),
            confusion_matrices: CONFUSION_MATRICES
                .iter()
                .map(|(model, matrix)| ConfusionSummary::new(*model, *matrix))
                .collect(),
            roc_curves,
            best_threshold: best_threshold(&thresholds),
            thresholds,
        }
    }
}
