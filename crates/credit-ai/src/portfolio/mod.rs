//! Portfolio-level datasets behind the dashboard, borrower, model and fairness views.
//!
//! Everything here is generated once from a seed so that a given deployment serves the same
//! portfolio on every request and tests can pin exact values.

mod borrowers;
mod fairness;
mod models;
pub mod router;

#[cfg(test)]
mod tests;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

pub use borrowers::{
    find, search, write_csv, Borrower, Decision, PortfolioBand, ShapValue, APPROVAL_CUTOFF,
    BORROWER_COUNT,
};
pub use fairness::{
    audit_subgroups, disparate_impact_ratio, verdict, CostAssumptions, CostSimulation,
    FairnessReport, Subgroup, SubgroupAudit, Verdict, BIAS_TOLERANCE, COST_ASSUMPTIONS,
    DISPARATE_IMPACT_FLOOR, SUBGROUPS,
};
pub use models::{
    best_threshold, confusion_matrix, f1_score, ConfusionMatrix, ConfusionSummary, ModelMetrics,
    ModelReport, RocCurve, RocPoint, ThresholdPoint, CONFUSION_MATRICES, MODEL_METRICS,
    SELECTED_MODEL,
};
pub use router::portfolio_router;

const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub total_borrowers: u32,
    pub avg_credit_score: u16,
    pub approval_rate: f64,
    pub auc_score: f64,
    pub selected_model: &'static str,
    pub financial_inclusion_rate: f64,
    pub new_borrowers_scored: u32,
}

pub const KPIS: Kpis = Kpis {
    total_borrowers: 15_847,
    avg_credit_score: 682,
    approval_rate: 0.734,
    auc_score: 0.867,
    selected_model: SELECTED_MODEL,
    financial_inclusion_rate: 0.23,
    new_borrowers_scored: 3_241,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBucket {
    pub band: &'static str,
    pub count: u32,
    pub percentage: f64,
}

pub const RISK_DISTRIBUTION: [RiskBucket; 3] = [
    RiskBucket {
        band: "Low Risk",
        count: 7_234,
        percentage: 45.6,
    },
    RiskBucket {
        band: "Medium Risk",
        count: 5_128,
        percentage: 32.4,
    },
    RiskBucket {
        band: "High Risk",
        count: 3_485,
        percentage: 22.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

/// Mean absolute attribution per model input, descending.
pub const GLOBAL_IMPORTANCE: [FeatureImportance; 8] = [
    FeatureImportance {
        feature: "Debt-to-Income Ratio",
        importance: 0.284,
    },
    FeatureImportance {
        feature: "Payment Utilization",
        importance: 0.213,
    },
    FeatureImportance {
        feature: "Late Payments",
        importance: 0.176,
    },
    FeatureImportance {
        feature: "Credit Age",
        importance: 0.112,
    },
    FeatureImportance {
        feature: "Monthly Income",
        importance: 0.089,
    },
    FeatureImportance {
        feature: "Total Debt",
        importance: 0.067,
    },
    FeatureImportance {
        feature: "Open Accounts",
        importance: 0.041,
    },
    FeatureImportance {
        feature: "Revolving Balance",
        importance: 0.018,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub bin: String,
    pub count: u32,
}

/// Bimodal distribution of predicted default probability in 5% bins.
fn prediction_histogram<R: Rng>(rng: &mut R) -> Vec<HistogramBin> {
    (0..HISTOGRAM_BINS)
        .map(|index| {
            let start = index as f64 * 0.05;
            let good = (-(start - 0.2).powi(2) / 0.02).exp() * 800.0;
            let bad = (-(start - 0.8).powi(2) / 0.03).exp() * 1200.0;
            let noise = rng.gen::<f64>() * 50.0;
            HistogramBin {
                bin: format!("{}-{}%", index * 5, index * 5 + 5),
                count: (good + bad + noise).round() as u32,
            }
        })
        .collect()
}

/// Dashboard payload borrowed from a snapshot.
#[derive(Debug, Serialize)]
pub struct Dashboard<'a> {
    pub kpis: &'a Kpis,
    pub risk_distribution: &'a [RiskBucket],
    pub prediction_histogram: &'a [HistogramBin],
    pub global_importance: &'a [FeatureImportance],
}

/// Every portfolio dataset generated from one seed.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSnapshot {
    pub seed: u64,
    pub kpis: Kpis,
    pub risk_distribution: Vec<RiskBucket>,
    pub prediction_histogram: Vec<HistogramBin>,
    pub global_importance: Vec<FeatureImportance>,
    pub borrowers: Vec<Borrower>,
    pub models: ModelReport,
    pub fairness: FairnessReport,
}

impl PortfolioSnapshot {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let prediction_histogram = prediction_histogram(&mut rng);
        let borrowers = borrowers::generate_borrowers(&mut rng);
        let models = ModelReport::generate(&mut rng);
        let fairness = FairnessReport::build(&SUBGROUPS, confusion_matrix(SELECTED_MODEL));

        info!(
            seed,
            borrowers = borrowers.len(),
            "portfolio snapshot generated"
        );

        Self {
            seed,
            kpis: KPIS,
            risk_distribution: RISK_DISTRIBUTION.to_vec(),
            prediction_histogram,
            global_importance: GLOBAL_IMPORTANCE.to_vec(),
            borrowers,
            models,
            fairness,
        }
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard {
            kpis: &self.kpis,
            risk_distribution: &self.risk_distribution,
            prediction_histogram: &self.prediction_histogram,
            global_importance: &self.global_importance,
        }
    }

    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<&Borrower> {
        search(&self.borrowers, query, limit)
    }

    pub fn borrower(&self, id: &str) -> Option<&Borrower> {
        find(&self.borrowers, id)
    }

    pub fn export_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_csv(&self.borrowers, writer)
    }
}
