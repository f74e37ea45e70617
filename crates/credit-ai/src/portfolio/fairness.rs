use serde::Serialize;

use super::models::ConfusionMatrix;
use crate::scoring::round_to;

/// Approval-rate gap to the reference subgroup above which a subgroup is flagged.
pub const BIAS_TOLERANCE: f64 = 0.10;
/// Four-fifths rule.
pub const DISPARATE_IMPACT_FLOOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Subgroup {
    pub name: &'static str,
    pub accuracy: f64,
    pub approval_rate: f64,
    pub count: u32,
}

/// Audited subgroups. The first entry is the reference group.
pub const SUBGROUPS: [Subgroup; 3] = [
    Subgroup {
        name: "Urban",
        accuracy: 0.87,
        approval_rate: 0.78,
        count: 8234,
    },
    Subgroup {
        name: "Semi-Urban",
        accuracy: 0.84,
        approval_rate: 0.72,
        count: 4512,
    },
    Subgroup {
        name: "Rural",
        accuracy: 0.81,
        approval_rate: 0.65,
        count: 3101,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SubgroupAudit {
    #[serde(flatten)]
    pub subgroup: Subgroup,
    pub approval_gap: f64,
    pub flagged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// Flag every subgroup whose approval rate is more than [`BIAS_TOLERANCE`] away from the
/// reference (first) subgroup.
pub fn audit_subgroups(subgroups: &[Subgroup]) -> Vec<SubgroupAudit> {
    let Some(reference) = subgroups.first() else {
        return Vec::new();
    };

    subgroups
        .iter()
        .map(|subgroup| {
            let gap = (subgroup.approval_rate - reference.approval_rate).abs();
            SubgroupAudit {
                subgroup: *subgroup,
                approval_gap: round_to(gap, 3),
                flagged: gap > BIAS_TOLERANCE,
            }
        })
        .collect()
}

/// Lowest approval rate divided by the highest. `None` when there is nothing to compare.
pub fn disparate_impact_ratio(subgroups: &[Subgroup]) -> Option<f64> {
    let rates = subgroups.iter().map(|subgroup| subgroup.approval_rate);
    let lowest = rates.clone().reduce(f64::min)?;
    let highest = rates.reduce(f64::max)?;
    if highest <= 0.0 {
        return None;
    }
    Some(round_to(lowest / highest, 3))
}

pub fn verdict(ratio: f64) -> Verdict {
    if ratio >= DISPARATE_IMPACT_FLOOR {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// Unit economics applied to the selected model's confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostAssumptions {
    pub avg_loan_amount: i64,
    /// Margin lost on a good borrower the model declined.
    pub false_negative_cost: i64,
    /// Default loss on a bad borrower the model approved.
    pub false_positive_cost: i64,
    pub true_positive_gain: i64,
}

pub const COST_ASSUMPTIONS: CostAssumptions = CostAssumptions {
    avg_loan_amount: 250_000,
    false_negative_cost: 18_500,
    false_positive_cost: 62_000,
    true_positive_gain: 12_500,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostSimulation {
    #[serde(flatten)]
    pub assumptions: CostAssumptions,
    pub false_negatives: u32,
    pub false_positives: u32,
    pub true_positives: u32,
    pub expected_loss_from_false_negatives: i64,
    pub expected_loss_from_false_positives: i64,
    pub projected_gain: i64,
    pub net_impact: i64,
}

impl CostSimulation {
    pub fn simulate(assumptions: CostAssumptions, matrix: &ConfusionMatrix) -> Self {
        let fn_loss = i64::from(matrix.false_negative) * assumptions.false_negative_cost;
        let fp_loss = i64::from(matrix.false_positive) * assumptions.false_positive_cost;
        let gain = i64::from(matrix.true_positive) * assumptions.true_positive_gain;

        Self {
            assumptions,
            false_negatives: matrix.false_negative,
            false_positives: matrix.false_positive,
            true_positives: matrix.true_positive,
            expected_loss_from_false_negatives: fn_loss,
            expected_loss_from_false_positives: fp_loss,
            projected_gain: gain,
            net_impact: gain - fp_loss - fn_loss,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FairnessReport {
    pub subgroups: Vec<SubgroupAudit>,
    pub disparate_impact_ratio: Option<f64>,
    pub verdict: Option<Verdict>,
    pub cost_simulation: Option<CostSimulation>,
}

impl FairnessReport {
    pub fn build(subgroups: &[Subgroup], selected: Option<ConfusionMatrix>) -> Self {
        let ratio = disparate_impact_ratio(subgroups);
        Self {
            subgroups: audit_subgroups(subgroups),
            disparate_impact_ratio: ratio,
            verdict: ratio.map(verdict),
            cost_simulation: selected
                .map(|matrix| CostSimulation::simulate(COST_ASSUMPTIONS, &matrix)),
        }
    }
}
