use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::{AnswerSet, MonthlyEmi};
use super::features::{round_to, score_feature, Feature, FeatureScore};

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;

/// Aggregation weights aligned positionally with [`Feature::ALL`].
pub const FEATURE_WEIGHTS: [f64; 11] = [
    0.15, 0.08, 0.12, 0.18, 0.20, 0.07, 0.08, 0.04, 0.03, 0.03, 0.02,
];

/// Credit-score tier shared by the risk band and the recommendation so the two can never disagree
/// about which side of a threshold a score falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreTier {
    Top,
    Upper,
    Lower,
    Bottom,
}

impl ScoreTier {
    pub const fn from_credit_score(credit_score: u16) -> Self {
        match credit_score {
            750..=u16::MAX => Self::Top,
            650..=749 => Self::Upper,
            550..=649 => Self::Lower,
            _ => Self::Bottom,
        }
    }

    pub const fn risk_band(self) -> RiskBand {
        match self {
            Self::Top => RiskBand::Prime,
            Self::Upper => RiskBand::NearPrime,
            Self::Lower => RiskBand::Subprime,
            Self::Bottom => RiskBand::HighRisk,
        }
    }

    pub const fn recommendation(self) -> Recommendation {
        match self {
            Self::Top => Recommendation::StrongApprove,
            Self::Upper => Recommendation::Approve,
            Self::Lower => Recommendation::Review,
            Self::Bottom => Recommendation::Reject,
        }
    }
}

/// Ordered risk tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "Prime")]
    Prime,
    #[serde(rename = "Near Prime")]
    NearPrime,
    #[serde(rename = "Subprime")]
    Subprime,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prime => "Prime",
            Self::NearPrime => "Near Prime",
            Self::Subprime => "Subprime",
            Self::HighRisk => "High Risk",
        }
    }
}

/// Lending recommendation, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Approve")]
    StrongApprove,
    #[serde(rename = "Approve")]
    Approve,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Reject")]
    Reject,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongApprove => "Strong Approve",
            Self::Approve => "Approve",
            Self::Review => "Review",
            Self::Reject => "Reject",
        }
    }
}

/// Signed per-feature contribution shown in explanation views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub feature: Feature,
    pub value: f64,
}

/// Outcome of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub credit_score: u16,
    pub risk_band: RiskBand,
    pub recommendation: Recommendation,
    pub confidence: f64,
    /// Estimated default probability, the complement of the normalized weighted sub-score.
    pub prediction_probability: f64,
    /// Sorted by descending magnitude.
    pub attributions: Vec<Attribution>,
    pub debt_to_income_ratio: f64,
    /// In [`Feature::ALL`] order.
    pub feature_scores: Vec<FeatureScore>,
    pub expected_value: i64,
}

impl ScoringResult {
    pub fn feature_score(&self, feature: Feature) -> Option<&FeatureScore> {
        self.feature_scores
            .iter()
            .find(|entry| entry.feature == feature)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_credit_score(self.credit_score)
    }
}

/// Score a complete or partial answer set. Never fails: unanswered questions score neutral.
pub fn compute_score(answers: &AnswerSet) -> ScoringResult {
    let feature_scores: Vec<FeatureScore> = Feature::ALL
        .iter()
        .map(|feature| score_feature(*feature, answers.value_of(*feature)))
        .collect();

    let weighted_sum = weighted_sum(&feature_scores);
    let credit_score = credit_score_from(weighted_sum);
    let tier = ScoreTier::from_credit_score(credit_score);

    let normalized = weighted_sum / 100.0;
    let confidence = round_to(0.65 + normalized * 0.30, 2);
    let prediction_probability = round_to(1.0 - normalized, 3);
    let expected_value =
        (f64::from(credit_score) * confidence * (1.0 - prediction_probability)).round() as i64;

    let result = ScoringResult {
        credit_score,
        risk_band: tier.risk_band(),
        recommendation: tier.recommendation(),
        confidence,
        prediction_probability,
        attributions: ranked_attributions(&feature_scores),
        debt_to_income_ratio: debt_to_income_ratio(answers.total_monthly_emi),
        feature_scores,
        expected_value,
    };

    debug!(
        credit_score = result.credit_score,
        risk_band = result.risk_band.label(),
        answered = answers.answered(),
        "scored answer set"
    );

    result
}

fn weighted_sum(feature_scores: &[FeatureScore]) -> f64 {
    feature_scores
        .iter()
        .zip(FEATURE_WEIGHTS)
        .map(|(entry, weight)| f64::from(entry.score) * weight)
        .sum()
}

fn credit_score_from(weighted_sum: f64) -> u16 {
    let span = f64::from(MAX_CREDIT_SCORE - MIN_CREDIT_SCORE);
    let raw = (f64::from(MIN_CREDIT_SCORE) + (weighted_sum / 100.0) * span).round();
    raw.clamp(f64::from(MIN_CREDIT_SCORE), f64::from(MAX_CREDIT_SCORE)) as u16
}

/// Lookup proxy for the debt-to-income ratio, keyed only by the EMI answer.
pub fn debt_to_income_ratio(emi: Option<MonthlyEmi>) -> f64 {
    match emi {
        Some(MonthlyEmi::NoEmi) => 0.05,
        Some(MonthlyEmi::Below5k) => 0.20,
        Some(MonthlyEmi::From5kTo15k) => 0.45,
        Some(MonthlyEmi::Above15k) => 0.70,
        None => 0.30,
    }
}

fn ranked_attributions(feature_scores: &[FeatureScore]) -> Vec<Attribution> {
    let mut attributions: Vec<Attribution> = feature_scores
        .iter()
        .map(|entry| Attribution {
            feature: entry.feature,
            value: entry.attribution,
        })
        .collect();
    // `sort_by` is stable, so equal magnitudes keep feature order.
    attributions.sort_by(|left, right| right.value.abs().total_cmp(&left.value.abs()));
    attributions
}
