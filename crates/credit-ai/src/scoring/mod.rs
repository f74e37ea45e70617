//! Deterministic credit scoring over questionnaire answers.
//!
//! Each answer is mapped to a 0-100 sub-score through a fixed lookup table, the sub-scores are
//! combined with fixed weights into a 300-850 credit score, and the result carries the risk band,
//! recommendation and per-feature attributions used by explanation views.

mod aggregate;
mod answers;
mod features;
pub mod router;

#[cfg(test)]
mod tests;

pub use aggregate::{
    compute_score, debt_to_income_ratio, Attribution, Recommendation, RiskBand, ScoreTier,
    ScoringResult, FEATURE_WEIGHTS, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
};
pub use answers::{
    question_catalogue, AnswerSet, AnswerValidationError, BankBalance, BillPaymentBehavior,
    EmploymentType, IncomeDuration, IncomeSources, LoanRejectionHistory, MissedPayments,
    MonthlyEmi, MonthlyIncome, QuestionOption, QuestionView, SavingsHabit, MAX_AGE, MIN_AGE,
};
pub(crate) use features::round_to;
pub use features::{score_feature, Feature, FeatureScore, FeatureValue, NEUTRAL_SUB_SCORE};
pub use router::scoring_router;
