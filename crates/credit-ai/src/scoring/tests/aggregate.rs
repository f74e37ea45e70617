use super::common::*;
use crate::advisory::{generate_suggestions, Impact};
use crate::scoring::{
    compute_score, debt_to_income_ratio, AnswerSet, EmploymentType, Feature, MonthlyEmi,
    Recommendation, RiskBand, ScoreTier, FEATURE_WEIGHTS, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
    NEUTRAL_SUB_SCORE,
};

#[test]
fn weights_sum_to_one() {
    let total: f64 = FEATURE_WEIGHTS.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn best_case_profile_scores_prime() {
    let answers = best_answers();
    let result = compute_score(&answers);

    assert_eq!(result.credit_score, 813);
    assert_eq!(result.risk_band, RiskBand::Prime);
    assert_eq!(result.recommendation, Recommendation::StrongApprove);
    assert_eq!(result.debt_to_income_ratio, 0.05);
    assert_eq!(result.confidence, 0.93);
    assert_eq!(result.prediction_probability, 0.067);
    assert!(generate_suggestions(&answers, &result).is_empty());
}

#[test]
fn worst_case_profile_is_rejected() {
    let answers = worst_answers();
    let result = compute_score(&answers);

    assert_eq!(result.credit_score, 415);
    assert_eq!(result.risk_band, RiskBand::HighRisk);
    assert_eq!(result.recommendation, Recommendation::Reject);
    assert_eq!(result.debt_to_income_ratio, 0.70);

    let suggestions = generate_suggestions(&answers, &result);
    assert_eq!(suggestions.len(), 6);
    assert!(suggestions[..3]
        .iter()
        .all(|suggestion| suggestion.impact == Impact::High));
    assert_eq!(suggestions[0].title, "Eliminate Missed Payments");
}

#[test]
fn empty_answer_set_scores_neutral() {
    let result = compute_score(&AnswerSet::default());

    assert!(result
        .feature_scores
        .iter()
        .all(|entry| entry.score == NEUTRAL_SUB_SCORE && entry.attribution == 0.0));
    assert_eq!(result.credit_score, 575);
    assert_eq!(result.risk_band, RiskBand::Subprime);
    assert_eq!(result.recommendation, Recommendation::Review);
    assert_eq!(result.debt_to_income_ratio, 0.30);
}

#[test]
fn tier_boundaries_drive_band_and_recommendation() {
    let cases = [
        (MAX_CREDIT_SCORE, RiskBand::Prime, Recommendation::StrongApprove),
        (750, RiskBand::Prime, Recommendation::StrongApprove),
        (749, RiskBand::NearPrime, Recommendation::Approve),
        (650, RiskBand::NearPrime, Recommendation::Approve),
        (649, RiskBand::Subprime, Recommendation::Review),
        (550, RiskBand::Subprime, Recommendation::Review),
        (549, RiskBand::HighRisk, Recommendation::Reject),
        (MIN_CREDIT_SCORE, RiskBand::HighRisk, Recommendation::Reject),
    ];

    for (score, band, recommendation) in cases {
        let tier = ScoreTier::from_credit_score(score);
        assert_eq!(tier.risk_band(), band, "score {score}");
        assert_eq!(tier.recommendation(), recommendation, "score {score}");
    }
}

#[test]
fn attributions_cover_every_feature_sorted_by_magnitude() {
    for answers in [best_answers(), worst_answers(), AnswerSet::default()] {
        let result = compute_score(&answers);
        assert_eq!(result.attributions.len(), Feature::ALL.len());
        assert_eq!(result.feature_scores.len(), Feature::ALL.len());

        for feature in Feature::ALL {
            let count = result
                .attributions
                .iter()
                .filter(|entry| entry.feature == feature)
                .count();
            assert_eq!(count, 1, "{}", feature.label());
        }

        for pair in result.attributions.windows(2) {
            assert!(pair[0].value.abs() >= pair[1].value.abs());
        }
    }
}

#[test]
fn equal_magnitudes_keep_feature_order() {
    let result = compute_score(&AnswerSet {
        age: Some(22),
        ..AnswerSet::default()
    });

    // All eleven features are neutral, so the ranking is the aggregation order.
    let order: Vec<Feature> = result.attributions.iter().map(|entry| entry.feature).collect();
    assert_eq!(order, Feature::ALL.to_vec());
}

#[test]
fn debt_to_income_depends_only_on_emi() {
    let mut answers = best_answers();
    answers.total_monthly_emi = Some(MonthlyEmi::From5kTo15k);
    let salaried = compute_score(&answers);

    answers.employment_type = Some(EmploymentType::Freelancer);
    let freelancer = compute_score(&answers);

    assert_eq!(salaried.debt_to_income_ratio, 0.45);
    assert_eq!(freelancer.debt_to_income_ratio, 0.45);
    assert_eq!(debt_to_income_ratio(Some(MonthlyEmi::Below5k)), 0.20);
    assert_eq!(debt_to_income_ratio(None), 0.30);
}

#[test]
fn scoring_is_idempotent() {
    let answers = worst_answers();
    assert_eq!(compute_score(&answers), compute_score(&answers));
}

#[test]
fn stored_result_reports_its_tier() {
    let result = compute_score(&best_answers());
    assert_eq!(result.tier(), ScoreTier::Top);
    let age = result.feature_score(Feature::Age).expect("age scored");
    assert_eq!(age.score, 80);
}
