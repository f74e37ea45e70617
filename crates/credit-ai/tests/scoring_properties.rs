//! Property tests over arbitrary (including partial) questionnaires.

use credit_ai::advisory::{generate_suggestions, MAX_SUGGESTIONS};
use credit_ai::scoring::{
    compute_score, AnswerSet, BankBalance, BillPaymentBehavior, EmploymentType, Feature,
    IncomeDuration, IncomeSources, LoanRejectionHistory, MissedPayments, MonthlyEmi,
    MonthlyIncome, QuestionOption, SavingsHabit, ScoreTier, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
};
use proptest::prelude::*;

fn answer<T>() -> impl Strategy<Value = Option<T>>
where
    T: QuestionOption + std::fmt::Debug,
{
    prop::option::of(prop::sample::select(T::OPTIONS.to_vec()))
}

fn answer_set() -> impl Strategy<Value = AnswerSet> {
    (
        (
            answer::<MonthlyIncome>(),
            answer::<EmploymentType>(),
            answer::<IncomeDuration>(),
            answer::<MonthlyEmi>(),
            answer::<MissedPayments>(),
        ),
        (
            answer::<BillPaymentBehavior>(),
            answer::<BankBalance>(),
            answer::<SavingsHabit>(),
            answer::<IncomeSources>(),
            answer::<LoanRejectionHistory>(),
        ),
        prop::option::of(0u8..=120),
    )
        .prop_map(
            |(
                (income, employment, duration, emi, missed),
                (bills, balance, savings, sources, rejections),
                age,
            )| AnswerSet {
                monthly_income_range: income,
                employment_type: employment,
                income_duration: duration,
                total_monthly_emi: emi,
                missed_payments: missed,
                bill_payment_behavior: bills,
                avg_bank_balance: balance,
                savings_habit: savings,
                income_sources: sources,
                loan_rejection_history: rejections,
                age,
            },
        )
}

/// Copies of `answers` with one question swept through unanswered and every option.
fn sweep<T: QuestionOption>(
    answers: &AnswerSet,
    set: impl Fn(&mut AnswerSet, Option<T>),
) -> Vec<AnswerSet> {
    std::iter::once(None)
        .chain(T::OPTIONS.iter().copied().map(Some))
        .map(|value| {
            let mut variant = *answers;
            set(&mut variant, value);
            variant
        })
        .collect()
}

fn feature_variants(answers: &AnswerSet, feature: Feature) -> Vec<AnswerSet> {
    match feature {
        Feature::MonthlyIncome => sweep::<MonthlyIncome>(answers, |a, v| a.monthly_income_range = v),
        Feature::EmploymentType => sweep::<EmploymentType>(answers, |a, v| a.employment_type = v),
        Feature::IncomeDuration => sweep::<IncomeDuration>(answers, |a, v| a.income_duration = v),
        Feature::MonthlyEmi => sweep::<MonthlyEmi>(answers, |a, v| a.total_monthly_emi = v),
        Feature::MissedPayments => sweep::<MissedPayments>(answers, |a, v| a.missed_payments = v),
        Feature::BillPaymentBehavior => {
            sweep::<BillPaymentBehavior>(answers, |a, v| a.bill_payment_behavior = v)
        }
        Feature::AvgBankBalance => sweep::<BankBalance>(answers, |a, v| a.avg_bank_balance = v),
        Feature::SavingsHabit => sweep::<SavingsHabit>(answers, |a, v| a.savings_habit = v),
        Feature::IncomeSources => sweep::<IncomeSources>(answers, |a, v| a.income_sources = v),
        Feature::LoanRejectionHistory => {
            sweep::<LoanRejectionHistory>(answers, |a, v| a.loan_rejection_history = v)
        }
        Feature::Age => std::iter::once(None)
            .chain((0u8..=120).map(Some))
            .map(|age| AnswerSet { age, ..*answers })
            .collect(),
    }
}

proptest! {
    #[test]
    fn score_stays_in_range_and_tiers_agree(answers in answer_set()) {
        let result = compute_score(&answers);

        prop_assert!((MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&result.credit_score));
        let tier = ScoreTier::from_credit_score(result.credit_score);
        prop_assert_eq!(result.risk_band, tier.risk_band());
        prop_assert_eq!(result.recommendation, tier.recommendation());
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!((0.0..=1.0).contains(&result.prediction_probability));
    }

    #[test]
    fn attributions_are_complete_and_ranked(answers in answer_set()) {
        let result = compute_score(&answers);

        prop_assert_eq!(result.attributions.len(), Feature::ALL.len());
        for pair in result.attributions.windows(2) {
            prop_assert!(pair[0].value.abs() >= pair[1].value.abs());
        }
        for entry in &result.attributions {
            prop_assert!(entry.value.abs() <= entry.feature.attribution_ceiling() / 2.0 + 1e-9);
        }
    }

    #[test]
    fn score_never_drops_as_any_sub_score_rises(answers in answer_set()) {
        for feature in Feature::ALL {
            let mut scored: Vec<(u8, u16)> = feature_variants(&answers, feature)
                .iter()
                .map(|variant| {
                    let result = compute_score(variant);
                    let sub_score = result
                        .feature_score(feature)
                        .map(|entry| entry.score)
                        .unwrap_or_default();
                    (sub_score, result.credit_score)
                })
                .collect();
            scored.sort_by_key(|(sub_score, _)| *sub_score);

            for pair in scored.windows(2) {
                prop_assert!(
                    pair[0].1 <= pair[1].1,
                    "{}: sub-score {} -> {} moved credit score {} -> {}",
                    feature.label(),
                    pair[0].0,
                    pair[1].0,
                    pair[0].1,
                    pair[1].1
                );
            }
        }
    }

    #[test]
    fn clearing_missed_payments_never_lowers_score(answers in answer_set()) {
        let improved = AnswerSet {
            missed_payments: Some(MissedPayments::Never),
            ..answers
        };

        prop_assert!(compute_score(&improved).credit_score >= compute_score(&answers).credit_score);
    }

    #[test]
    fn dropping_emi_never_lowers_score(answers in answer_set()) {
        let improved = AnswerSet {
            total_monthly_emi: Some(MonthlyEmi::NoEmi),
            ..answers
        };

        let before = compute_score(&answers);
        let after = compute_score(&improved);
        prop_assert!(after.credit_score >= before.credit_score);
        prop_assert!(after.debt_to_income_ratio <= before.debt_to_income_ratio);
    }

    #[test]
    fn suggestions_are_capped_and_ordered(answers in answer_set()) {
        let result = compute_score(&answers);
        let suggestions = generate_suggestions(&answers, &result);

        prop_assert!(suggestions.len() <= MAX_SUGGESTIONS);
        for pair in suggestions.windows(2) {
            prop_assert!(pair[0].impact <= pair[1].impact);
        }
    }

    #[test]
    fn scoring_is_deterministic(answers in answer_set()) {
        prop_assert_eq!(compute_score(&answers), compute_score(&answers));
    }
}
