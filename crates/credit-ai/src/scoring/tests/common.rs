use axum::response::Response;
use serde_json::Value;

use crate::scoring::{
    AnswerSet, BankBalance, BillPaymentBehavior, EmploymentType, IncomeDuration, IncomeSources,
    LoanRejectionHistory, MissedPayments, MonthlyEmi, MonthlyIncome, SavingsHabit,
};

/// Top option on every question, age 30.
pub(super) fn best_answers() -> AnswerSet {
    AnswerSet {
        monthly_income_range: Some(MonthlyIncome::Above1L),
        employment_type: Some(EmploymentType::Salaried),
        income_duration: Some(IncomeDuration::OverThreeYears),
        total_monthly_emi: Some(MonthlyEmi::NoEmi),
        missed_payments: Some(MissedPayments::Never),
        bill_payment_behavior: Some(BillPaymentBehavior::BeforeDueDate),
        avg_bank_balance: Some(BankBalance::Above50k),
        savings_habit: Some(SavingsHabit::TwentyPercentPlus),
        income_sources: Some(IncomeSources::ThreeOrMore),
        loan_rejection_history: Some(LoanRejectionHistory::No),
        age: Some(30),
    }
}

/// Bottom option on every question, age 19.
pub(super) fn worst_answers() -> AnswerSet {
    AnswerSet {
        monthly_income_range: Some(MonthlyIncome::Below15k),
        employment_type: Some(EmploymentType::Freelancer),
        income_duration: Some(IncomeDuration::UnderSixMonths),
        total_monthly_emi: Some(MonthlyEmi::Above15k),
        missed_payments: Some(MissedPayments::ThreeOrMore),
        bill_payment_behavior: Some(BillPaymentBehavior::AfterDueDate),
        avg_bank_balance: Some(BankBalance::Below5k),
        savings_habit: Some(SavingsHabit::No),
        income_sources: Some(IncomeSources::One),
        loan_rejection_history: Some(LoanRejectionHistory::Multiple),
        age: Some(19),
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
