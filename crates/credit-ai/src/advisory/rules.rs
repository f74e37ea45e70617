use super::{Impact, Suggestion};
use crate::scoring::{
    AnswerSet, BankBalance, BillPaymentBehavior, IncomeDuration, IncomeSources,
    LoanRejectionHistory, MissedPayments, MonthlyEmi, MonthlyIncome, SavingsHabit,
};

/// One advisory rule: a trigger over the raw answers and the suggestion it emits.
pub(crate) struct AdvisoryRule {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub triggers: fn(&AnswerSet) -> bool,
}

impl AdvisoryRule {
    pub(crate) fn suggestion(&self) -> Suggestion {
        Suggestion {
            title: self.title.to_string(),
            description: self.description.to_string(),
            impact: self.impact,
        }
    }
}

/// Rules in evaluation order. Ties in impact keep this order in the output.
pub(crate) const RULES: [AdvisoryRule; 9] = [
    AdvisoryRule {
        title: "Eliminate Missed Payments",
        description: "Set up auto-pay or payment reminders for all bills and EMIs. Even 1-2 missed payments significantly hurt your score.",
        impact: Impact::High,
        triggers: |answers| answers.missed_payments != Some(MissedPayments::Never),
    },
    AdvisoryRule {
        title: "Reduce Your Debt-to-Income Ratio",
        description: "Focus on paying down existing EMIs before taking new loans. Consider debt consolidation to lower monthly obligations.",
        impact: Impact::High,
        triggers: |answers| {
            matches!(
                answers.total_monthly_emi,
                Some(MonthlyEmi::Above15k | MonthlyEmi::From5kTo15k)
            )
        },
    },
    AdvisoryRule {
        title: "Pay Bills Before Due Date",
        description: "Paying bills early demonstrates financial discipline. Set up auto-debit 3-5 days before due dates.",
        impact: Impact::Medium,
        triggers: |answers| {
            answers.bill_payment_behavior != Some(BillPaymentBehavior::BeforeDueDate)
        },
    },
    AdvisoryRule {
        title: "Build a Liquidity Buffer",
        description: "Maintain at least 3 months of expenses as bank balance. Start with ₹1,000/month auto-transfer to savings.",
        impact: Impact::High,
        triggers: |answers| {
            matches!(
                answers.avg_bank_balance,
                Some(BankBalance::Below5k | BankBalance::From5kTo20k)
            )
        },
    },
    AdvisoryRule {
        title: "Develop Consistent Savings Habit",
        description: "Save at least 10-20% of monthly income. Use recurring deposits or SIPs for automated savings.",
        impact: Impact::Medium,
        triggers: |answers| {
            matches!(
                answers.savings_habit,
                Some(SavingsHabit::No | SavingsHabit::Occasionally)
            )
        },
    },
    AdvisoryRule {
        title: "Diversify Income Sources",
        description: "Explore freelancing, part-time work, or passive income streams. Multiple income sources reduce default risk significantly.",
        impact: Impact::Medium,
        triggers: |answers| answers.income_sources == Some(IncomeSources::One),
    },
    AdvisoryRule {
        title: "Build Income Stability",
        description: "Stay in your current role longer to demonstrate income consistency. Avoid frequent job changes.",
        impact: Impact::Medium,
        triggers: |answers| {
            matches!(
                answers.income_duration,
                Some(IncomeDuration::UnderSixMonths | IncomeDuration::SixToTwelveMonths)
            )
        },
    },
    AdvisoryRule {
        title: "Increase Earning Capacity",
        description: "Invest in skill development or certifications to boost income. Consider upskilling in high-demand areas.",
        impact: Impact::Low,
        triggers: |answers| {
            matches!(
                answers.monthly_income_range,
                Some(MonthlyIncome::Below15k | MonthlyIncome::From15kTo30k)
            )
        },
    },
    AdvisoryRule {
        title: "Address Past Loan Rejections",
        description: "Understand why past applications were rejected. Fix those specific issues before reapplying.",
        impact: Impact::Medium,
        triggers: |answers| answers.loan_rejection_history != Some(LoanRejectionHistory::No),
    },
];
