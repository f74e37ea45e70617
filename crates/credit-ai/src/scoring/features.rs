use serde::{Deserialize, Serialize};

use super::answers::{
    AnswerSet, BankBalance, BillPaymentBehavior, EmploymentType, IncomeDuration, IncomeSources,
    LoanRejectionHistory, MissedPayments, MonthlyEmi, MonthlyIncome, QuestionOption,
    SavingsHabit,
};

/// Sub-score assigned when an answer is missing or not recognized.
pub const NEUTRAL_SUB_SCORE: u8 = 50;

/// The eleven scored input dimensions, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Monthly Income")]
    MonthlyIncome,
    #[serde(rename = "Employment Type")]
    EmploymentType,
    #[serde(rename = "Income Duration")]
    IncomeDuration,
    #[serde(rename = "Monthly EMI")]
    MonthlyEmi,
    #[serde(rename = "Missed Payments")]
    MissedPayments,
    #[serde(rename = "Bill Payment Behavior")]
    BillPaymentBehavior,
    #[serde(rename = "Avg Bank Balance")]
    AvgBankBalance,
    #[serde(rename = "Savings Habit")]
    SavingsHabit,
    #[serde(rename = "Income Sources")]
    IncomeSources,
    #[serde(rename = "Loan Rejection History")]
    LoanRejectionHistory,
    #[serde(rename = "Age")]
    Age,
}

impl Feature {
    pub const ALL: [Feature; 11] = [
        Feature::MonthlyIncome,
        Feature::EmploymentType,
        Feature::IncomeDuration,
        Feature::MonthlyEmi,
        Feature::MissedPayments,
        Feature::BillPaymentBehavior,
        Feature::AvgBankBalance,
        Feature::SavingsHabit,
        Feature::IncomeSources,
        Feature::LoanRejectionHistory,
        Feature::Age,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Feature::MonthlyIncome => "Monthly Income",
            Feature::EmploymentType => "Employment Type",
            Feature::IncomeDuration => "Income Duration",
            Feature::MonthlyEmi => "Monthly EMI",
            Feature::MissedPayments => "Missed Payments",
            Feature::BillPaymentBehavior => "Bill Payment Behavior",
            Feature::AvgBankBalance => "Avg Bank Balance",
            Feature::SavingsHabit => "Savings Habit",
            Feature::IncomeSources => "Income Sources",
            Feature::LoanRejectionHistory => "Loan Rejection History",
            Feature::Age => "Age",
        }
    }

    /// Largest attribution magnitude the feature can produce, reached at sub-score 0 or 100.
    pub const fn attribution_ceiling(self) -> f64 {
        match self {
            Feature::MonthlyIncome => 0.18,
            Feature::EmploymentType => 0.12,
            Feature::IncomeDuration => 0.15,
            Feature::MonthlyEmi => 0.20,
            Feature::MissedPayments => 0.25,
            Feature::BillPaymentBehavior => 0.10,
            Feature::AvgBankBalance => 0.12,
            Feature::SavingsHabit => 0.08,
            Feature::IncomeSources => 0.06,
            Feature::LoanRejectionHistory => 0.14,
            Feature::Age => 0.05,
        }
    }
}

/// Raw questionnaire value handed to the feature scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureValue {
    MonthlyIncome(Option<MonthlyIncome>),
    EmploymentType(Option<EmploymentType>),
    IncomeDuration(Option<IncomeDuration>),
    MonthlyEmi(Option<MonthlyEmi>),
    MissedPayments(Option<MissedPayments>),
    BillPaymentBehavior(Option<BillPaymentBehavior>),
    AvgBankBalance(Option<BankBalance>),
    SavingsHabit(Option<SavingsHabit>),
    IncomeSources(Option<IncomeSources>),
    LoanRejectionHistory(Option<LoanRejectionHistory>),
    Age(Option<u8>),
    /// A value that could not be interpreted for any feature.
    Unrecognized,
}

impl FeatureValue {
    /// Interpret a display string for `feature`. Unknown strings become `None` answers, and an
    /// age that does not parse becomes [`FeatureValue::Unrecognized`].
    pub fn parse(feature: Feature, raw: &str) -> Self {
        match feature {
            Feature::MonthlyIncome => Self::MonthlyIncome(MonthlyIncome::from_label(raw)),
            Feature::EmploymentType => Self::EmploymentType(EmploymentType::from_label(raw)),
            Feature::IncomeDuration => Self::IncomeDuration(IncomeDuration::from_label(raw)),
            Feature::MonthlyEmi => Self::MonthlyEmi(MonthlyEmi::from_label(raw)),
            Feature::MissedPayments => Self::MissedPayments(MissedPayments::from_label(raw)),
            Feature::BillPaymentBehavior => {
                Self::BillPaymentBehavior(BillPaymentBehavior::from_label(raw))
            }
            Feature::AvgBankBalance => Self::AvgBankBalance(BankBalance::from_label(raw)),
            Feature::SavingsHabit => Self::SavingsHabit(SavingsHabit::from_label(raw)),
            Feature::IncomeSources => Self::IncomeSources(IncomeSources::from_label(raw)),
            Feature::LoanRejectionHistory => {
                Self::LoanRejectionHistory(LoanRejectionHistory::from_label(raw))
            }
            Feature::Age => raw
                .trim()
                .parse::<u8>()
                .map(|age| Self::Age(Some(age)))
                .unwrap_or(Self::Unrecognized),
        }
    }
}

impl AnswerSet {
    /// The raw value this answer set holds for `feature`.
    pub fn value_of(&self, feature: Feature) -> FeatureValue {
        match feature {
            Feature::MonthlyIncome => FeatureValue::MonthlyIncome(self.monthly_income_range),
            Feature::EmploymentType => FeatureValue::EmploymentType(self.employment_type),
            Feature::IncomeDuration => FeatureValue::IncomeDuration(self.income_duration),
            Feature::MonthlyEmi => FeatureValue::MonthlyEmi(self.total_monthly_emi),
            Feature::MissedPayments => FeatureValue::MissedPayments(self.missed_payments),
            Feature::BillPaymentBehavior => {
                FeatureValue::BillPaymentBehavior(self.bill_payment_behavior)
            }
            Feature::AvgBankBalance => FeatureValue::AvgBankBalance(self.avg_bank_balance),
            Feature::SavingsHabit => FeatureValue::SavingsHabit(self.savings_habit),
            Feature::IncomeSources => FeatureValue::IncomeSources(self.income_sources),
            Feature::LoanRejectionHistory => {
                FeatureValue::LoanRejectionHistory(self.loan_rejection_history)
            }
            Feature::Age => FeatureValue::Age(self.age),
        }
    }
}

/// Normalized standing on one feature plus its signed risk attribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScore {
    pub feature: Feature,
    pub score: u8,
    /// Negative values reduce predicted risk, positive values increase it.
    pub attribution: f64,
}

/// Score a single feature. Values that are missing, unrecognized or of the wrong kind for the
/// feature fall back to [`NEUTRAL_SUB_SCORE`] and a zero attribution.
pub fn score_feature(feature: Feature, value: FeatureValue) -> FeatureScore {
    let score = match (feature, value) {
        (Feature::MonthlyIncome, FeatureValue::MonthlyIncome(Some(answer))) => {
            monthly_income_score(answer)
        }
        (Feature::EmploymentType, FeatureValue::EmploymentType(Some(answer))) => {
            employment_score(answer)
        }
        (Feature::IncomeDuration, FeatureValue::IncomeDuration(Some(answer))) => {
            income_duration_score(answer)
        }
        (Feature::MonthlyEmi, FeatureValue::MonthlyEmi(Some(answer))) => emi_score(answer),
        (Feature::MissedPayments, FeatureValue::MissedPayments(Some(answer))) => {
            missed_payments_score(answer)
        }
        (Feature::BillPaymentBehavior, FeatureValue::BillPaymentBehavior(Some(answer))) => {
            bill_payment_score(answer)
        }
        (Feature::AvgBankBalance, FeatureValue::AvgBankBalance(Some(answer))) => {
            bank_balance_score(answer)
        }
        (Feature::SavingsHabit, FeatureValue::SavingsHabit(Some(answer))) => {
            savings_score(answer)
        }
        (Feature::IncomeSources, FeatureValue::IncomeSources(Some(answer))) => {
            income_sources_score(answer)
        }
        (Feature::LoanRejectionHistory, FeatureValue::LoanRejectionHistory(Some(answer))) => {
            rejection_history_score(answer)
        }
        (Feature::Age, FeatureValue::Age(Some(age))) => age_score(age),
        _ => NEUTRAL_SUB_SCORE,
    };

    FeatureScore {
        feature,
        score,
        attribution: attribution(feature, score),
    }
}

fn attribution(feature: Feature, score: u8) -> f64 {
    let distance = (f64::from(score) - f64::from(NEUTRAL_SUB_SCORE)) / 100.0;
    round_to(-distance * feature.attribution_ceiling(), 3)
}

/// Round half away from zero to `places` decimals, normalizing `-0.0` to `0.0`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor + 0.0
}

const fn monthly_income_score(answer: MonthlyIncome) -> u8 {
    match answer {
        MonthlyIncome::Below15k => 20,
        MonthlyIncome::From15kTo30k => 40,
        MonthlyIncome::From30kTo60k => 65,
        MonthlyIncome::From60kTo1L => 80,
        MonthlyIncome::Above1L => 95,
    }
}

const fn employment_score(answer: EmploymentType) -> u8 {
    match answer {
        EmploymentType::Salaried => 90,
        EmploymentType::BusinessOwner => 70,
        EmploymentType::SelfEmployed => 55,
        EmploymentType::Freelancer => 40,
    }
}

const fn income_duration_score(answer: IncomeDuration) -> u8 {
    match answer {
        IncomeDuration::UnderSixMonths => 25,
        IncomeDuration::SixToTwelveMonths => 45,
        IncomeDuration::OneToThreeYears => 70,
        IncomeDuration::OverThreeYears => 95,
    }
}

const fn emi_score(answer: MonthlyEmi) -> u8 {
    match answer {
        MonthlyEmi::NoEmi => 95,
        MonthlyEmi::Below5k => 75,
        MonthlyEmi::From5kTo15k => 45,
        MonthlyEmi::Above15k => 20,
    }
}

const fn missed_payments_score(answer: MissedPayments) -> u8 {
    match answer {
        MissedPayments::Never => 95,
        MissedPayments::OnceOrTwice => 40,
        MissedPayments::ThreeOrMore => 10,
    }
}

const fn bill_payment_score(answer: BillPaymentBehavior) -> u8 {
    match answer {
        BillPaymentBehavior::BeforeDueDate => 90,
        BillPaymentBehavior::OnDueDate => 65,
        BillPaymentBehavior::AfterDueDate => 25,
    }
}

const fn bank_balance_score(answer: BankBalance) -> u8 {
    match answer {
        BankBalance::Below5k => 15,
        BankBalance::From5kTo20k => 40,
        BankBalance::From20kTo50k => 70,
        BankBalance::Above50k => 92,
    }
}

const fn savings_score(answer: SavingsHabit) -> u8 {
    match answer {
        SavingsHabit::No => 15,
        SavingsHabit::Occasionally => 40,
        SavingsHabit::UnderTwentyPercent => 65,
        SavingsHabit::TwentyPercentPlus => 90,
    }
}

const fn income_sources_score(answer: IncomeSources) -> u8 {
    match answer {
        IncomeSources::One => 50,
        IncomeSources::Two => 75,
        IncomeSources::ThreeOrMore => 92,
    }
}

const fn rejection_history_score(answer: LoanRejectionHistory) -> u8 {
    match answer {
        LoanRejectionHistory::No => 90,
        LoanRejectionHistory::Once => 50,
        LoanRejectionHistory::Multiple => 15,
    }
}

/// Young and elderly borrowers score below prime working age.
const fn age_score(age: u8) -> u8 {
    match age {
        0..=20 => 30,
        21..=24 => 50,
        25..=34 => 80,
        35..=49 => 85,
        50..=59 => 70,
        _ => 55,
    }
}
