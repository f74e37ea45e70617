use serde::{Deserialize, Serialize};

/// Youngest age accepted by the questionnaire form.
pub const MIN_AGE: u8 = 18;
/// Oldest age accepted by the questionnaire form.
pub const MAX_AGE: u8 = 100;

/// Closed option set of one questionnaire question, addressed by its display label.
pub trait QuestionOption: Copy + Sized + 'static {
    /// Every option in questionnaire display order.
    const OPTIONS: &'static [Self];

    fn label(self) -> &'static str;

    /// Resolve a display label back to its option. Unknown labels yield `None`.
    fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|option| option.label() == raw)
    }
}

macro_rules! question_options {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl QuestionOption for $name {
            const OPTIONS: &'static [Self] = &[$(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

question_options! {
    /// Self-reported monthly income bracket.
    MonthlyIncome {
        Below15k => "< ₹15,000",
        From15kTo30k => "₹15,000–30,000",
        From30kTo60k => "₹30,000–60,000",
        From60kTo1L => "₹60,000–1L",
        Above1L => "₹1L+",
    }
}

question_options! {
    EmploymentType {
        Salaried => "Salaried",
        SelfEmployed => "Self-employed",
        Freelancer => "Freelancer",
        BusinessOwner => "Business owner",
    }
}

question_options! {
    /// How long the current income has been earned.
    IncomeDuration {
        UnderSixMonths => "< 6 months",
        SixToTwelveMonths => "6–12 months",
        OneToThreeYears => "1–3 years",
        OverThreeYears => "3+ years",
    }
}

question_options! {
    /// Total monthly EMI (loan instalment) obligations.
    MonthlyEmi {
        NoEmi => "None",
        Below5k => "< ₹5,000",
        From5kTo15k => "₹5,000–15,000",
        Above15k => "₹15,000+",
    }
}

question_options! {
    /// Missed payments over the last twelve months.
    MissedPayments {
        Never => "Never",
        OnceOrTwice => "1–2 times",
        ThreeOrMore => "3+ times",
    }
}

question_options! {
    BillPaymentBehavior {
        BeforeDueDate => "Before due date",
        OnDueDate => "On due date",
        AfterDueDate => "After due date",
    }
}

question_options! {
    /// Average month-end bank balance.
    BankBalance {
        Below5k => "< ₹5,000",
        From5kTo20k => "₹5,000–20,000",
        From20kTo50k => "₹20,000–50,000",
        Above50k => "₹50,000+",
    }
}

question_options! {
    SavingsHabit {
        No => "No",
        Occasionally => "Occasionally",
        UnderTwentyPercent => "Yes (less than 20%)",
        TwentyPercentPlus => "Yes (20%+)",
    }
}

question_options! {
    IncomeSources {
        One => "1",
        Two => "2",
        ThreeOrMore => "3+",
    }
}

question_options! {
    /// Prior loan applications that were turned down.
    LoanRejectionHistory {
        No => "No",
        Once => "Yes (once)",
        Multiple => "Yes (multiple times)",
    }
}

/// Questionnaire answers for one borrower.
///
/// Every field is optional: absent keys and option strings that are not part of the question's
/// option set both deserialize to `None` and score as neutral, so a partially completed
/// questionnaire still produces a result. Age also accepts numeric strings; anything that is not
/// a whole number in `0..=255` becomes `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default, with = "lenient_option")]
    pub monthly_income_range: Option<MonthlyIncome>,
    #[serde(default, with = "lenient_option")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, with = "lenient_option")]
    pub income_duration: Option<IncomeDuration>,
    #[serde(default, with = "lenient_option")]
    pub total_monthly_emi: Option<MonthlyEmi>,
    #[serde(default, with = "lenient_option")]
    pub missed_payments: Option<MissedPayments>,
    #[serde(default, with = "lenient_option")]
    pub bill_payment_behavior: Option<BillPaymentBehavior>,
    #[serde(default, with = "lenient_option")]
    pub avg_bank_balance: Option<BankBalance>,
    #[serde(default, with = "lenient_option")]
    pub savings_habit: Option<SavingsHabit>,
    #[serde(default, with = "lenient_option")]
    pub income_sources: Option<IncomeSources>,
    #[serde(default, with = "lenient_option")]
    pub loan_rejection_history: Option<LoanRejectionHistory>,
    #[serde(default, with = "lenient_age")]
    pub age: Option<u8>,
}

impl AnswerSet {
    /// Form-boundary validation. Scoring itself accepts any answer set.
    pub fn validate(&self) -> Result<(), AnswerValidationError> {
        match self.age {
            None => Err(AnswerValidationError::AgeMissing),
            Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => {
                Err(AnswerValidationError::AgeOutOfRange { age })
            }
            Some(_) => Ok(()),
        }
    }

    /// Age as shown on reports and summaries.
    pub fn age_label(&self) -> String {
        self.age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "Not provided".to_string())
    }

    /// Number of categorical questions answered with a recognized option.
    pub fn answered(&self) -> usize {
        [
            self.monthly_income_range.is_some(),
            self.employment_type.is_some(),
            self.income_duration.is_some(),
            self.total_monthly_emi.is_some(),
            self.missed_payments.is_some(),
            self.bill_payment_behavior.is_some(),
            self.avg_bank_balance.is_some(),
            self.savings_habit.is_some(),
            self.income_sources.is_some(),
            self.loan_rejection_history.is_some(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}

/// Rejection raised by the questionnaire boundary before scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerValidationError {
    #[error("age {age} is outside the accepted range 18-100")]
    AgeOutOfRange { age: u8 },
    #[error("age is required as a whole number between 18 and 100")]
    AgeMissing,
}

/// Catalogue entry used by form renderers.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<&'static str>,
}

fn labels<T: QuestionOption>() -> Vec<&'static str> {
    T::OPTIONS.iter().map(|option| option.label()).collect()
}

/// The ten categorical questions in questionnaire order.
pub fn question_catalogue() -> Vec<QuestionView> {
    vec![
        QuestionView {
            key: "monthly_income_range",
            label: "Monthly income range",
            options: labels::<MonthlyIncome>(),
        },
        QuestionView {
            key: "employment_type",
            label: "Employment type",
            options: labels::<EmploymentType>(),
        },
        QuestionView {
            key: "income_duration",
            label: "How long have you had this income?",
            options: labels::<IncomeDuration>(),
        },
        QuestionView {
            key: "total_monthly_emi",
            label: "Total monthly EMI",
            options: labels::<MonthlyEmi>(),
        },
        QuestionView {
            key: "missed_payments",
            label: "Missed payments in the last 12 months",
            options: labels::<MissedPayments>(),
        },
        QuestionView {
            key: "bill_payment_behavior",
            label: "Bill payment behavior",
            options: labels::<BillPaymentBehavior>(),
        },
        QuestionView {
            key: "avg_bank_balance",
            label: "Average bank balance",
            options: labels::<BankBalance>(),
        },
        QuestionView {
            key: "savings_habit",
            label: "Do you save regularly?",
            options: labels::<SavingsHabit>(),
        },
        QuestionView {
            key: "income_sources",
            label: "Number of income sources",
            options: labels::<IncomeSources>(),
        },
        QuestionView {
            key: "loan_rejection_history",
            label: "Have you been rejected for a loan before?",
            options: labels::<LoanRejectionHistory>(),
        },
    ]
}

/// Serde adapter storing options by display label and mapping unknown labels to `None`.
mod lenient_option {
    use super::QuestionOption;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: QuestionOption,
    {
        match value {
            Some(option) => serializer.serialize_some(option.label()),
            None => serializer.serialize_none(),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAnswer {
        Text(String),
        Number(u64),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: QuestionOption,
    {
        let option = match RawAnswer::deserialize(deserializer)? {
            RawAnswer::Text(raw) => T::from_label(&raw),
            RawAnswer::Number(raw) => T::from_label(&raw.to_string()),
            RawAnswer::Other(_) => None,
        };
        Ok(option)
    }
}

/// Serde adapter for age: whole numbers or numeric strings, anything else maps to `None`.
mod lenient_age {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(age) => serializer.serialize_some(age),
            None => serializer.serialize_none(),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Whole(i64),
        Fractional(f64),
        Text(String),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let age = match RawAge::deserialize(deserializer)? {
            RawAge::Whole(raw) => u8::try_from(raw).ok(),
            RawAge::Fractional(raw) if raw.fract() == 0.0 && (0.0..=255.0).contains(&raw) => {
                Some(raw as u8)
            }
            RawAge::Text(raw) => raw.trim().parse::<u8>().ok(),
            RawAge::Fractional(_) | RawAge::Other(_) => None,
        };
        Ok(age)
    }
}
