use std::io::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scoring::round_to;

pub const BORROWER_COUNT: usize = 50;
const FIRST_ID: usize = 1001;
/// Credit score at or above which a borrower is approved.
pub const APPROVAL_CUTOFF: u16 = 550;

const FIRST_NAMES: [&str; 20] = [
    "Aarav", "Priya", "Rahul", "Sneha", "Vikram", "Ananya", "Rohan", "Kavita", "Arjun", "Meera",
    "Sanjay", "Divya", "Amit", "Pooja", "Karan", "Neha", "Raj", "Swati", "Deepak", "Ritu",
];
const LAST_NAMES: [&str; 20] = [
    "Sharma", "Patel", "Singh", "Kumar", "Gupta", "Reddy", "Joshi", "Mehta", "Nair", "Verma",
    "Iyer", "Chopra", "Das", "Bhat", "Rao", "Desai", "Mishra", "Pandey", "Shah", "Agarwal",
];

/// Three-way band used by the portfolio views. Distinct from the questionnaire
/// [`RiskBand`](crate::scoring::RiskBand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortfolioBand {
    Low,
    Medium,
    High,
}

impl PortfolioBand {
    pub const fn from_credit_score(credit_score: u16) -> Self {
        match credit_score {
            700..=u16::MAX => Self::Low,
            550..=699 => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Sign and scale applied to generated risk-driver attributions.
    const fn shap_multiplier(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.3,
            Self::Low => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Decline => "Decline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapValue {
    pub feature: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: String,
    pub name: String,
    pub credit_score: u16,
    pub risk_band: PortfolioBand,
    pub prediction_probability: f64,
    pub debt_to_income_ratio: f64,
    pub payment_utilization_ratio: f64,
    pub monthly_income: u32,
    pub open_accounts: u8,
    pub late_payments: u8,
    pub total_debt: u32,
    pub credit_age_years: f64,
    pub recommendation: Decision,
    pub confidence: f64,
    /// Sorted by descending magnitude.
    pub shap_values: Vec<ShapValue>,
}

impl Borrower {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.id.to_lowercase().contains(needle)
    }
}

pub(crate) fn generate_borrowers<R: Rng>(rng: &mut R) -> Vec<Borrower> {
    (0..BORROWER_COUNT)
        .map(|index| generate_borrower(rng, index))
        .collect()
}

fn generate_borrower<R: Rng>(rng: &mut R, index: usize) -> Borrower {
    let credit_score = (350.0 + rng.gen::<f64>() * 500.0).round() as u16;
    let risk_band = PortfolioBand::from_credit_score(credit_score);

    let probability = match risk_band {
        PortfolioBand::Low => 0.10 + rng.gen::<f64>() * 0.25,
        PortfolioBand::Medium => 0.35 + rng.gen::<f64>() * 0.30,
        PortfolioBand::High => 0.65 + rng.gen::<f64>() * 0.30,
    };
    let debt_to_income_ratio = round_to(0.1 + rng.gen::<f64>() * 0.7, 2);
    let payment_utilization_ratio = round_to(0.05 + rng.gen::<f64>() * 0.9, 2);
    let monthly_income = (15_000.0 + rng.gen::<f64>() * 185_000.0).round() as u32;
    let open_accounts = (1.0 + rng.gen::<f64>() * 12.0).round() as u8;
    let late_payments = match risk_band {
        PortfolioBand::Low => (rng.gen::<f64>() * 2.0).round(),
        PortfolioBand::Medium => (1.0 + rng.gen::<f64>() * 5.0).round(),
        PortfolioBand::High => (3.0 + rng.gen::<f64>() * 10.0).round(),
    } as u8;
    let total_debt = (10_000.0 + rng.gen::<f64>() * 2_000_000.0).round() as u32;
    let credit_age_years = round_to(1.0 + rng.gen::<f64>() * 20.0, 1);
    let confidence = round_to(0.6 + rng.gen::<f64>() * 0.35, 2);

    Borrower {
        id: format!("BRW-{:04}", index + FIRST_ID),
        name: format!(
            "{} {}",
            FIRST_NAMES[index % FIRST_NAMES.len()],
            LAST_NAMES[(index * 7) % LAST_NAMES.len()]
        ),
        credit_score,
        risk_band,
        prediction_probability: round_to(probability, 3),
        debt_to_income_ratio,
        payment_utilization_ratio,
        monthly_income,
        open_accounts,
        late_payments,
        total_debt,
        credit_age_years,
        recommendation: if credit_score >= APPROVAL_CUTOFF {
            Decision::Approve
        } else {
            Decision::Decline
        },
        confidence,
        shap_values: generate_shap_values(rng, risk_band),
    }
}

fn generate_shap_values<R: Rng>(rng: &mut R, band: PortfolioBand) -> Vec<ShapValue> {
    let multiplier = band.shap_multiplier();
    // (feature, sign, base, spread)
    let drivers = [
        ("Debt-to-Income Ratio", multiplier, 0.15, 0.20),
        ("Payment Utilization", multiplier, 0.10, 0.15),
        ("Late Payments", multiplier, 0.08, 0.12),
        ("Credit Age", -multiplier, 0.05, 0.10),
        ("Monthly Income", -multiplier, 0.04, 0.08),
    ];

    let mut values: Vec<ShapValue> = drivers
        .iter()
        .map(|(feature, sign, base, spread)| ShapValue {
            feature: (*feature).to_string(),
            value: round_to(sign * (base + rng.gen::<f64>() * spread), 3),
        })
        .collect();
    values.push(ShapValue {
        feature: "Open Accounts".to_string(),
        value: round_to((rng.gen::<f64>() - 0.5) * 0.06, 3),
    });
    values.push(ShapValue {
        feature: "Total Debt".to_string(),
        value: round_to(multiplier * (0.03 + rng.gen::<f64>() * 0.05), 3),
    });

    values.sort_by(|left, right| right.value.abs().total_cmp(&left.value.abs()));
    values
}

/// Case-insensitive substring match on name or id. A blank query matches everyone.
pub fn search<'a>(borrowers: &'a [Borrower], query: &str, limit: Option<usize>) -> Vec<&'a Borrower> {
    let needle = query.trim().to_lowercase();
    borrowers
        .iter()
        .filter(|borrower| needle.is_empty() || borrower.matches(&needle))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

pub fn find<'a>(borrowers: &'a [Borrower], id: &str) -> Option<&'a Borrower> {
    borrowers
        .iter()
        .find(|borrower| borrower.id.eq_ignore_ascii_case(id.trim()))
}

#[derive(Serialize)]
struct BorrowerRow<'a> {
    id: &'a str,
    name: &'a str,
    credit_score: u16,
    risk_band: &'static str,
    prediction_probability: f64,
    debt_to_income_ratio: f64,
    payment_utilization_ratio: f64,
    monthly_income: u32,
    open_accounts: u8,
    late_payments: u8,
    total_debt: u32,
    credit_age_years: f64,
    recommendation: &'static str,
    confidence: f64,
    top_driver: &'a str,
}

impl<'a> From<&'a Borrower> for BorrowerRow<'a> {
    fn from(borrower: &'a Borrower) -> Self {
        Self {
            id: &borrower.id,
            name: &borrower.name,
            credit_score: borrower.credit_score,
            risk_band: borrower.risk_band.label(),
            prediction_probability: borrower.prediction_probability,
            debt_to_income_ratio: borrower.debt_to_income_ratio,
            payment_utilization_ratio: borrower.payment_utilization_ratio,
            monthly_income: borrower.monthly_income,
            open_accounts: borrower.open_accounts,
            late_payments: borrower.late_payments,
            total_debt: borrower.total_debt,
            credit_age_years: borrower.credit_age_years,
            recommendation: borrower.recommendation.label(),
            confidence: borrower.confidence,
            top_driver: borrower
                .shap_values
                .first()
                .map(|shap| shap.feature.as_str())
                .unwrap_or(""),
        }
    }
}

/// Write one CSV row per borrower, with a header row.
pub fn write_csv<W: Write>(borrowers: &[Borrower], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for borrower in borrowers {
        csv_writer.serialize(BorrowerRow::from(borrower))?;
    }
    csv_writer.flush()?;
    Ok(())
}
