use crate::infra::{parse_date, parse_option};
use chrono::{Local, NaiveDate};
use clap::Args;
use credit_ai::advisory::{generate_suggestions, Suggestion};
use credit_ai::config::AppConfig;
use credit_ai::error::AppError;
use credit_ai::portfolio::{Decision, PortfolioSnapshot};
use credit_ai::report::ScoreReport;
use credit_ai::scoring::{
    compute_score, AnswerSet, BankBalance, BillPaymentBehavior, EmploymentType, IncomeDuration,
    IncomeSources, LoanRejectionHistory, MissedPayments, MonthlyEmi, MonthlyIncome, SavingsHabit,
    ScoringResult,
};
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;

const TOP_DRIVERS: usize = 3;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Monthly income range, e.g. "₹30,000–60,000"
    #[arg(long, value_parser = parse_option::<MonthlyIncome>)]
    pub(crate) income: Option<MonthlyIncome>,
    /// Employment type, e.g. "Salaried"
    #[arg(long, value_parser = parse_option::<EmploymentType>)]
    pub(crate) employment: Option<EmploymentType>,
    /// How long the current income has been earned, e.g. "1–3 years"
    #[arg(long, value_parser = parse_option::<IncomeDuration>)]
    pub(crate) income_duration: Option<IncomeDuration>,
    /// Total monthly EMI, e.g. "None"
    #[arg(long, value_parser = parse_option::<MonthlyEmi>)]
    pub(crate) emi: Option<MonthlyEmi>,
    /// Missed payments in the last 12 months, e.g. "Never"
    #[arg(long, value_parser = parse_option::<MissedPayments>)]
    pub(crate) missed_payments: Option<MissedPayments>,
    /// Bill payment behavior, e.g. "Before due date"
    #[arg(long, value_parser = parse_option::<BillPaymentBehavior>)]
    pub(crate) bill_payment: Option<BillPaymentBehavior>,
    /// Average bank balance, e.g. "₹20,000–50,000"
    #[arg(long, value_parser = parse_option::<BankBalance>)]
    pub(crate) bank_balance: Option<BankBalance>,
    /// Savings habit, e.g. "Yes (20%+)"
    #[arg(long, value_parser = parse_option::<SavingsHabit>)]
    pub(crate) savings: Option<SavingsHabit>,
    /// Number of income sources: "1", "2" or "3+"
    #[arg(long, value_parser = parse_option::<IncomeSources>)]
    pub(crate) income_sources: Option<IncomeSources>,
    /// Prior loan rejections, e.g. "No"
    #[arg(long, value_parser = parse_option::<LoanRejectionHistory>)]
    pub(crate) loan_rejection: Option<LoanRejectionHistory>,
    /// Borrower age (18-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(18..=100))]
    pub(crate) age: u8,
    /// Write the text report to this file, or into this directory under its default name
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Report generation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    fn answers(&self) -> AnswerSet {
        AnswerSet {
            monthly_income_range: self.income,
            employment_type: self.employment,
            income_duration: self.income_duration,
            total_monthly_emi: self.emi,
            missed_payments: self.missed_payments,
            bill_payment_behavior: self.bill_payment,
            avg_bank_balance: self.bank_balance,
            savings_habit: self.savings,
            income_sources: self.income_sources,
            loan_rejection_history: self.loan_rejection,
            age: Some(self.age),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioExportArgs {
    /// Destination CSV file
    #[arg(long)]
    pub(crate) out: PathBuf,
    /// Portfolio seed (defaults to PORTFOLIO_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Portfolio seed (defaults to PORTFOLIO_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Skip the portfolio summary portion of the demo.
    #[arg(long)]
    pub(crate) skip_portfolio: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let answers = args.answers();
    answers.validate()?;

    let result = compute_score(&answers);
    let suggestions = generate_suggestions(&answers, &result);

    if args.json {
        let payload = json!({
            "result": result,
            "suggestions": suggestions,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Result payload unavailable: {err}"),
        }
    } else {
        render_result("Questionnaire", &answers, &result, &suggestions);
    }

    if let Some(target) = args.report {
        let generated_on = args.date.unwrap_or_else(|| Local::now().date_naive());
        let report = ScoreReport::build(
            &result,
            &answers,
            &answers.age_label(),
            &suggestions,
            generated_on,
        );
        let path = if target.is_dir() {
            target.join(&report.file_name)
        } else {
            target
        };
        std::fs::write(&path, report.render())?;
        println!(
            "\nReport written to {} ({} page(s))",
            path.display(),
            report.page_count()
        );
    }

    Ok(())
}

pub(crate) fn run_portfolio_export(args: PortfolioExportArgs) -> Result<(), AppError> {
    let seed = resolve_seed(args.seed)?;
    let snapshot = PortfolioSnapshot::generate(seed);

    let file = File::create(&args.out)?;
    snapshot.export_csv(file)?;
    println!(
        "Exported {} borrowers (seed {seed}) to {}",
        snapshot.borrowers.len(),
        args.out.display()
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("CreditAI scoring demo");
    for (label, answers) in sample_profiles() {
        let result = compute_score(&answers);
        let suggestions = generate_suggestions(&answers, &result);
        println!();
        render_result(label, &answers, &result, &suggestions);
    }

    if args.skip_portfolio {
        return Ok(());
    }

    let seed = resolve_seed(args.seed)?;
    let snapshot = PortfolioSnapshot::generate(seed);
    let approved = snapshot
        .borrowers
        .iter()
        .filter(|borrower| borrower.recommendation == Decision::Approve)
        .count();

    println!("\nPortfolio snapshot (seed {seed})");
    println!(
        "- {} borrowers | {} approved | {} declined",
        snapshot.borrowers.len(),
        approved,
        snapshot.borrowers.len() - approved
    );
    println!(
        "- Selected model {} | AUC {:.3}",
        snapshot.models.selected_model, snapshot.kpis.auc_score
    );
    if let Some(best) = snapshot.models.best_threshold {
        println!(
            "- Best F1 {:.3} at threshold {:.2} (precision {:.3}, recall {:.3})",
            best.f1, best.threshold, best.precision, best.recall
        );
    }

    let fairness = &snapshot.fairness;
    match (fairness.disparate_impact_ratio, fairness.verdict) {
        (Some(ratio), Some(verdict)) => {
            println!("- Disparate impact ratio {ratio:.3} ({})", verdict.label())
        }
        _ => println!("- Disparate impact ratio unavailable"),
    }
    for audit in fairness.subgroups.iter().filter(|audit| audit.flagged) {
        println!(
            "  - {} flagged: approval {:.1}% ({:.1} pts from reference)",
            audit.subgroup.name,
            audit.subgroup.approval_rate * 100.0,
            audit.approval_gap * 100.0
        );
    }
    if let Some(costs) = &fairness.cost_simulation {
        println!("- Net impact of selected model: ₹{}", costs.net_impact);
    }

    Ok(())
}

fn resolve_seed(seed: Option<u64>) -> Result<u64, AppError> {
    match seed {
        Some(seed) => Ok(seed),
        None => Ok(AppConfig::load()?.portfolio.seed),
    }
}

fn render_result(
    label: &str,
    answers: &AnswerSet,
    result: &ScoringResult,
    suggestions: &[Suggestion],
) {
    println!(
        "{label}: {} answered, age {}",
        answers.answered(),
        answers.age_label()
    );
    println!(
        "- Credit score {} | {} | {}",
        result.credit_score,
        result.risk_band.label(),
        result.recommendation.label()
    );
    println!(
        "- Default probability {:.1}% | confidence {:.0}% | DTI {:.0}%",
        result.prediction_probability * 100.0,
        result.confidence * 100.0,
        result.debt_to_income_ratio * 100.0
    );
    println!("  Top drivers:");
    for attribution in result.attributions.iter().take(TOP_DRIVERS) {
        println!(
            "    - {}: {:+.3}",
            attribution.feature.label(),
            attribution.value
        );
    }

    if suggestions.is_empty() {
        println!("  Suggestions: none");
    } else {
        println!("  Suggestions:");
        for suggestion in suggestions {
            println!(
                "    - [{}] {}",
                suggestion.impact.label(),
                suggestion.title
            );
        }
    }
}

fn sample_profiles() -> [(&'static str, AnswerSet); 3] {
    [
        (
            "Salaried professional",
            AnswerSet {
                monthly_income_range: Some(MonthlyIncome::From60kTo1L),
                employment_type: Some(EmploymentType::Salaried),
                income_duration: Some(IncomeDuration::OverThreeYears),
                total_monthly_emi: Some(MonthlyEmi::Below5k),
                missed_payments: Some(MissedPayments::Never),
                bill_payment_behavior: Some(BillPaymentBehavior::BeforeDueDate),
                avg_bank_balance: Some(BankBalance::From20kTo50k),
                savings_habit: Some(SavingsHabit::TwentyPercentPlus),
                income_sources: Some(IncomeSources::Two),
                loan_rejection_history: Some(LoanRejectionHistory::No),
                age: Some(36),
            },
        ),
        (
            "Gig worker",
            AnswerSet {
                monthly_income_range: Some(MonthlyIncome::From15kTo30k),
                employment_type: Some(EmploymentType::Freelancer),
                income_duration: Some(IncomeDuration::SixToTwelveMonths),
                total_monthly_emi: Some(MonthlyEmi::From5kTo15k),
                missed_payments: Some(MissedPayments::OnceOrTwice),
                bill_payment_behavior: Some(BillPaymentBehavior::OnDueDate),
                avg_bank_balance: Some(BankBalance::From5kTo20k),
                savings_habit: Some(SavingsHabit::Occasionally),
                income_sources: Some(IncomeSources::ThreeOrMore),
                loan_rejection_history: Some(LoanRejectionHistory::Once),
                age: Some(27),
            },
        ),
        (
            "Thin-file applicant",
            AnswerSet {
                monthly_income_range: Some(MonthlyIncome::Below15k),
                missed_payments: Some(MissedPayments::Never),
                age: Some(19),
                ..AnswerSet::default()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_profiles_span_tiers() {
        let bands: Vec<_> = sample_profiles()
            .iter()
            .map(|(_, answers)| compute_score(answers).risk_band)
            .collect();

        assert_eq!(bands.len(), 3);
        assert!(bands[0] < bands[1], "professional should outrank gig worker");
        for (_, answers) in sample_profiles() {
            assert!(answers.validate().is_ok());
        }
    }

    #[test]
    fn score_args_map_onto_answers() {
        let args = ScoreArgs {
            income: Some(MonthlyIncome::Above1L),
            employment: None,
            income_duration: None,
            emi: Some(MonthlyEmi::NoEmi),
            missed_payments: None,
            bill_payment: None,
            bank_balance: None,
            savings: None,
            income_sources: None,
            loan_rejection: None,
            age: 45,
            report: None,
            date: None,
            json: false,
        };

        let answers = args.answers();
        assert_eq!(answers.monthly_income_range, Some(MonthlyIncome::Above1L));
        assert_eq!(answers.total_monthly_emi, Some(MonthlyEmi::NoEmi));
        assert_eq!(answers.answered(), 2);
        assert_eq!(answers.age, Some(45));
    }
}
