use chrono::NaiveDate;

use super::PAGE_WIDTH;
use crate::advisory::Suggestion;
use crate::scoring::{AnswerSet, Attribution, QuestionOption, ScoringResult};

const BAR_HALF_WIDTH: usize = 18;
const BAR_SCALE: f64 = 150.0;

pub(super) fn header(generated_on: NaiveDate) -> Vec<String> {
    vec![
        rule('='),
        "CreditAI".to_string(),
        "Credit Score Report".to_string(),
        format!("Generated: {}", generated_on.format("%-d %B %Y")),
        rule('='),
        String::new(),
    ]
}

pub(super) fn score_banner(result: &ScoringResult) -> Vec<String> {
    let band = result.risk_band.label();
    let band = if band.ends_with("Risk") {
        band.to_string()
    } else {
        format!("{band} Risk")
    };

    vec![
        rule('-'),
        centered(&result.credit_score.to_string()),
        centered(&format!("{band} — {}", result.recommendation.label())),
        rule('-'),
        String::new(),
    ]
}

pub(super) fn key_metrics(result: &ScoringResult, answers: &AnswerSet, age: &str) -> Vec<String> {
    let income = answers
        .monthly_income_range
        .map(QuestionOption::label)
        .unwrap_or("N/A");
    let employment = answers
        .employment_type
        .map(QuestionOption::label)
        .unwrap_or("N/A");

    let rows = [
        (
            "Credit Score",
            format!("{} / {}", result.credit_score, crate::scoring::MAX_CREDIT_SCORE),
        ),
        ("Risk Band", result.risk_band.label().to_string()),
        ("Recommendation", result.recommendation.label().to_string()),
        (
            "Default Probability",
            format!("{:.1}%", result.prediction_probability * 100.0),
        ),
        (
            "Debt-to-Income Ratio",
            format!("{:.0}%", result.debt_to_income_ratio * 100.0),
        ),
        ("Confidence", format!("{:.0}%", result.confidence * 100.0)),
        ("Monthly Income", income.to_string()),
        ("Employment", employment.to_string()),
        ("Age", age.to_string()),
    ];

    let mut lines = vec!["Key Financial Metrics".to_string(), String::new()];
    lines.extend(rows.iter().map(|(label, value)| two_column(label, value)));
    lines.push(String::new());
    lines
}

pub(super) fn feature_impact_heading() -> Vec<String> {
    vec!["Feature Impact Analysis (SHAP)".to_string(), String::new()]
}

pub(super) fn feature_impact_line(attribution: &Attribution) -> String {
    let width = ((attribution.value.abs() * BAR_SCALE).round() as usize).min(BAR_HALF_WIDTH);
    let bar = "#".repeat(width);
    let (left, right) = if attribution.value > 0.0 {
        (String::new(), bar)
    } else {
        (bar, String::new())
    };

    format!(
        "  {:<22}{:>half$}|{:<half$} {:+.3}",
        attribution.feature.label(),
        left,
        right,
        attribution.value,
        half = BAR_HALF_WIDTH,
    )
}

pub(super) fn recommendations_heading() -> Vec<String> {
    vec![
        String::new(),
        "Improvement Recommendations".to_string(),
        String::new(),
    ]
}

pub(super) fn suggestion_block(suggestion: &Suggestion) -> Vec<String> {
    let marker = match suggestion.impact {
        crate::advisory::Impact::High => "[!]",
        crate::advisory::Impact::Medium => "[~]",
        crate::advisory::Impact::Low => "[ ]",
    };

    let mut lines = vec![format!(
        "{marker} {} ({} Impact)",
        suggestion.title,
        suggestion.impact.label()
    )];
    lines.extend(
        wrap(&suggestion.description, PAGE_WIDTH - 4)
            .into_iter()
            .map(|line| format!("    {line}")),
    );
    lines.push(String::new());
    lines
}

pub(super) fn footer(page: usize, pages: usize) -> Vec<String> {
    let page_label = format!("Page {page} of {pages}");
    vec![
        rule('-'),
        centered("CreditAI — AI-Powered Alternative Credit Scoring"),
        format!("{page_label:>width$}", width = PAGE_WIDTH),
    ]
}

fn rule(fill: char) -> String {
    std::iter::repeat(fill).take(PAGE_WIDTH).collect()
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    let pad = PAGE_WIDTH.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn two_column(label: &str, value: &str) -> String {
    let used = 2 + label.chars().count() + value.chars().count();
    let gap = PAGE_WIDTH.saturating_sub(used).max(1);
    format!("  {label}{}{value}", " ".repeat(gap))
}

/// Greedy word wrap on character counts.
pub(super) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
