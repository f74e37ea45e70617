//! Paginated plain-text credit score report.

mod sections;

use chrono::NaiveDate;
use serde::Serialize;

use crate::advisory::Suggestion;
use crate::scoring::{AnswerSet, ScoringResult};

/// Character width of every report line.
pub const PAGE_WIDTH: usize = 72;
/// Body lines per page, excluding the footer.
pub const LINES_PER_PAGE: usize = 48;

const PAGE_BREAK: &str = "\u{000C}\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub number: usize,
    pub lines: Vec<String>,
}

/// Rendered report for one scoring session.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub file_name: String,
    pub pages: Vec<ReportPage>,
}

impl ScoreReport {
    pub fn build(
        result: &ScoringResult,
        answers: &AnswerSet,
        age: &str,
        suggestions: &[Suggestion],
        generated_on: NaiveDate,
    ) -> Self {
        let mut writer = PageWriter::default();

        writer.push_block(sections::header(generated_on));
        writer.push_block(sections::score_banner(result));
        writer.push_block(sections::key_metrics(result, answers, age));

        let heading = sections::feature_impact_heading();
        writer.ensure_room(heading.len() + 1);
        writer.push_block(heading);
        for attribution in &result.attributions {
            writer.push_line(sections::feature_impact_line(attribution));
        }

        if !suggestions.is_empty() {
            let heading = sections::recommendations_heading();
            let first = sections::suggestion_block(&suggestions[0]);
            writer.ensure_room(heading.len() + first.len());
            writer.push_block(heading);
            for suggestion in suggestions {
                let block = sections::suggestion_block(suggestion);
                writer.ensure_room(block.len());
                writer.push_block(block);
            }
        }

        Self {
            file_name: format!(
                "CreditAI_Report_{}_{}.txt",
                result.credit_score,
                generated_on.format("%Y-%m-%d")
            ),
            pages: writer.finish(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Render all pages, separated by form feeds.
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = page.lines.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }
}

#[derive(Default)]
struct PageWriter {
    finished: Vec<Vec<String>>,
    current: Vec<String>,
}

impl PageWriter {
    fn push_line(&mut self, line: String) {
        if self.current.len() >= LINES_PER_PAGE {
            self.break_page();
        }
        self.current.push(line);
    }

    fn push_block(&mut self, lines: Vec<String>) {
        for line in lines {
            self.push_line(line);
        }
    }

    /// Start a new page unless `lines` more lines still fit on the current one.
    fn ensure_room(&mut self, lines: usize) {
        let remaining = LINES_PER_PAGE.saturating_sub(self.current.len());
        if lines > remaining && !self.current.is_empty() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self) -> Vec<ReportPage> {
        if !self.current.is_empty() || self.finished.is_empty() {
            self.break_page();
        }

        let total = self.finished.len();
        self.finished
            .into_iter()
            .enumerate()
            .map(|(index, mut lines)| {
                lines.resize(LINES_PER_PAGE, String::new());
                lines.extend(sections::footer(index + 1, total));
                ReportPage {
                    number: index + 1,
                    lines,
                }
            })
            .collect()
    }
}
