use chrono::NaiveDate;
use credit_ai::chat::ChatClient;
use credit_ai::scoring::QuestionOption;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// `None` when no chat endpoint is configured.
    pub(crate) chat: Option<Arc<ChatClient>>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Clap value parser accepting a questionnaire option by its display label.
pub(crate) fn parse_option<T: QuestionOption>(raw: &str) -> Result<T, String> {
    T::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = T::OPTIONS.iter().map(|option| option.label()).collect();
        format!("'{raw}' is not one of: {}", known.join(" | "))
    })
}
