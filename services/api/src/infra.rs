use chrono::NaiveDate;
use hireflow::config::BackendConfig;
use hireflow::error::AppError;
use hireflow::store::daterange::DateRange;
use hireflow::store::fixture::Fixture;
use hireflow::store::MockStore;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the store the way the deployment toggles dictate. Today every
/// configuration resolves to the mock store; the branch is the seam where a
/// Supabase-backed implementation slots in.
pub(crate) fn load_store(backend: &BackendConfig) -> Result<MockStore, AppError> {
    if !backend.uses_mock_store() {
        info!("supabase credentials detected; real backend not wired yet, serving mock data");
    }

    let fixture = match &backend.fixture_path {
        Some(path) => Fixture::from_path(path)?,
        None => Fixture::demo(),
    };
    Ok(MockStore::new(fixture))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// A window is only applied when both bounds are supplied.
pub(crate) fn window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateRange> {
    match (start, end) {
        (Some(start), Some(end)) => Some(DateRange::days(start, end)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert!(parse_date("2026-08-30").is_ok());
        assert!(parse_date(" 2026-08-30 ").is_ok());
        assert!(parse_date("30/08/2026").is_err());
    }

    #[test]
    fn window_requires_both_bounds() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");
        assert!(window(Some(day), None).is_none());
        assert!(window(None, Some(day)).is_none());
        assert!(window(Some(day), Some(day)).is_some());
    }
}
