use crate::infra::{deserialize_optional_date, window, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{NaiveDate, Utc};
use hireflow::error::AppError;
use hireflow::store::activity::ActivityEvent;
use hireflow::store::charts::{FunnelStage, ScoreBucket, TopJobEntry};
use hireflow::store::dashboard::{DashboardStats, ReportsStats};
use hireflow::store::daterange::{DateRange, ReportPeriod};
use hireflow::store::details::{CandidateDetails, JobDetails};
use hireflow::store::domain::{CandidateId, CompanyId, Job, JobId};
use hireflow::store::mutation::{JobPatch, NewJob};
use hireflow::store::ranking::RankedCandidate;
use hireflow::store::MockStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_ACTIVITY_LIMIT: usize = 10;
const DEFAULT_RANKING_LIMIT: usize = 5;

/// Company scope plus an optional inclusive date window, both bounds
/// required for the window to apply.
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyWindowQuery {
    pub(crate) company_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) end_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl CompanyWindowQuery {
    fn company(&self) -> CompanyId {
        CompanyId(self.company_id.clone())
    }

    fn window(&self) -> Option<DateRange> {
        window(self.start_date, self.end_date)
    }
}

pub(crate) fn with_store_routes(store: Arc<MockStore>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard/stats", get(dashboard_stats_endpoint))
        .route("/api/v1/dashboard/activity", get(activity_endpoint))
        .route(
            "/api/v1/dashboard/score-distribution",
            get(score_distribution_endpoint),
        )
        .route("/api/v1/dashboard/funnel", get(funnel_endpoint))
        .route(
            "/api/v1/dashboard/top-candidates",
            get(top_candidates_endpoint),
        )
        .route("/api/v1/reports/stats", get(reports_stats_endpoint))
        .route("/api/v1/reports/top-jobs", get(top_jobs_endpoint))
        .route("/api/v1/candidates/:id", get(candidate_detail_endpoint))
        .route(
            "/api/v1/jobs/:id",
            get(job_detail_endpoint).patch(update_job_endpoint),
        )
        .route("/api/v1/jobs", post(create_job_endpoint))
        .layer(Extension(store))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_stats_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<DashboardStats> {
    let stats = store.dashboard_stats(&query.company(), query.window()).await;
    Json(stats)
}

pub(crate) async fn activity_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<Vec<ActivityEvent>> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let feed = store
        .recent_activity(&query.company(), limit, query.window())
        .await;
    Json(feed)
}

pub(crate) async fn score_distribution_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<Vec<ScoreBucket>> {
    let buckets = store
        .score_distribution(&query.company(), query.window())
        .await;
    Json(buckets)
}

pub(crate) async fn funnel_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<Vec<FunnelStage>> {
    let funnel = store.hiring_funnel(&query.company(), query.window()).await;
    Json(funnel)
}

pub(crate) async fn top_candidates_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<Vec<RankedCandidate>> {
    let limit = query.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let ranked = store.top_candidates(&query.company(), limit).await;
    Json(ranked)
}

pub(crate) async fn reports_stats_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<ReportsStats> {
    // The reports page always has a period selected; default to this month.
    let range = query.window().unwrap_or_else(|| {
        ReportPeriod::ThisMonth.range_for(Utc::now().date_naive())
    });
    let stats = store.reports_stats(&query.company(), range).await;
    Json(stats)
}

pub(crate) async fn top_jobs_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Query(query): Query<CompanyWindowQuery>,
) -> Json<Vec<TopJobEntry>> {
    let top = store.top_jobs(&query.company(), query.window()).await;
    Json(top)
}

pub(crate) async fn candidate_detail_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Path(id): Path<String>,
) -> Result<Json<CandidateDetails>, AppError> {
    store
        .candidate_with_details(&CandidateId(id))
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("candidate"))
}

pub(crate) async fn job_detail_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Path(id): Path<String>,
) -> Result<Json<JobDetails>, AppError> {
    store
        .job_with_details(&JobId(id))
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("job"))
}

pub(crate) async fn create_job_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Json(payload): Json<NewJob>,
) -> (StatusCode, Json<Job>) {
    let job = store.create_job(payload).await;
    (StatusCode::CREATED, Json(job))
}

pub(crate) async fn update_job_endpoint(
    Extension(store): Extension<Arc<MockStore>>,
    Path(id): Path<String>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<Job>, AppError> {
    store
        .update_job(&JobId(id), patch)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("job"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireflow::store::fixture::Fixture;
    use hireflow::store::LatencyProfile;

    fn store() -> Arc<MockStore> {
        Arc::new(MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none()))
    }

    fn query(company_id: &str) -> CompanyWindowQuery {
        CompanyWindowQuery {
            company_id: company_id.to_string(),
            start_date: None,
            end_date: None,
            limit: None,
        }
    }

    #[tokio::test]
    async fn dashboard_stats_endpoint_returns_counts() {
        let Json(stats) =
            dashboard_stats_endpoint(Extension(store()), Query(query("company-1"))).await;
        assert!(stats.total_jobs > 0);
        assert!(stats.total_applications >= stats.hired_candidates);
    }

    #[tokio::test]
    async fn activity_endpoint_defaults_to_ten_events() {
        let Json(feed) = activity_endpoint(Extension(store()), Query(query("company-1"))).await;
        assert_eq!(feed.len(), DEFAULT_ACTIVITY_LIMIT);
    }

    #[tokio::test]
    async fn candidate_detail_endpoint_maps_absence_to_not_found() {
        let err = candidate_detail_endpoint(Extension(store()), Path("cand-missing".to_string()))
            .await
            .expect_err("missing candidate");
        assert!(matches!(err, AppError::NotFound { .. }));

        let Json(details) =
            candidate_detail_endpoint(Extension(store()), Path("cand-1".to_string()))
                .await
                .expect("candidate exists");
        assert_eq!(details.candidate.id.0, "cand-1");
        assert!(!details.applications.is_empty());
    }

    #[tokio::test]
    async fn create_then_read_shows_the_simulation_boundary() {
        let shared = store();
        let payload: NewJob = serde_json::from_value(json!({
            "company_id": "company-1",
            "title": "QA Engineer",
            "description": "",
            "location": "Remote",
            "job_type": "contract",
            "status": "draft",
            "created_by": "profile-1"
        }))
        .expect("payload deserializes");

        let (status, Json(job)) = create_job_endpoint(Extension(shared.clone()), Json(payload)).await;
        assert_eq!(status, StatusCode::CREATED);

        let err = job_detail_endpoint(Extension(shared), Path(job.id.0))
            .await
            .expect_err("created jobs are not persisted");
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_endpoint_merges_patches() {
        let patch: JobPatch = serde_json::from_value(json!({ "status": "closed" }))
            .expect("patch deserializes");
        let Json(job) = update_job_endpoint(Extension(store()), Path("job-1".to_string()), Json(patch))
            .await
            .expect("job exists");
        assert_eq!(job.status.label(), "closed");
        assert_eq!(job.title, "Backend Engineer");
    }
}
