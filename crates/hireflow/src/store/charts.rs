//! Chart data builders: histograms, funnel counts, and time series.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::daterange::DateRange;
use super::domain::{Application, ApplicationStatus, CompanyId};
use super::mock::filter_window;
use super::MockStore;

/// Histogram bucket boundaries, inclusive lower bound / exclusive upper
/// bound except the final bucket.
const BUCKET_LABELS: [&str; 7] = ["0-19", "20-39", "40-59", "60-69", "70-79", "80-89", "90-100"];

/// Illustrative histogram shown when no real scores exist.
const SAMPLE_BUCKET_COUNTS: [usize; 7] = [5, 12, 34, 65, 142, 176, 53];

/// Funnel stage shares applied to the sample fallback, matching the demo
/// chart's shape.
const SAMPLE_FUNNEL_SHARES: [f64; 5] = [0.64, 0.29, 0.12, 0.07, 0.05];
const SAMPLE_FUNNEL_BASE: usize = 35;

const FUNNEL_STAGES: [&str; 6] = [
    "Applied",
    "Screened",
    "Shortlisted",
    "Interviewed",
    "Offered",
    "Hired",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub range: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub count: usize,
}

/// One day of a fixed-interval series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// A job ranked by windowed applicant volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopJobEntry {
    pub job_title: String,
    pub applicants: usize,
}

/// Month-over-month CV intake, current year against the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvUploadPoint {
    pub month: &'static str,
    pub this_year: usize,
    pub last_year: usize,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl MockStore {
    /// Bucket application scores into the fixed histogram ranges, using the
    /// match percentage and falling back to the raw score. Only positive
    /// values count. With `sample_fallback` on, an empty result substitutes
    /// the illustrative demo histogram.
    pub async fn score_distribution(
        &self,
        company_id: &CompanyId,
        window: Option<DateRange>,
    ) -> Vec<ScoreBucket> {
        self.aggregate_pause().await;

        let applications = filter_window(self.company_applications(company_id), window);
        let scores: Vec<u32> = applications
            .iter()
            .map(Application::effective_score)
            .filter(|score| *score > 0)
            .collect();

        if scores.is_empty() && self.sample_fallback {
            return BUCKET_LABELS
                .iter()
                .zip(SAMPLE_BUCKET_COUNTS)
                .map(|(range, count)| ScoreBucket { range, count })
                .collect();
        }

        let mut counts = [0usize; 7];
        for score in scores {
            let index = match score {
                0..=19 => 0,
                20..=39 => 1,
                40..=59 => 2,
                60..=69 => 3,
                70..=79 => 4,
                80..=89 => 5,
                _ => 6,
            };
            counts[index] += 1;
        }

        BUCKET_LABELS
            .iter()
            .zip(counts)
            .map(|(range, count)| ScoreBucket { range, count })
            .collect()
    }

    /// Cumulative funnel counts: each stage includes every application at
    /// that stage or further along, so counts never increase down the
    /// funnel.
    ///
    /// Two never-empty fallbacks are preserved from the original product:
    /// a date window matching zero rows falls back to the unfiltered set,
    /// and an all-zero funnel substitutes scaled sample counts when
    /// `sample_fallback` is on.
    pub async fn hiring_funnel(
        &self,
        company_id: &CompanyId,
        window: Option<DateRange>,
    ) -> Vec<FunnelStage> {
        self.aggregate_pause().await;

        let all = self.company_applications(company_id);
        let mut applications = filter_window(all.clone(), window);
        if applications.is_empty() {
            applications = all.clone();
        }

        let past = |statuses: &[ApplicationStatus]| {
            applications
                .iter()
                .filter(|a| statuses.contains(&a.status))
                .count()
        };

        use ApplicationStatus::*;
        let counts = [
            applications.len(),
            applications
                .iter()
                .filter(|a| a.status != Applied)
                .count(),
            past(&[Shortlisted, Interviewed, Offered, Hired]),
            past(&[Interviewed, Offered, Hired]),
            past(&[Offered, Hired]),
            past(&[Hired]),
        ];

        if counts.iter().sum::<usize>() == 0 && self.sample_fallback {
            return sample_funnel(all.len());
        }

        FUNNEL_STAGES
            .iter()
            .zip(counts)
            .map(|(stage, count)| FunnelStage { stage, count })
            .collect()
    }

    /// Daily application counts over the window (default: trailing 30 days
    /// ending now). Every calendar day in the window appears, zeros
    /// included.
    pub async fn applications_over_time(
        &self,
        company_id: &CompanyId,
        window: Option<DateRange>,
    ) -> Vec<DailyCount> {
        self.aggregate_pause().await;

        let applications = filter_window(self.company_applications(company_id), window);
        let range = window.unwrap_or_else(|| DateRange::trailing_days(30, Utc::now()));

        let mut series = Vec::new();
        let mut day = range.start.date_naive();
        let last = range.end.date_naive();
        while day <= last {
            let count = applications
                .iter()
                .filter(|a| a.created_at.date_naive() == day)
                .count();
            series.push(DailyCount { date: day, count });
            day += Duration::days(1);
        }
        series
    }

    /// Top five jobs by application volume within the window.
    pub async fn top_jobs(
        &self,
        company_id: &CompanyId,
        window: Option<DateRange>,
    ) -> Vec<TopJobEntry> {
        self.aggregate_pause().await;

        let applications = filter_window(self.company_applications(company_id), window);
        let mut entries: Vec<TopJobEntry> = self
            .company_jobs(company_id)
            .into_iter()
            .map(|job| {
                let applicants = applications.iter().filter(|a| a.job_id == job.id).count();
                TopJobEntry {
                    job_title: job.title,
                    applicants,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.applicants.cmp(&a.applicants));
        entries.truncate(5);
        entries
    }

    /// Candidates added per calendar month, this year versus last year,
    /// relative to `today`.
    pub async fn cv_upload_trend(
        &self,
        company_id: &CompanyId,
        today: NaiveDate,
    ) -> Vec<CvUploadPoint> {
        self.aggregate_pause().await;

        let candidates = self.company_candidates(company_id);
        let this_year = today.year();
        let last_year = this_year - 1;

        MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(index, month)| {
                let month_number = index as u32 + 1;
                let count_in = |year: i32| {
                    candidates
                        .iter()
                        .filter(|c| {
                            let created = c.created_at.date_naive();
                            created.year() == year && created.month() == month_number
                        })
                        .count()
                };
                CvUploadPoint {
                    month,
                    this_year: count_in(this_year),
                    last_year: count_in(last_year),
                }
            })
            .collect()
    }
}

fn sample_funnel(application_count: usize) -> Vec<FunnelStage> {
    let base = if application_count > 0 {
        application_count
    } else {
        SAMPLE_FUNNEL_BASE
    };

    let mut counts = vec![base];
    counts.extend(
        SAMPLE_FUNNEL_SHARES
            .iter()
            .map(|share| (base as f64 * share).floor() as usize),
    );

    FUNNEL_STAGES
        .iter()
        .zip(counts)
        .map(|(stage, count)| FunnelStage { stage, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::Fixture;
    use crate::store::LatencyProfile;
    use chrono::TimeZone;
    use serde_json::json;

    fn company() -> CompanyId {
        CompanyId("company-1".to_string())
    }

    /// Minimal fixture: one company, one job, applications with the given
    /// match percentages.
    fn fixture_with_scores(percentages: &[u32]) -> Fixture {
        let applications: Vec<serde_json::Value> = percentages
            .iter()
            .enumerate()
            .map(|(i, pct)| {
                json!({
                    "id": format!("app-{i}"),
                    "candidate_id": "cand-1",
                    "job_id": "job-1",
                    "status": "applied",
                    "score": 0,
                    "match_percentage": pct,
                    "created_at": "2026-08-10T09:00:00Z",
                    "updated_at": "2026-08-10T09:00:00Z"
                })
            })
            .collect();

        let raw = json!({
            "companies": [{
                "id": "company-1",
                "name": "Acme Talent",
                "logo_url": null,
                "subscription_tier": "professional",
                "deployment_type": "cloud",
                "license_key": null,
                "license_expires_at": null,
                "max_users": 10,
                "max_jobs": 25,
                "max_cv_uploads_per_month": 500,
                "storage_limit_gb": 10,
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-01T00:00:00Z"
            }],
            "profiles": [],
            "jobs": [{
                "id": "job-1",
                "company_id": "company-1",
                "title": "Backend Engineer",
                "description": "",
                "location": "Remote",
                "job_type": "full-time",
                "salary_min": 0,
                "salary_max": 0,
                "status": "published",
                "created_by": "profile-1",
                "created_at": "2026-08-01T00:00:00Z",
                "updated_at": "2026-08-01T00:00:00Z"
            }],
            "job_requirements": [],
            "candidates": [],
            "candidate_skills": [],
            "applications": applications,
            "scores": [],
            "notes": [],
            "subscriptions": [],
            "usage_metrics": []
        });

        serde_json::from_value(raw).expect("fixture builds")
    }

    fn store_with_scores(percentages: &[u32]) -> MockStore {
        MockStore::new(fixture_with_scores(percentages)).with_latency(LatencyProfile::none())
    }

    #[tokio::test]
    async fn distribution_buckets_match_boundaries() {
        let store = store_with_scores(&[15, 55, 95]);
        let buckets = store.score_distribution(&company(), None).await;

        let expect = |range: &str| {
            buckets
                .iter()
                .find(|b| b.range == range)
                .map(|b| b.count)
                .unwrap_or_default()
        };
        assert_eq!(expect("0-19"), 1);
        assert_eq!(expect("20-39"), 0);
        assert_eq!(expect("40-59"), 1);
        assert_eq!(expect("60-69"), 0);
        assert_eq!(expect("70-79"), 0);
        assert_eq!(expect("80-89"), 0);
        assert_eq!(expect("90-100"), 1);
    }

    #[tokio::test]
    async fn distribution_counts_sum_to_scored_applications() {
        let store = MockStore::new(Fixture::demo())
            .with_latency(LatencyProfile::none())
            .with_sample_fallback(false);

        let buckets = store.score_distribution(&company(), None).await;
        let scored = store
            .company_applications(&company())
            .iter()
            .filter(|a| a.effective_score() > 0)
            .count();

        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), scored);
    }

    #[tokio::test]
    async fn empty_distribution_uses_sample_data_when_enabled() {
        let store = store_with_scores(&[]);
        let buckets = store.score_distribution(&company(), None).await;
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 487);

        let strict = store_with_scores(&[]).with_sample_fallback(false);
        let buckets = strict.score_distribution(&company(), None).await;
        assert!(buckets.iter().all(|b| b.count == 0));
    }

    #[tokio::test]
    async fn funnel_counts_never_increase_down_the_stages() {
        let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
        let funnel = store.hiring_funnel(&company(), None).await;
        assert_eq!(funnel.len(), 6);
        for pair in funnel.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[tokio::test]
    async fn funnel_falls_back_to_unfiltered_set_for_empty_windows() {
        let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
        let unfiltered = store.hiring_funnel(&company(), None).await;

        let empty_window = DateRange::new(
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap(),
        );
        let windowed = store.hiring_funnel(&company(), Some(empty_window)).await;

        assert_eq!(unfiltered, windowed);
    }

    #[tokio::test]
    async fn funnel_sample_fallback_scales_from_35() {
        let store = store_with_scores(&[]);
        let ghost = CompanyId("company-ghost".to_string());
        let funnel = store.hiring_funnel(&ghost, None).await;

        assert_eq!(funnel[0].count, 35);
        assert_eq!(funnel[1].count, 22); // floor(35 * 0.64)
        assert_eq!(funnel[5].count, 1); // floor(35 * 0.05)
    }

    #[tokio::test]
    async fn application_series_covers_every_day_in_window() {
        let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2026, 8, 10).expect("valid date");
        let series = store
            .applications_over_time(&company(), Some(DateRange::days(start, end)))
            .await;

        assert_eq!(series.len(), 10);
        assert_eq!(series[0].date, start);
        assert_eq!(series[9].date, end);
    }

    #[tokio::test]
    async fn top_jobs_are_ranked_by_applicants() {
        let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
        let top = store.top_jobs(&company(), None).await;
        assert!(top.len() <= 5);
        for pair in top.windows(2) {
            assert!(pair[0].applicants >= pair[1].applicants);
        }
    }

    #[tokio::test]
    async fn cv_trend_always_returns_twelve_months() {
        let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date");
        let trend = store.cv_upload_trend(&company(), today).await;
        assert_eq!(trend.len(), 12);
        assert_eq!(trend[0].month, "Jan");
        assert!(trend.iter().any(|p| p.this_year > 0));
    }
}
