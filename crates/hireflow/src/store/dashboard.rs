//! Dashboard and report summary counters.

use serde::Serialize;

use super::daterange::DateRange;
use super::domain::{Application, ApplicationStatus, CompanyId, JobStatus};
use super::mock::filter_window;
use super::MockStore;

/// Headline counters for the dashboard landing page.
///
/// Application counts honor the optional date window; job and candidate
/// totals are inventory counts and are never date-filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_jobs: usize,
    pub published_jobs: usize,
    pub draft_jobs: usize,
    pub total_candidates: usize,
    pub total_applications: usize,
    pub shortlisted_candidates: usize,
    pub interviewed_candidates: usize,
    pub hired_candidates: usize,
}

/// Reports-page stat cards: windowed counts with deltas against the
/// immediately preceding window of equal length.
#[derive(Debug, Clone, Serialize)]
pub struct ReportsStats {
    pub total_cvs: usize,
    pub cv_increase_pct: f64,
    pub shortlisted: usize,
    pub shortlisted_increase_pct: f64,
    pub hired: usize,
    pub hired_change: i64,
    pub avg_score: f64,
    pub score_increase: f64,
    pub avg_time_to_hire_days: f64,
    pub time_improvement_days: f64,
}

/// One window's worth of report measurements.
#[derive(Debug, Default, Clone, Copy)]
struct WindowSnapshot {
    cvs: usize,
    shortlisted: usize,
    hired: usize,
    avg_score: f64,
    avg_time_to_hire_days: f64,
}

impl MockStore {
    /// Summary counters for a company, with applications optionally scoped
    /// to a date window. A company with no rows yields all zeros.
    pub async fn dashboard_stats(
        &self,
        company_id: &CompanyId,
        window: Option<DateRange>,
    ) -> DashboardStats {
        self.aggregate_pause().await;

        let jobs = self.company_jobs(company_id);
        let candidates = self.company_candidates(company_id);
        let applications = filter_window(self.company_applications(company_id), window);

        let count_status = |status: ApplicationStatus| {
            applications.iter().filter(|a| a.status == status).count()
        };

        DashboardStats {
            total_jobs: jobs.len(),
            published_jobs: jobs
                .iter()
                .filter(|j| j.status == JobStatus::Published)
                .count(),
            draft_jobs: jobs.iter().filter(|j| j.status == JobStatus::Draft).count(),
            total_candidates: candidates.len(),
            total_applications: applications.len(),
            shortlisted_candidates: count_status(ApplicationStatus::Shortlisted),
            interviewed_candidates: count_status(ApplicationStatus::Interviewed),
            hired_candidates: count_status(ApplicationStatus::Hired),
        }
    }

    /// Stat cards for the reports page: the requested window measured
    /// against the preceding window of equal length.
    pub async fn reports_stats(&self, company_id: &CompanyId, window: DateRange) -> ReportsStats {
        self.aggregate_pause().await;

        let current = self.window_snapshot(company_id, window);
        let previous = self.window_snapshot(company_id, window.preceding());

        ReportsStats {
            total_cvs: current.cvs,
            cv_increase_pct: percent_delta(previous.cvs, current.cvs),
            shortlisted: current.shortlisted,
            shortlisted_increase_pct: percent_delta(previous.shortlisted, current.shortlisted),
            hired: current.hired,
            hired_change: current.hired as i64 - previous.hired as i64,
            avg_score: current.avg_score,
            score_increase: current.avg_score - previous.avg_score,
            avg_time_to_hire_days: current.avg_time_to_hire_days,
            time_improvement_days: previous.avg_time_to_hire_days
                - current.avg_time_to_hire_days,
        }
    }

    fn window_snapshot(&self, company_id: &CompanyId, window: DateRange) -> WindowSnapshot {
        let cvs = self
            .company_candidates(company_id)
            .iter()
            .filter(|c| window.contains(c.created_at))
            .count();

        let applications = filter_window(self.company_applications(company_id), Some(window));

        let shortlisted = applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Shortlisted)
            .count();

        let hired_apps: Vec<&Application> = applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Hired)
            .collect();

        let scored: Vec<u32> = applications
            .iter()
            .map(Application::effective_score)
            .filter(|score| *score > 0)
            .collect();
        let avg_score = if scored.is_empty() {
            0.0
        } else {
            f64::from(scored.iter().sum::<u32>()) / scored.len() as f64
        };

        // Days from application to the hired status update.
        let avg_time_to_hire_days = if hired_apps.is_empty() {
            0.0
        } else {
            let total_days: i64 = hired_apps
                .iter()
                .map(|a| (a.updated_at - a.created_at).num_days())
                .sum();
            total_days as f64 / hired_apps.len() as f64
        };

        WindowSnapshot {
            cvs,
            shortlisted,
            hired: hired_apps.len(),
            avg_score,
            avg_time_to_hire_days,
        }
    }
}

fn percent_delta(previous: usize, current: usize) -> f64 {
    if previous == 0 {
        if current > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    }
}
