//! Top-N rankings for dashboard widgets.

use serde::Serialize;

use super::domain::{Candidate, CompanyId, Job};
use super::MockStore;

/// A candidate ranked by mean application score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub average_score: f64,
    pub application_count: usize,
}

/// A recently posted job with its applicant count.
#[derive(Debug, Clone, Serialize)]
pub struct RecentJob {
    #[serde(flatten)]
    pub job: Job,
    pub application_count: usize,
}

impl MockStore {
    /// Candidates ranked by mean application score, descending, truncated
    /// to `limit`. Candidates without applications score zero. Ties keep
    /// fixture order (stable sort).
    pub async fn top_candidates(
        &self,
        company_id: &CompanyId,
        limit: usize,
    ) -> Vec<RankedCandidate> {
        self.aggregate_pause().await;

        let applications = self.company_applications(company_id);
        let mut ranked: Vec<RankedCandidate> = self
            .company_candidates(company_id)
            .into_iter()
            .map(|candidate| {
                let scores: Vec<u32> = applications
                    .iter()
                    .filter(|a| a.candidate_id == candidate.id)
                    .map(|a| a.score)
                    .collect();
                let average_score = if scores.is_empty() {
                    0.0
                } else {
                    f64::from(scores.iter().sum::<u32>()) / scores.len() as f64
                };
                RankedCandidate {
                    candidate,
                    average_score,
                    application_count: scores.len(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
        ranked.truncate(limit);
        ranked
    }

    /// Newest jobs first, each with its total application count, truncated
    /// to `limit`.
    pub async fn recent_jobs(&self, company_id: &CompanyId, limit: usize) -> Vec<RecentJob> {
        self.read_pause().await;

        let mut jobs = self.company_jobs(company_id);
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);

        jobs.into_iter()
            .map(|job| {
                let application_count = self
                    .fixture
                    .applications
                    .iter()
                    .filter(|a| a.job_id == job.id)
                    .count();
                RecentJob {
                    job,
                    application_count,
                }
            })
            .collect()
    }
}
