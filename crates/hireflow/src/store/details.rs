//! Composite accessors assembling denormalized views for detail pages.
//!
//! These are nested-loop joins over the snapshot: fine at fixture scale,
//! and the ordering of child collections follows fixture order.

use serde::Serialize;

use super::domain::{
    Application, Candidate, CandidateId, CandidateSkill, Job, JobId, JobRequirement, Note, Score,
};
use super::MockStore;

/// An application joined with its job and per-criteria scores, as shown on
/// the candidate detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
    pub scores: Vec<Score>,
}

/// Candidate joined with skills, applications, and notes.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDetails {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub skills: Vec<CandidateSkill>,
    pub applications: Vec<ApplicationWithJob>,
    pub notes: Vec<Note>,
}

/// An application joined with its candidate and per-criteria scores, as
/// shown on the job detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithCandidate {
    #[serde(flatten)]
    pub application: Application,
    pub candidate: Option<Candidate>,
    pub scores: Vec<Score>,
}

/// Job joined with requirements and applications.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetails {
    #[serde(flatten)]
    pub job: Job,
    pub requirements: Vec<JobRequirement>,
    pub applications: Vec<ApplicationWithCandidate>,
}

impl MockStore {
    /// Candidate with skills, notes, and applications (each carrying its job
    /// and score rows). Unknown id yields `None`, never an empty shell.
    pub async fn candidate_with_details(&self, id: &CandidateId) -> Option<CandidateDetails> {
        self.aggregate_pause().await;

        let candidate = self.find_candidate(id)?;

        let skills = self
            .fixture
            .candidate_skills
            .iter()
            .filter(|s| &s.candidate_id == id)
            .cloned()
            .collect();

        let notes = self
            .fixture
            .notes
            .iter()
            .filter(|n| &n.candidate_id == id)
            .cloned()
            .collect();

        let applications = self
            .fixture
            .applications
            .iter()
            .filter(|a| &a.candidate_id == id)
            .cloned()
            .map(|application| {
                let job = self.find_job(&application.job_id);
                let scores = self.application_scores(&application);
                ApplicationWithJob {
                    application,
                    job,
                    scores,
                }
            })
            .collect();

        Some(CandidateDetails {
            candidate,
            skills,
            applications,
            notes,
        })
    }

    /// Job with requirements and applications (each carrying its candidate
    /// and score rows). Unknown id yields `None`.
    pub async fn job_with_details(&self, id: &JobId) -> Option<JobDetails> {
        self.aggregate_pause().await;

        let job = self.find_job(id)?;

        let requirements = self
            .fixture
            .job_requirements
            .iter()
            .filter(|r| &r.job_id == id)
            .cloned()
            .collect();

        let applications = self
            .fixture
            .applications
            .iter()
            .filter(|a| &a.job_id == id)
            .cloned()
            .map(|application| {
                let candidate = self.find_candidate(&application.candidate_id);
                let scores = self.application_scores(&application);
                ApplicationWithCandidate {
                    application,
                    candidate,
                    scores,
                }
            })
            .collect();

        Some(JobDetails {
            job,
            requirements,
            applications,
        })
    }

    fn application_scores(&self, application: &Application) -> Vec<Score> {
        self.fixture
            .scores
            .iter()
            .filter(|s| s.application_id == application.id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::Fixture;
    use crate::store::LatencyProfile;

    fn store() -> MockStore {
        MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none())
    }

    #[tokio::test]
    async fn candidate_details_match_flat_accessors() {
        let store = store();
        let candidate = store.candidates().await.remove(0);

        let details = store
            .candidate_with_details(&candidate.id)
            .await
            .expect("candidate exists");
        let flat_applications = store.applications_by_candidate(&candidate.id).await;
        let flat_skills = store.candidate_skills(&candidate.id).await;

        assert_eq!(details.applications.len(), flat_applications.len());
        assert_eq!(details.skills.len(), flat_skills.len());
    }

    #[tokio::test]
    async fn candidate_applications_resolve_their_jobs() {
        let store = store();
        let candidate = store.candidates().await.remove(0);
        let details = store
            .candidate_with_details(&candidate.id)
            .await
            .expect("candidate exists");

        for app in &details.applications {
            let job = app.job.as_ref().expect("demo fixture has no dangling jobs");
            assert_eq!(job.id, app.application.job_id);
        }
    }

    #[tokio::test]
    async fn unknown_candidate_yields_none_not_empty_shell() {
        let store = store();
        let missing = CandidateId("cand-missing".to_string());
        assert!(store.candidate_with_details(&missing).await.is_none());
    }

    #[tokio::test]
    async fn job_details_join_candidates_and_scores() {
        let store = store();
        let job = store.jobs().await.remove(0);
        let details = store.job_with_details(&job.id).await.expect("job exists");

        assert_eq!(details.job.id, job.id);
        for app in &details.applications {
            assert_eq!(app.application.job_id, job.id);
            for score in &app.scores {
                assert_eq!(score.application_id, app.application.id);
            }
        }
    }
}
