use std::sync::Arc;
use std::time::Duration;

use super::daterange::DateRange;
use super::domain::{
    Application, ApplicationId, Candidate, CandidateId, CandidateSkill, Company, CompanyId, Job,
    JobId, JobRequirement, JobStatus, Note, Profile, ProfileId, Score, Subscription, UsageMetric,
};
use super::fixture::Fixture;

/// Artificial delays applied per call class to emulate network latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub read: Duration,
    pub aggregate: Duration,
    pub mutate: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(100),
            aggregate: Duration::from_millis(150),
            mutate: Duration::from_millis(200),
        }
    }
}

impl LatencyProfile {
    /// Zero delays for tests and batch tooling.
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            aggregate: Duration::ZERO,
            mutate: Duration::ZERO,
        }
    }
}

/// Read-only query layer over a fixture snapshot.
///
/// Every accessor is async purely to simulate a round trip; nothing is
/// mutated at runtime, so concurrent calls are always safe. Single-row
/// lookups yield `None` on absence, collection lookups an empty `Vec` —
/// the layer never errors.
#[derive(Debug, Clone)]
pub struct MockStore {
    pub(crate) fixture: Arc<Fixture>,
    pub(crate) latency: LatencyProfile,
    pub(crate) sample_fallback: bool,
}

impl MockStore {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            latency: LatencyProfile::default(),
            sample_fallback: true,
        }
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    /// Toggle the never-empty chart fallback. On by default to match the
    /// product's demo behavior; turn off to surface genuine zero states.
    pub fn with_sample_fallback(mut self, enabled: bool) -> Self {
        self.sample_fallback = enabled;
        self
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub(crate) async fn read_pause(&self) {
        sleep(self.latency.read).await;
    }

    pub(crate) async fn aggregate_pause(&self) {
        sleep(self.latency.aggregate).await;
    }

    pub(crate) async fn mutate_pause(&self) {
        sleep(self.latency.mutate).await;
    }

    // Entity accessors. Each filters the snapshot in insertion order.

    pub async fn companies(&self) -> Vec<Company> {
        self.read_pause().await;
        self.fixture.companies.clone()
    }

    pub async fn company_by_id(&self, id: &CompanyId) -> Option<Company> {
        self.read_pause().await;
        self.fixture.companies.iter().find(|c| &c.id == id).cloned()
    }

    pub async fn profiles(&self) -> Vec<Profile> {
        self.read_pause().await;
        self.fixture.profiles.clone()
    }

    pub async fn profile_by_id(&self, id: &ProfileId) -> Option<Profile> {
        self.read_pause().await;
        self.fixture.profiles.iter().find(|p| &p.id == id).cloned()
    }

    pub async fn profiles_by_company(&self, company_id: &CompanyId) -> Vec<Profile> {
        self.read_pause().await;
        self.fixture
            .profiles
            .iter()
            .filter(|p| &p.company_id == company_id)
            .cloned()
            .collect()
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.read_pause().await;
        self.fixture.jobs.clone()
    }

    pub async fn jobs_by_company(&self, company_id: &CompanyId) -> Vec<Job> {
        self.read_pause().await;
        self.company_jobs(company_id)
    }

    pub async fn job_by_id(&self, id: &JobId) -> Option<Job> {
        self.read_pause().await;
        self.find_job(id)
    }

    pub async fn jobs_by_status(&self, company_id: &CompanyId, status: JobStatus) -> Vec<Job> {
        self.read_pause().await;
        self.fixture
            .jobs
            .iter()
            .filter(|j| &j.company_id == company_id && j.status == status)
            .cloned()
            .collect()
    }

    pub async fn job_requirements(&self, job_id: &JobId) -> Vec<JobRequirement> {
        self.read_pause().await;
        self.fixture
            .job_requirements
            .iter()
            .filter(|r| &r.job_id == job_id)
            .cloned()
            .collect()
    }

    pub async fn candidates(&self) -> Vec<Candidate> {
        self.read_pause().await;
        self.fixture.candidates.clone()
    }

    pub async fn candidates_by_company(&self, company_id: &CompanyId) -> Vec<Candidate> {
        self.read_pause().await;
        self.company_candidates(company_id)
    }

    pub async fn candidate_by_id(&self, id: &CandidateId) -> Option<Candidate> {
        self.read_pause().await;
        self.find_candidate(id)
    }

    pub async fn candidate_skills(&self, candidate_id: &CandidateId) -> Vec<CandidateSkill> {
        self.read_pause().await;
        self.fixture
            .candidate_skills
            .iter()
            .filter(|s| &s.candidate_id == candidate_id)
            .cloned()
            .collect()
    }

    pub async fn applications(&self) -> Vec<Application> {
        self.read_pause().await;
        self.fixture.applications.clone()
    }

    pub async fn applications_by_job(&self, job_id: &JobId) -> Vec<Application> {
        self.read_pause().await;
        self.fixture
            .applications
            .iter()
            .filter(|a| &a.job_id == job_id)
            .cloned()
            .collect()
    }

    pub async fn applications_by_candidate(&self, candidate_id: &CandidateId) -> Vec<Application> {
        self.read_pause().await;
        self.fixture
            .applications
            .iter()
            .filter(|a| &a.candidate_id == candidate_id)
            .cloned()
            .collect()
    }

    pub async fn application_by_id(&self, id: &ApplicationId) -> Option<Application> {
        self.read_pause().await;
        self.fixture
            .applications
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    pub async fn scores_by_application(&self, application_id: &ApplicationId) -> Vec<Score> {
        self.read_pause().await;
        self.fixture
            .scores
            .iter()
            .filter(|s| &s.application_id == application_id)
            .cloned()
            .collect()
    }

    pub async fn notes_by_candidate(&self, candidate_id: &CandidateId) -> Vec<Note> {
        self.read_pause().await;
        self.fixture
            .notes
            .iter()
            .filter(|n| &n.candidate_id == candidate_id)
            .cloned()
            .collect()
    }

    pub async fn notes_by_job(&self, job_id: &JobId) -> Vec<Note> {
        self.read_pause().await;
        self.fixture
            .notes
            .iter()
            .filter(|n| &n.job_id == job_id)
            .cloned()
            .collect()
    }

    /// Notes across the company, matched through either the note's job or
    /// its candidate.
    pub async fn notes_by_company(&self, company_id: &CompanyId) -> Vec<Note> {
        self.read_pause().await;
        let jobs = self.company_jobs(company_id);
        let candidates = self.company_candidates(company_id);

        self.fixture
            .notes
            .iter()
            .filter(|note| {
                jobs.iter().any(|j| j.id == note.job_id)
                    || candidates.iter().any(|c| c.id == note.candidate_id)
            })
            .cloned()
            .collect()
    }

    pub async fn subscription_by_company(&self, company_id: &CompanyId) -> Option<Subscription> {
        self.read_pause().await;
        self.fixture
            .subscriptions
            .iter()
            .find(|s| &s.company_id == company_id)
            .cloned()
    }

    pub async fn usage_metrics_by_company(&self, company_id: &CompanyId) -> Vec<UsageMetric> {
        self.read_pause().await;
        self.fixture
            .usage_metrics
            .iter()
            .filter(|m| &m.company_id == company_id)
            .cloned()
            .collect()
    }

    // Synchronous join helpers shared by the aggregation modules.

    pub(crate) fn find_job(&self, id: &JobId) -> Option<Job> {
        self.fixture.jobs.iter().find(|j| &j.id == id).cloned()
    }

    pub(crate) fn find_candidate(&self, id: &CandidateId) -> Option<Candidate> {
        self.fixture
            .candidates
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    pub(crate) fn company_jobs(&self, company_id: &CompanyId) -> Vec<Job> {
        self.fixture
            .jobs
            .iter()
            .filter(|j| &j.company_id == company_id)
            .cloned()
            .collect()
    }

    pub(crate) fn company_candidates(&self, company_id: &CompanyId) -> Vec<Candidate> {
        self.fixture
            .candidates
            .iter()
            .filter(|c| &c.company_id == company_id)
            .cloned()
            .collect()
    }

    /// Applications whose job belongs to the company, in fixture order.
    pub(crate) fn company_applications(&self, company_id: &CompanyId) -> Vec<Application> {
        let jobs = self.company_jobs(company_id);
        self.fixture
            .applications
            .iter()
            .filter(|app| jobs.iter().any(|j| j.id == app.job_id))
            .cloned()
            .collect()
    }
}

pub(crate) fn filter_window(
    applications: Vec<Application>,
    window: Option<DateRange>,
) -> Vec<Application> {
    match window {
        Some(range) => applications
            .into_iter()
            .filter(|app| range.contains(app.created_at))
            .collect(),
        None => applications,
    }
}

async fn sleep(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::domain::ApplicationStatus;

    fn store() -> MockStore {
        MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none())
    }

    #[tokio::test]
    async fn jobs_by_company_only_returns_owned_rows() {
        let store = store();
        for company in store.companies().await {
            let jobs = store.jobs_by_company(&company.id).await;
            assert!(jobs.iter().all(|j| j.company_id == company.id));
        }
    }

    #[tokio::test]
    async fn unknown_ids_resolve_to_none_or_empty() {
        let store = store();
        let missing_job = JobId("job-does-not-exist".to_string());
        assert!(store.job_by_id(&missing_job).await.is_none());
        assert!(store.applications_by_job(&missing_job).await.is_empty());

        let missing_candidate = CandidateId("cand-does-not-exist".to_string());
        assert!(store.candidate_by_id(&missing_candidate).await.is_none());
        assert!(store.candidate_skills(&missing_candidate).await.is_empty());
    }

    #[tokio::test]
    async fn jobs_by_status_filters_on_both_axes() {
        let store = store();
        let company = CompanyId("company-1".to_string());
        let published = store.jobs_by_status(&company, JobStatus::Published).await;
        assert!(!published.is_empty());
        assert!(published
            .iter()
            .all(|j| j.status == JobStatus::Published && j.company_id == company));
    }

    #[tokio::test]
    async fn notes_by_company_unions_job_and_candidate_matches() {
        let store = store();
        let company = CompanyId("company-1".to_string());
        let notes = store.notes_by_company(&company).await;
        let jobs = store.jobs_by_company(&company).await;
        let candidates = store.candidates_by_company(&company).await;

        for note in &notes {
            let by_job = jobs.iter().any(|j| j.id == note.job_id);
            let by_candidate = candidates.iter().any(|c| c.id == note.candidate_id);
            assert!(by_job || by_candidate);
        }
    }

    #[tokio::test]
    async fn company_applications_follow_job_ownership() {
        let store = store();
        let company = CompanyId("company-1".to_string());
        let apps = store.company_applications(&company);
        assert!(!apps.is_empty());
        for app in &apps {
            let job = store.find_job(&app.job_id).expect("job exists");
            assert_eq!(job.company_id, company);
        }
        // The demo data exercises more than one pipeline stage.
        assert!(apps.iter().any(|a| a.status != ApplicationStatus::Applied));
    }
}
