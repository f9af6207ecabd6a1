//! Simulated writes.
//!
//! These return constructed rows without touching the snapshot: a read
//! issued after a "create" will not see the new row. The signatures are the
//! boundary a real backend replaces with genuine persistence.

use chrono::Utc;
use serde::Deserialize;

use super::domain::{CompanyId, Job, JobId, JobStatus, JobType, ProfileId};
use super::MockStore;

/// Payload for creating a job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    pub status: JobStatus,
    pub created_by: ProfileId,
}

/// Partial update for an existing job. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub status: Option<JobStatus>,
}

impl MockStore {
    /// Simulate creating a job: a row with a timestamp-derived id and fresh
    /// timestamps is returned but not stored.
    pub async fn create_job(&self, data: NewJob) -> Job {
        self.mutate_pause().await;

        let now = Utc::now();
        Job {
            id: JobId(format!("job-{}", now.timestamp_millis())),
            company_id: data.company_id,
            title: data.title,
            description: data.description,
            location: data.location,
            job_type: data.job_type,
            salary_min: data.salary_min.unwrap_or(0),
            salary_max: data.salary_max.unwrap_or(0),
            status: data.status,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Simulate updating a job: the merged row with a refreshed
    /// `updated_at` is returned, or `None` when the id is unknown. The
    /// snapshot itself is untouched.
    pub async fn update_job(&self, id: &JobId, patch: JobPatch) -> Option<Job> {
        self.mutate_pause().await;

        let mut job = self.find_job(id)?;
        if let Some(title) = patch.title {
            job.title = title;
        }
        if let Some(description) = patch.description {
            job.description = description;
        }
        if let Some(location) = patch.location {
            job.location = location;
        }
        if let Some(job_type) = patch.job_type {
            job.job_type = job_type;
        }
        if let Some(salary_min) = patch.salary_min {
            job.salary_min = salary_min;
        }
        if let Some(salary_max) = patch.salary_max {
            job.salary_max = salary_max;
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        job.updated_at = Utc::now();
        Some(job)
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

    fn new_job() -> NewJob {
        NewJob {
            company_id: CompanyId("company-1".to_string()),
            title: "Data Engineer".to_string(),
            description: "Pipelines and warehousing".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_min: Some(90_000),
            salary_max: None,
            status: JobStatus::Draft,
            created_by: ProfileId("profile-1".to_string()),
        }
    }

    #[tokio::test]
    async fn created_jobs_are_not_persisted() {
        let store = store();
        let job = store.create_job(new_job()).await;

        assert!(job.id.0.starts_with("job-"));
        assert_eq!(job.salary_max, 0);
        // Regression guard: the mock boundary must not start persisting
        // without its callers knowing.
        assert!(store.job_by_id(&job.id).await.is_none());
    }

    #[tokio::test]
    async fn update_merges_patch_and_refreshes_timestamp() {
        let store = store();
        let original = store.jobs().await.remove(0);

        let patch = JobPatch {
            title: Some("Renamed role".to_string()),
            status: Some(JobStatus::Closed),
            ..JobPatch::default()
        };
        let updated = store
            .update_job(&original.id, patch)
            .await
            .expect("job exists");

        assert_eq!(updated.title, "Renamed role");
        assert_eq!(updated.status, JobStatus::Closed);
        assert_eq!(updated.location, original.location);
        assert!(updated.updated_at > original.updated_at);

        // The snapshot still holds the original row.
        let reread = store.job_by_id(&original.id).await.expect("job exists");
        assert_eq!(reread.title, original.title);
    }

    #[tokio::test]
    async fn update_of_unknown_job_returns_none() {
        let store = store();
        let missing = JobId("job-missing".to_string());
        assert!(store
            .update_job(&missing, JobPatch::default())
            .await
            .is_none());
    }
}
