//! Reverse-chronological activity feed for the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::daterange::DateRange;
use super::domain::{ApplicationStatus, CompanyId};
use super::mock::filter_window;
use super::MockStore;

const APPLICATION_EVENT_CAP: usize = 8;
const STATUS_EVENT_CAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    JobCreated,
    CandidateAdded,
    ApplicationReceived,
    StatusChanged,
    NoteAdded,
}

/// One feed entry rendered on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MockStore {
    /// Merge job, candidate, application, status-change, and note events
    /// into one list sorted by timestamp descending, truncated to `limit`.
    ///
    /// The application and status-change sub-lists are capped before the
    /// merge, so the result is only approximately the N most recent events
    /// across all types. That matches the original feed's behavior.
    pub async fn recent_activity(
        &self,
        company_id: &CompanyId,
        limit: usize,
        window: Option<DateRange>,
    ) -> Vec<ActivityEvent> {
        self.aggregate_pause().await;

        let jobs = self.company_jobs(company_id);
        let candidates = self.company_candidates(company_id);
        let applications = filter_window(self.company_applications(company_id), window);
        let notes: Vec<_> = self
            .fixture
            .notes
            .iter()
            .filter(|note| {
                jobs.iter().any(|j| j.id == note.job_id)
                    || candidates.iter().any(|c| c.id == note.candidate_id)
            })
            .cloned()
            .collect();

        let mut events: Vec<ActivityEvent> = Vec::new();

        for job in &jobs {
            events.push(ActivityEvent {
                id: format!("job-{}", job.id.0),
                kind: ActivityKind::JobCreated,
                title: format!("New job posted: {}", job.title),
                description: format!("Status: {}", job.status.label()),
                timestamp: job.created_at,
                link: Some(format!("/dashboard/jobs/{}", job.id.0)),
            });
        }

        for candidate in &candidates {
            events.push(ActivityEvent {
                id: format!("candidate-{}", candidate.id.0),
                kind: ActivityKind::CandidateAdded,
                title: format!("New candidate: {}", candidate.full_name),
                description: candidate.email.clone(),
                timestamp: candidate.created_at,
                link: Some(format!("/dashboard/candidates/{}", candidate.id.0)),
            });
        }

        let mut received = applications.clone();
        received.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        for app in received.iter().take(APPLICATION_EVENT_CAP) {
            let job = jobs.iter().find(|j| j.id == app.job_id);
            let candidate = candidates.iter().find(|c| c.id == app.candidate_id);
            if let (Some(job), Some(candidate)) = (job, candidate) {
                events.push(ActivityEvent {
                    id: format!("app-{}", app.id.0),
                    kind: ActivityKind::ApplicationReceived,
                    title: format!("{} applied for {}", candidate.full_name, job.title),
                    description: format!("Match: {}%", app.match_percentage),
                    timestamp: app.created_at,
                    link: Some(format!("/dashboard/candidates/{}", candidate.id.0)),
                });
            }
        }

        let mut updated: Vec<_> = applications
            .iter()
            .filter(|app| app.updated_at != app.created_at)
            .collect();
        updated.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        for app in updated.iter().take(STATUS_EVENT_CAP) {
            let job = jobs.iter().find(|j| j.id == app.job_id);
            let candidate = candidates.iter().find(|c| c.id == app.candidate_id);
            if let (Some(job), Some(candidate)) = (job, candidate) {
                if app.status != ApplicationStatus::Applied {
                    events.push(ActivityEvent {
                        id: format!("status-{}", app.id.0),
                        kind: ActivityKind::StatusChanged,
                        title: format!(
                            "{} status updated for {}",
                            candidate.full_name, job.title
                        ),
                        description: format!("Status: {}", app.status.label()),
                        timestamp: app.updated_at,
                        link: Some(format!("/dashboard/candidates/{}", candidate.id.0)),
                    });
                }
            }
        }

        for note in &notes {
            let candidate = candidates.iter().find(|c| c.id == note.candidate_id);
            let job = jobs.iter().find(|j| j.id == note.job_id);
            if let (Some(candidate), Some(_job)) = (candidate, job) {
                events.push(ActivityEvent {
                    id: format!("note-{}", note.id),
                    kind: ActivityKind::NoteAdded,
                    title: format!("Note added for {}", candidate.full_name),
                    description: truncate_content(&note.content),
                    timestamp: note.created_at,
                    link: Some(format!("/dashboard/candidates/{}", candidate.id.0)),
                });
            }
        }

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit);
        events
    }
}

fn truncate_content(content: &str) -> String {
    const MAX: usize = 50;
    if content.chars().count() > MAX {
        let prefix: String = content.chars().take(MAX).collect();
        format!("{prefix}...")
    } else {
        content.to_string()
    }
}
