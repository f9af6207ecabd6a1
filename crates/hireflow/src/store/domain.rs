use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tenant companies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for applications linking a candidate to a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for user profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Where the product is running; selects licensing and backend behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    Cloud,
    SelfHosted,
}

impl DeploymentType {
    /// Anything other than an explicit `self-hosted` value means cloud.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "self-hosted" | "selfhosted" => Self::SelfHosted,
            _ => Self::Cloud,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Professional,
    Enterprise,
}

/// Tenant company owning jobs, candidates, and profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub logo_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub deployment_type: DeploymentType,
    pub license_key: Option<String>,
    pub license_expires_at: Option<DateTime<Utc>>,
    pub max_users: u32,
    pub max_jobs: u32,
    pub max_cv_uploads_per_month: u32,
    pub storage_limit_gb: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    Admin,
    Recruiter,
    Viewer,
}

/// A user account scoped to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub company_id: CompanyId,
    pub role: ProfileRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

/// A job posting owned by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_min: u32,
    pub salary_max: u32,
    pub status: JobStatus,
    pub created_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A weighted skill requirement attached to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub id: String,
    pub job_id: JobId,
    pub skill: String,
    pub weight: u32,
    pub required: bool,
}

/// Structured data extracted from a candidate's CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCv {
    pub experience_years: u32,
    pub education: Vec<EducationEntry>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub university: String,
    pub year: i32,
}

/// A candidate sourced for a company's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub company_id: CompanyId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cv_file_url: String,
    pub parsed_data: ParsedCv,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillProficiency {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single skill attached to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub id: String,
    pub candidate_id: CandidateId,
    pub skill: String,
    pub proficiency: SkillProficiency,
}

/// Pipeline stage of an application. The UI only moves statuses forward but
/// nothing in the store enforces that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interviewed,
    Offered,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }
}

/// Links a candidate to a job with scoring attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub score: u32,
    pub match_percentage: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Score used for histograms: match percentage when present, otherwise
    /// the raw score. Zero means unscored.
    pub fn effective_score(&self) -> u32 {
        if self.match_percentage > 0 {
            self.match_percentage
        } else {
            self.score
        }
    }
}

/// Per-criteria scoring breakdown for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: String,
    pub application_id: ApplicationId,
    pub criteria: String,
    pub score: u32,
    pub max_score: u32,
    pub notes: Option<String>,
}

/// A recruiter note attached to a candidate in the context of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub author_id: ProfileId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trialing,
}

/// Billing record for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub company_id: CompanyId,
    pub stripe_subscription_id: String,
    pub stripe_customer_id: String,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub trial_start: Option<DateTime<Utc>>,
    pub trial_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    CvUpload,
    JobCreated,
    UserAdded,
    StorageUsed,
}

/// Usage counter for plan-limit tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetric {
    pub id: String,
    pub company_id: CompanyId,
    pub metric_type: MetricType,
    pub metric_value: u64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_type_defaults_to_cloud() {
        assert_eq!(DeploymentType::parse("cloud"), DeploymentType::Cloud);
        assert_eq!(DeploymentType::parse("SELF-HOSTED"), DeploymentType::SelfHosted);
        assert_eq!(DeploymentType::parse("garbage"), DeploymentType::Cloud);
    }

    #[test]
    fn effective_score_prefers_match_percentage() {
        let app: Application = serde_json::from_value(serde_json::json!({
            "id": "app-1",
            "candidate_id": "cand-1",
            "job_id": "job-1",
            "status": "applied",
            "score": 40,
            "match_percentage": 85,
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-01T10:00:00Z"
        }))
        .expect("application deserializes");

        assert_eq!(app.effective_score(), 85);
    }

    #[test]
    fn job_type_uses_kebab_case_wire_format() {
        let job_type: JobType = serde_json::from_str("\"full-time\"").expect("parses");
        assert_eq!(job_type, JobType::FullTime);
    }
}
