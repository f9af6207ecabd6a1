use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    Application, Candidate, CandidateSkill, Company, Job, JobRequirement, Note, Profile, Score,
    Subscription, UsageMetric,
};

/// Embedded demo dataset used by the CLI demo and the test suites.
const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo.json");

/// The complete static dataset standing in for the relational schema.
///
/// Row order within each table is insertion order and is preserved by every
/// accessor. Foreign keys are not validated; dangling references simply fail
/// to join.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    pub companies: Vec<Company>,
    pub profiles: Vec<Profile>,
    pub jobs: Vec<Job>,
    pub job_requirements: Vec<JobRequirement>,
    pub candidates: Vec<Candidate>,
    pub candidate_skills: Vec<CandidateSkill>,
    pub applications: Vec<Application>,
    pub scores: Vec<Score>,
    pub notes: Vec<Note>,
    pub subscriptions: Vec<Subscription>,
    pub usage_metrics: Vec<UsageMetric>,
}

impl Fixture {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        let fixture: Fixture = serde_json::from_reader(reader)?;
        debug!(
            companies = fixture.companies.len(),
            jobs = fixture.jobs.len(),
            candidates = fixture.candidates.len(),
            applications = fixture.applications.len(),
            "fixture loaded"
        );
        Ok(fixture)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// The bundled demo dataset. The embedded JSON is validated by the test
    /// suite, so a parse failure here is a build defect.
    pub fn demo() -> Self {
        Self::from_json_str(DEMO_FIXTURE).expect("embedded demo fixture is valid JSON")
    }
}

/// The only real failure path in the mock layer: the snapshot could not be
/// loaded at startup.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fixture_parses() {
        let fixture = Fixture::demo();
        assert!(!fixture.companies.is_empty());
        assert!(!fixture.jobs.is_empty());
        assert!(!fixture.applications.is_empty());
    }

    #[test]
    fn demo_fixture_has_coherent_foreign_keys() {
        let fixture = Fixture::demo();

        for job in &fixture.jobs {
            assert!(
                fixture.companies.iter().any(|c| c.id == job.company_id),
                "job {} references missing company",
                job.id.0
            );
        }
        for app in &fixture.applications {
            assert!(fixture.jobs.iter().any(|j| j.id == app.job_id));
            assert!(fixture.candidates.iter().any(|c| c.id == app.candidate_id));
        }
        for score in &fixture.scores {
            assert!(fixture
                .applications
                .iter()
                .any(|a| a.id == score.application_id));
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Fixture::from_json_str("{\"companies\": 7}").expect_err("should fail");
        assert!(matches!(err, FixtureError::Parse(_)));
    }
}
