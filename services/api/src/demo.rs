use crate::infra::parse_date;
use chrono::{NaiveDate, Utc};
use clap::Args;
use hireflow::error::AppError;
use hireflow::store::daterange::DateRange;
use hireflow::store::domain::{CompanyId, JobStatus, JobType, ProfileId};
use hireflow::store::fixture::Fixture;
use hireflow::store::mutation::{JobPatch, NewJob};
use hireflow::store::{LatencyProfile, MockStore};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Company to report on
    #[arg(long, default_value = "company-1")]
    pub(crate) company: String,
    /// Window start (YYYY-MM-DD); both bounds required to apply a window
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Window end (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Fixture file to load instead of the bundled demo data
    #[arg(long)]
    pub(crate) fixture: Option<PathBuf>,
    /// Export the report as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Company to walk through
    #[arg(long, default_value = "company-1")]
    pub(crate) company: String,
    /// Activity feed length
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        company,
        start,
        end,
        fixture,
        csv,
    } = args;

    let fixture = match fixture {
        Some(path) => Fixture::from_path(path)?,
        None => Fixture::demo(),
    };
    let store = MockStore::new(fixture).with_latency(LatencyProfile::none());
    let company = CompanyId(company);
    let window = crate::infra::window(start, end);

    let stats = store.dashboard_stats(&company, window).await;
    let funnel = store.hiring_funnel(&company, window).await;
    let distribution = store.score_distribution(&company, window).await;
    let top_jobs = store.top_jobs(&company, window).await;

    println!("Pipeline report for {}", company.0);
    println!(
        "  jobs: {} total / {} published / {} draft",
        stats.total_jobs, stats.published_jobs, stats.draft_jobs
    );
    println!(
        "  candidates: {}  applications: {}",
        stats.total_candidates, stats.total_applications
    );

    println!("\nHiring funnel");
    for stage in &funnel {
        println!("  {:<12} {}", stage.stage, stage.count);
    }

    println!("\nScore distribution");
    for bucket in &distribution {
        println!("  {:<7} {}", bucket.range, bucket.count);
    }

    println!("\nTop jobs by applicants");
    for entry in &top_jobs {
        println!("  {:<28} {}", entry.job_title, entry.applicants);
    }

    if let Some(path) = csv {
        export_csv(&path, &funnel, &distribution, &top_jobs)
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        println!("\nReport exported to {}", path.display());
    }

    Ok(())
}

fn export_csv(
    path: &PathBuf,
    funnel: &[hireflow::store::charts::FunnelStage],
    distribution: &[hireflow::store::charts::ScoreBucket],
    top_jobs: &[hireflow::store::charts::TopJobEntry],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["section", "label", "value"])?;
    for stage in funnel {
        let count = stage.count.to_string();
        writer.write_record(["funnel", stage.stage, count.as_str()])?;
    }
    for bucket in distribution {
        let count = bucket.count.to_string();
        writer.write_record(["score_distribution", bucket.range, count.as_str()])?;
    }
    for entry in top_jobs {
        let applicants = entry.applicants.to_string();
        writer.write_record(["top_jobs", entry.job_title.as_str(), applicants.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { company, limit } = args;

    let store = MockStore::new(Fixture::demo()).with_latency(LatencyProfile::none());
    let company = CompanyId(company);

    println!("Hireflow mock backend demo");

    let stats = store.dashboard_stats(&company, None).await;
    println!(
        "\nDashboard for {}: {} jobs, {} candidates, {} applications ({} hired)",
        company.0,
        stats.total_jobs,
        stats.total_candidates,
        stats.total_applications,
        stats.hired_candidates
    );

    println!("\nRecent activity (latest {limit})");
    for event in store.recent_activity(&company, limit, None).await {
        println!(
            "  {}  {}",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            event.title
        );
    }

    println!("\nTop candidates");
    for ranked in store.top_candidates(&company, 5).await {
        println!(
            "  {:<20} avg {:>5.1} over {} application(s)",
            ranked.candidate.full_name, ranked.average_score, ranked.application_count
        );
    }

    let thirty_days = DateRange::trailing_days(30, Utc::now());
    let series = store
        .applications_over_time(&company, Some(thirty_days))
        .await;
    let received: usize = series.iter().map(|d| d.count).sum();
    println!("\nApplications received in the last 30 days: {received}");

    // Demonstrate the simulation boundary: writes return rows that the
    // snapshot never absorbs.
    let created = store
        .create_job(NewJob {
            company_id: company.clone(),
            title: "Staff Engineer".to_string(),
            description: "Demo-only posting".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_min: Some(100_000),
            salary_max: Some(130_000),
            status: JobStatus::Draft,
            created_by: ProfileId("profile-1".to_string()),
        })
        .await;
    println!("\nSimulated create returned {} ({})", created.id.0, created.title);
    match store.job_by_id(&created.id).await {
        Some(_) => println!("  unexpected: the mock store persisted a write"),
        None => println!("  subsequent read finds nothing, as the mock contract promises"),
    }

    let patched = store
        .update_job(
            &created.id,
            JobPatch {
                status: Some(JobStatus::Published),
                ..JobPatch::default()
            },
        )
        .await;
    match patched {
        Some(_) => println!("  unexpected: update found a row that was never stored"),
        None => println!("  update of the unsaved job returns None"),
    }

    Ok(())
}
