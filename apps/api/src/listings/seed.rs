//! Fixed sample board loaded on every start.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::job::{ApplicationChannel, JobPosting, JobType};

const SEED_AUTHOR: &str = "seed";

struct SeedJob {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    job_type: JobType,
    salary: (Option<u64>, Option<u64>),
    description: &'static str,
    requirements: Option<&'static str>,
    tags: &'static [&'static str],
    apply: ApplyVia,
    days_ago: i64,
}

enum ApplyVia {
    Email(&'static str),
    Url(&'static str),
}

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        title: "Senior Frontend Developer",
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        job_type: JobType::FullTime,
        salary: (Some(120_000), Some(160_000)),
        description: "Lead development of our customer-facing web applications using React and TypeScript.",
        requirements: Some("5+ years of frontend experience, deep knowledge of React."),
        tags: &["React", "TypeScript", "CSS"],
        apply: ApplyVia::Email("careers@techcorp.example"),
        days_ago: 1,
    },
    SeedJob {
        title: "Backend Engineer",
        company: "DataFlow Systems",
        location: "Austin, TX",
        job_type: JobType::FullTime,
        salary: (Some(100_000), Some(140_000)),
        description: "Design and operate the services behind our real-time analytics pipeline.",
        requirements: Some("Experience with Go or Rust, PostgreSQL, and distributed systems."),
        tags: &["Go", "PostgreSQL", "Kubernetes"],
        apply: ApplyVia::Url("https://dataflow.example/careers/backend"),
        days_ago: 2,
    },
    SeedJob {
        title: "Product Designer",
        company: "Pixel Studio",
        location: "New York, NY",
        job_type: JobType::Contract,
        salary: (Some(70_000), None),
        description: "Shape the end-to-end experience of our design collaboration tool.",
        requirements: None,
        tags: &["Figma", "UX", "Prototyping"],
        apply: ApplyVia::Email("hello@pixelstudio.example"),
        days_ago: 3,
    },
    SeedJob {
        title: "DevOps Engineer",
        company: "CloudNine",
        location: "Remote",
        job_type: JobType::Remote,
        salary: (Some(110_000), Some(150_000)),
        description: "Own our cloud infrastructure, CI/CD pipelines, and observability stack.",
        requirements: Some("Terraform, AWS, and on-call experience."),
        tags: &["AWS", "Terraform", "Kubernetes"],
        apply: ApplyVia::Url("https://cloudnine.example/jobs/devops"),
        days_ago: 5,
    },
    SeedJob {
        title: "Data Analyst",
        company: "Insight Labs",
        location: "Chicago, IL",
        job_type: JobType::PartTime,
        salary: (None, Some(60_000)),
        description: "Turn product usage data into reports and dashboards for the leadership team.",
        requirements: Some("Strong SQL and spreadsheet skills."),
        tags: &["SQL", "Python", "Tableau"],
        apply: ApplyVia::Email("jobs@insightlabs.example"),
        days_ago: 7,
    },
    SeedJob {
        title: "Mobile Developer",
        company: "TechCorp Inc.",
        location: "Seattle, WA",
        job_type: JobType::FullTime,
        salary: (None, None),
        description: "Build our iOS and Android apps with React Native.",
        requirements: None,
        tags: &["React Native", "iOS", "Android"],
        apply: ApplyVia::Url("https://techcorp.example/careers/mobile"),
        days_ago: 10,
    },
];

/// The sample postings, most recent first.
pub fn sample_jobs() -> Vec<JobPosting> {
    let now = Utc::now();
    SEED_JOBS
        .iter()
        .map(|seed| {
            let created_at = now - Duration::days(seed.days_ago);
            JobPosting {
                id: Uuid::new_v4(),
                title: seed.title.to_string(),
                company: seed.company.to_string(),
                location: seed.location.to_string(),
                job_type: seed.job_type,
                salary_min: seed.salary.0,
                salary_max: seed.salary.1,
                description: seed.description.to_string(),
                requirements: seed.requirements.map(str::to_string),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                application: match seed.apply {
                    ApplyVia::Email(address) => ApplicationChannel::Email {
                        address: address.to_string(),
                    },
                    ApplyVia::Url(link) => ApplicationChannel::Url {
                        link: link.to_string(),
                    },
                },
                company_logo: None,
                author_id: SEED_AUTHOR.to_string(),
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
