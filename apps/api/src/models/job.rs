use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment classification of a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Remote => "remote",
        }
    }

    /// Parses the kebab-case wire name. Unknown names return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full-time" => Some(JobType::FullTime),
            "part-time" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "remote" => Some(JobType::Remote),
            _ => None,
        }
    }
}

/// How a candidate applies. Exactly one contact is carried, matching the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApplicationChannel {
    Email { address: String },
    Url { link: String },
}

impl ApplicationChannel {
    /// Link the "Apply" action opens: a prefilled mailto or the external URL.
    pub fn apply_link(&self, title: &str) -> String {
        match self {
            ApplicationChannel::Email { address } => {
                format!("mailto:{address}?subject=Application for {title}")
            }
            ApplicationChannel::Url { link } => link.clone(),
        }
    }
}

/// A job posting. Immutable after creation; `updated_at` always equals `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub description: String,
    pub requirements: Option<String>,
    pub tags: Vec<String>,
    pub application: ApplicationChannel,
    pub company_logo: Option<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    /// Lower salary bound, with zero read as not specified.
    pub fn declared_salary_min(&self) -> Option<u64> {
        self.salary_min.filter(|v| *v > 0)
    }

    /// Upper salary bound, with zero read as not specified.
    pub fn declared_salary_max(&self) -> Option<u64> {
        self.salary_max.filter(|v| *v > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_serde_uses_kebab_case() {
        let json = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(json, r#""part-time""#);
        let parsed: JobType = serde_json::from_str(r#""full-time""#).unwrap();
        assert_eq!(parsed, JobType::FullTime);
    }

    #[test]
    fn test_job_type_parse_matches_as_str() {
        for jt in [
            JobType::FullTime,
            JobType::PartTime,
            JobType::Contract,
            JobType::Remote,
        ] {
            assert_eq!(JobType::parse(jt.as_str()), Some(jt));
        }
        assert_eq!(JobType::parse("freelance"), None);
        assert_eq!(JobType::parse("Full-Time"), None);
    }

    #[test]
    fn test_application_channel_is_internally_tagged() {
        let channel = ApplicationChannel::Email {
            address: "jobs@acme.io".to_string(),
        };
        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value["type"], "email");
        assert_eq!(value["address"], "jobs@acme.io");

        let url: ApplicationChannel =
            serde_json::from_str(r#"{"type": "url", "link": "https://acme.io/apply"}"#).unwrap();
        assert_eq!(
            url,
            ApplicationChannel::Url {
                link: "https://acme.io/apply".to_string()
            }
        );
    }

    #[test]
    fn test_apply_link_email_prefills_subject() {
        let channel = ApplicationChannel::Email {
            address: "hr@acme.io".to_string(),
        };
        assert_eq!(
            channel.apply_link("Backend Engineer"),
            "mailto:hr@acme.io?subject=Application for Backend Engineer"
        );
    }

    #[test]
    fn test_apply_link_url_is_unchanged() {
        let channel = ApplicationChannel::Url {
            link: "https://careers.acme.io/42".to_string(),
        };
        assert_eq!(channel.apply_link("ignored"), "https://careers.acme.io/42");
    }
}
