//! Posting submission: validating the form and stamping new records.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::{ApplicationChannel, JobPosting, JobType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    #[default]
    Email,
    Url,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a whole non-negative number, got '{value}'")]
    InvalidSalary { field: &'static str, value: String },

    #[error("an application {0} is required for this application channel")]
    MissingApplicationContact(&'static str),
}

/// Raw values of the "Post a New Job" form, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_min: String,
    pub salary_max: String,
    pub description: String,
    pub requirements: String,
    pub tags: Vec<String>,
    pub application_type: ApplicationType,
    pub application_email: String,
    pub application_url: String,
    pub company_logo: String,
}

/// A validated posting that has not been assigned identity or provenance yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingDraft {
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
}

impl PostingForm {
    /// Adds a tag from the tag input. Blank and already-present tags are ignored.
    pub fn add_tag(&mut self, raw: &str) {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return;
        }
        self.tags.push(tag.to_string());
    }

    /// Chip removal in the form's tag list. Submissions arrive with the final list.
    #[allow(dead_code)]
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Checks the fields the form marks as required and normalizes blanks to absent.
    ///
    /// Only the contact for the selected application channel is read; the other
    /// one is dropped even if filled in.
    pub fn validate(&self) -> Result<PostingDraft, FormError> {
        let title = required(&self.title, "title")?;
        let company = required(&self.company, "company")?;
        let location = required(&self.location, "location")?;
        let description = required(&self.description, "description")?;

        let application = match self.application_type {
            ApplicationType::Email => ApplicationChannel::Email {
                address: optional(&self.application_email)
                    .ok_or(FormError::MissingApplicationContact("email"))?,
            },
            ApplicationType::Url => ApplicationChannel::Url {
                link: optional(&self.application_url)
                    .ok_or(FormError::MissingApplicationContact("url"))?,
            },
        };

        Ok(PostingDraft {
            title,
            company,
            location,
            job_type: self.job_type,
            salary_min: parse_salary(&self.salary_min, "salary_min")?,
            salary_max: parse_salary(&self.salary_max, "salary_max")?,
            description,
            requirements: optional(&self.requirements),
            tags: self.tags.clone(),
            application,
            company_logo: optional(&self.company_logo),
        })
    }
}

/// Stamps a draft with a fresh id, its author, and the current time.
pub fn create_posting(draft: PostingDraft, author_id: &str) -> JobPosting {
    let now = Utc::now();
    JobPosting {
        id: Uuid::new_v4(),
        title: draft.title,
        company: draft.company,
        location: draft.location,
        job_type: draft.job_type,
        salary_min: draft.salary_min,
        salary_max: draft.salary_max,
        description: draft.description,
        requirements: draft.requirements,
        tags: draft.tags,
        application: draft.application,
        company_logo: draft.company_logo,
        author_id: author_id.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    optional(value).ok_or(FormError::MissingField(field))
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_salary(value: &str, field: &'static str) -> Result<Option<u64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| FormError::InvalidSalary {
            field,
            value: trimmed.to_string(),
        })
}
