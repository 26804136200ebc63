//! Filter engine: narrows the board to the postings that satisfy the active criteria.
//!
//! Every predicate is independent and only applies when its criterion is set.
//! An empty criterion is an open filter, never a hidden default.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::job::{JobPosting, JobType};

/// Salary floors offered by the filter panel.
pub const SALARY_FLOOR_OPTIONS: [u64; 5] = [30_000, 50_000, 70_000, 100_000, 150_000];

/// Upper salary bound the panel starts with. Carried but not used for matching.
pub const DEFAULT_SALARY_CEILING: u64 = 200_000;

/// Number of tag suggestion chips shown by the filter panel.
pub const SUGGESTED_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub salary_min: u64,
    pub salary_max: u64,
    pub tags: Vec<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: String::new(),
            job_type: None,
            salary_min: 0,
            salary_max: DEFAULT_SALARY_CEILING,
            tags: Vec::new(),
        }
    }
}

impl FilterCriteria {
    /// Adds a tag constraint unless the exact tag is already selected.
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Chip click: deselect if selected, select otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tags.iter().any(|t| t == tag) {
            self.remove_tag(tag);
        } else {
            self.add_tag(tag);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the "Filters applied" indicator is lit. The salary floor is not counted.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.location.is_empty()
            || self.job_type.is_some()
            || !self.tags.is_empty()
    }
}

/// Returns true if `job` passes every active predicate in `criteria`.
pub fn matches(job: &JobPosting, criteria: &FilterCriteria) -> bool {
    if !criteria.search.is_empty() {
        let needle = criteria.search.to_lowercase();
        let hit = contains_ci(&job.title, &needle)
            || contains_ci(&job.company, &needle)
            || contains_ci(&job.description, &needle)
            || job.tags.iter().any(|tag| contains_ci(tag, &needle));
        if !hit {
            return false;
        }
    }

    if !criteria.location.is_empty() && !contains_ci(&job.location, &criteria.location.to_lowercase())
    {
        return false;
    }

    if let Some(job_type) = criteria.job_type {
        if job.job_type != job_type {
            return false;
        }
    }

    // Floor only: a posting without a declared maximum could still satisfy it.
    if criteria.salary_min > 0 {
        if let Some(max) = job.declared_salary_max() {
            if max < criteria.salary_min {
                return false;
            }
        }
    }

    if !criteria.tags.is_empty() {
        let hit = criteria.tags.iter().any(|wanted| {
            let wanted = wanted.to_lowercase();
            job.tags.iter().any(|tag| contains_ci(tag, &wanted))
        });
        if !hit {
            return false;
        }
    }

    true
}

/// Stable filter: the matching postings in their original order.
pub fn filter_all(jobs: &[JobPosting], criteria: &FilterCriteria) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|job| matches(job, criteria))
        .cloned()
        .collect()
}

/// Every tag used on the board, deduplicated and sorted ascending.
pub fn distinct_tags(jobs: &[JobPosting]) -> Vec<String> {
    jobs.iter()
        .flat_map(|job| job.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The first `limit` distinct tags, used for suggestion chips.
pub fn suggested_tags(jobs: &[JobPosting], limit: usize) -> Vec<String> {
    let mut tags = distinct_tags(jobs);
    tags.truncate(limit);
    tags
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::ApplicationChannel;
    use chrono::Utc;
    use uuid::Uuid;

    fn job(title: &str, tags: &[&str], salary_max: Option<u64>) -> JobPosting {
        let now = Utc::now();
        JobPosting {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Berlin, Germany".to_string(),
            job_type: JobType::FullTime,
            salary_min: None,
            salary_max,
            description: "Build things.".to_string(),
            requirements: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            application: ApplicationChannel::Email {
                address: "jobs@acme.io".to_string(),
            },
            company_logo: None,
            author_id: "author".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn scenario_jobs() -> Vec<JobPosting> {
        vec![
            job("Backend Engineer", &["Go", "SQL"], Some(90_000)),
            job("Frontend Dev", &["React"], Some(150_000)),
        ]
    }

    fn titles(jobs: &[JobPosting]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_returns_everything_in_order() {
        let jobs = vec![
            job("C", &[], None),
            job("A", &["x"], Some(1)),
            job("B", &["y"], Some(500_000)),
        ];
        let result = filter_all(&jobs, &FilterCriteria::default());
        assert_eq!(result, jobs);
    }

    #[test]
    fn test_salary_floor_excludes_low_max() {
        let criteria = FilterCriteria {
            salary_min: 100_000,
            salary_max: 200_000,
            ..Default::default()
        };
        let result = filter_all(&scenario_jobs(), &criteria);
        assert_eq!(titles(&result), vec!["Frontend Dev"]);
    }

    #[test]
    fn test_salary_floor_keeps_jobs_without_declared_max() {
        let criteria = FilterCriteria {
            salary_min: 100_000,
            ..Default::default()
        };
        assert!(matches(&job("Mystery", &[], None), &criteria));
    }

    #[test]
    fn test_salary_floor_treats_zero_max_as_undeclared() {
        let mut j = job("From 80k", &[], Some(0));
        j.salary_min = Some(80_000);
        let criteria = FilterCriteria {
            salary_min: 50_000,
            ..Default::default()
        };
        assert!(matches(&j, &criteria));
    }

    #[test]
    fn test_salary_floor_boundary_is_inclusive() {
        let criteria = FilterCriteria {
            salary_min: 90_000,
            ..Default::default()
        };
        assert!(matches(&job("Edge", &[], Some(90_000)), &criteria));
    }

    #[test]
    fn test_salary_ceiling_is_never_consulted() {
        let criteria = FilterCriteria {
            salary_max: 10,
            ..Default::default()
        };
        assert!(matches(&job("Rich", &[], Some(400_000)), &criteria));
    }

    #[test]
    fn test_tag_filter_is_case_insensitive_substring() {
        let criteria = FilterCriteria {
            tags: vec!["react".to_string()],
            ..Default::default()
        };
        let result = filter_all(&scenario_jobs(), &criteria);
        assert_eq!(titles(&result), vec!["Frontend Dev"]);
    }

    #[test]
    fn test_tag_filter_is_existential() {
        let criteria = FilterCriteria {
            tags: vec!["rust".to_string(), "sq".to_string()],
            ..Default::default()
        };
        let result = filter_all(&scenario_jobs(), &criteria);
        assert_eq!(titles(&result), vec!["Backend Engineer"]);
    }

    #[test]
    fn test_tag_match_implies_some_criterion_tag_is_substring() {
        let jobs = vec![
            job("A", &["PostgreSQL", "Kubernetes"], None),
            job("B", &["TypeScript"], None),
            job("C", &[], None),
        ];
        let criteria = FilterCriteria {
            tags: vec!["SQL".to_string(), "k8s".to_string()],
            ..Default::default()
        };
        for j in &jobs {
            if matches(j, &criteria) {
                assert!(criteria.tags.iter().any(|ct| j
                    .tags
                    .iter()
                    .any(|jt| jt.to_lowercase().contains(&ct.to_lowercase()))));
            }
        }
        assert_eq!(titles(&filter_all(&jobs, &criteria)), vec!["A"]);
    }

    #[test]
    fn test_search_matches_title_company_description_or_tag() {
        let mut j = job("Platform Engineer", &["Terraform"], None);
        j.company = "Globex".to_string();
        j.description = "Own our Kafka clusters".to_string();

        for term in ["platform", "GLOBEX", "kafka", "terra"] {
            let criteria = FilterCriteria {
                search: term.to_string(),
                ..Default::default()
            };
            assert!(matches(&j, &criteria), "expected match for {term}");
        }

        let criteria = FilterCriteria {
            search: "berlin".to_string(),
            ..Default::default()
        };
        assert!(!matches(&j, &criteria), "location is not a search field");
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let j = job("Any", &[], None);
        let hit = FilterCriteria {
            location: "BERLIN".to_string(),
            ..Default::default()
        };
        let miss = FilterCriteria {
            location: "Paris".to_string(),
            ..Default::default()
        };
        assert!(matches(&j, &hit));
        assert!(!matches(&j, &miss));
    }

    #[test]
    fn test_job_type_is_exact() {
        let mut j = job("Contractor", &[], None);
        j.job_type = JobType::Contract;
        let hit = FilterCriteria {
            job_type: Some(JobType::Contract),
            ..Default::default()
        };
        let miss = FilterCriteria {
            job_type: Some(JobType::Remote),
            ..Default::default()
        };
        assert!(matches(&j, &hit));
        assert!(!matches(&j, &miss));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let criteria = FilterCriteria {
            search: "engineer".to_string(),
            tags: vec!["react".to_string()],
            ..Default::default()
        };
        assert!(filter_all(&scenario_jobs(), &criteria).is_empty());
    }

    #[test]
    fn test_distinct_tags_sorted_and_unique() {
        let jobs = vec![
            job("A", &["SQL", "Go", "SQL"], None),
            job("B", &["AWS", "Go"], None),
        ];
        assert_eq!(distinct_tags(&jobs), vec!["AWS", "Go", "SQL"]);
    }

    #[test]
    fn test_distinct_tags_empty_collection() {
        assert!(distinct_tags(&[]).is_empty());
    }

    #[test]
    fn test_suggested_tags_truncates() {
        let jobs = vec![job("A", &["d", "c", "b", "a"], None)];
        assert_eq!(suggested_tags(&jobs, 2), vec!["a", "b"]);
        assert_eq!(suggested_tags(&jobs, 10).len(), 4);
    }

    #[test]
    fn test_criteria_add_tag_ignores_duplicates() {
        let mut criteria = FilterCriteria::default();
        criteria.add_tag("Rust");
        criteria.add_tag("Rust");
        criteria.add_tag("Go");
        assert_eq!(criteria.tags, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_criteria_toggle_and_remove_tag() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_tag("Rust");
        assert_eq!(criteria.tags, vec!["Rust"]);
        criteria.toggle_tag("Rust");
        assert!(criteria.tags.is_empty());

        criteria.add_tag("Go");
        criteria.remove_tag("Python");
        assert_eq!(criteria.tags, vec!["Go"]);
    }

    #[test]
    fn test_criteria_clear_restores_default() {
        let mut criteria = FilterCriteria {
            search: "x".to_string(),
            location: "y".to_string(),
            job_type: Some(JobType::Remote),
            salary_min: 50_000,
            salary_max: 1,
            tags: vec!["z".to_string()],
        };
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(criteria.salary_max, DEFAULT_SALARY_CEILING);
    }

    #[test]
    fn test_is_active_ignores_salary_floor() {
        let mut criteria = FilterCriteria {
            salary_min: 100_000,
            ..Default::default()
        };
        assert!(!criteria.is_active());
        criteria.location = "Remote".to_string();
        assert!(criteria.is_active());
    }
}
