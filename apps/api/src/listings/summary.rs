use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

/// Headline numbers shown above the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardStats {
    pub active_jobs: usize,
    pub companies: usize,
    /// Mean of each posting's top salary (max, else min, else 0), in thousands.
    /// A zero bound counts as missing.
    pub average_salary_k: u64,
}

pub fn board_stats(jobs: &[JobPosting]) -> BoardStats {
    let companies = jobs
        .iter()
        .map(|job| job.company.as_str())
        .collect::<HashSet<_>>()
        .len();

    let average_salary_k = if jobs.is_empty() {
        0
    } else {
        let total: u64 = jobs
            .iter()
            .map(|job| {
                job.declared_salary_max()
                    .or(job.declared_salary_min())
                    .unwrap_or(0)
            })
            .sum();
        (total as f64 / jobs.len() as f64 / 1000.0).round() as u64
    };

    BoardStats {
        active_jobs: jobs.len(),
        companies,
        average_salary_k,
    }
}

/// Human-readable salary range. Zero counts as not specified.
pub fn format_salary(min: Option<u64>, max: Option<u64>) -> String {
    let min = min.filter(|v| *v > 0);
    let max = max.filter(|v| *v > 0);
    match (min, max) {
        (Some(lo), Some(hi)) => format!("${} - ${}", group_thousands(lo), group_thousands(hi)),
        (Some(lo), None) => format!("From ${}", group_thousands(lo)),
        (None, Some(hi)) => format!("Up to ${}", group_thousands(hi)),
        (None, None) => "Salary not specified".to_string(),
    }
}

/// Heading above the result grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultHeader {
    pub title: String,
    /// "Showing n of m jobs", only when filters hide part of the board.
    pub showing: Option<String>,
}

pub fn result_header(matched: usize, total: usize) -> ResultHeader {
    let plural = if matched == 1 { "" } else { "s" };
    ResultHeader {
        title: format!("{matched} Job{plural} Found"),
        showing: (matched != total).then(|| format!("Showing {matched} of {total} jobs")),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
