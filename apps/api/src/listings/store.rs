//! In-memory job store.
//!
//! Copy-on-write: every mutation publishes a new immutable snapshot with a bumped
//! version. Readers clone the `Arc` and drop the lock before doing any work, so a
//! snapshot they hold never changes underneath them. Nothing is persisted.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::info;
use uuid::Uuid;

use crate::listings::filter::{filter_all, FilterCriteria};
use crate::listings::posting::{create_posting, PostingDraft};
use crate::models::job::JobPosting;

/// One immutable version of the board, most recent posting first.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub version: u64,
    pub jobs: Arc<[JobPosting]>,
}

struct FilterMemo {
    version: u64,
    criteria: FilterCriteria,
    result: Arc<[JobPosting]>,
}

pub struct JobStore {
    current: RwLock<JobSnapshot>,
    memo: Mutex<Option<FilterMemo>>,
}

impl JobStore {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            current: RwLock::new(JobSnapshot {
                version: 1,
                jobs: jobs.into(),
            }),
            memo: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().jobs.len()
    }

    pub fn get(&self, id: Uuid) -> Option<JobPosting> {
        self.snapshot().jobs.iter().find(|job| job.id == id).cloned()
    }

    /// Publishes a new version with `posting` at the front.
    pub fn prepend(&self, posting: JobPosting) -> JobSnapshot {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut jobs = Vec::with_capacity(current.jobs.len() + 1);
        jobs.push(posting);
        jobs.extend(current.jobs.iter().cloned());

        *current = JobSnapshot {
            version: current.version + 1,
            jobs: jobs.into(),
        };
        current.clone()
    }

    /// Creates a posting owned by `author_id` and puts it at the top of the board.
    pub fn publish(&self, draft: PostingDraft, author_id: &str) -> JobPosting {
        let posting = create_posting(draft, author_id);
        let snapshot = self.prepend(posting.clone());
        info!(
            "Published {} job {} ({}) by {author_id}; board now v{} with {} jobs",
            posting.job_type.as_str(),
            posting.id,
            posting.title,
            snapshot.version,
            snapshot.jobs.len()
        );
        posting
    }

    /// `filter_all` over `snapshot`, reused while neither the board version
    /// nor the criteria change. The memo lock is not held while filtering.
    pub fn filtered(&self, snapshot: &JobSnapshot, criteria: &FilterCriteria) -> Arc<[JobPosting]> {
        if let Some(hit) = self
            .lock_memo()
            .as_ref()
            .filter(|m| m.version == snapshot.version && &m.criteria == criteria)
        {
            return Arc::clone(&hit.result);
        }

        let result: Arc<[JobPosting]> = filter_all(&snapshot.jobs, criteria).into();

        let mut memo = self.lock_memo();
        // A request still holding an older snapshot must not evict a newer memo.
        if memo.as_ref().map_or(true, |m| m.version <= snapshot.version) {
            *memo = Some(FilterMemo {
                version: snapshot.version,
                criteria: criteria.clone(),
                result: Arc::clone(&result),
            });
        }
        result
    }

    fn lock_memo(&self) -> MutexGuard<'_, Option<FilterMemo>> {
        self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
