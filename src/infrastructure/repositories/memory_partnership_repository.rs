//! In-Memory Partnership Repository
//!
//! Process-local store used when no database is configured and in tests.
//! Mirrors the table's unique constraint on `submission_id`.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{NewPartnership, Partnership, PartnershipRepository};
use crate::shared::error::AppError;

/// DashMap-backed partnership repository.
#[derive(Debug, Default)]
pub struct InMemoryPartnershipRepository {
    next_id: AtomicI64,
    by_id: DashMap<i64, Partnership>,
    /// submission_id -> id
    submissions: DashMap<String, i64>,
}

impl InMemoryPartnershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl PartnershipRepository for InMemoryPartnershipRepository {
    async fn save(&self, partnership: NewPartnership) -> Result<Partnership, AppError> {
        let NewPartnership {
            address,
            coordinates,
            application,
        } = partnership;

        let reservation = match application.as_ref().map(|a| a.submission_id.as_str()) {
            Some(submission_id) => match self.submissions.entry(submission_id.to_string()) {
                Entry::Occupied(_) => {
                    return Err(AppError::Conflict(format!(
                        "Submission ID {} already exists",
                        submission_id
                    )))
                }
                Entry::Vacant(vacant) => Some(vacant),
            },
            None => None,
        };

        let id = self.allocate_id();
        if let Some(vacant) = reservation {
            vacant.insert(id);
        }

        let saved = Partnership {
            id,
            address,
            coordinates,
            application,
            created_at: Utc::now(),
        };
        self.by_id.insert(id, saved.clone());

        Ok(saved)
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<Partnership>, AppError> {
        let id = match self.submissions.get(submission_id) {
            Some(id) => *id,
            None => return Ok(None),
        };

        Ok(self.by_id.get(&id).map(|p| p.clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
