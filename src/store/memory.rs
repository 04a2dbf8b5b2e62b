use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::poll_models::Poll;
use crate::store::{PollStore, SaveOutcome};
use crate::utils::error::{AppError, AppResult};

/// In-memory store for tests and local development. Mirrors the CAS
/// semantics of the Mongo store and can force save conflicts to exercise
/// the service's retry path.
#[derive(Default)]
pub struct MemoryPollStore {
    polls: Mutex<HashMap<ObjectId, Poll>>,
    forced_conflicts: AtomicUsize,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `count` saves report a conflict without writing.
    pub fn inject_conflicts(&self, count: usize) {
        self.forced_conflicts.store(count, Ordering::SeqCst);
    }

    fn take_forced_conflict(&self) -> bool {
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<ObjectId, Poll>>> {
        self.polls
            .lock()
            .map_err(|_| AppError::InternalError("poll store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn insert(&self, poll: &Poll) -> AppResult<()> {
        self.lock()?.insert(poll.id, poll.clone());
        Ok(())
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn save(&self, poll: &mut Poll) -> AppResult<SaveOutcome> {
        if self.take_forced_conflict() {
            return Ok(SaveOutcome::Conflict);
        }

        let mut polls = self.lock()?;
        match polls.get(&poll.id) {
            Some(stored) if stored.version == poll.version => {
                poll.version += 1;
                polls.insert(poll.id, poll.clone());
                Ok(SaveOutcome::Committed)
            }
            Some(_) => Ok(SaveOutcome::Conflict),
            None => Err(AppError::NotFound("Poll not found".to_string())),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
