pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::poll_models::Poll;
use crate::utils::error::AppResult;

/// Result of an optimistic save. A conflict means another writer committed
/// between our read and write; the caller re-reads and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Committed,
    Conflict,
}

/// Abstracts poll persistence so the service can be driven against MongoDB
/// in production and an in-memory store in tests.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn insert(&self, poll: &Poll) -> AppResult<()>;

    async fn find(&self, id: ObjectId) -> AppResult<Option<Poll>>;

    /// Compare-and-swap write keyed on the poll's version. On commit the
    /// version in `poll` is bumped to the stored value.
    async fn save(&self, poll: &mut Poll) -> AppResult<SaveOutcome>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}
