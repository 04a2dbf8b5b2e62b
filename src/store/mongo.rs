use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::models::poll_models::Poll;
use crate::store::{PollStore, SaveOutcome};
use crate::utils::error::AppResult;

pub struct MongoPollStore {
    collection: Collection<Poll>,
}

impl MongoPollStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Poll>("polls"),
        }
    }
}

#[async_trait]
impl PollStore for MongoPollStore {
    async fn insert(&self, poll: &Poll) -> AppResult<()> {
        self.collection.insert_one(poll).await?;
        Ok(())
    }

    async fn find(&self, id: ObjectId) -> AppResult<Option<Poll>> {
        let poll = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(poll)
    }

    async fn save(&self, poll: &mut Poll) -> AppResult<SaveOutcome> {
        let read_version = poll.version;
        poll.version += 1;

        let result = self
            .collection
            .replace_one(doc! { "_id": poll.id, "version": read_version }, &*poll)
            .await;

        match result {
            Ok(outcome) if outcome.matched_count == 1 => Ok(SaveOutcome::Committed),
            Ok(_) => {
                poll.version = read_version;
                Ok(SaveOutcome::Conflict)
            }
            Err(err) => {
                poll.version = read_version;
                Err(err.into())
            }
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }
}
