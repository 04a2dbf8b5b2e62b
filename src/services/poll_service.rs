use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::models::actor_models::Actor;
use crate::models::poll_models::Poll;
use crate::policy::{authorize, PollAction};
use crate::services::commands::{
    AddOptionCommand, CreatePollCommand, RemoveOptionCommand, VoteCommand,
};
use crate::store::{PollStore, SaveOutcome};
use crate::utils::error::{AppError, AppResult};

/// How many read-modify-write cycles to attempt before surfacing a
/// write conflict to the caller.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// The poll core. Every mutation is a policy check followed by a
/// read-modify-write against the store, retried on version conflicts so
/// that concurrent voters on the same poll never lose updates.
#[derive(Clone)]
pub struct PollService {
    store: Arc<dyn PollStore>,
}

impl PollService {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn create_poll(&self, cmd: CreatePollCommand, actor: &Actor) -> AppResult<Poll> {
        let poll = Poll::new(actor.id, cmd.options, cmd.is_multi_select);
        self.store.insert(&poll).await?;
        tracing::info!(poll_id = %poll.id, creator_id = %actor.id, "poll created");
        Ok(poll)
    }

    pub async fn get_poll(&self, poll_id: ObjectId) -> AppResult<Poll> {
        self.load(poll_id).await
    }

    pub async fn place_vote(&self, cmd: VoteCommand, actor: &Actor) -> AppResult<Poll> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut poll = self.load(cmd.poll_id).await?;
            authorize(actor, &poll, PollAction::Vote).into_result()?;

            if poll.choice(&cmd.option_id).is_none() {
                return Err(AppError::NotFound("Option not found for this poll".to_string()));
            }

            if !poll.place_vote(&cmd.option_id, actor.id) {
                // Repeat of an existing vote; nothing to write.
                return Ok(poll);
            }

            match self.commit(&mut poll).await? {
                SaveOutcome::Committed => {
                    tracing::debug!(poll_id = %poll.id, user_id = %actor.id, "vote placed");
                    return Ok(poll);
                }
                SaveOutcome::Conflict => self.note_conflict(cmd.poll_id, attempt),
            }
        }
        Err(concurrent_update())
    }

    pub async fn retract_vote(&self, cmd: VoteCommand, actor: &Actor) -> AppResult<Poll> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut poll = self.load(cmd.poll_id).await?;
            authorize(actor, &poll, PollAction::Vote).into_result()?;

            if poll.choice(&cmd.option_id).is_none() {
                return Err(AppError::NotFound("Option not found for this poll".to_string()));
            }

            if !poll.retract_vote(&cmd.option_id, &actor.id) {
                // No such vote; retraction is idempotent.
                return Ok(poll);
            }

            match self.commit(&mut poll).await? {
                SaveOutcome::Committed => {
                    tracing::debug!(poll_id = %poll.id, user_id = %actor.id, "vote retracted");
                    return Ok(poll);
                }
                SaveOutcome::Conflict => self.note_conflict(cmd.poll_id, attempt),
            }
        }
        Err(concurrent_update())
    }

    pub async fn add_option(&self, cmd: AddOptionCommand, actor: &Actor) -> AppResult<Poll> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut poll = self.load(cmd.poll_id).await?;
            authorize(actor, &poll, PollAction::AddOption).into_result()?;

            if poll.has_choice_text(&cmd.text) {
                return Err(AppError::ValidationError("An option with this text already exists".to_string()));
            }

            poll.add_choice(cmd.text.clone(), actor.id);

            match self.commit(&mut poll).await? {
                SaveOutcome::Committed => {
                    tracing::info!(poll_id = %poll.id, user_id = %actor.id, "option added");
                    return Ok(poll);
                }
                SaveOutcome::Conflict => self.note_conflict(cmd.poll_id, attempt),
            }
        }
        Err(concurrent_update())
    }

    pub async fn remove_option(&self, cmd: RemoveOptionCommand, actor: &Actor) -> AppResult<Poll> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut poll = self.load(cmd.poll_id).await?;

            let choice = poll
                .choice(&cmd.option_id)
                .ok_or_else(|| AppError::NotFound("Option not found for this poll".to_string()))?;
            authorize(actor, &poll, PollAction::RemoveOption(choice)).into_result()?;

            if poll.choices.len() == 1 {
                return Err(AppError::ValidationError(
                    "A poll must keep at least one option; delete the poll instead".to_string(),
                ));
            }

            poll.remove_choice(&cmd.option_id);

            match self.commit(&mut poll).await? {
                SaveOutcome::Committed => {
                    tracing::info!(poll_id = %poll.id, user_id = %actor.id, "option removed");
                    return Ok(poll);
                }
                SaveOutcome::Conflict => self.note_conflict(cmd.poll_id, attempt),
            }
        }
        Err(concurrent_update())
    }

    pub async fn close_poll(&self, poll_id: ObjectId, actor: &Actor) -> AppResult<Poll> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut poll = self.load(poll_id).await?;
            authorize(actor, &poll, PollAction::Close).into_result()?;

            if !poll.is_open {
                return Ok(poll);
            }
            poll.is_open = false;

            match self.commit(&mut poll).await? {
                SaveOutcome::Committed => {
                    tracing::info!(poll_id = %poll.id, "poll closed");
                    return Ok(poll);
                }
                SaveOutcome::Conflict => self.note_conflict(poll_id, attempt),
            }
        }
        Err(concurrent_update())
    }

    pub async fn delete_poll(&self, poll_id: ObjectId, actor: &Actor) -> AppResult<()> {
        let poll = self.load(poll_id).await?;
        authorize(actor, &poll, PollAction::Delete).into_result()?;

        if !self.store.delete(poll_id).await? {
            return Err(AppError::NotFound("Poll not found".to_string()));
        }
        tracing::info!(poll_id = %poll_id, user_id = %actor.id, "poll deleted");
        Ok(())
    }

    async fn load(&self, poll_id: ObjectId) -> AppResult<Poll> {
        self.store
            .find(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
    }

    async fn commit(&self, poll: &mut Poll) -> AppResult<SaveOutcome> {
        poll.updated_at = Utc::now();
        self.store.save(poll).await
    }

    fn note_conflict(&self, poll_id: ObjectId, attempt: usize) {
        tracing::warn!(
            poll_id = %poll_id,
            attempt,
            "concurrent poll update, retrying"
        );
    }
}

fn concurrent_update() -> AppError {
    AppError::Conflict("The poll was updated concurrently, please retry".to_string())
}
