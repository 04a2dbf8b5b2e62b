use crate::models::actor_models::Actor;
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::{AppError, AppResult};

/// Mutations an actor can request against an existing poll.
#[derive(Debug, Clone, Copy)]
pub enum PollAction<'a> {
    AddOption,
    RemoveOption(&'a Choice),
    Vote,
    Close,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

impl Decision {
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AppError::Forbidden(reason.to_string())),
        }
    }
}

/// The single authorization table for poll mutations. Voting is not a
/// structural change, so the open flag only gates option management.
pub fn authorize(actor: &Actor, poll: &Poll, action: PollAction<'_>) -> Decision {
    let is_creator = actor.id == poll.creator_id;

    match action {
        PollAction::Vote => Decision::Allow,
        PollAction::AddOption => {
            if poll.is_open || is_creator {
                Decision::Allow
            } else {
                Decision::Deny("Only the creator may add options to a closed poll")
            }
        }
        PollAction::RemoveOption(choice) => {
            if is_creator || actor.is_admin() || actor.id == choice.submitted_by {
                Decision::Allow
            } else {
                Decision::Deny("Only the creator, an admin, or the option submitter may remove an option")
            }
        }
        PollAction::Close => {
            if is_creator {
                Decision::Allow
            } else {
                Decision::Deny("Only the creator may close a poll")
            }
        }
        PollAction::Delete => {
            if is_creator || actor.is_admin() {
                Decision::Allow
            } else {
                Decision::Deny("Only the creator or an admin may delete a poll")
            }
        }
    }
}
