use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::Poll;

#[derive(Deserialize, Debug)]
pub struct CreatePollRequest {
    pub options: Vec<String>,
    #[serde(default)]
    pub is_multi_select: bool,
}

#[derive(Deserialize)]
pub struct CastVoteRequest {
    pub option_id: String,
}

#[derive(Deserialize)]
pub struct AddOptionRequest {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChoiceResponse {
    pub id: String,
    pub text: String,
    pub votes: Vec<String>,
    pub submitted_by: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PollResponse {
    pub id: String,
    pub creator_id: String,
    pub options: Vec<ChoiceResponse>,
    pub is_multi_select: bool,
    pub is_open: bool,
    pub total_votes: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        let total_votes = poll.total_votes();
        Self {
            id: poll.id.to_hex(),
            creator_id: poll.creator_id.to_hex(),
            options: poll
                .choices
                .into_iter()
                .map(|choice| ChoiceResponse {
                    id: choice.id,
                    text: choice.text,
                    votes: choice.votes.iter().map(|voter| voter.to_hex()).collect(),
                    submitted_by: choice.submitted_by.to_hex(),
                })
                .collect(),
            is_multi_select: poll.is_multi_select,
            is_open: poll.is_open,
            total_votes,
            created_at: poll.created_at,
            updated_at: poll.updated_at,
        }
    }
}
