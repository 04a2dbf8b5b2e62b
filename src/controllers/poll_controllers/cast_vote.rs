use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::{CastVoteRequest, PollResponse};
use crate::models::actor_models::Actor;
use crate::services::commands::VoteCommand;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<PollResponse>> {
    let cmd = VoteCommand::new(&poll_id, &payload.option_id)?;
    let poll = state.polls.place_vote(cmd, &actor).await?;
    Ok(Json(poll.into()))
}
