use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::actor_models::Actor;
use crate::services::commands::VoteCommand;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn retract_vote(
    Path((poll_id, option_id)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<PollResponse>> {
    let cmd = VoteCommand::new(&poll_id, &option_id)?;
    let poll = state.polls.retract_vote(cmd, &actor).await?;
    Ok(Json(poll.into()))
}
