use axum::{
    extract::{Extension, State},
    Json,
};

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::models::actor_models::Actor;
use crate::services::commands::CreatePollCommand;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<Json<PollResponse>> {
    let cmd = CreatePollCommand::new(payload.options, payload.is_multi_select)?;
    let poll = state.polls.create_poll(cmd, &actor).await?;
    Ok(Json(poll.into()))
}
