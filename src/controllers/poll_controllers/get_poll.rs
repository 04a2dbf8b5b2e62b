use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::services::commands::parse_poll_id;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;
    let poll = state.polls.get_poll(poll_id).await?;
    Ok(Json(poll.into()))
}
