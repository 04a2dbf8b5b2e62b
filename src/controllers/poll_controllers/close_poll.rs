use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::actor_models::Actor;
use crate::services::commands::parse_poll_id;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn close_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<PollResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;
    let poll = state.polls.close_poll(poll_id, &actor).await?;
    Ok(Json(poll.into()))
}
