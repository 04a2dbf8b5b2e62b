use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::{AddOptionRequest, PollResponse};
use crate::models::actor_models::Actor;
use crate::services::commands::AddOptionCommand;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn add_option(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<AddOptionRequest>,
) -> AppResult<Json<PollResponse>> {
    let cmd = AddOptionCommand::new(&poll_id, &payload.text)?;
    let poll = state.polls.add_option(cmd, &actor).await?;
    Ok(Json(poll.into()))
}
