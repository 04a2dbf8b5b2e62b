use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::json;

use crate::models::actor_models::Actor;
use crate::services::commands::parse_poll_id;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<serde_json::Value>> {
    let poll_id = parse_poll_id(&poll_id)?;
    state.polls.delete_poll(poll_id, &actor).await?;
    Ok(Json(json!({ "deleted": true })))
}
