use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::controllers::poll_controllers::{
    add_option, cast_vote, close_poll, create_poll, delete_poll, get_poll, remove_option,
    retract_vote,
};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/create", post(create_poll::create_poll))
        .route(
            "/:pollId",
            get(get_poll::get_poll).delete(delete_poll::delete_poll),
        )
        .route("/:pollId/vote", post(cast_vote::cast_vote))
        .route("/:pollId/vote/:optionId", delete(retract_vote::retract_vote))
        .route("/:pollId/option", post(add_option::add_option))
        .route("/:pollId/option/:optionId", delete(remove_option::remove_option))
        .route("/:pollId/close", post(close_poll::close_poll))
        .route_layer(middleware::from_fn(jwt_auth))
        .with_state(state)
}
