pub mod actor_models;
pub mod poll_models;
