pub mod models;

pub mod add_option;
pub mod cast_vote;
pub mod close_poll;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod remove_option;
pub mod retract_vote;
