pub mod commands;
pub mod poll_service;
