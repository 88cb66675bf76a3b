pub mod auth;
pub mod conversation;
pub mod message;
pub mod read_state;
pub mod user;
