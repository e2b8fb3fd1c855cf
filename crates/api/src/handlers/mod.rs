pub mod auth;
pub mod classify;
pub mod readings;
