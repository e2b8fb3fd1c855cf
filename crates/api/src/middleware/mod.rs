//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a Bearer session token.

pub mod auth;
