//! Authentication primitives.
//!
//! - [`google`] -- Google OAuth authorization-code flow.
//! - [`jwt`] -- Session and OAuth `state` tokens.

pub mod google;
pub mod jwt;
