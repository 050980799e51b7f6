//! Request guards.
//!
//! - [`auth::require_auth`] -- Route layer for everything behind a login.
//! - [`auth::AuthUser`] -- The caller's account, for handlers.

pub mod auth;
