//! Client-side data access and view state for ThoughtCache.
//!
//! - [`http::HttpClient`] talks to the REST API.
//! - [`session::Session`] owns the API handle, the theme controller and the
//!   notifier that views report through.
//! - [`views`] derive grouped and filtered lists and re-fetch after every
//!   mutation.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod theme;
pub mod types;
pub mod views;
