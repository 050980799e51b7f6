//! Domain primitives shared by the ThoughtCache server and client crates.
//!
//! Nothing in here touches the network or the database.

pub mod error;
pub mod fields;
pub mod items;
pub mod sharing;
pub mod tags;
pub mod theme;
pub mod types;
