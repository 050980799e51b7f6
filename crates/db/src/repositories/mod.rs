//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod item_repo;
pub mod profile_repo;
pub mod tag_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use profile_repo::ProfileRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
