//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` (or an open transaction) as the first argument.

pub mod meta_repo;
pub mod vote_repo;

pub use meta_repo::MetaRepo;
pub use vote_repo::VoteRepo;
