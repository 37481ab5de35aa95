//! Row structs for the `votes` and `app_meta` tables.
//!
//! Each struct derives `FromRow` so repositories can use `query_as`.

pub mod meta;
pub mod vote;
