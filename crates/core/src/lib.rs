//! Domain rules for the dinner poll.
//!
//! Zero internal deps: vote validation, the reset policy decision table and
//! the roster merge live here so the db and api crates share one definition.

pub mod error;
pub mod reset;
pub mod roster;
pub mod types;
pub mod vote;
