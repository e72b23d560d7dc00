//! Goaltrack Core - goal models, filtering, the client-side store and traits.
//!
//! This crate contains the client-side logic for tracking a user's goals.
//! It is transport-agnostic and defines the gateway trait that is
//! implemented by the `storage-json` crate (or any remote client).

pub mod errors;
pub mod events;
pub mod goals;
pub mod identity;
pub mod utils;

// Re-export the goal surface
pub use goals::{filter_goals, super_filter_goals, FilterCriteria, Goal, GoalStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
