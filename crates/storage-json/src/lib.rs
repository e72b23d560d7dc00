//! JSON file storage implementation for Goaltrack.
//!
//! This crate implements the gateway trait defined in `goaltrack-core` on top
//! of a single JSON file. It stands in for the remote goal service in the CLI
//! and in integration tests:
//!
//! ```text
//!   core (GoalStore)
//!         │  GoalGatewayTrait
//!         ▼
//!   storage-json (this crate)
//!         │
//!         ▼
//!     goals.json
//! ```

pub mod errors;
pub mod goals;

pub use errors::{IntoCore, StorageError};
pub use goals::JsonGoalGateway;
