//! Goal gateway and interaction traits.
//!
//! These traits define the contracts of the store's collaborators without any
//! transport-specific types, allowing for different gateway implementations.

use async_trait::async_trait;

use super::goals_model::{EditAck, Goal};
use crate::errors::Result;

/// Trait defining the contract for the remote goal service.
///
/// Every call may fail asynchronously with a gateway error.
#[async_trait]
pub trait GoalGatewayTrait: Send + Sync {
    /// Lists every goal owned by the given user.
    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;

    /// Persists a new goal and returns it with its assigned identifier.
    async fn add_goal(&self, goal: Goal) -> Result<Goal>;

    /// Replaces an existing goal.
    ///
    /// Returns an acknowledgment carrying the identifier of the edited goal.
    async fn edit_goal(&self, goal: Goal) -> Result<EditAck>;
}

/// Collects a completed goal from the user, starting from an initial value.
///
/// Returns `None` when the user cancels.
#[async_trait]
pub trait GoalInteractionTrait: Send + Sync {
    async fn collect(&self, initial: Goal) -> Option<Goal>;
}
