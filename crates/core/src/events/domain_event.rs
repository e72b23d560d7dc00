//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by the goal store after successful operations.
///
/// These events represent facts about confirmed goal changes. Presentation
/// adapters translate them into their own actions (re-rendering, highlighting).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The goal collection of a user was replaced by a fresh gateway copy.
    GoalsRefreshed { user_id: String, count: usize },

    /// A goal was persisted by the gateway.
    GoalCreated { goal_id: String },

    /// A goal edit was acknowledged by the gateway.
    GoalUpdated { goal_id: String },
}

impl DomainEvent {
    /// Creates a GoalsRefreshed event.
    pub fn goals_refreshed(user_id: impl Into<String>, count: usize) -> Self {
        Self::GoalsRefreshed {
            user_id: user_id.into(),
            count,
        }
    }

    /// Creates a GoalCreated event.
    pub fn goal_created(goal_id: impl Into<String>) -> Self {
        Self::GoalCreated {
            goal_id: goal_id.into(),
        }
    }

    /// Creates a GoalUpdated event.
    pub fn goal_updated(goal_id: impl Into<String>) -> Self {
        Self::GoalUpdated {
            goal_id: goal_id.into(),
        }
    }
}
