//! Argument-backed goal interaction.
//!
//! Stands in for the create/edit dialogs: the fields given on the command
//! line are applied to the initial goal. With no fields the interaction
//! counts as cancelled.

use async_trait::async_trait;
use goaltrack_core::goals::{Goal, GoalInteractionTrait};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct GoalFields {
    /// Goal name
    #[arg(long)]
    pub name: Option<String>,
    /// Human-readable owner label
    #[arg(long)]
    pub owner: Option<String>,
    /// Free-text description
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Start date, e.g. 2023-01-10
    #[arg(long = "start")]
    pub start_date: Option<String>,
    /// End date, e.g. 2023-02-10
    #[arg(long = "end")]
    pub end_date: Option<String>,
    /// How often, e.g. Daily
    #[arg(long)]
    pub frequency: Option<String>,
    /// Completion status
    #[arg(long)]
    pub status: Option<bool>,
}

impl GoalFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.owner.is_none()
            && self.body.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.frequency.is_none()
            && self.status.is_none()
    }

    pub fn apply(&self, goal: Goal) -> Goal {
        let fields = self.clone();
        Goal {
            name: fields.name.unwrap_or(goal.name),
            owner: fields.owner.unwrap_or(goal.owner),
            body: fields.body.unwrap_or(goal.body),
            category: fields.category.unwrap_or(goal.category),
            start_date: fields.start_date.unwrap_or(goal.start_date),
            end_date: fields.end_date.unwrap_or(goal.end_date),
            frequency: fields.frequency.unwrap_or(goal.frequency),
            status: fields.status.unwrap_or(goal.status),
            ..goal
        }
    }
}

pub struct ArgsInteraction {
    fields: GoalFields,
}

impl ArgsInteraction {
    pub fn new(fields: GoalFields) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl GoalInteractionTrait for ArgsInteraction {
    async fn collect(&self, initial: Goal) -> Option<Goal> {
        if self.fields.is_empty() {
            return None;
        }
        Some(self.fields.apply(initial))
    }
}
