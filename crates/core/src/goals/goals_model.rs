//! Goals domain models.

use serde::{Deserialize, Serialize};

use super::goals_constants::{DEFAULT_CATEGORY, STATUS_COMPLETE, STATUS_INCOMPLETE};
use crate::utils::time_utils::goal_date_string;

/// Domain model representing a goal
///
/// An empty `id` marks a goal that has not been persisted by the gateway yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub name: String,
    /// Human-readable attribution, distinct from `user_id`.
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub status: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Which of the two goal dates to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalDateField {
    Start,
    End,
}

impl Goal {
    /// Blank goal used to seed the creation interaction.
    pub fn blank(user_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            name: String::new(),
            owner: String::new(),
            body: String::new(),
            category: default_category(),
            start_date: String::new(),
            end_date: String::new(),
            frequency: String::new(),
            status: false,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Renders one of the goal dates as `Tue Jan 10 2023` (or `Invalid Date`).
    pub fn date_string(&self, field: GoalDateField) -> String {
        match field {
            GoalDateField::Start => goal_date_string(&self.start_date),
            GoalDateField::End => goal_date_string(&self.end_date),
        }
    }

    pub fn status_label(&self) -> &'static str {
        status_label(self.status)
    }
}

/// Display label for a completion status.
pub fn status_label(status: bool) -> &'static str {
    if status {
        STATUS_COMPLETE
    } else {
        STATUS_INCOMPLETE
    }
}

/// Acknowledgment returned by the gateway after an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditAck {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl EditAck {
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

/// Caller-supplied substring queries used to derive a display subset.
///
/// `None` skips a filter entirely; an empty string matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub status: Option<String>,
    /// Free-text query matched against name, category and frequency.
    pub text: Option<String>,
}

impl FilterCriteria {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn by_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn by_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Applies the criteria to a goal collection.
    ///
    /// A free-text query selects the combined name/category/frequency filter;
    /// otherwise the name filter is used.
    pub fn apply(&self, goals: &[Goal]) -> Vec<Goal> {
        match &self.text {
            Some(text) => {
                super::super_filter_goals(goals, Some(text.as_str()), self.status.as_deref())
            }
            None => super::filter_goals(goals, self.name.as_deref(), self.status.as_deref()),
        }
    }
}
