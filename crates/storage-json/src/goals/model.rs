//! File models for goals.

use goaltrack_core::goals::Goal;
use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const GOALS_FILE_VERSION: u32 = 1;

/// On-disk envelope holding every user's goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsFile {
    pub version: u32,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
}

impl Default for GoalsFile {
    fn default() -> Self {
        Self {
            version: GOALS_FILE_VERSION,
            goals: Vec::new(),
        }
    }
}

/// Stored goal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub owner: String,
    pub body: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
    pub frequency: String,
    pub status: bool,
}

// Conversion to domain models
impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            owner: record.owner,
            body: record.body,
            category: record.category,
            start_date: record.start_date,
            end_date: record.end_date,
            frequency: record.frequency,
            status: record.status,
        }
    }
}

impl From<Goal> for GoalRecord {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            owner: domain.owner,
            body: domain.body,
            category: domain.category,
            start_date: domain.start_date,
            end_date: domain.end_date,
            frequency: domain.frequency,
            status: domain.status,
        }
    }
}
