//! JSON file storage for goals.

mod model;
mod repository;

pub use model::{GoalRecord, GoalsFile, GOALS_FILE_VERSION};
pub use repository::JsonGoalGateway;
