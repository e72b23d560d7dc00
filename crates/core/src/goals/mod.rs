//! Goals module - domain models, filtering, the client-side store and traits.

mod goals_constants;
mod goals_filter;
mod goals_model;
mod goals_store;
mod goals_traits;

#[cfg(test)]
mod goals_store_tests;

pub use goals_constants::*;
pub use goals_filter::{filter_goals, sort_by_start_date_desc, super_filter_goals};
pub use goals_model::{status_label, EditAck, FilterCriteria, Goal, GoalDateField};
pub use goals_store::GoalStore;
pub use goals_traits::{GoalGatewayTrait, GoalInteractionTrait};
