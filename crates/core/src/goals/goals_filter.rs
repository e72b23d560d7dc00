//! Goal filtering and ordering.
//!
//! Both entry points are pure: they never mutate the source slice and always
//! return a fresh (possibly empty) vector, sorted newest start date first.

use std::cmp::Reverse;

use super::goals_model::Goal;
use crate::utils::time_utils::parse_goal_date;

/// Filters goals by name and status substrings, then sorts them.
///
/// `None` skips a filter; an empty query keeps every goal. Matching is
/// case-insensitive. Both filters compose with AND.
pub fn filter_goals(
    goals: &[Goal],
    name_query: Option<&str>,
    status_query: Option<&str>,
) -> Vec<Goal> {
    let name_query = name_query.map(str::to_lowercase);
    let status_query = status_query.map(str::to_lowercase);

    let mut filtered: Vec<Goal> = goals
        .iter()
        .filter(|goal| {
            name_query
                .as_deref()
                .is_none_or(|q| contains(&goal.name, q))
        })
        .filter(|goal| {
            status_query
                .as_deref()
                .is_none_or(|q| status_matches(goal, q))
        })
        .cloned()
        .collect();

    sort_by_start_date_desc(&mut filtered);
    filtered
}

/// Filters goals by status, then by a free-text query matched against name,
/// frequency or category (any of them), then sorts them.
pub fn super_filter_goals(
    goals: &[Goal],
    text_query: Option<&str>,
    status_query: Option<&str>,
) -> Vec<Goal> {
    let text_query = text_query.map(str::to_lowercase);
    let status_query = status_query.map(str::to_lowercase);

    let mut filtered: Vec<Goal> = goals
        .iter()
        .filter(|goal| {
            status_query
                .as_deref()
                .is_none_or(|q| status_matches(goal, q))
        })
        .filter(|goal| {
            text_query
                .as_deref()
                .is_none_or(|q| text_matches(goal, q))
        })
        .cloned()
        .collect();

    sort_by_start_date_desc(&mut filtered);
    filtered
}

/// Stable sort, newest start date first.
///
/// Unparseable start dates compare as equal to each other and sort after
/// every parseable date, so the order is total and repeatable.
pub fn sort_by_start_date_desc(goals: &mut [Goal]) {
    // None orders below Some, so reversing puts invalid dates last.
    goals.sort_by_cached_key(|goal| Reverse(parse_goal_date(&goal.start_date)));
}

fn status_matches(goal: &Goal, query: &str) -> bool {
    query.is_empty() || goal.status.to_string().contains(query)
}

fn text_matches(goal: &Goal, query: &str) -> bool {
    query.is_empty()
        || contains(&goal.name, query)
        || contains(&goal.frequency, query)
        || contains(&goal.category, query)
}

/// `query` must already be lower-cased.
fn contains(field: &str, query: &str) -> bool {
    query.is_empty() || field.to_lowercase().contains(query)
}
