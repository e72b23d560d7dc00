use std::sync::Arc;

use goaltrack_core::events::{DomainEvent, DomainEventSink, LogErrorSink};
use goaltrack_core::goals::{Goal, GoalDateField, GoalStore};
use goaltrack_core::identity::{EnvIdentity, IdentitySource, StaticIdentity};
use goaltrack_storage_json::JsonGoalGateway;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat, USER_ID_VAR};

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Forwards store events to the tracing subscriber.
pub struct TracingEventSink;

impl DomainEventSink for TracingEventSink {
    fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::GoalsRefreshed { user_id, count } => {
                tracing::info!(user_id = %user_id, count, "goals refreshed")
            }
            DomainEvent::GoalCreated { goal_id } => {
                tracing::info!(goal_id = %goal_id, "goal created")
            }
            DomainEvent::GoalUpdated { goal_id } => {
                tracing::info!(goal_id = %goal_id, "goal updated")
            }
        }
    }
}

pub fn build_store(config: &Config, user_override: Option<String>) -> anyhow::Result<GoalStore> {
    let identity: Box<dyn IdentitySource> = match user_override {
        Some(user_id) => Box::new(StaticIdentity::new(user_id)),
        None => Box::new(EnvIdentity::new(USER_ID_VAR)),
    };
    tracing::debug!("Goals file in use: {}", config.data_path.display());

    let store = GoalStore::from_identity(
        identity.as_ref(),
        Arc::new(JsonGoalGateway::new(&config.data_path)),
        Arc::new(LogErrorSink),
        Arc::new(TracingEventSink),
    )?;
    Ok(store)
}

/// One display line per goal, most recently edited goal marked with `*`.
pub fn render_goal(goal: &Goal, highlighted: bool) -> String {
    format!(
        "{} {:<36}  {:<24}  {:<10}  {:<8}  {} - {}  {}",
        if highlighted { "*" } else { " " },
        goal.id,
        goal.name,
        goal.category,
        goal.frequency,
        goal.date_string(GoalDateField::Start),
        goal.date_string(GoalDateField::End),
        goal.status_label(),
    )
}
