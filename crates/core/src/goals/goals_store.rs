use log::{debug, warn};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::goals_constants::{ADD_FAILED_MESSAGE, EDIT_FAILED_MESSAGE, REFRESH_FAILED_MESSAGE};
use super::goals_model::{EditAck, FilterCriteria, Goal};
use super::goals_traits::{GoalGatewayTrait, GoalInteractionTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, ErrorSink};
use crate::identity::IdentitySource;

#[derive(Default)]
struct GoalStoreState {
    goals: Vec<Goal>,
    filtered: Vec<Goal>,
    criteria: FilterCriteria,
    highlighted_id: String,
}

/// Client-side copy of the active user's goals.
///
/// The local collection only ever changes through a successful [`refresh`],
/// which replaces it wholesale. `add_goal` and `edit_goal` go to the gateway
/// and then refresh, so the collection always reflects gateway-confirmed
/// state.
///
/// Once started, `refresh`, `add_goal` and `edit_goal` run on their own task
/// and finish even if the caller drops the returned future. Locks are never
/// held across an `.await`. When refreshes overlap, the one that resolves
/// last wins, whichever was started first.
///
/// [`refresh`]: GoalStore::refresh
pub struct GoalStore {
    shared: Arc<StoreShared>,
}

struct StoreShared {
    gateway: Arc<dyn GoalGatewayTrait>,
    error_sink: Arc<dyn ErrorSink>,
    event_sink: Arc<dyn DomainEventSink>,
    user_id: String,
    state: RwLock<GoalStoreState>,
}

impl GoalStore {
    /// Creates a new GoalStore for the given user with an empty collection.
    pub fn new(
        gateway: Arc<dyn GoalGatewayTrait>,
        error_sink: Arc<dyn ErrorSink>,
        event_sink: Arc<dyn DomainEventSink>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            shared: Arc::new(StoreShared {
                gateway,
                error_sink,
                event_sink,
                user_id: user_id.into(),
                state: RwLock::new(GoalStoreState::default()),
            }),
        }
    }

    /// Creates a new GoalStore for whoever the identity source reports.
    pub fn from_identity(
        identity: &dyn IdentitySource,
        gateway: Arc<dyn GoalGatewayTrait>,
        error_sink: Arc<dyn ErrorSink>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Result<Self> {
        let user_id = identity.active_user_id().ok_or(Error::MissingIdentity)?;
        Ok(Self::new(gateway, error_sink, event_sink, user_id))
    }

    pub fn user_id(&self) -> &str {
        &self.shared.user_id
    }

    /// Full, unfiltered collection from the last successful refresh.
    pub fn goals(&self) -> Vec<Goal> {
        self.shared.read_state().goals.clone()
    }

    /// Collection filtered and sorted with the current criteria.
    pub fn filtered_goals(&self) -> Vec<Goal> {
        self.shared.read_state().filtered.clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.shared.read_state().criteria.clone()
    }

    /// Replaces the filter criteria and re-derives the filtered view.
    pub fn set_criteria(&self, criteria: FilterCriteria) -> Vec<Goal> {
        let mut state = self.shared.write_state();
        state.filtered = criteria.apply(&state.goals);
        state.criteria = criteria;
        state.filtered.clone()
    }

    /// Identifier of the most recently edited goal, empty if none.
    pub fn highlighted_id(&self) -> String {
        self.shared.read_state().highlighted_id.clone()
    }

    pub fn is_highlighted(&self, goal: &Goal) -> bool {
        let state = self.shared.read_state();
        !state.highlighted_id.is_empty() && state.highlighted_id == goal.id
    }

    /// Fetches the user's goals and replaces the local collection.
    ///
    /// On failure the collection is left untouched, the error is reported to
    /// the error sink and returned.
    pub async fn refresh(&self) -> Result<Vec<Goal>> {
        let shared = Arc::clone(&self.shared);
        run_detached(async move { shared.refresh().await }).await
    }

    /// Sends a new goal to the gateway, then refreshes.
    ///
    /// The candidate must not carry an identifier yet and must belong to the
    /// active user; otherwise the gateway is not called.
    pub async fn add_goal(&self, candidate: Goal) -> Result<Goal> {
        if candidate.is_persisted() {
            warn!("Refusing to add goal {}: already persisted", candidate.id);
            return Err(ValidationError::AlreadyPersisted(candidate.id).into());
        }
        self.shared.ensure_owned(&candidate)?;

        let shared = Arc::clone(&self.shared);
        run_detached(async move { shared.submit_new(candidate).await }).await
    }

    /// Sends an edited goal to the gateway, highlights it, then refreshes.
    ///
    /// The goal must carry the identifier of a goal in the local collection
    /// and belong to the active user; otherwise the gateway is not called.
    pub async fn edit_goal(&self, updated: Goal) -> Result<EditAck> {
        if !updated.is_persisted() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        self.shared.ensure_owned(&updated)?;
        let is_loaded = self
            .shared
            .read_state()
            .goals
            .iter()
            .any(|g| g.id == updated.id);
        if !is_loaded {
            warn!("Refusing to edit goal {}: not loaded", updated.id);
            return Err(ValidationError::UnknownGoal(updated.id).into());
        }

        let shared = Arc::clone(&self.shared);
        run_detached(async move { shared.submit_edit(updated).await }).await
    }

    /// Runs the creation interaction and adds the collected goal.
    ///
    /// Returns `Ok(None)` without touching the gateway when the user cancels.
    pub async fn create_goal_interactive(
        &self,
        interaction: &dyn GoalInteractionTrait,
    ) -> Result<Option<Goal>> {
        let Some(goal) = interaction.collect(Goal::blank(self.user_id())).await else {
            debug!("Goal creation cancelled");
            return Ok(None);
        };
        self.add_goal(goal).await.map(Some)
    }

    /// Runs the edit interaction seeded with `goal` and submits the result.
    ///
    /// Returns `Ok(None)` without touching the gateway when the user cancels.
    pub async fn edit_goal_interactive(
        &self,
        interaction: &dyn GoalInteractionTrait,
        goal: Goal,
    ) -> Result<Option<EditAck>> {
        let initial = Goal {
            user_id: self.user_id().to_string(),
            ..goal
        };
        let Some(edited) = interaction.collect(initial).await else {
            debug!("Goal edit cancelled");
            return Ok(None);
        };
        self.edit_goal(edited).await.map(Some)
    }
}

impl StoreShared {
    async fn refresh(&self) -> Result<Vec<Goal>> {
        debug!("Refreshing goals for user {}", self.user_id);

        let fetched = match self.gateway.get_goals(&self.user_id).await {
            Ok(goals) => goals,
            Err(err) => {
                self.error_sink.report(REFRESH_FAILED_MESSAGE, &err);
                return Err(err);
            }
        };

        let (owned, foreign): (Vec<Goal>, Vec<Goal>) = fetched
            .into_iter()
            .partition(|goal| goal.user_id == self.user_id);
        if !foreign.is_empty() {
            warn!(
                "Dropping {} goal(s) not owned by user {}",
                foreign.len(),
                self.user_id
            );
        }

        {
            let mut state = self.write_state();
            state.filtered = state.criteria.apply(&owned);
            state.goals = owned.clone();
        }

        self.event_sink
            .emit(DomainEvent::goals_refreshed(&self.user_id, owned.len()));
        Ok(owned)
    }

    async fn submit_new(&self, candidate: Goal) -> Result<Goal> {
        let persisted = match self.gateway.add_goal(candidate).await {
            Ok(goal) => goal,
            Err(err) => {
                self.error_sink.report(ADD_FAILED_MESSAGE, &err);
                return Err(err);
            }
        };
        debug!("Goal {} added", persisted.id);
        self.event_sink.emit(DomainEvent::goal_created(&persisted.id));

        // Refresh failures are reported by refresh itself.
        let _ = self.refresh().await;
        Ok(persisted)
    }

    async fn submit_edit(&self, updated: Goal) -> Result<EditAck> {
        let ack = match self.gateway.edit_goal(updated).await {
            Ok(ack) => ack,
            Err(err) => {
                self.error_sink.report(EDIT_FAILED_MESSAGE, &err);
                return Err(err);
            }
        };
        debug!("Goal {} edited", ack.oid);
        self.write_state().highlighted_id = ack.oid.clone();
        self.event_sink.emit(DomainEvent::goal_updated(&ack.oid));

        let _ = self.refresh().await;
        Ok(ack)
    }

    fn ensure_owned(&self, goal: &Goal) -> Result<()> {
        if goal.user_id != self.user_id {
            return Err(ValidationError::UserMismatch {
                expected: self.user_id.clone(),
                actual: goal.user_id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, GoalStoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, GoalStoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs `operation` on its own task so that dropping the caller's future does
/// not abandon it halfway.
async fn run_detached<T, F>(operation: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(operation)
        .await
        .map_err(|err| Error::Unexpected(err.to_string()))?
}
