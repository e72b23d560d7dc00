#[cfg(test)]
mod tests {
    use crate::errors::{Error, GatewayError, Result, ValidationError};
    use crate::events::{DomainEvent, MockDomainEventSink, MockErrorSink};
    use crate::goals::{
        EditAck, FilterCriteria, Goal, GoalGatewayTrait, GoalInteractionTrait, GoalStore,
        ADD_FAILED_MESSAGE, EDIT_FAILED_MESSAGE, REFRESH_FAILED_MESSAGE,
    };
    use crate::identity::StaticIdentity;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const USER: &str = "user-1";

    // --- Mock gateway ---
    #[derive(Default)]
    struct MockGateway {
        remote: Mutex<Vec<Goal>>,
        get_delays: Mutex<VecDeque<Duration>>,
        add_delay: Mutex<Option<Duration>>,
        edit_delay: Mutex<Option<Duration>>,
        fail_get: AtomicBool,
        fail_add: AtomicBool,
        fail_edit: AtomicBool,
        next_id: AtomicUsize,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockGateway {
        fn with_goals(goals: Vec<Goal>) -> Arc<Self> {
            let gateway = Self::default();
            *gateway.remote.lock().unwrap() = goals;
            Arc::new(gateway)
        }

        fn push_remote(&self, goal: Goal) {
            self.remote.lock().unwrap().push(goal);
        }

        fn delay_next_get(&self, delay: Duration) {
            self.get_delays.lock().unwrap().push_back(delay);
        }

        fn delay_next_add(&self, delay: Duration) {
            *self.add_delay.lock().unwrap() = Some(delay);
        }

        fn delay_next_edit(&self, delay: Duration) {
            *self.edit_delay.lock().unwrap() = Some(delay);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn unreachable() -> Error {
            Error::Gateway(GatewayError::Unreachable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl GoalGatewayTrait for MockGateway {
        async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
            self.calls.lock().unwrap().push("get_goals");
            // Snapshot before suspending so overlapping calls see different data.
            let snapshot: Vec<Goal> = self
                .remote
                .lock()
                .unwrap()
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect();
            let delay = self.get_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(Self::unreachable());
            }
            Ok(snapshot)
        }

        async fn add_goal(&self, goal: Goal) -> Result<Goal> {
            self.calls.lock().unwrap().push("add_goal");
            let delay = self.add_delay.lock().unwrap().take();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_add.load(Ordering::SeqCst) {
                return Err(Self::unreachable());
            }
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let persisted = Goal {
                id: format!("new-{}", n),
                ..goal
            };
            self.push_remote(persisted.clone());
            Ok(persisted)
        }

        async fn edit_goal(&self, goal: Goal) -> Result<EditAck> {
            self.calls.lock().unwrap().push("edit_goal");
            let delay = self.edit_delay.lock().unwrap().take();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_edit.load(Ordering::SeqCst) {
                return Err(Self::unreachable());
            }
            let mut remote = self.remote.lock().unwrap();
            let slot = remote
                .iter_mut()
                .find(|g| g.id == goal.id)
                .ok_or_else(|| Error::Gateway(GatewayError::NotFound(goal.id.clone())))?;
            let ack = EditAck::new(goal.id.clone());
            *slot = goal;
            Ok(ack)
        }
    }

    // --- Mock interaction ---
    type Responder = Box<dyn Fn(Goal) -> Option<Goal> + Send + Sync>;

    struct ScriptedInteraction {
        respond: Responder,
        seen: Mutex<Vec<Goal>>,
    }

    impl ScriptedInteraction {
        fn new(respond: impl Fn(Goal) -> Option<Goal> + Send + Sync + 'static) -> Self {
            Self {
                respond: Box::new(respond),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn cancelling() -> Self {
            Self::new(|_| None)
        }
    }

    #[async_trait]
    impl GoalInteractionTrait for ScriptedInteraction {
        async fn collect(&self, initial: Goal) -> Option<Goal> {
            self.seen.lock().unwrap().push(initial.clone());
            (self.respond)(initial)
        }
    }

    // --- Helpers ---
    fn goal(id: &str, name: &str, start_date: &str, status: bool) -> Goal {
        Goal {
            id: id.to_string(),
            name: name.to_string(),
            start_date: start_date.to_string(),
            status,
            ..Goal::blank(USER)
        }
    }

    fn sample() -> Vec<Goal> {
        vec![
            goal("g1", "Run 5k", "2023-01-10", true),
            goal("g2", "Read book", "2023-03-01", false),
        ]
    }

    struct Harness {
        gateway: Arc<MockGateway>,
        errors: MockErrorSink,
        events: MockDomainEventSink,
        store: GoalStore,
    }

    fn harness(goals: Vec<Goal>) -> Harness {
        let gateway = MockGateway::with_goals(goals);
        let errors = MockErrorSink::new();
        let events = MockDomainEventSink::new();
        let store = GoalStore::new(
            gateway.clone(),
            Arc::new(errors.clone()),
            Arc::new(events.clone()),
            USER,
        );
        Harness {
            gateway,
            errors,
            events,
            store,
        }
    }

    // =========================================================================
    // refresh
    // =========================================================================

    #[tokio::test]
    async fn test_refresh_replaces_collection() {
        let h = harness(sample());
        assert!(h.store.goals().is_empty());

        let fetched = h.store.refresh().await.unwrap();

        assert_eq!(fetched, sample());
        assert_eq!(h.store.goals(), sample());
        assert_eq!(
            h.events.events(),
            vec![DomainEvent::goals_refreshed(USER, 2)]
        );
        assert!(h.errors.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale_not_merged() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();

        *h.gateway.remote.lock().unwrap() = vec![goal("g3", "Swim", "2023-04-01", false)];
        h.store.refresh().await.unwrap();

        let ids: Vec<String> = h.store.goals().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["g3"]);
    }

    #[tokio::test]
    async fn test_refresh_failure_preserves_state() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        let before = h.store.goals();
        let filtered_before = h.store.filtered_goals();

        h.gateway.push_remote(goal("g3", "Swim", "2023-04-01", false));
        h.gateway.fail_get.store(true, Ordering::SeqCst);
        let result = h.store.refresh().await;

        assert!(matches!(result, Err(Error::Gateway(GatewayError::Unreachable(_)))));
        assert_eq!(h.store.goals(), before);
        assert_eq!(h.store.filtered_goals(), filtered_before);

        let reports = h.errors.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, REFRESH_FAILED_MESSAGE);
        assert!(reports[0].error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_refresh_rederives_filtered_view() {
        let h = harness(sample());
        h.store.set_criteria(FilterCriteria::by_status("true"));

        h.store.refresh().await.unwrap();
        let names: Vec<String> = h.store.filtered_goals().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Run 5k"]);

        let all = h.store.set_criteria(FilterCriteria::default());
        let names: Vec<String> = all.into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Read book", "Run 5k"]);
        assert_eq!(h.store.criteria(), FilterCriteria::default());
    }

    // Gateway that returns whatever it holds, regardless of the requested user.
    struct LeakyGateway(Vec<Goal>);

    #[async_trait]
    impl GoalGatewayTrait for LeakyGateway {
        async fn get_goals(&self, _user_id: &str) -> Result<Vec<Goal>> {
            Ok(self.0.clone())
        }

        async fn add_goal(&self, _goal: Goal) -> Result<Goal> {
            unimplemented!()
        }

        async fn edit_goal(&self, _goal: Goal) -> Result<EditAck> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_refresh_drops_goals_of_other_users() {
        let mut goals = sample();
        goals.push(Goal {
            user_id: "someone-else".to_string(),
            ..goal("x1", "Not mine", "2023-05-01", false)
        });
        let store = GoalStore::new(
            Arc::new(LeakyGateway(goals)),
            Arc::new(MockErrorSink::new()),
            Arc::new(MockDomainEventSink::new()),
            USER,
        );

        let fetched = store.refresh().await.unwrap();

        assert_eq!(fetched, sample());
        assert!(store.goals().iter().all(|g| g.user_id == USER));
    }

    #[tokio::test]
    async fn test_panicking_gateway_surfaces_as_unexpected_error() {
        let store = GoalStore::new(
            Arc::new(LeakyGateway(sample())),
            Arc::new(MockErrorSink::new()),
            Arc::new(MockDomainEventSink::new()),
            USER,
        );

        let result = store.add_goal(Goal::blank(USER)).await;

        assert!(matches!(result, Err(Error::Unexpected(_))));
        assert!(store.goals().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refreshes_last_resolved_wins() {
        let h = harness(sample());

        // First refresh sees the original data but resolves last.
        h.gateway.delay_next_get(Duration::from_millis(50));
        h.gateway.delay_next_get(Duration::from_millis(5));

        let (first, second) = tokio::join!(h.store.refresh(), async {
            // Let the first refresh reach the gateway before the data changes.
            tokio::time::sleep(Duration::from_millis(1)).await;
            h.gateway.push_remote(goal("g3", "Swim", "2023-04-01", false));
            h.store.refresh().await
        });

        assert_eq!(first.unwrap().len(), 2);
        assert_eq!(second.unwrap().len(), 3);
        // The stale response landed last and is what the store keeps.
        assert_eq!(h.store.goals().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completes_when_caller_stops_waiting() {
        let h = harness(sample());
        h.gateway.delay_next_get(Duration::from_millis(50));

        let result = tokio::time::timeout(Duration::from_millis(10), h.store.refresh()).await;
        assert!(result.is_err());
        assert!(h.store.goals().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(h.store.goals(), sample());
        assert_eq!(
            h.events.events(),
            vec![DomainEvent::goals_refreshed(USER, 2)]
        );
    }

    // =========================================================================
    // add_goal
    // =========================================================================

    #[tokio::test]
    async fn test_add_goal_refreshes_after_success() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        h.events.clear();

        let candidate = Goal {
            name: "Swim".to_string(),
            start_date: "2023-06-01".to_string(),
            ..Goal::blank(USER)
        };
        let persisted = h.store.add_goal(candidate).await.unwrap();

        assert_eq!(persisted.id, "new-0");
        assert_eq!(h.gateway.calls(), vec!["get_goals", "add_goal", "get_goals"]);
        assert!(h.store.goals().iter().any(|g| g.id == "new-0"));
        assert_eq!(h.store.filtered_goals()[0].name, "Swim");
        assert_eq!(
            h.events.events(),
            vec![
                DomainEvent::goal_created("new-0"),
                DomainEvent::goals_refreshed(USER, 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_goal_rejects_persisted_candidate() {
        let h = harness(sample());

        let result = h.store.add_goal(goal("g9", "Already saved", "", false)).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::AlreadyPersisted(ref id))) if id == "g9"
        ));
        assert!(h.gateway.calls().is_empty());
        assert!(h.errors.is_empty());
    }

    #[tokio::test]
    async fn test_add_goal_rejects_foreign_user() {
        let h = harness(sample());

        let result = h.store.add_goal(Goal::blank("intruder")).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::UserMismatch { .. }))
        ));
        assert!(h.gateway.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_goal_completes_when_caller_stops_waiting() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        h.gateway.delay_next_add(Duration::from_millis(50));

        let candidate = Goal {
            name: "Swim".to_string(),
            ..Goal::blank(USER)
        };
        let result =
            tokio::time::timeout(Duration::from_millis(10), h.store.add_goal(candidate)).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(h.gateway.calls(), vec!["get_goals", "add_goal", "get_goals"]);
        assert!(h.store.goals().iter().any(|g| g.id == "new-0"));
        assert!(h
            .events
            .events()
            .contains(&DomainEvent::goal_created("new-0")));
    }

    #[tokio::test]
    async fn test_add_goal_failure_reports_and_keeps_state() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        let before = h.store.goals();
        h.gateway.fail_add.store(true, Ordering::SeqCst);

        let result = h.store.add_goal(Goal::blank(USER)).await;

        assert!(result.is_err());
        assert_eq!(h.store.goals(), before);
        // No refresh after a failed add.
        assert_eq!(h.gateway.calls(), vec!["get_goals", "add_goal"]);
        let reports = h.errors.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, ADD_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_add_goal_succeeds_even_if_follow_up_refresh_fails() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        let before = h.store.goals();
        h.gateway.fail_get.store(true, Ordering::SeqCst);

        let persisted = h.store.add_goal(Goal::blank(USER)).await.unwrap();

        assert!(persisted.is_persisted());
        assert_eq!(h.store.goals(), before);
        let reports = h.errors.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, REFRESH_FAILED_MESSAGE);
    }

    // =========================================================================
    // edit_goal
    // =========================================================================

    #[tokio::test]
    async fn test_edit_goal_highlights_and_refreshes() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        assert_eq!(h.store.highlighted_id(), "");

        let edited = Goal {
            status: true,
            ..goal("g2", "Read two books", "2023-03-01", false)
        };
        let ack = h.store.edit_goal(edited).await.unwrap();

        assert_eq!(ack, EditAck::new("g2"));
        assert_eq!(h.store.highlighted_id(), "g2");
        assert_eq!(h.gateway.calls(), vec!["get_goals", "edit_goal", "get_goals"]);

        let goals = h.store.goals();
        let reloaded = goals.iter().find(|g| g.id == "g2").unwrap();
        assert_eq!(reloaded.name, "Read two books");
        assert!(reloaded.status);
        assert!(h.store.is_highlighted(reloaded));
        assert!(!h.store.is_highlighted(&goals[0]));
    }

    #[tokio::test]
    async fn test_edit_goal_requires_identifier() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();

        let result = h.store.edit_goal(Goal::blank(USER)).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingIdentifier))
        ));
        assert_eq!(h.gateway.calls(), vec!["get_goals"]);
    }

    #[tokio::test]
    async fn test_edit_goal_rejects_foreign_user() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();

        let foreign = Goal {
            user_id: "intruder".to_string(),
            ..goal("g1", "Run 5k", "2023-01-10", true)
        };
        let result = h.store.edit_goal(foreign).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::UserMismatch { ref actual, .. }))
                if actual == "intruder"
        ));
        assert_eq!(h.gateway.calls(), vec!["get_goals"]);
        assert_eq!(h.store.highlighted_id(), "");
        assert!(h.errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_goal_completes_when_caller_stops_waiting() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        h.gateway.delay_next_edit(Duration::from_millis(50));

        let edited = goal("g1", "Run 10k", "2023-01-10", true);
        let result =
            tokio::time::timeout(Duration::from_millis(10), h.store.edit_goal(edited)).await;
        assert!(result.is_err());
        assert_eq!(h.store.highlighted_id(), "");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(h.store.highlighted_id(), "g1");
        assert_eq!(h.gateway.calls(), vec!["get_goals", "edit_goal", "get_goals"]);
        let goals = h.store.goals();
        let reloaded = goals.iter().find(|g| g.id == "g1").unwrap();
        assert_eq!(reloaded.name, "Run 10k");
    }

    #[tokio::test]
    async fn test_edit_goal_rejects_unknown_goal() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();

        let result = h.store.edit_goal(goal("ghost", "Ghost", "", false)).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::UnknownGoal(_)))
        ));
        assert_eq!(h.gateway.calls(), vec!["get_goals"]);
    }

    #[tokio::test]
    async fn test_edit_goal_failure_keeps_highlight_and_state() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        h.store
            .edit_goal(goal("g1", "Run 10k", "2023-01-10", true))
            .await
            .unwrap();
        let before = h.store.goals();

        h.gateway.fail_edit.store(true, Ordering::SeqCst);
        let result = h.store.edit_goal(goal("g2", "Changed", "", false)).await;

        assert!(result.is_err());
        assert_eq!(h.store.highlighted_id(), "g1");
        assert_eq!(h.store.goals(), before);
        let reports = h.errors.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, EDIT_FAILED_MESSAGE);
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    #[tokio::test]
    async fn test_cancelled_creation_is_a_no_op() {
        let h = harness(sample());
        let interaction = ScriptedInteraction::cancelling();

        let result = h.store.create_goal_interactive(&interaction).await.unwrap();

        assert!(result.is_none());
        assert!(h.gateway.calls().is_empty());
        assert!(h.errors.is_empty());

        let seen = interaction.seen.lock().unwrap();
        assert_eq!(seen[0], Goal::blank(USER));
    }

    #[tokio::test]
    async fn test_confirmed_creation_adds_goal() {
        let h = harness(Vec::new());
        let interaction = ScriptedInteraction::new(|initial| {
            Some(Goal {
                name: "Meditate".to_string(),
                frequency: "Daily".to_string(),
                ..initial
            })
        });

        let created = h
            .store
            .create_goal_interactive(&interaction)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.name, "Meditate");
        assert_eq!(created.category, "Other");
        assert_eq!(h.store.goals(), vec![created]);
    }

    #[tokio::test]
    async fn test_edit_interaction_is_seeded_with_active_user() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();
        let interaction = ScriptedInteraction::new(|initial| {
            Some(Goal {
                body: "Chapter a day".to_string(),
                ..initial
            })
        });

        let seed = Goal {
            user_id: String::new(),
            ..goal("g2", "Read book", "2023-03-01", false)
        };
        let ack = h
            .store
            .edit_goal_interactive(&interaction, seed)
            .await
            .unwrap();

        assert_eq!(ack, Some(EditAck::new("g2")));
        assert_eq!(interaction.seen.lock().unwrap()[0].user_id, USER);
        assert_eq!(h.store.highlighted_id(), "g2");
    }

    #[tokio::test]
    async fn test_cancelled_edit_is_a_no_op() {
        let h = harness(sample());
        h.store.refresh().await.unwrap();

        let result = h
            .store
            .edit_goal_interactive(&ScriptedInteraction::cancelling(), sample().remove(0))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(h.gateway.calls(), vec!["get_goals"]);
        assert_eq!(h.store.highlighted_id(), "");
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_from_identity_requires_user() {
        let result = GoalStore::from_identity(
            &StaticIdentity::unset(),
            MockGateway::with_goals(Vec::new()),
            Arc::new(MockErrorSink::new()),
            Arc::new(MockDomainEventSink::new()),
        );
        assert!(matches!(result, Err(Error::MissingIdentity)));

        let store = GoalStore::from_identity(
            &StaticIdentity::new("user-7"),
            MockGateway::with_goals(Vec::new()),
            Arc::new(MockErrorSink::new()),
            Arc::new(MockDomainEventSink::new()),
        )
        .unwrap();
        assert_eq!(store.user_id(), "user-7");
    }
}
