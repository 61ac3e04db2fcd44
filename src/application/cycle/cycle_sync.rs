//! CycleSyncController - keeps the selected cycle consistent with the cycle
//! list visible to the acting employee.
//!
//! The controller is the only writer of the selection. State is held in a
//! `watch` channel so consumers are woken only when the snapshot actually
//! changes.
//!
//! # Overlapping refreshes
//!
//! Refreshes are not serialized. When two overlap, whichever finishes last
//! determines the final state, and the first to finish already clears
//! `is_loading_cycles`. Callers that need strict ordering under rapid identity
//! changes must sequence refreshes themselves.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::cycle::{
    filter_by_membership, reconcile, CycleListEntry, CycleOption, CycleSnapshot, Reconciliation,
    SyncStatus,
};
use crate::domain::foundation::EmployeeId;
use crate::ports::{CycleLister, IdentityProvider};

use super::CycleStore;

/// Reconciles the collaborator's cycle list with the persisted selection.
pub struct CycleSyncController {
    lister: Arc<dyn CycleLister>,
    identity: Arc<dyn IdentityProvider>,
    store: CycleStore,
    state: watch::Sender<CycleSnapshot>,
}

impl CycleSyncController {
    /// Creates a controller whose selection is restored from `store`.
    ///
    /// The cycle list starts empty until the first `refresh`.
    pub fn new(
        lister: Arc<dyn CycleLister>,
        identity: Arc<dyn IdentityProvider>,
        store: CycleStore,
    ) -> Self {
        let (state, _) = watch::channel(CycleSnapshot::initial(store.read()));
        Self {
            lister,
            identity,
            store,
            state,
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> CycleSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CycleSnapshot> {
        self.state.subscribe()
    }

    /// The identity source this controller filters by.
    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    /// Fetches the cycle list and reconciles the selection against it.
    ///
    /// Never fails: a collaborator error leaves an empty list, keeps the
    /// current selection, and is reported through the returned status (also
    /// recorded as `last_sync`). If the future is dropped before it settles,
    /// `is_loading_cycles` is still cleared.
    pub async fn refresh(&self) -> SyncStatus {
        self.update(|state| state.is_loading_cycles = true);
        let _loading = LoadingGuard { controller: self };

        let fetched = self.lister.list_cycles().await;

        match fetched {
            Ok(entries) => {
                let user = self.identity.current_user();
                let cycles = visible_options(&entries, user.employee_id());

                // Re-read rather than trusting memory: storage may have been
                // changed by another writer since the last refresh.
                let outcome = reconcile(self.store.read().as_ref(), &cycles);
                self.persist(&outcome);

                let status = SyncStatus::Synced {
                    cycle_count: cycles.len(),
                };
                let selected = outcome.selected().cloned();
                self.update(|state| {
                    state.cycles = cycles;
                    state.selected_cycle = selected;
                    state.last_sync = status.clone();
                    state.is_loading_cycles = false;
                });
                status
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cycle list unavailable, treating as empty");
                let status = SyncStatus::FetchFailed {
                    reason: e.to_string(),
                };
                self.update(|state| {
                    state.cycles.clear();
                    state.last_sync = status.clone();
                    state.is_loading_cycles = false;
                });
                status
            }
        }
    }

    /// Sets and persists the selection without validating it against the
    /// current list. An unlisted value is corrected on the next refresh.
    pub fn set_selected_cycle(&self, option: Option<CycleOption>) {
        self.store.write(option.as_ref());
        match &option {
            Some(selected) => tracing::info!(cycle = %selected, "Cycle selected"),
            None => tracing::info!("Cycle selection cleared"),
        }
        self.update(|state| state.selected_cycle = option);
    }

    fn persist(&self, outcome: &Reconciliation) {
        match outcome {
            Reconciliation::Keep(selected) => {
                tracing::debug!(cycle = %selected, "Persisted cycle selection still valid");
            }
            Reconciliation::Replace {
                selected,
                superseded: Some(stale),
            } => {
                tracing::info!(stale = %stale, cycle = %selected, "Superseding stale cycle selection");
            }
            Reconciliation::Replace {
                selected,
                superseded: None,
            } => {
                tracing::info!(cycle = %selected, "Defaulting to first available cycle");
            }
            Reconciliation::Clear => {
                tracing::info!("No cycles available, clearing selection");
            }
        }

        if outcome.requires_write() {
            self.store.write(outcome.selected());
        }
    }

    /// Applies `apply` and notifies subscribers only if something changed.
    fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut CycleSnapshot),
    {
        self.state.send_if_modified(|state| {
            let before = state.clone();
            apply(state);
            *state != before
        });
    }
}

/// Clears `is_loading_cycles` when a refresh ends, including by cancellation.
struct LoadingGuard<'a> {
    controller: &'a CycleSyncController,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.controller.update(|state| state.is_loading_cycles = false);
    }
}

/// Membership-filtered, validated options in collaborator order.
fn visible_options(entries: &[CycleListEntry], employee_id: Option<&EmployeeId>) -> Vec<CycleOption> {
    filter_by_membership(entries, employee_id)
        .into_iter()
        .filter_map(|entry| match entry.to_option() {
            Ok(option) => Some(option),
            Err(e) => {
                tracing::warn!(id = %entry.id, error = %e, "Skipping malformed cycle entry");
                None
            }
        })
        .collect()
}

impl std::fmt::Debug for CycleSyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleSyncController")
            .field("store", &self.store)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cycle_api::InMemoryCycleLister;
    use crate::adapters::identity::WatchIdentityProvider;
    use crate::adapters::storage::InMemorySelectionStorage;
    use crate::application::cycle::SELECTED_CYCLE_KEY;
    use crate::domain::identity::UserIdentity;
    use crate::ports::CycleListError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    // ─────────────────────────────────────────────────────────────────────
    // Test Fixtures
    // ─────────────────────────────────────────────────────────────────────

    fn option(id: &str, name: &str) -> CycleOption {
        CycleOption::new(id, name).unwrap()
    }

    fn q1_q2() -> Vec<CycleListEntry> {
        vec![
            CycleListEntry::new("c1", "Q1"),
            CycleListEntry::new("c2", "Q2"),
        ]
    }

    struct Fixture {
        controller: CycleSyncController,
        lister: InMemoryCycleLister,
        storage: InMemorySelectionStorage,
    }

    fn fixture(
        entries: Vec<CycleListEntry>,
        storage: InMemorySelectionStorage,
        user: UserIdentity,
    ) -> Fixture {
        let lister = InMemoryCycleLister::new(entries);
        let controller = CycleSyncController::new(
            Arc::new(lister.clone()),
            Arc::new(WatchIdentityProvider::new(user)),
            CycleStore::new(Arc::new(storage.clone())),
        );
        Fixture {
            controller,
            lister,
            storage,
        }
    }

    fn persisted(storage: &InMemorySelectionStorage) -> Option<CycleOption> {
        storage
            .peek(SELECTED_CYCLE_KEY)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn seeded(option: &CycleOption) -> InMemorySelectionStorage {
        InMemorySelectionStorage::with_item(
            SELECTED_CYCLE_KEY,
            &serde_json::to_string(option).unwrap(),
        )
    }

    fn employee(id: &str) -> UserIdentity {
        UserIdentity::employee(EmployeeId::new(id).unwrap())
    }

    /// Lister whose calls each wait until the test releases them.
    #[derive(Default)]
    struct GatedLister {
        gates: Mutex<VecDeque<oneshot::Sender<Vec<CycleListEntry>>>>,
    }

    impl GatedLister {
        async fn wait_for_calls(&self, calls: usize) {
            while self.gates.lock().unwrap().len() < calls {
                tokio::task::yield_now().await;
            }
        }

        fn release_latest(&self, entries: Vec<CycleListEntry>) {
            let gate = self.gates.lock().unwrap().pop_back().unwrap();
            gate.send(entries).unwrap();
        }

        fn release_earliest(&self, entries: Vec<CycleListEntry>) {
            let gate = self.gates.lock().unwrap().pop_front().unwrap();
            gate.send(entries).unwrap();
        }
    }

    #[async_trait]
    impl CycleLister for GatedLister {
        async fn list_cycles(&self) -> Result<Vec<CycleListEntry>, CycleListError> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().push_back(tx);
            rx.await
                .map_err(|_| CycleListError::Unavailable("gate dropped".into()))
        }
    }

    fn gated_controller(
        lister: Arc<GatedLister>,
        storage: &InMemorySelectionStorage,
    ) -> Arc<CycleSyncController> {
        Arc::new(CycleSyncController::new(
            lister,
            Arc::new(WatchIdentityProvider::default()),
            CycleStore::new(Arc::new(storage.clone())),
        ))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Initial state
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn new_restores_selection_from_storage() {
        let f = fixture(q1_q2(), seeded(&option("c2", "Q2")), UserIdentity::anonymous());

        let snapshot = f.controller.snapshot();

        assert_eq!(snapshot.selected_cycle, Some(option("c2", "Q2")));
        assert!(snapshot.cycles.is_empty());
        assert!(!snapshot.is_loading_cycles);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reconciliation
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn matching_selection_is_kept_without_writes() {
        let f = fixture(q1_q2(), seeded(&option("c2", "Q2")), UserIdentity::anonymous());

        for _ in 0..3 {
            f.controller.refresh().await;
            assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c2", "Q2")));
        }

        assert_eq!(f.storage.write_count(), 0);
        assert_eq!(f.lister.call_count(), 3);
    }

    #[tokio::test]
    async fn repeated_refresh_writes_only_once() {
        let f = fixture(q1_q2(), InMemorySelectionStorage::new(), UserIdentity::anonymous());

        f.controller.refresh().await;
        f.controller.refresh().await;
        f.controller.refresh().await;

        assert_eq!(f.storage.write_count(), 1);
        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c1", "Q1")));
    }

    #[tokio::test]
    async fn falls_back_to_first_cycle() {
        let f = fixture(q1_q2(), InMemorySelectionStorage::new(), UserIdentity::anonymous());

        let status = f.controller.refresh().await;

        let snapshot = f.controller.snapshot();
        assert_eq!(status, SyncStatus::Synced { cycle_count: 2 });
        assert_eq!(snapshot.cycles, vec![option("c1", "Q1"), option("c2", "Q2")]);
        assert_eq!(snapshot.selected_cycle, Some(option("c1", "Q1")));
        assert_eq!(persisted(&f.storage), Some(option("c1", "Q1")));
        assert!(!snapshot.is_loading_cycles);
    }

    #[tokio::test]
    async fn stale_selection_is_superseded() {
        let f = fixture(
            vec![CycleListEntry::new("c1", "Q1")],
            seeded(&option("old", "Old")),
            UserIdentity::anonymous(),
        );

        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c1", "Q1")));
        assert_eq!(persisted(&f.storage), Some(option("c1", "Q1")));
    }

    #[tokio::test]
    async fn membership_filter_hides_foreign_cycles() {
        let f = fixture(
            vec![
                CycleListEntry::new("c1", "Q1").with_employees(["E2"]),
                CycleListEntry::new("c2", "Q2").with_employees(Vec::<String>::new()),
            ],
            InMemorySelectionStorage::new(),
            employee("E1"),
        );

        f.controller.refresh().await;

        let snapshot = f.controller.snapshot();
        assert_eq!(snapshot.cycles, vec![option("c2", "Q2")]);
        assert_eq!(snapshot.selected_cycle, Some(option("c2", "Q2")));
    }

    #[tokio::test]
    async fn empty_list_clears_selection_and_storage() {
        let f = fixture(Vec::new(), seeded(&option("c1", "Q1")), UserIdentity::anonymous());

        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().selected_cycle, None);
        assert_eq!(f.storage.peek(SELECTED_CYCLE_KEY), None);
    }

    #[tokio::test]
    async fn corrupt_storage_behaves_like_empty_storage() {
        let storage = InMemorySelectionStorage::with_item(SELECTED_CYCLE_KEY, "{{not json");
        let f = fixture(q1_q2(), storage, UserIdentity::anonymous());

        assert_eq!(f.controller.snapshot().selected_cycle, None);

        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c1", "Q1")));
        assert_eq!(persisted(&f.storage), Some(option("c1", "Q1")));
    }

    #[tokio::test]
    async fn fetch_failure_empties_list_and_keeps_selection() {
        let f = fixture(q1_q2(), seeded(&option("c1", "Q1")), UserIdentity::anonymous());
        f.controller.refresh().await;
        f.lister.fail_with(CycleListError::Unavailable("connection refused".into()));

        let status = f.controller.refresh().await;

        let snapshot = f.controller.snapshot();
        assert!(status.is_failure());
        assert!(snapshot.cycles.is_empty());
        assert!(!snapshot.is_loading_cycles);
        assert_eq!(snapshot.selected_cycle, Some(option("c1", "Q1")));
        assert_eq!(persisted(&f.storage), Some(option("c1", "Q1")));
        assert_eq!(snapshot.last_sync, status);
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped() {
        let f = fixture(
            vec![CycleListEntry::new("", "Nameless"), CycleListEntry::new("c2", "Q2")],
            InMemorySelectionStorage::new(),
            UserIdentity::anonymous(),
        );

        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().cycles, vec![option("c2", "Q2")]);
    }

    #[tokio::test]
    async fn whitespace_names_are_listed_and_kept() {
        let spaced = option("c1", " ");
        let f = fixture(
            vec![CycleListEntry::new("c1", " "), CycleListEntry::new("c2", "Q2")],
            seeded(&spaced),
            UserIdentity::anonymous(),
        );
        assert_eq!(f.controller.snapshot().selected_cycle, Some(spaced.clone()));

        f.controller.refresh().await;

        let snapshot = f.controller.snapshot();
        assert_eq!(snapshot.cycles, vec![spaced.clone(), option("c2", "Q2")]);
        assert_eq!(snapshot.selected_cycle, Some(spaced));
        assert_eq!(f.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn refresh_rereads_storage_changed_by_another_writer() {
        let f = fixture(q1_q2(), InMemorySelectionStorage::new(), UserIdentity::anonymous());
        f.controller.refresh().await;

        // Another tab/process picks Q2 directly in storage.
        CycleStore::new(Arc::new(f.storage.clone())).write(Some(&option("c2", "Q2")));
        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c2", "Q2")));
    }

    #[tokio::test]
    async fn unavailable_storage_does_not_break_refresh() {
        let storage = InMemorySelectionStorage::new();
        storage.set_unavailable(true);
        let f = fixture(q1_q2(), storage, UserIdentity::anonymous());

        f.controller.refresh().await;

        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c1", "Q1")));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Overlap and cancellation
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn overlapping_refreshes_settle_last_write_wins() {
        let lister = Arc::new(GatedLister::default());
        let storage = InMemorySelectionStorage::new();
        let controller = gated_controller(lister.clone(), &storage);
        let mut receiver = controller.subscribe();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.refresh().await }
        });
        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.refresh().await }
        });
        lister.wait_for_calls(2).await;

        lister.release_latest(vec![CycleListEntry::new("c2", "Q2")]);
        let settled = receiver
            .wait_for(|s| s.cycles == vec![option("c2", "Q2")])
            .await
            .unwrap()
            .clone();
        assert!(!settled.is_loading_cycles);
        assert_eq!(settled.selected_cycle, Some(option("c2", "Q2")));

        lister.release_earliest(vec![CycleListEntry::new("c1", "Q1")]);
        first.await.unwrap();
        second.await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.cycles, vec![option("c1", "Q1")]);
        assert_eq!(snapshot.selected_cycle, Some(option("c1", "Q1")));
        assert_eq!(persisted(&storage), Some(option("c1", "Q1")));
    }

    #[tokio::test]
    async fn dropped_refresh_clears_loading_flag() {
        let lister = Arc::new(GatedLister::default());
        let storage = InMemorySelectionStorage::new();
        let controller = gated_controller(lister, &storage);

        let outcome = tokio::time::timeout(Duration::from_millis(20), controller.refresh()).await;

        assert!(outcome.is_err());
        let snapshot = controller.snapshot();
        assert!(!snapshot.is_loading_cycles);
        assert_eq!(snapshot.last_sync, SyncStatus::NeverSynced);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Explicit selection
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn set_selected_cycle_persists_without_validation() {
        let f = fixture(q1_q2(), InMemorySelectionStorage::new(), UserIdentity::anonymous());
        f.controller.refresh().await;

        f.controller.set_selected_cycle(Some(option("zz", "Not listed")));

        assert_eq!(
            f.controller.snapshot().selected_cycle,
            Some(option("zz", "Not listed"))
        );
        assert_eq!(persisted(&f.storage), Some(option("zz", "Not listed")));

        f.controller.refresh().await;
        assert_eq!(f.controller.snapshot().selected_cycle, Some(option("c1", "Q1")));
    }

    #[test]
    fn set_selected_cycle_none_clears_storage() {
        let f = fixture(q1_q2(), seeded(&option("c1", "Q1")), UserIdentity::anonymous());

        f.controller.set_selected_cycle(None);

        assert_eq!(f.controller.snapshot().selected_cycle, None);
        assert_eq!(f.storage.peek(SELECTED_CYCLE_KEY), None);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Change notification
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn reselecting_current_cycle_does_not_notify_subscribers() {
        let f = fixture(q1_q2(), InMemorySelectionStorage::new(), UserIdentity::anonymous());
        f.controller.refresh().await;
        let mut receiver = f.controller.subscribe();
        receiver.borrow_and_update();

        f.controller.set_selected_cycle(Some(option("c1", "Q1")));

        assert!(!receiver.has_changed().unwrap());
    }
}
