//! CycleContext - the consumer-facing handle on cycle selection state.
//!
//! A `CycleScope` owns one `CycleSyncController` for the lifetime of an
//! application scope. Mounting the scope starts the identity watcher, which
//! refreshes once immediately and again whenever the acting employee changes;
//! dropping the scope stops it.
//!
//! Futures run through [`CycleScope::provide`] can reach the context with
//! [`cycle_context`] (panics outside a scope) or [`try_cycle_context`]
//! (returns `None` outside a scope).

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use crate::domain::cycle::{CycleOption, CycleSnapshot, SyncStatus};
use crate::domain::foundation::EmployeeId;
use crate::domain::identity::UserIdentity;

use super::CycleSyncController;

tokio::task_local! {
    static CURRENT_CYCLE_CONTEXT: CycleContext;
}

/// Cheap, cloneable handle on the shared cycle state.
#[derive(Debug, Clone)]
pub struct CycleContext {
    controller: Arc<CycleSyncController>,
}

impl CycleContext {
    pub fn new(controller: Arc<CycleSyncController>) -> Self {
        Self { controller }
    }

    /// Full state as of now.
    pub fn snapshot(&self) -> CycleSnapshot {
        self.controller.snapshot()
    }

    /// Receiver woken only when the state actually changes.
    pub fn subscribe(&self) -> watch::Receiver<CycleSnapshot> {
        self.controller.subscribe()
    }

    pub fn cycles(&self) -> Vec<CycleOption> {
        self.snapshot().cycles
    }

    pub fn selected_cycle(&self) -> Option<CycleOption> {
        self.snapshot().selected_cycle
    }

    pub fn is_loading_cycles(&self) -> bool {
        self.snapshot().is_loading_cycles
    }

    pub fn last_sync(&self) -> SyncStatus {
        self.snapshot().last_sync
    }

    /// Sets and persists the selection.
    pub fn set_selected_cycle(&self, option: Option<CycleOption>) {
        self.controller.set_selected_cycle(option);
    }

    /// Forces a re-sync, e.g. after a cycle was created elsewhere.
    pub async fn refresh_cycles(&self) -> SyncStatus {
        self.controller.refresh().await
    }
}

/// Owns the cycle state for one application scope.
///
/// Dropping the scope unmounts it: the identity watcher and any refresh it
/// started are aborted, and an aborted refresh still clears
/// `is_loading_cycles`. Handles obtained from [`CycleScope::context`] keep
/// working afterwards but no longer follow identity changes.
#[derive(Debug)]
pub struct CycleScope {
    context: CycleContext,
    watcher: JoinHandle<()>,
}

impl CycleScope {
    /// Mounts the scope and starts following the controller's identity source.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(controller: CycleSyncController) -> Self {
        let controller = Arc::new(controller);
        let identity = controller.identity().subscribe();
        let watcher = tokio::spawn(follow_identity(controller.clone(), identity));

        Self {
            context: CycleContext::new(controller),
            watcher,
        }
    }

    pub fn context(&self) -> CycleContext {
        self.context.clone()
    }

    /// Runs `future` with this scope's context reachable through
    /// [`cycle_context`] and [`try_cycle_context`].
    pub async fn provide<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CYCLE_CONTEXT.scope(self.context(), future).await
    }

    /// Explicit unmount, equivalent to dropping the scope.
    pub fn unmount(self) {}
}

impl Drop for CycleScope {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

/// Returns the context of the enclosing [`CycleScope::provide`].
///
/// # Panics
///
/// Panics when called outside a provided scope. That is a wiring bug, not a
/// runtime condition; use [`try_cycle_context`] where the context is optional.
#[track_caller]
pub fn cycle_context() -> CycleContext {
    match try_cycle_context() {
        Some(context) => context,
        None => panic!("cycle_context() must be used within CycleScope::provide"),
    }
}

/// Returns the context of the enclosing scope, or `None` outside one.
pub fn try_cycle_context() -> Option<CycleContext> {
    CURRENT_CYCLE_CONTEXT.try_with(CycleContext::clone).ok()
}

/// Refreshes on mount and whenever the employee id changes.
///
/// Each refresh runs as its own task so a slow fetch never delays reacting to
/// the next change; overlapping refreshes settle last-write-wins.
async fn follow_identity(
    controller: Arc<CycleSyncController>,
    mut identity: watch::Receiver<UserIdentity>,
) {
    let mut in_flight = JoinSet::new();
    let mut current = employee_of(&mut identity);

    spawn_refresh(&mut in_flight, &controller, current.as_ref());

    loop {
        tokio::select! {
            changed = identity.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = employee_of(&mut identity);
                if next != current {
                    current = next;
                    spawn_refresh(&mut in_flight, &controller, current.as_ref());
                }
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    // Identity source closed: let outstanding refreshes settle.
    while in_flight.join_next().await.is_some() {}
}

fn employee_of(identity: &mut watch::Receiver<UserIdentity>) -> Option<EmployeeId> {
    identity.borrow_and_update().employee_id.clone()
}

fn spawn_refresh(
    in_flight: &mut JoinSet<()>,
    controller: &Arc<CycleSyncController>,
    employee_id: Option<&EmployeeId>,
) {
    match employee_id {
        Some(id) => tracing::debug!(employee_id = %id, "Refreshing cycles for employee"),
        None => tracing::debug!("Refreshing cycles without employee identity"),
    }
    let controller = controller.clone();
    in_flight.spawn(async move {
        controller.refresh().await;
    });
}
