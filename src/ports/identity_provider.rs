//! Identity Provider Port - Source of the acting user.

use tokio::sync::watch;

use crate::domain::identity::UserIdentity;

/// Port exposing the current user synchronously and reactively.
///
/// Changes observed through `subscribe` are what drive automatic cycle
/// refreshes.
pub trait IdentityProvider: Send + Sync {
    /// The user as of now.
    fn current_user(&self) -> UserIdentity;

    /// A receiver that is notified whenever the user changes.
    fn subscribe(&self) -> watch::Receiver<UserIdentity>;
}
