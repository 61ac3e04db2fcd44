//! Identity provider backed by a `tokio::sync::watch` channel.

use tokio::sync::watch;

use crate::domain::identity::UserIdentity;
use crate::ports::IdentityProvider;

/// Holds the acting user and notifies subscribers when it changes.
#[derive(Debug)]
pub struct WatchIdentityProvider {
    sender: watch::Sender<UserIdentity>,
}

impl WatchIdentityProvider {
    pub fn new(initial: UserIdentity) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Switch the acting user.
    ///
    /// Subscribers are only notified when the user actually differs from the
    /// current one. Returns whether a change was published.
    pub fn set_user(&self, user: UserIdentity) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == user {
                return false;
            }
            *current = user;
            true
        })
    }
}

impl Default for WatchIdentityProvider {
    fn default() -> Self {
        Self::new(UserIdentity::anonymous())
    }
}

impl IdentityProvider for WatchIdentityProvider {
    fn current_user(&self) -> UserIdentity {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<UserIdentity> {
        self.sender.subscribe()
    }
}
