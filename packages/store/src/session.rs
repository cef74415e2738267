//! # Session state — cached identity and latest job results
//!
//! [`Session`] is the single accessor for client-side state. It sits on top of
//! two [`KeyValueStore`]s, one long-lived (`local`) and one tab-scoped
//! (`session`), and stores two JSON values:
//!
//! | Key | Value | Store |
//! |-----|-------|-------|
//! | `user` | [`User`] | depends on [`PersistencePolicy`] |
//! | `jobResults` | `Vec<`[`Job`]`>` | local |
//!
//! ## Persistence policy
//!
//! With [`PersistencePolicy::Mirrored`] the user is written to both stores no
//! matter what "remember me" says. Reads check the session store first and then
//! the local store, so an unremembered login is still visible to other tabs.
//! [`PersistencePolicy::RememberMe`] keeps unremembered logins in the session
//! store only.
//!
//! Invalidation is [`Session::clear`], called on logout and on any 401.

use serde::{Deserialize, Serialize};

use crate::models::{Job, User};
use crate::storage::KeyValueStore;

pub const USER_KEY: &str = "user";
pub const JOB_RESULTS_KEY: &str = "jobResults";

/// How long a login is persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistencePolicy {
    /// Always write to both stores.
    #[default]
    Mirrored,
    /// Only remembered logins reach the local store.
    RememberMe,
}

/// Read/write/clear access to the cached session identity.
#[derive(Clone, Debug)]
pub struct Session<S: KeyValueStore> {
    local: S,
    session: S,
    policy: PersistencePolicy,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(local: S, session: S, policy: PersistencePolicy) -> Self {
        Self {
            local,
            session,
            policy,
        }
    }

    /// Whether a user identity is cached.
    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// The cached user, session store first.
    pub fn current_user(&self) -> Option<User> {
        read_json(&self.session, USER_KEY).or_else(|| read_json(&self.local, USER_KEY))
    }

    /// Cache the user after a successful login or signup.
    pub fn store_user(&self, user: &User, remember: bool) {
        let Some(json) = to_json(user) else {
            return;
        };
        self.session.set(USER_KEY, &json);
        match self.policy {
            PersistencePolicy::Mirrored => self.local.set(USER_KEY, &json),
            PersistencePolicy::RememberMe if remember => self.local.set(USER_KEY, &json),
            PersistencePolicy::RememberMe => self.local.remove(USER_KEY),
        }
    }

    /// Rewrite the cached user in whichever stores already hold it.
    ///
    /// Returns the updated user, or `None` when nobody is logged in.
    pub fn update_user(&self, update: impl FnOnce(&mut User)) -> Option<User> {
        let mut user = self.current_user()?;
        update(&mut user);
        let json = to_json(&user)?;
        for store in [&self.session, &self.local] {
            if store.get(USER_KEY).is_some() {
                store.set(USER_KEY, &json);
            }
        }
        Some(user)
    }

    /// The most recent recommendation results; empty if none or unreadable.
    pub fn job_results(&self) -> Vec<Job> {
        read_json(&self.local, JOB_RESULTS_KEY).unwrap_or_default()
    }

    /// Replace the cached recommendation results.
    pub fn store_jobs(&self, jobs: &[Job]) {
        if let Some(json) = to_json(&jobs) {
            self.local.set(JOB_RESULTS_KEY, &json);
        }
    }

    /// Forget the user and the cached results.
    pub fn clear(&self) {
        for store in [&self.session, &self.local] {
            store.remove(USER_KEY);
            store.remove(JOB_RESULTS_KEY);
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unreadable {key} in storage: {e}");
            None
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .map_err(|e| tracing::error!("Failed to serialize session value: {e}"))
        .ok()
}
