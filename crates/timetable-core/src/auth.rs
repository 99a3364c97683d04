//! Local sign-in state and app settings.
//!
//! A single local profile: "logging in" records who is using the app, it
//! does not authenticate against anything. Register and login are the same
//! operation kept as separate entry points for the front end.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::snapshot::{self, AuthSnapshot};
use crate::storage::{StateStore, AUTH_STORE};

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Layout of the main schedule view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode '{other}' (expected grid or list)")),
        }
    }
}

/// Display preferences kept alongside the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub view_mode: ViewMode,
    pub show_motivation: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            view_mode: ViewMode::Grid,
            show_motivation: true,
        }
    }
}

/// Partial update for [`AppSettings`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub view_mode: Option<ViewMode>,
    pub show_motivation: Option<bool>,
}

/// In-memory auth state, the shape persisted to the "auth" blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub settings: AppSettings,
}

/// Owns the auth state and snapshots it after every mutation.
pub struct AuthStore {
    state: AuthState,
    store: Box<dyn StateStore>,
}

impl AuthStore {
    /// Load the auth blob from the store, starting signed out when the
    /// blob has never been written.
    pub fn load(store: Box<dyn StateStore>) -> Result<Self, StorageError> {
        let state = match store.load(AUTH_STORE)? {
            Some(bytes) => {
                let snap: AuthSnapshot = snapshot::decode(AUTH_STORE, &bytes)?;
                debug!(signed_in = snap.is_authenticated, "loaded auth state");
                AuthState {
                    user: snap.user,
                    is_authenticated: snap.is_authenticated,
                    settings: snap.settings,
                }
            }
            None => AuthState::default(),
        };
        Ok(AuthStore { state, store })
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn settings(&self) -> &AppSettings {
        &self.state.settings
    }

    /// Sign in as the given user.
    pub fn login(&mut self, name: impl Into<String>, email: impl Into<String>) -> &AuthState {
        self.state.user = Some(User {
            name: name.into(),
            email: email.into(),
            avatar: None,
        });
        self.state.is_authenticated = true;
        self.snapshot();
        &self.state
    }

    /// Create the local profile. Same effect as [`login`](Self::login);
    /// there are no credentials to check.
    pub fn register(&mut self, name: impl Into<String>, email: impl Into<String>) -> &AuthState {
        self.login(name, email)
    }

    /// Sign out, keeping settings in place.
    pub fn logout(&mut self) -> &AuthState {
        self.state.user = None;
        self.state.is_authenticated = false;
        self.snapshot();
        &self.state
    }

    /// Merge a settings patch.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> &AppSettings {
        if let Some(mode) = patch.view_mode {
            self.state.settings.view_mode = mode;
        }
        if let Some(show) = patch.show_motivation {
            self.state.settings.show_motivation = show;
        }
        self.snapshot();
        &self.state.settings
    }

    /// Persist the current state. Failures are logged, never surfaced:
    /// the mutation that triggered the snapshot has already happened.
    fn snapshot(&self) {
        let snap = AuthSnapshot {
            user: self.state.user.clone(),
            is_authenticated: self.state.is_authenticated,
            settings: self.state.settings,
            ..Default::default()
        };
        let result = snapshot::encode(AUTH_STORE, &snap)
            .and_then(|bytes| self.store.save(AUTH_STORE, &bytes));
        if let Err(e) = result {
            warn!(error = %e, "auth snapshot failed; in-memory state is ahead of disk");
        }
    }
}
