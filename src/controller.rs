//! CRUD synchronization core: the single authoritative in-memory mirror of
//! the remote `/users` collection and the sole mediator of user-driven
//! state transitions.
//!
//! The controller never patches the mirror optimistically. Every successful
//! mutation is followed by an authoritative refetch, so server-assigned
//! fields, ordering, and concurrent external changes become visible
//! immediately.

use tracing::{debug, warn};

use crate::store::{User, UserDraft, UserStore};

/// The aggregate the view observes.
#[derive(Clone, Debug, Default)]
pub struct ControllerState {
    /// Mirror of the remote collection, replaced wholesale on every
    /// successful fetch, never patched in place.
    pub users: Vec<User>,
    /// True for the duration of exactly one in-flight request.
    pub loading: bool,
    /// Message of the most recent failed request; cleared when any new
    /// request starts.
    pub error: Option<String>,
    /// When set, submit() updates this record instead of creating one.
    pub editing_id: Option<u64>,
    /// Scratch copy of the form fields the view binds its inputs to.
    pub draft: UserDraft,
}

/// Mediates every read and write between the UI and the remote store.
pub struct CrudController {
    store: Box<dyn UserStore>,
    state: ControllerState,
}

impl CrudController {
    pub fn new(store: Box<dyn UserStore>) -> Self {
        Self {
            store,
            state: ControllerState::default(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The form edits the draft in place; submission goes through
    /// [`submit`](Self::submit).
    pub fn draft_mut(&mut self) -> &mut UserDraft {
        &mut self.state.draft
    }

    /// Fetch the full collection and replace the mirror with it verbatim.
    ///
    /// On failure the prior listing stays visible (stale but present) and
    /// the failure message is surfaced instead.
    pub fn refresh(&mut self) {
        if self.state.loading {
            return;
        }
        self.state.loading = true;
        self.state.error = None;
        self.fetch_users();
        self.state.loading = false;
    }

    /// Dispatch the draft to the store: `editing_id` present selects the
    /// update path, absent the create path. That is the only branching.
    pub fn submit(&mut self) {
        if self.state.loading {
            return;
        }
        self.state.loading = true;
        self.state.error = None;
        let result = match self.state.editing_id {
            Some(id) => self.store.update(id, &self.state.draft).map(drop),
            None => self.store.create(&self.state.draft).map(drop),
        };
        match result {
            Ok(()) => {
                debug!(updated = self.state.editing_id.is_some(), "submit succeeded");
                // The refetch surfaces its own failure; the mutation went
                // through, so the form resets either way.
                self.fetch_users();
                self.state.draft.reset();
                self.state.editing_id = None;
            }
            Err(e) => {
                warn!(error = %e, "submit failed");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
    }

    /// Delete the record addressed by `id`, then refetch.
    ///
    /// The id must arrive pre-confirmed; the confirmation dialog lives in
    /// the view layer.
    pub fn remove(&mut self, id: u64) {
        if self.state.loading {
            return;
        }
        self.state.loading = true;
        self.state.error = None;
        match self.store.delete(id) {
            Ok(()) => {
                debug!(id, "delete succeeded");
                self.fetch_users();
            }
            Err(e) => {
                warn!(id, error = %e, "delete failed");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
    }

    /// Enter edit mode for `user`: remember its id and copy its fields
    /// into the draft. Pure state transition, no network call.
    pub fn begin_edit(&mut self, user: &User) {
        let Some(id) = user.id else {
            return;
        };
        self.state.editing_id = Some(id);
        self.state.draft = UserDraft::from_user(user);
    }

    /// Leave edit mode and empty the draft. Pure state transition.
    pub fn cancel_edit(&mut self) {
        self.state.editing_id = None;
        self.state.draft.reset();
    }

    fn fetch_users(&mut self) {
        match self.store.list() {
            Ok(users) => {
                self.state.users = users;
                // An edit target missing from the authoritative listing
                // ends edit mode.
                if let Some(id) = self.state.editing_id {
                    if !self.state.users.iter().any(|u| u.id == Some(id)) {
                        debug!(id, "edit target vanished from the collection");
                        self.cancel_edit();
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.state.error = Some(e.to_string());
            }
        }
    }
}
