//! Remote user store: the boundary to the REST service that owns the
//! `/users` collection.
//!
//! The [`UserStore`] trait is the seam the controller talks through.
//! [`HttpUserStore`] speaks HTTP to a real service; [`MemoryUserStore`] is a
//! self-contained fixture for tests and offline runs.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// One managed user record.
///
/// `id` is assigned by the remote service on creation and is absent on a
/// record that has not been created yet. The client never fabricates an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// In-progress, unsaved field values for create or edit. Carries no id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserDraft {
    /// Populate the draft from an existing record, for editing.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }

    /// Return all fields to empty strings.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.role.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.role.is_empty()
    }

    /// The required-field form constraint: every field non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && !self.role.trim().is_empty()
    }

    /// Build the update request body: the draft fields plus the target id.
    pub fn with_id(&self, id: u64) -> User {
        User {
            id: Some(id),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Which store operation was attempted. Only used to pick the failure text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Create,
    Update,
    Delete,
}

impl StoreOp {
    pub fn failure_message(self) -> &'static str {
        match self {
            StoreOp::List => "Failed to fetch users",
            StoreOp::Create => "Failed to create user",
            StoreOp::Update => "Failed to update user",
            StoreOp::Delete => "Failed to delete user",
        }
    }
}

/// The single error kind of the store boundary: a request failed.
///
/// Transport failures and non-2xx statuses are not distinguished; the
/// message names the attempted operation and nothing more.
#[derive(Debug, thiserror::Error)]
#[error("{}", .op.failure_message())]
pub struct StoreError {
    pub op: StoreOp,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl StoreError {
    pub fn new(op: StoreOp) -> Self {
        Self { op, source: None }
    }

    pub fn with_source(
        op: StoreOp,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            op,
            source: Some(Box::new(source)),
        }
    }
}

/// Interface to the remote `/users` collection resource.
///
/// | method   | wire form                                |
/// |----------|------------------------------------------|
/// | `list`   | `GET /users`                             |
/// | `create` | `POST /users`, draft body without id     |
/// | `update` | `PUT /users/{id}`, draft body plus id    |
/// | `delete` | `DELETE /users/{id}`                     |
#[cfg_attr(test, mockall::automock)]
pub trait UserStore {
    /// Fetch the full collection, in server order.
    fn list(&self) -> Result<Vec<User>, StoreError>;
    /// Create a new record; the service assigns the id.
    fn create(&self, draft: &UserDraft) -> Result<User, StoreError>;
    /// Replace the record addressed by `id` with the draft fields.
    fn update(&self, id: u64, draft: &UserDraft) -> Result<User, StoreError>;
    /// Remove the record addressed by `id`.
    fn delete(&self, id: u64) -> Result<(), StoreError>;
}

/// HTTP binding of [`UserStore`], backed by a blocking reqwest client.
pub struct HttpUserStore {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpUserStore {
    /// Default service address, matching the development backend.
    pub const DEFAULT_URL: &'static str = "http://localhost:3001";

    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: u64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    fn check(
        op: StoreOp,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            warn!(%status, ?op, "user service returned non-success");
            Err(StoreError::new(op))
        }
    }
}

impl UserStore for HttpUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        let url = self.users_url();
        debug!(%url, "fetching users");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StoreError::with_source(StoreOp::List, e))?;
        Self::check(StoreOp::List, response)?
            .json()
            .map_err(|e| StoreError::with_source(StoreOp::List, e))
    }

    fn create(&self, draft: &UserDraft) -> Result<User, StoreError> {
        let url = self.users_url();
        debug!(%url, name = %draft.name, "creating user");
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .map_err(|e| StoreError::with_source(StoreOp::Create, e))?;
        Self::check(StoreOp::Create, response)?
            .json()
            .map_err(|e| StoreError::with_source(StoreOp::Create, e))
    }

    fn update(&self, id: u64, draft: &UserDraft) -> Result<User, StoreError> {
        let url = self.user_url(id);
        debug!(%url, "updating user");
        let response = self
            .client
            .put(&url)
            .json(&draft.with_id(id))
            .send()
            .map_err(|e| StoreError::with_source(StoreOp::Update, e))?;
        Self::check(StoreOp::Update, response)?
            .json()
            .map_err(|e| StoreError::with_source(StoreOp::Update, e))
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let url = self.user_url(id);
        debug!(%url, "deleting user");
        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| StoreError::with_source(StoreOp::Delete, e))?;
        Self::check(StoreOp::Delete, response).map(|_| ())
    }
}

/// In-memory fixture implementation: behaves like the remote service
/// without a network. Ids are assigned monotonically above the highest
/// seeded id. Missing ids fail the same way the service's 404 would.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    users: Vec<User>,
    next_id: u64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(users: Vec<User>) -> Self {
        let next_id = users.iter().filter_map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(MemoryInner { users, next_id }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserStore for MemoryUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock().users.clone())
    }

    fn create(&self, draft: &UserDraft) -> Result<User, StoreError> {
        let mut inner = self.lock();
        let user = draft.with_id(inner.next_id);
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    fn update(&self, id: u64, draft: &UserDraft) -> Result<User, StoreError> {
        let mut inner = self.lock();
        let slot = inner
            .users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or(StoreError::new(StoreOp::Update))?;
        *slot = draft.with_id(id);
        Ok(slot.clone())
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != Some(id));
        if inner.users.len() == before {
            return Err(StoreError::new(StoreOp::Delete));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn user(id: u64, name: &str, email: &str, role: &str) -> User {
        User {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn create_body_carries_no_id() {
        let draft = UserDraft {
            name: "Test User".into(),
            email: "test@example.com".into(),
            role: "Tester".into(),
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["name"], "Test User");
    }

    #[test]
    fn update_body_carries_the_target_id() {
        let draft = UserDraft {
            name: "John Updated".into(),
            email: "john@x.com".into(),
            role: "Dev".into(),
        };
        let body = serde_json::to_value(draft.with_id(1)).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "John Updated");
    }

    #[test]
    fn draft_reset_and_completeness() {
        let mut draft = UserDraft {
            name: "a".into(),
            email: String::new(),
            role: "c".into(),
        };
        assert!(!draft.is_complete());
        draft.email = "a@b.c".into();
        assert!(draft.is_complete());
        draft.reset();
        assert!(draft.is_empty());
    }

    #[test]
    fn error_messages_name_the_operation() {
        assert_eq!(StoreError::new(StoreOp::List).to_string(), "Failed to fetch users");
        assert_eq!(StoreError::new(StoreOp::Create).to_string(), "Failed to create user");
        assert_eq!(StoreError::new(StoreOp::Update).to_string(), "Failed to update user");
        assert_eq!(StoreError::new(StoreOp::Delete).to_string(), "Failed to delete user");
    }

    #[test]
    fn memory_store_assigns_ids_above_the_seed() {
        let store = MemoryUserStore::seeded(vec![user(1, "John Doe", "john@x.com", "Dev")]);
        let created = store
            .create(&UserDraft {
                name: "Test User".into(),
                email: "test@example.com".into(),
                role: "Tester".into(),
            })
            .unwrap();
        assert_eq!(created.id, Some(2));
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn memory_store_rejects_unknown_ids() {
        let store = MemoryUserStore::new();
        assert!(store.delete(7).is_err());
        let draft = UserDraft::default();
        assert!(store.update(7, &draft).is_err());
    }

    // Minimal canned HTTP listener; enough for a single blocking request.
    fn serve_once(status_line: &str, body: String) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while let Ok(n) = stream.read(&mut chunk) {
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let _ = stream.write_all(response.as_bytes());
            }
        });
        addr
    }

    #[test]
    fn http_store_parses_a_listing() {
        let body = serde_json::to_string(&vec![user(1, "John Doe", "john@x.com", "Dev")]).unwrap();
        let addr = serve_once("200 OK", body);
        let store = HttpUserStore::new(&format!("http://{}", addr)).unwrap();
        let users = store.list().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "John Doe");
    }

    #[test]
    fn http_store_maps_server_errors_to_the_operation_message() {
        let addr = serve_once("500 Internal Server Error", String::new());
        let store = HttpUserStore::new(&format!("http://{}", addr)).unwrap();
        let err = store.list().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch users");
        assert_eq!(err.op, StoreOp::List);
    }
}
