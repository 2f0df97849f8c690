//! Contract between the app and whatever stores entries and sessions.

use std::sync::Arc;

use crate::{BackendError, DailyRecord, EntryFilter, User};

/// Receives the new session user (or `None` after sign-out).
pub type AuthCallback = Arc<dyn Fn(Option<&User>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait Backend: Send + Sync {
    /// Store a record and return its id.
    fn insert(&self, record: DailyRecord) -> Result<String, BackendError>;

    fn query(&self, filter: &EntryFilter) -> Result<Vec<DailyRecord>, BackendError>;

    fn current_user(&self) -> Option<User>;

    fn on_auth_change(&self, callback: AuthCallback) -> ListenerId;

    fn remove_auth_listener(&self, id: ListenerId);

    fn sign_up(&self, email: &str, password: &str) -> Result<User, BackendError>;

    fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError>;

    fn sign_out(&self) -> Result<(), BackendError>;
}
