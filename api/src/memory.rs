use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{AuthCallback, Backend, ListenerId};
use crate::record::parse_date;
use crate::{BackendError, DailyRecord, EntryFilter, User};

const MIN_PASSWORD_LEN: usize = 6;

/// In-process [`Backend`]. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    session: Option<User>,
    records: Vec<DailyRecord>,
    listeners: Vec<(ListenerId, AuthCallback)>,
    next_listener: u64,
}

struct Account {
    user: User,
    password: String,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload records (e.g. fixtures). Dates are not validated here.
    pub fn with_records(records: Vec<DailyRecord>) -> Self {
        let backend = Self::default();
        if let Ok(mut state) = backend.state.lock() {
            state.records = records;
        }
        backend
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, BackendError> {
        self.state.lock().map_err(|_| BackendError::Unavailable)
    }

    fn set_session(&self, user: Option<User>) -> Result<(), BackendError> {
        let listeners: Vec<AuthCallback> = {
            let mut state = self.state()?;
            state.session = user.clone();
            state
                .listeners
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect()
        };

        // Listeners may call back into the backend, so the lock is released first.
        for callback in listeners {
            callback(user.as_ref());
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn insert(&self, mut record: DailyRecord) -> Result<String, BackendError> {
        let date = parse_date(&record.date).ok_or_else(|| BackendError::InvalidDate(record.date.clone()))?;

        let mut state = self.state()?;
        if let Some(owner) = record.user_id.as_deref() {
            let taken = state.records.iter().any(|existing| {
                existing.user_id.as_deref() == Some(owner) && existing.parsed_date() == Some(date)
            });
            if taken {
                return Err(BackendError::DuplicateDate(record.date.clone()));
            }
        }

        let id = Uuid::new_v4().to_string();
        record.id = Some(id.clone());
        info!(id = %id, date = %record.date, slices = record.slices.len(), "entry stored");
        state.records.push(record);
        Ok(id)
    }

    fn query(&self, filter: &EntryFilter) -> Result<Vec<DailyRecord>, BackendError> {
        let state = self.state()?;
        let mut matches: Vec<DailyRecord> = state
            .records
            .iter()
            .filter(|record| match filter.user_id.as_deref() {
                Some(user_id) => record.user_id.as_deref() == Some(user_id),
                None => true,
            })
            .cloned()
            .collect();

        // Unparsable dates sort first (oldest) so they never push real entries out of the limit.
        matches.sort_by(|a, b| {
            a.parsed_date()
                .cmp(&b.parsed_date())
                .then_with(|| a.date.cmp(&b.date))
        });
        if filter.newest_first {
            matches.reverse();
        }
        matches.truncate(filter.limit);

        debug!(count = matches.len(), user = ?filter.user_id, "entries queried");
        Ok(matches)
    }

    fn current_user(&self) -> Option<User> {
        self.state.lock().ok().and_then(|state| state.session.clone())
    }

    fn on_auth_change(&self, callback: AuthCallback) -> ListenerId {
        match self.state.lock() {
            Ok(mut state) => {
                state.next_listener += 1;
                let id = ListenerId(state.next_listener);
                state.listeners.push((id, callback));
                id
            }
            Err(_) => ListenerId(0),
        }
    }

    fn remove_auth_listener(&self, id: ListenerId) {
        if let Ok(mut state) = self.state.lock() {
            state.listeners.retain(|(listener, _)| *listener != id);
        }
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let user = {
            let mut state = self.state()?;
            if state.accounts.contains_key(&email) {
                return Err(BackendError::EmailTaken(email));
            }
            let user = User {
                id: Uuid::new_v4().to_string(),
                email: email.clone(),
            };
            state.accounts.insert(
                email,
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };

        info!(user = %user.id, "account created");
        self.set_session(Some(user.clone()))?;
        Ok(user)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let email = normalize_email(email).map_err(|_| BackendError::InvalidCredentials)?;
        let user = {
            let state = self.state()?;
            match state.accounts.get(&email) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(BackendError::InvalidCredentials),
            }
        };

        info!(user = %user.id, "signed in");
        self.set_session(Some(user.clone()))?;
        Ok(user)
    }

    fn sign_out(&self) -> Result<(), BackendError> {
        info!("signed out");
        self.set_session(None)
    }
}

fn normalize_email(raw: &str) -> Result<String, BackendError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(BackendError::InvalidEmail),
    }
}
