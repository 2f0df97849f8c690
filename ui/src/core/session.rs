//! Backend and session plumbing shared through Dioxus context.
//!
//! A platform shell calls [`use_backend_provider`] once at the root; every
//! component below reaches the backend with [`use_backend`] and the signed-in
//! user with [`use_current_user`].

use std::ops::Deref;
use std::sync::Arc;

use api::{Backend, User};
use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, info};

/// Shared handle to the app's [`Backend`].
#[derive(Clone)]
pub struct BackendHandle(Arc<dyn Backend>);

impl BackendHandle {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self(backend)
    }
}

impl Deref for BackendHandle {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Context wrapper so the session signal can't collide with other
/// `Signal<Option<_>>` contexts.
#[derive(Clone, Copy)]
struct CurrentUser(Signal<Option<User>>);

/// Install `backend` for the subtree and keep the session signal in sync
/// with the backend's auth notifications.
pub fn use_backend_provider(factory: impl FnOnce() -> Arc<dyn Backend>) -> BackendHandle {
    let handle = use_context_provider(|| BackendHandle::new(factory()));
    let initial = handle.clone();
    let user = use_signal(move || initial.current_user());
    use_context_provider(|| CurrentUser(user));

    let subscribe = handle.clone();
    let listener = use_hook(move || {
        // The backend may notify from any thread; a channel hands updates to the UI task.
        let (tx, mut rx) = futures_channel::mpsc::unbounded::<Option<User>>();
        let id = subscribe.on_auth_change(Arc::new(move |next: Option<&User>| {
            let _ = tx.unbounded_send(next.cloned());
        }));

        let mut user = user;
        spawn(async move {
            while let Some(next) = rx.next().await {
                match &next {
                    Some(signed_in) => info!(user = %signed_in.id, "session started"),
                    None => info!("session ended"),
                }
                user.set(next);
            }
        });

        debug!(listener = id.0, "auth listener registered");
        id
    });

    let unsubscribe = handle.clone();
    use_drop(move || unsubscribe.remove_auth_listener(listener));

    handle
}

pub fn use_backend() -> BackendHandle {
    use_context::<BackendHandle>()
}

/// Signed-in user, updated whenever the backend reports an auth change.
pub fn use_current_user() -> Signal<Option<User>> {
    use_context::<CurrentUser>().0
}
