//! Authentication collaborator.
//!
//! The board never authenticates anyone itself. A provider owns the session and
//! pushes every change through a `watch` channel; the board subscribes at startup,
//! reads the latest state when it needs it, and asks the provider to log in.

pub mod handlers;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::user::{Session, UserIdentity};

/// Snapshot of what the provider currently knows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub session: Session,
    pub is_loading: bool,
}

impl AuthState {
    pub fn signed_in(user: UserIdentity) -> Self {
        Self {
            session: Session::Authenticated(user),
            is_loading: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },
}

/// Live view of the session. Dropping it unsubscribes.
pub struct AuthSubscription {
    rx: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    /// Waits for the next state change. Returns `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Pluggable session source, carried in `AppState` as `Arc<dyn AuthProvider>`.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn subscribe(&self) -> AuthSubscription;

    fn current(&self) -> AuthState;

    /// Starts a sign-in. Observers see the outcome through their subscription.
    async fn login(&self) -> Result<(), AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// Sender side shared by the provider implementations.
pub(crate) struct SessionChannel {
    tx: watch::Sender<AuthState>,
}

impl SessionChannel {
    pub(crate) fn new(initial: AuthState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub(crate) fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub(crate) fn publish(&self, state: AuthState) {
        self.tx.send_replace(state);
    }
}

/// Resolves the signed-in user, rejecting anonymous or still-loading sessions.
pub fn require_user(provider: &dyn AuthProvider) -> Result<UserIdentity, AppError> {
    let state = provider.current();
    if state.is_loading {
        return Err(AppError::Unauthorized);
    }
    state.session.user().cloned().ok_or(AppError::Unauthorized)
}

/// Logs every session transition until the subscription's provider is dropped.
pub async fn watch_session(mut subscription: AuthSubscription) {
    while let Some(state) = subscription.changed().await {
        match (&state.session, state.is_loading) {
            (_, true) => tracing::debug!("Session loading"),
            (Session::Authenticated(user), false) => {
                tracing::info!("Signed in as {}", user.id)
            }
            (Session::Anonymous, false) => tracing::info!("Signed out"),
        }
    }
    tracing::debug!("Session observer stopped");
}
