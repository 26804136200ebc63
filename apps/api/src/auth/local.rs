use async_trait::async_trait;

use crate::auth::{AuthError, AuthProvider, AuthState, AuthSubscription, SessionChannel};
use crate::models::user::UserIdentity;

/// Single-user provider for local runs. `login` signs in the configured identity.
pub struct LocalAuthProvider {
    identity: UserIdentity,
    channel: SessionChannel,
}

impl LocalAuthProvider {
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            channel: SessionChannel::new(AuthState::default()),
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    fn subscribe(&self) -> AuthSubscription {
        self.channel.subscribe()
    }

    fn current(&self) -> AuthState {
        self.channel.current()
    }

    async fn login(&self) -> Result<(), AuthError> {
        self.channel
            .publish(AuthState::signed_in(self.identity.clone()));
        Ok(())
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.channel.publish(AuthState::default());
        Ok(())
    }
}
