//! Remote auth provider. Resolves the session against an external identity service.
//!
//! `login` asks `GET {base_url}/me` who the configured bearer token belongs to.
//! 200 carries a `UserIdentity`; 401/403 mean nobody is signed in.
//! A single attempt is made per login; failures leave the previous session in place.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthProvider, AuthState, AuthSubscription, SessionChannel};
use crate::models::user::UserIdentity;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RemoteAuthProvider {
    client: Client,
    base_url: String,
    token: String,
    channel: SessionChannel,
}

impl RemoteAuthProvider {
    pub fn new(base_url: String, token: String) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            channel: SessionChannel::new(AuthState::default()),
        })
    }

    async fn fetch_identity(&self) -> Result<Option<UserIdentity>, AuthError> {
        let response = self
            .client
            .get(format!("{}/me", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Auth provider reports no session ({status})");
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(response.json::<UserIdentity>().await?))
    }
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    fn subscribe(&self) -> AuthSubscription {
        self.channel.subscribe()
    }

    fn current(&self) -> AuthState {
        self.channel.current()
    }

    async fn login(&self) -> Result<(), AuthError> {
        let previous = self.channel.current();
        self.channel.publish(AuthState {
            session: previous.session.clone(),
            is_loading: true,
        });

        match self.fetch_identity().await {
            Ok(Some(user)) => {
                self.channel.publish(AuthState::signed_in(user));
                Ok(())
            }
            Ok(None) => {
                self.channel.publish(AuthState::default());
                Ok(())
            }
            Err(e) => {
                warn!("Login against {} failed: {e}", self.base_url);
                self.channel.publish(AuthState {
                    session: previous.session,
                    is_loading: false,
                });
                Err(e)
            }
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.channel.publish(AuthState::default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Session;
    use axum::{http::HeaderMap, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;

    /// Serves `/me`: the "good" token maps to a user, "broken" to a 500, anything else to 401.
    async fn spawn_identity_service() -> String {
        async fn me(headers: HeaderMap) -> Result<Json<serde_json::Value>, AxumStatus> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            match auth {
                "Bearer good" => Ok(Json(json!({
                    "id": "remote-7",
                    "display_name": "Grace",
                    "email": "grace@example.com"
                }))),
                "Bearer broken" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
                _ => Err(AxumStatus::UNAUTHORIZED),
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().route("/me", get(me)))
                .await
                .unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_login_resolves_identity() {
        let base = spawn_identity_service().await;
        let provider = RemoteAuthProvider::new(base, "good".to_string()).unwrap();

        provider.login().await.unwrap();

        let state = provider.current();
        assert!(!state.is_loading);
        let user = state.session.user().cloned().unwrap();
        assert_eq!(user.id, "remote-7");
        assert_eq!(user.display_name.as_deref(), Some("Grace"));
    }

    #[tokio::test]
    async fn test_unauthorized_token_leaves_session_anonymous() {
        let base = spawn_identity_service().await;
        let provider = RemoteAuthProvider::new(base, "stale".to_string()).unwrap();

        provider.login().await.unwrap();

        assert_eq!(provider.current(), AuthState::default());
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported_and_clears_loading() {
        let base = spawn_identity_service().await;
        let provider = RemoteAuthProvider::new(base, "broken".to_string()).unwrap();
        let mut sub = provider.subscribe();

        let err = provider.login().await.unwrap_err();
        assert!(matches!(err, AuthError::Provider { status: 500, .. }));

        let state = provider.current();
        assert_eq!(state.session, Session::Anonymous);
        assert!(!state.is_loading);
        assert!(sub.changed().await.is_some());
    }
}
