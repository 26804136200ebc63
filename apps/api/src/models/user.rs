use serde::{Deserialize, Serialize};

/// Identity reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserIdentity),
}

impl Session {
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }
}
