use anyhow::{bail, Context, Result};

/// Where sessions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Single configured identity, signed in on `login`.
    Local {
        user_id: String,
        display_name: Option<String>,
        email: Option<String>,
    },
    /// External identity service answering `GET {url}/me`.
    Remote { url: String, token: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub auth: AuthMode,
    pub seed_sample_jobs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let auth = match get("AUTH_MODE").as_deref().unwrap_or("local") {
            "local" => AuthMode::Local {
                user_id: get("LOCAL_USER_ID").unwrap_or_else(|| "local-user".to_string()),
                display_name: get("LOCAL_USER_NAME"),
                email: get("LOCAL_USER_EMAIL"),
            },
            "remote" => AuthMode::Remote {
                url: require("AUTH_URL")?,
                token: require("AUTH_TOKEN")?,
            },
            other => bail!("AUTH_MODE must be 'local' or 'remote', got '{other}'"),
        };

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            auth,
            seed_sample_jobs: match get("SEED_SAMPLE_JOBS") {
                None => true,
                Some(raw) => raw
                    .parse::<bool>()
                    .context("SEED_SAMPLE_JOBS must be 'true' or 'false'")?,
            },
        })
    }
}
