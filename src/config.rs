use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Directory holding `users.csv`, `workspaces.csv` and `tokens.csv`.
    pub data_dir: PathBuf,
    /// Where a successful login redirects to.
    pub login_redirect: String,
    /// Session lifetime in seconds. Set via TOKENDESK_SESSION_TTL_SECS. Default: 86400.
    pub session_ttl_secs: u64,
    /// Add `Secure` to the session cookie (HTTPS deployments).
    pub cookie_secure: bool,
}

impl Config {
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.csv")
    }

    pub fn workspaces_path(&self) -> PathBuf {
        self.data_dir.join("workspaces.csv")
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.data_dir.join("tokens.csv")
    }

    /// Defaults for everything except the data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 3000,
            data_dir: data_dir.into(),
            login_redirect: "/index1.html".into(),
            session_ttl_secs: 86_400,
            cookie_secure: false,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let defaults = Config::with_data_dir(
        std::env::var("TOKENDESK_DATA_DIR").unwrap_or_else(|_| ".".into()),
    );

    let port = match std::env::var("TOKENDESK_PORT") {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("TOKENDESK_PORT is not a valid port: {}", v))?,
        Err(_) => defaults.port,
    };

    Ok(Config {
        port,
        login_redirect: std::env::var("TOKENDESK_LOGIN_REDIRECT")
            .unwrap_or(defaults.login_redirect),
        session_ttl_secs: std::env::var("TOKENDESK_SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.session_ttl_secs),
        cookie_secure: std::env::var("TOKENDESK_COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false),
        data_dir: defaults.data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths_live_under_data_dir() {
        let cfg = Config::with_data_dir("/srv/tokendesk");
        assert_eq!(cfg.users_path(), PathBuf::from("/srv/tokendesk/users.csv"));
        assert_eq!(cfg.workspaces_path(), PathBuf::from("/srv/tokendesk/workspaces.csv"));
        assert_eq!(cfg.tokens_path(), PathBuf::from("/srv/tokendesk/tokens.csv"));
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::with_data_dir(".");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.login_redirect, "/index1.html");
        assert_eq!(cfg.session_ttl_secs, 86_400);
        assert!(!cfg.cookie_secure);
    }
}
