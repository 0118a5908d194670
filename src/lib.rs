//! tokendesk — session-gated workspaces and revocable API tokens over
//! flat CSV files.
//!
//! Library crate so the router and stores can be driven from `tests/`.

use std::time::Duration;

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;
pub mod store;

use session::SessionStore;
use store::{TokenRepo, UserDirectory, WorkspaceRepo};

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub config: config::Config,
    pub sessions: SessionStore,
    pub users: UserDirectory,
    pub workspaces: WorkspaceRepo,
    pub tokens: TokenRepo,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            sessions: SessionStore::new(
                Duration::from_secs(config.session_ttl_secs),
                config.cookie_secure,
            ),
            users: UserDirectory::new(config.users_path()),
            workspaces: WorkspaceRepo::new(config.workspaces_path()),
            tokens: TokenRepo::new(config.tokens_path()),
            config,
        }
    }
}
