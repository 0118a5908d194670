use std::path::PathBuf;

use crate::models::user::User;
use crate::store::RecordStore;

/// Read-only view over `users.csv`.
#[derive(Clone)]
pub struct UserDirectory {
    store: RecordStore<User>,
}

impl UserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub fn find(&self, username: &str) -> Option<User> {
        self.store
            .load()
            .into_iter()
            .find(|u| u.username == username)
    }
}
