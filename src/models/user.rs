use serde::{Deserialize, Serialize};

use crate::store::records::Record;

/// A login account. Read-only here; rows are provisioned out of band with
/// bcrypt hashes (see `tokendesk hash-password`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl Record for User {
    const HEADER: &'static [&'static str] = &["username", "password_hash"];
}
