use serde::{Deserialize, Serialize};

use crate::store::records::Record;

/// A named container for tokens. Persisted in `workspaces.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Record for Workspace {
    const HEADER: &'static [&'static str] = &["id", "title", "description"];
}
