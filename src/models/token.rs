use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::models::timestamp::Timestamp;
use crate::store::records::Record;

/// Bytes of OS randomness behind each token secret (hex doubles the length).
pub const SECRET_BYTES: usize = 20;

/// An API token issued under a workspace. Persisted in `tokens.csv`.
///
/// `workspace_id` is not checked against the workspace table; orphans are
/// tolerated. Revocation is one-way: `revoked_at` is set, never cleared.
/// Any non-empty `revokedAt` cell counts as revoked, whatever its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(rename = "token")]
    pub secret: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub revoked_at: Option<Timestamp>,
}

impl Token {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

impl Record for Token {
    const HEADER: &'static [&'static str] = &[
        "id",
        "workspaceId",
        "name",
        "token",
        "createdAt",
        "revokedAt",
    ];
}

/// Fresh hex-encoded secret, independent of the token id.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
