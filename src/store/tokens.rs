use std::path::PathBuf;

use uuid::Uuid;

use crate::models::timestamp::Timestamp;
use crate::models::token::{generate_secret, Token};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct TokenRepo {
    store: RecordStore<Token>,
}

impl TokenRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub fn store(&self) -> &RecordStore<Token> {
        &self.store
    }

    /// Every token ever issued, revoked ones included.
    pub fn list_all(&self) -> Vec<Token> {
        self.store.load()
    }

    /// Unrevoked tokens belonging to `workspace_id`.
    pub fn list_active(&self, workspace_id: &str) -> Vec<Token> {
        self.store
            .load()
            .into_iter()
            .filter(|t| t.workspace_id == workspace_id && t.is_active())
            .collect()
    }

    /// Issue a token. The returned record carries the secret.
    pub fn create(&self, workspace_id: &str, name: &str) -> anyhow::Result<Token> {
        let mut tokens = self.store.load();
        let token = Token {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace_id.to_string(),
            name: name.to_string(),
            secret: generate_secret(),
            created_at: Timestamp::now(),
            revoked_at: None,
        };
        tokens.push(token.clone());
        self.store.save(&tokens)?;

        tracing::info!(token_id = %token.id, workspace_id = %workspace_id, "token created");
        Ok(token)
    }

    /// Stamp `revoked_at` with the current time, overwriting any earlier
    /// revocation. Returns `None` when no token has `id`.
    pub fn revoke(&self, id: &str) -> anyhow::Result<Option<Token>> {
        let mut tokens = self.store.load();
        let Some(token) = tokens.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        token.revoked_at = Some(Timestamp::now());
        let revoked = token.clone();

        self.store.save(&tokens)?;
        tracing::info!(token_id = %id, "token revoked");
        Ok(Some(revoked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> TokenRepo {
        TokenRepo::new(dir.path().join("tokens.csv"))
    }

    #[test]
    fn test_create_returns_secret_and_active_record() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let token = repo.create("ws-1", "ci-bot").unwrap();

        assert_eq!(token.workspace_id, "ws-1");
        assert_eq!(token.name, "ci-bot");
        assert_eq!(token.secret.len(), 40);
        assert_ne!(token.secret, token.id);
        assert!(token.is_active());
        assert_eq!(repo.list_all(), vec![token]);
    }

    #[test]
    fn test_list_active_filters_by_workspace() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let a = repo.create("ws-a", "one").unwrap();
        repo.create("ws-b", "two").unwrap();

        assert_eq!(repo.list_active("ws-a"), vec![a]);
        assert!(repo.list_active("ws-c").is_empty());
    }

    #[test]
    fn test_revoke_hides_token_but_keeps_it_stored() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let keep = repo.create("ws", "keep").unwrap();
        let gone = repo.create("ws", "gone").unwrap();

        let revoked = repo.revoke(&gone.id).unwrap().unwrap();

        assert!(revoked.revoked_at.is_some());
        assert_eq!(repo.list_active("ws"), vec![keep]);
        let all = repo.list_all();
        assert_eq!(all.len(), 2);
        let stored = all.iter().find(|t| t.id == gone.id).unwrap();
        assert_eq!(stored.revoked_at, revoked.revoked_at);
        assert_eq!(stored.secret, gone.secret);
    }

    #[test]
    fn test_revoke_twice_succeeds_and_moves_timestamp_forward() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let token = repo.create("ws", "t").unwrap();

        let first = repo.revoke(&token.id).unwrap().unwrap().revoked_at.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = repo.revoke(&token.id).unwrap().unwrap().revoked_at.unwrap();

        assert!(second.to_datetime().unwrap() > first.to_datetime().unwrap());
        assert!(repo.list_active("ws").is_empty());
    }

    #[test]
    fn test_revoke_missing_id_leaves_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create("ws", "t").unwrap();
        let before = std::fs::read(repo.store().path()).unwrap();

        assert!(repo.revoke("missing").unwrap().is_none());
        assert_eq!(std::fs::read(repo.store().path()).unwrap(), before);
    }

    #[test]
    fn test_orphan_tokens_are_allowed() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let token = repo.create("no-such-workspace", "orphan").unwrap();

        assert_eq!(repo.list_active("no-such-workspace"), vec![token]);
    }

    #[test]
    fn test_reads_rows_written_by_hand() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.csv");
        std::fs::write(
            &path,
            "id,workspaceId,name,token,createdAt,revokedAt\n\
             t1,w1,live,aa,2024-01-01T00:00:00.000Z,\n\
             t2,w1,dead,bb,2024-01-01T00:00:00.000Z,2024-02-01T00:00:00.000Z\n",
        )
        .unwrap();
        let repo = TokenRepo::new(&path);

        let active = repo.list_active("w1");

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "t1");
        assert_eq!(repo.list_all().len(), 2);
    }

    #[test]
    fn test_any_non_empty_revoked_cell_counts_as_revoked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.csv");
        std::fs::write(
            &path,
            "id,workspaceId,name,token,createdAt,revokedAt\n\
             t1,w1,blank,aa,2024-01-01T00:00:00.000Z, \n\
             t2,w1,junk,bb,2024-01-01T00:00:00.000Z,not-a-date\n\
             t3,w1,live,cc,2024-01-01T00:00:00.000Z,\n",
        )
        .unwrap();
        let repo = TokenRepo::new(&path);

        let active: Vec<String> = repo.list_active("w1").into_iter().map(|t| t.id).collect();

        assert_eq!(active, vec!["t3".to_string()]);
        let all = repo.list_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].revoked_at.as_ref().unwrap().as_str(), " ");
        assert_eq!(all[1].revoked_at.as_ref().unwrap().as_str(), "not-a-date");
    }

    #[test]
    fn test_unusual_cells_survive_a_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.csv");
        std::fs::write(
            &path,
            "id,workspaceId,name,token,createdAt,revokedAt\n\
             t1,w1,live,aa,2024-02-01T10:00:00,\n\
             t2,w1,dead,bb,2024-01-01,2024-02-01\n\
             t3,w1,odd,cc,sometime, \n",
        )
        .unwrap();
        let repo = TokenRepo::new(&path);
        assert_eq!(repo.list_all().len(), 3);

        repo.create("w1", "new").unwrap();

        let all = repo.list_all();
        assert_eq!(all.len(), 4, "existing rows are kept");
        assert_eq!(all[0].created_at.as_str(), "2024-02-01T10:00:00");
        assert_eq!(all[1].revoked_at.as_ref().unwrap().as_str(), "2024-02-01");
        assert_eq!(all[2].created_at.as_str(), "sometime");
        let active: Vec<String> = repo.list_active("w1").into_iter().map(|t| t.name).collect();
        assert_eq!(active, vec!["live", "new"]);
    }

    #[test]
    fn test_revoke_replaces_unusual_cell() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.csv");
        std::fs::write(
            &path,
            "id,workspaceId,name,token,createdAt,revokedAt\n\
             t1,w1,odd,aa,2024-01-01, \n",
        )
        .unwrap();
        let repo = TokenRepo::new(&path);

        let revoked = repo.revoke("t1").unwrap().unwrap();

        assert!(revoked.revoked_at.unwrap().to_datetime().is_some());
        assert!(repo.list_active("w1").is_empty());
    }
}
