use std::path::PathBuf;

use uuid::Uuid;

use crate::models::workspace::Workspace;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct WorkspaceRepo {
    store: RecordStore<Workspace>,
}

impl WorkspaceRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub fn store(&self) -> &RecordStore<Workspace> {
        &self.store
    }

    pub fn list(&self) -> Vec<Workspace> {
        self.store.load()
    }

    pub fn get(&self, id: &str) -> Option<Workspace> {
        self.store.load().into_iter().find(|w| w.id == id)
    }

    pub fn create(&self, title: &str, description: &str) -> anyhow::Result<Workspace> {
        let mut workspaces = self.store.load();
        let workspace = Workspace {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
        };
        workspaces.push(workspace.clone());
        self.store.save(&workspaces)?;

        tracing::info!(workspace_id = %workspace.id, "workspace created");
        Ok(workspace)
    }

    /// Returns `None` when no workspace has `id`; the file is left untouched.
    pub fn update(
        &self,
        id: &str,
        title: &str,
        description: &str,
    ) -> anyhow::Result<Option<Workspace>> {
        let mut workspaces = self.store.load();
        let Some(workspace) = workspaces.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        workspace.title = title.to_string();
        workspace.description = description.to_string();
        let updated = workspace.clone();

        self.store.save(&workspaces)?;
        tracing::info!(workspace_id = %id, "workspace updated");
        Ok(Some(updated))
    }
}
