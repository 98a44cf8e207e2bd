mod memory;
mod postgres;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{Config, StorageBackend};
use crate::models::{Client, NewClient, NewProject, Project, ProjectPatch};

pub use memory::MemoryStore;
pub use postgres::Database;

/// Persistence operations over the client and project collections.
///
/// Lookups by id return `None` when nothing matches; only driver failures
/// surface as errors.
#[async_trait]
pub trait Store: Send + Sync {
    // Client operations
    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>>;

    async fn create_client(&self, client: NewClient) -> Result<Client>;

    /// Delete a client and every project that references it.
    ///
    /// Dependent projects are removed first. Returns the deleted client, or
    /// `None` if it did not exist.
    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>>;

    // Project operations
    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>>;

    async fn create_project(&self, project: NewProject) -> Result<Project>;

    /// Apply the supplied fields of `patch`, leaving the rest untouched.
    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>>;

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>>;

    /// Release any held connections.
    async fn close(&self);
}

/// Build the store selected by the configuration
pub async fn init(config: &Config) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::Postgres => {
            let db = Database::new(config).await?;
            db.migrate().await?;
            Arc::new(db)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    Ok(store)
}
