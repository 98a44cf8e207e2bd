use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::models::{Client, NewClient, NewProject, Project, ProjectPatch};

/// In-process store keeping both collections in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    clients: RwLock<Vec<Client>>,
    projects: RwLock<Vec<Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| c.id == id).cloned())
    }

    async fn create_client(&self, client: NewClient) -> Result<Client> {
        let client = client.into_client(Uuid::new_v4());
        self.clients.write().await.push(client.clone());
        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>> {
        // Lock order: projects, then clients
        let mut projects = self.projects.write().await;
        let mut clients = self.clients.write().await;

        projects.retain(|p| p.client_id != id);

        let client = clients
            .iter()
            .position(|c| c.id == id)
            .map(|index| clients.remove(index));

        Ok(client)
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().await.clone())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn create_project(&self, project: NewProject) -> Result<Project> {
        let project = project.into_project(Uuid::new_v4());
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        patch.apply(project);

        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>> {
        let mut projects = self.projects.write().await;
        let project = projects
            .iter()
            .position(|p| p.id == id)
            .map(|index| projects.remove(index));

        Ok(project)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    fn new_project(name: &str, client_id: Uuid) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: format!("{name} description"),
            status: ProjectStatus::default(),
            client_id,
        }
    }

    #[tokio::test]
    async fn created_clients_get_unique_ids() {
        let store = MemoryStore::new();
        let a = store.create_client(new_client("Ada")).await.unwrap();
        let b = store.create_client(new_client("Ada")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.list_clients().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn missing_records_are_none() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(store.get_client(id).await.unwrap().is_none());
        assert!(store.get_project(id).await.unwrap().is_none());
        assert!(store.delete_client(id).await.unwrap().is_none());
        assert!(store.delete_project(id).await.unwrap().is_none());
        assert!(store
            .update_project(id, ProjectPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_client_removes_only_its_projects() {
        let store = MemoryStore::new();
        let doomed = store.create_client(new_client("Doomed")).await.unwrap();
        let kept = store.create_client(new_client("Kept")).await.unwrap();

        for name in ["one", "two", "three"] {
            store.create_project(new_project(name, doomed.id)).await.unwrap();
        }
        let survivor = store.create_project(new_project("four", kept.id)).await.unwrap();

        let deleted = store.delete_client(doomed.id).await.unwrap();
        assert_eq!(deleted, Some(doomed.clone()));

        assert!(store.get_projects_by_client(doomed.id).await.unwrap().is_empty());
        assert_eq!(store.list_projects().await.unwrap(), vec![survivor]);
        assert_eq!(store.list_clients().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn update_preserves_unspecified_fields() {
        let store = MemoryStore::new();
        let client = store.create_client(new_client("Ada")).await.unwrap();
        let project = store.create_project(new_project("Site", client.id)).await.unwrap();

        let updated = store
            .update_project(
                project.id,
                ProjectPatch {
                    status: Some(ProjectStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.name, project.name);
        assert_eq!(updated.description, project.description);
        assert_eq!(store.get_project(project.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn delete_project_does_not_cascade() {
        let store = MemoryStore::new();
        let client = store.create_client(new_client("Ada")).await.unwrap();
        let first = store.create_project(new_project("first", client.id)).await.unwrap();
        let second = store.create_project(new_project("second", client.id)).await.unwrap();

        assert_eq!(store.delete_project(first.id).await.unwrap(), Some(first));
        assert_eq!(store.list_projects().await.unwrap(), vec![second]);
        assert_eq!(store.get_client(client.id).await.unwrap(), Some(client));
    }
}
