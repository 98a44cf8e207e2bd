use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::Store;
use crate::config::Config;
use crate::models::{Client, NewClient, NewProject, Project, ProjectPatch};

const CLIENT_COLUMNS: &str = "id, name, email, phone";
const PROJECT_COLUMNS: &str = "id, name, description, status, client_id";

/// Row shape of the `projects` table; status is stored as its display text
#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    status: String,
    client_id: Uuid,
}

impl TryFrom<ProjectRow> for Project {
    type Error = anyhow::Error;

    fn try_from(row: ProjectRow) -> Result<Self> {
        Ok(Project {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status.parse()?,
            client_id: row.client_id,
        })
    }
}

fn into_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>> {
    rows.into_iter().map(Project::try_from).collect()
}

/// Postgres-backed store with a connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.database_url()?)
            .await?;

        info!(max_connections = config.max_connections, "database pool ready");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(self.get_pool()).await?;
        debug!("migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Store for Database {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY seq ASC"
        ))
        .fetch_all(self.get_pool())
        .await?;

        Ok(clients)
    }

    async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn create_client(&self, client: NewClient) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(client.name)
        .bind(client.email)
        .bind(client.phone)
        .fetch_one(self.get_pool())
        .await?;

        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<Option<Client>> {
        // Projects and client go together or not at all
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM projects WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let client = sqlx::query_as::<_, Client>(&format!(
            "DELETE FROM clients WHERE id = $1 RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(client_id = %id, projects_removed = removed, "client cascade delete");

        Ok(client)
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY seq ASC"
        ))
        .fetch_all(self.get_pool())
        .await?;

        into_projects(rows)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        row.map(Project::try_from).transpose()
    }

    async fn get_projects_by_client(&self, client_id: Uuid) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE client_id = $1 ORDER BY seq ASC"
        ))
        .bind(client_id)
        .fetch_all(self.get_pool())
        .await?;

        into_projects(rows)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (id, name, description, status, client_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(project.name)
        .bind(project.description)
        .bind(project.status.as_str())
        .bind(project.client_id)
        .fetch_one(self.get_pool())
        .await?;

        row.try_into()
    }

    async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                status = COALESCE($3, status)
            WHERE id = $4
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        row.map(Project::try_from).transpose()
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        row.map(Project::try_from).transpose()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
