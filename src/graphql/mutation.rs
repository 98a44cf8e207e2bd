use async_graphql::{Context, Object, Result, ID};
use tracing::info;

use super::error::store_error;
use super::types::{parse_id, store, StatusInput, StatusUpdateInput};
use crate::models::{Client, NewClient, NewProject, Project, ProjectPatch};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_client(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] name: String,
        #[graphql(validator(min_length = 1))] email: String,
        #[graphql(validator(min_length = 1))] phone: String,
    ) -> Result<Client> {
        let client = store(ctx)?
            .create_client(NewClient { name, email, phone })
            .await
            .map_err(store_error)?;

        info!(client_id = %client.id, "client added");
        Ok(client)
    }

    /// Delete a client together with all of its projects
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Client>> {
        let id = parse_id(&id)?;
        let client = store(ctx)?.delete_client(id).await.map_err(store_error)?;

        if client.is_some() {
            info!(client_id = %id, "client deleted");
        }
        Ok(client)
    }

    async fn add_project(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] name: String,
        #[graphql(validator(min_length = 1))] description: String,
        client_id: ID,
        #[graphql(default_with = "Some(StatusInput::New)")] status: Option<StatusInput>,
    ) -> Result<Project> {
        let client_id = parse_id(&client_id)?;
        let project = store(ctx)?
            .create_project(NewProject {
                name,
                description,
                status: status.unwrap_or_default().into(),
                client_id,
            })
            .await
            .map_err(store_error)?;

        info!(project_id = %project.id, client_id = %client_id, "project added");
        Ok(project)
    }

    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        let id = parse_id(&id)?;
        let project = store(ctx)?.delete_project(id).await.map_err(store_error)?;

        if project.is_some() {
            info!(project_id = %id, "project deleted");
        }
        Ok(project)
    }

    /// Replace the supplied fields of a project; omitted fields keep their
    /// stored value
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        #[graphql(validator(min_length = 1))] name: Option<String>,
        #[graphql(validator(min_length = 1))] description: Option<String>,
        status: Option<StatusUpdateInput>,
    ) -> Result<Option<Project>> {
        let id = parse_id(&id)?;
        let patch = ProjectPatch {
            name,
            description,
            status: status.map(Into::into),
        };

        let changed = !patch.is_empty();
        let store = store(ctx)?;
        let project = if !changed {
            store.get_project(id).await
        } else {
            store.update_project(id, patch).await
        }
        .map_err(store_error)?;

        if changed && project.is_some() {
            info!(project_id = %id, "project updated");
        }
        Ok(project)
    }
}
