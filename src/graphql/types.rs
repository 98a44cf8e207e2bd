use std::sync::Arc;

use async_graphql::{Context, Enum, ErrorExtensions, Object, Result, ID};
use uuid::Uuid;

use super::error::{store_error, ApiError};
use super::GraphQLContext;
use crate::db::Store;
use crate::models::{Client, Project, ProjectStatus};

pub(crate) fn store<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn Store>> {
    Ok(&ctx.data::<GraphQLContext>()?.store)
}

pub(crate) fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| ApiError::InvalidId(id.to_string()).extend())
}

fn to_id(id: Uuid) -> ID {
    ID(id.to_string())
}

/// Status accepted by `addProject`
#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
#[graphql(name = "ProjectStatus")]
pub enum StatusInput {
    #[default]
    #[graphql(name = "new")]
    New,
    #[graphql(name = "progress")]
    Progress,
    #[graphql(name = "completed")]
    Completed,
}

impl From<StatusInput> for ProjectStatus {
    fn from(status: StatusInput) -> Self {
        match status {
            StatusInput::New => ProjectStatus::NotStarted,
            StatusInput::Progress => ProjectStatus::InProgress,
            StatusInput::Completed => ProjectStatus::Completed,
        }
    }
}

/// Status accepted by `updateProject`
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "ProjectStatusUpdate")]
pub enum StatusUpdateInput {
    #[graphql(name = "new")]
    New,
    #[graphql(name = "progress")]
    Progress,
    #[graphql(name = "completed")]
    Completed,
}

impl From<StatusUpdateInput> for ProjectStatus {
    fn from(status: StatusUpdateInput) -> Self {
        match status {
            StatusUpdateInput::New => ProjectStatus::NotStarted,
            StatusUpdateInput::Progress => ProjectStatus::InProgress,
            StatusUpdateInput::Completed => ProjectStatus::Completed,
        }
    }
}

#[Object]
impl Client {
    async fn id(&self) -> ID {
        to_id(self.id)
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn phone(&self) -> &str {
        &self.phone
    }

    /// Projects whose `clientId` points at this client
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        store(ctx)?
            .get_projects_by_client(self.id)
            .await
            .map_err(store_error)
    }
}

#[Object]
impl Project {
    async fn id(&self) -> ID {
        to_id(self.id)
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> &str {
        &self.description
    }

    /// Display value: "Not Started", "In progress" or "Completed"
    async fn status(&self) -> &str {
        self.status.as_str()
    }

    async fn client_id(&self) -> ID {
        to_id(self.client_id)
    }

    /// The owning client, or null if it no longer exists
    async fn client(&self, ctx: &Context<'_>) -> Result<Option<Client>> {
        store(ctx)?
            .get_client(self.client_id)
            .await
            .map_err(store_error)
    }
}
