use async_graphql::{Context, Object, Result, ID};

use super::error::store_error;
use super::types::{parse_id, store};
use crate::models::{Client, Project};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All projects, in insertion order
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        store(ctx)?.list_projects().await.map_err(store_error)
    }

    /// A single project, or null if no project has this id
    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        let id = parse_id(&id)?;
        store(ctx)?.get_project(id).await.map_err(store_error)
    }

    /// All clients, in insertion order
    async fn clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        store(ctx)?.list_clients().await.map_err(store_error)
    }

    /// A single client, or null if no client has this id
    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Client>> {
        let id = parse_id(&id)?;
        store(ctx)?.get_client(id).await.map_err(store_error)
    }
}
