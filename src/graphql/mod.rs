//! GraphQL API over the client and project store

mod error;
mod mutation;
mod query;
mod types;

use std::sync::Arc;

use async_graphql::{http::GraphiQLSource, EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Store;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// GraphQL schema type
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Per-schema data shared by every resolver
pub struct GraphQLContext {
    pub store: Arc<dyn Store>,
}

/// Limits applied to incoming documents
#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    pub depth: usize,
    pub complexity: usize,
}

impl From<&Config> for QueryLimits {
    fn from(config: &Config) -> Self {
        Self {
            depth: config.query_depth_limit,
            complexity: config.query_complexity_limit,
        }
    }
}

/// Build the schema once; it is immutable afterwards
pub fn create_schema(store: Arc<dyn Store>, limits: QueryLimits) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(GraphQLContext { store })
        .limit_depth(limits.depth)
        .limit_complexity(limits.complexity)
        .finish()
}

/// SDL of the schema, without any attached store
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// Create the HTTP router serving `/graphql` and `/health`
pub fn create_router(schema: AppSchema, graphiql: bool) -> Router {
    let graphql = if graphiql {
        get(graphiql_page).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route("/graphql", graphql)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(schema)
}

async fn graphiql_page() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn graphql_handler(State(schema): State<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn health() -> &'static str {
    "ok"
}
