mod client;
mod project;

use thiserror::Error;

pub use client::{Client, NewClient};
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown project status: {0:?}")]
    UnknownStatus(String),
}
