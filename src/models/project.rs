use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::ModelError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// The value stored in the database and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Started" => Ok(ProjectStatus::NotStarted),
            "In progress" => Ok(ProjectStatus::InProgress),
            "Completed" => Ok(ProjectStatus::Completed),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub client_id: Uuid,
}

/// Fields supplied when creating a project; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub client_id: Uuid,
}

impl NewProject {
    pub fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            client_id: self.client_id,
        }
    }
}

/// A partial update: `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
