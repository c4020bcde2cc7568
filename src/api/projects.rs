//! Project (BuJo) endpoints.
//!
//! The project list is served with an ETag; passing the last seen tag back
//! lets the server answer `304 Not Modified` instead of the full tree.

use reqwest::{Method, StatusCode, header};
use serde::{Deserialize, Serialize};

use super::{ApiClient, read_json};
use crate::error::Result;
use crate::hierarchy::HierarchyItem;
use crate::tasks::model::Group;

pub const PROJECTS_ROUTE: &str = "/api/projects";
pub const UPDATE_SHARED_PROJECTS_ORDER_ROUTE: &str = "/api/updateSharedProjectsOrder";

pub fn project_route(project_id: i64) -> String {
    format!("{PROJECTS_ROUTE}/{project_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    Todo,
    Note,
    Ledger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: String,
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default)]
    pub sub_projects: Vec<Project>,
    #[serde(default)]
    pub shared: bool,
}

impl Project {
    /// The relation tree rooted at this project.
    pub fn hierarchy(&self) -> HierarchyItem {
        HierarchyItem {
            id: self.id,
            s: self.sub_projects.iter().map(Project::hierarchy).collect(),
        }
    }
}

/// Projects shared with the user by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsWithOwner {
    pub owner: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projects {
    #[serde(default)]
    pub owned: Vec<Project>,
    #[serde(default)]
    pub shared: Vec<ProjectsWithOwner>,
}

/// Result of a conditional project list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsFetch {
    /// The server sent a new list.
    Modified {
        projects: Projects,
        etag: Option<String>,
    },
    /// The caller's copy matching the sent ETag is still current.
    NotModified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectParams {
    pub name: String,
    pub project_type: ProjectType,
    pub group_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

/// New display order of project owners in the "shared with me" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSharedProjectsOrderParams {
    pub project_owners: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectsApi {
    client: ApiClient,
}

impl ProjectsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch owned and shared projects, conditionally on `etag`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn get_projects(&self, etag: Option<&str>) -> Result<ProjectsFetch> {
        let mut request = self.client.request(Method::GET, PROJECTS_ROUTE)?;
        if let Some(tag) = etag {
            request = request.header(header::IF_NONE_MATCH, tag);
        }
        let response = self.client.send(request).await?;
        if response.status() == StatusCode::NOT_MODIFIED {
            tracing::debug!("project list not modified");
            return Ok(ProjectsFetch::NotModified);
        }
        let etag = response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let projects = read_json(response).await?;
        Ok(ProjectsFetch::Modified { projects, etag })
    }

    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn create_project(&self, params: &CreateProjectParams) -> Result<Project> {
        let response = self.client.do_post(PROJECTS_ROUTE, Some(params)).await?;
        read_json(response).await
    }

    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn update_project(
        &self,
        project_id: i64,
        params: &UpdateProjectParams,
    ) -> Result<Project> {
        let response = self
            .client
            .do_patch(&project_route(project_id), params)
            .await?;
        read_json(response).await
    }

    /// Delete a project together with its sub-projects.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn delete_project(&self, project_id: i64) -> Result<()> {
        self.client.do_delete(&project_route(project_id)).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn update_shared_projects_order(
        &self,
        params: &UpdateSharedProjectsOrderParams,
    ) -> Result<()> {
        self.client
            .do_post(UPDATE_SHARED_PROJECTS_ORDER_ROUTE, Some(params))
            .await?;
        Ok(())
    }

    /// Replace the nesting of the user's owned projects.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn update_project_relations(&self, projects: &[Project]) -> Result<()> {
        self.client.do_put(PROJECTS_ROUTE, projects).await?;
        Ok(())
    }
}
