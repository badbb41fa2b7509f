//! Project resource service (`/api/proyectos`).

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::IgnoredAny;

use devtrack_core::developer::Developer;
use devtrack_core::project::{Project, ProjectPayload};
use devtrack_core::types::DbId;

use crate::api::EntityApi;
use crate::error::ApiError;
use crate::routes;
use crate::transport::ApiClient;

/// Maps project operations onto their fixed URL templates.
#[derive(Debug, Clone)]
pub struct ProjectService {
    client: Arc<ApiClient>,
}

impl ProjectService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /api/proyectos/{id}/desarrolladores`
    pub async fn developers_for_project(&self, project_id: DbId) -> Result<Vec<Developer>, ApiError> {
        self.client
            .get(&routes::developers_for_project(project_id))
            .await
            .inspect_err(|e| {
                tracing::error!(project_id, error = %e, "Failed to list developers for project")
            })
    }
}

#[async_trait]
impl EntityApi for ProjectService {
    type Entity = Project;
    type Related = Developer;
    type Payload = ProjectPayload;

    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.client
            .get(routes::PROJECTS)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list projects"))
    }

    async fn get(&self, id: DbId) -> Result<Project, ApiError> {
        self.client
            .get(&routes::project(id))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to fetch project"))
    }

    async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        payload.validate_fields()?;
        let created: Project = self
            .client
            .post(routes::PROJECTS, payload)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create project"))?;
        tracing::info!(id = created.id, "Project created");
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &ProjectPayload) -> Result<Project, ApiError> {
        payload.validate_fields()?;
        self.client
            .put(&routes::project(id), payload)
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to update project"))
    }

    async fn deactivate(&self, id: DbId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(routes::PROJECTS, id)
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to deactivate project"))?;
        tracing::info!(id, "Project deactivated");
        Ok(())
    }

    async fn reactivate(&self, id: DbId) -> Result<Project, ApiError> {
        self.client
            .put(&routes::reactivate_project(id), &serde_json::json!({}))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to reactivate project"))
    }

    async fn related(&self, id: DbId) -> Result<Vec<Developer>, ApiError> {
        self.developers_for_project(id).await
    }

    async fn get_related(&self, id: DbId) -> Result<Developer, ApiError> {
        self.client
            .get(&routes::developer(id))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to fetch developer"))
    }

    async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        let path = routes::assign(self.client.assign_route(), developer_id, project_id);
        self.client
            .post::<IgnoredAny, _>(&path, &serde_json::json!({}))
            .await
            .inspect_err(|e| {
                tracing::error!(developer_id, project_id, error = %e, "Failed to assign developer")
            })?;
        Ok(())
    }

    async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&routes::developers_for_project(project_id), developer_id)
            .await
            .inspect_err(|e| {
                tracing::error!(developer_id, project_id, error = %e, "Failed to unassign developer")
            })?;
        Ok(())
    }

    fn own_side(_developer_id: DbId, project_id: DbId) -> DbId {
        project_id
    }

    fn related_side(developer_id: DbId, _project_id: DbId) -> DbId {
        developer_id
    }
}
