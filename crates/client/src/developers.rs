//! Developer resource service (`/api/desarrolladores`).

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::IgnoredAny;

use devtrack_core::developer::{Developer, DeveloperPayload};
use devtrack_core::project::Project;
use devtrack_core::types::DbId;

use crate::api::EntityApi;
use crate::error::ApiError;
use crate::routes;
use crate::transport::ApiClient;

/// Maps developer operations onto their fixed URL templates.
#[derive(Debug, Clone)]
pub struct DeveloperService {
    client: Arc<ApiClient>,
}

impl DeveloperService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /api/desarrolladores/{id}/proyectos`
    pub async fn projects_for_developer(&self, developer_id: DbId) -> Result<Vec<Project>, ApiError> {
        self.client
            .get(&routes::projects_for_developer(developer_id))
            .await
            .inspect_err(|e| {
                tracing::error!(developer_id, error = %e, "Failed to list projects for developer")
            })
    }
}

#[async_trait]
impl EntityApi for DeveloperService {
    type Entity = Developer;
    type Related = Project;
    type Payload = DeveloperPayload;

    async fn list(&self) -> Result<Vec<Developer>, ApiError> {
        self.client
            .get(routes::DEVELOPERS)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list developers"))
    }

    async fn get(&self, id: DbId) -> Result<Developer, ApiError> {
        self.client
            .get(&routes::developer(id))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to fetch developer"))
    }

    async fn create(&self, payload: &DeveloperPayload) -> Result<Developer, ApiError> {
        payload.validate_fields()?;
        let created: Developer = self
            .client
            .post(routes::DEVELOPERS, payload)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create developer"))?;
        tracing::info!(id = created.id, "Developer created");
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &DeveloperPayload) -> Result<Developer, ApiError> {
        payload.validate_fields()?;
        self.client
            .put(&routes::developer(id), payload)
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to update developer"))
    }

    async fn deactivate(&self, id: DbId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(routes::DEVELOPERS, id)
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to deactivate developer"))?;
        tracing::info!(id, "Developer deactivated");
        Ok(())
    }

    async fn reactivate(&self, id: DbId) -> Result<Developer, ApiError> {
        self.client
            .put(&routes::reactivate_developer(id), &serde_json::json!({}))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to reactivate developer"))
    }

    async fn related(&self, id: DbId) -> Result<Vec<Project>, ApiError> {
        self.projects_for_developer(id).await
    }

    async fn get_related(&self, id: DbId) -> Result<Project, ApiError> {
        self.client
            .get(&routes::project(id))
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "Failed to fetch project"))
    }

    async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        let path = routes::assign(self.client.assign_route(), developer_id, project_id);
        self.client
            .post::<IgnoredAny, _>(&path, &serde_json::json!({}))
            .await
            .inspect_err(|e| {
                tracing::error!(developer_id, project_id, error = %e, "Failed to assign project")
            })?;
        Ok(())
    }

    async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&routes::developers_for_project(project_id), developer_id)
            .await
            .inspect_err(|e| {
                tracing::error!(developer_id, project_id, error = %e, "Failed to unassign project")
            })?;
        Ok(())
    }

    fn own_side(developer_id: DbId, _project_id: DbId) -> DbId {
        developer_id
    }

    fn related_side(_developer_id: DbId, project_id: DbId) -> DbId {
        project_id
    }
}
