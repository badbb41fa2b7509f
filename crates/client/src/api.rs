//! The service seam the stateful stores are written against.

use async_trait::async_trait;

use devtrack_core::entity::Entity;
use devtrack_core::types::DbId;

use crate::error::ApiError;

/// CRUD, lifecycle and relationship operations for one entity type.
///
/// Implemented by [`DeveloperService`](crate::DeveloperService) and
/// [`ProjectService`](crate::ProjectService); tests substitute in-memory
/// fakes. Implementations issue exactly one request per call and never
/// retry or swallow failures.
#[async_trait]
pub trait EntityApi: Send + Sync + 'static {
    /// The entity this service owns.
    type Entity: Entity;
    /// The entity on the other side of the assignment relationship.
    type Related: Entity;
    /// Create/update body.
    type Payload: Send + Sync;

    async fn list(&self) -> Result<Vec<Self::Entity>, ApiError>;

    async fn get(&self, id: DbId) -> Result<Self::Entity, ApiError>;

    async fn create(&self, payload: &Self::Payload) -> Result<Self::Entity, ApiError>;

    async fn update(&self, id: DbId, payload: &Self::Payload) -> Result<Self::Entity, ApiError>;

    /// Soft-delete: the record stays listable with its flag cleared.
    async fn deactivate(&self, id: DbId) -> Result<(), ApiError>;

    async fn reactivate(&self, id: DbId) -> Result<Self::Entity, ApiError>;

    /// All entities of the opposite type assigned to `id`.
    async fn related(&self, id: DbId) -> Result<Vec<Self::Related>, ApiError>;

    /// A single entity of the opposite type, by its own id.
    async fn get_related(&self, id: DbId) -> Result<Self::Related, ApiError>;

    async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError>;

    async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError>;

    /// Pick the id on this service's side of an assignment pair.
    fn own_side(developer_id: DbId, project_id: DbId) -> DbId;

    /// Pick the id on the opposite side of an assignment pair.
    fn related_side(developer_id: DbId, project_id: DbId) -> DbId;
}
