use devtrack_client::{ApiError, EntityApi};
use devtrack_core::types::DbId;

/// One entity together with everything assigned to it.
#[derive(Debug, Clone)]
pub struct Detail<E, R> {
    pub entity: E,
    pub related: Vec<R>,
}

/// Fetch an entity and its related records concurrently. Either failure
/// fails the whole load.
pub async fn load_detail<A: EntityApi>(
    api: &A,
    id: DbId,
) -> Result<Detail<A::Entity, A::Related>, ApiError> {
    let (entity, related) = tokio::try_join!(api.get(id), api.related(id))?;
    Ok(Detail { entity, related })
}
