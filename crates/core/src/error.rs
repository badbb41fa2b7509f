use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} is inactive and cannot accept new assignments")]
    NotAssignable { entity: &'static str, id: DbId },
}
