use std::collections::HashMap;

/// Server-assigned entity identifiers.
pub type DbId = i64;

/// Related-entity count per owning entity id.
pub type CountMap = HashMap<DbId, usize>;
