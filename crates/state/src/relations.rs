//! Relationship resolution between developers and projects.
//!
//! The API only exposes per-entity relationship lookups, so per-row counts
//! are built by issuing one lookup per entity concurrently. A failing lookup
//! is logged and counted as empty; it never aborts the batch.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use devtrack_client::EntityApi;
use devtrack_core::entity::Entity;
use devtrack_core::types::{CountMap, DbId};

use crate::store::EntityStore;

/// Look up the related entities of every id concurrently.
///
/// The result holds an entry for each requested id; failed lookups map to
/// an empty list.
pub async fn resolve_related<A: EntityApi>(api: &A, ids: &[DbId]) -> HashMap<DbId, Vec<A::Related>> {
    let lookups = ids.iter().map(|&id| async move {
        match api.related(id).await {
            Ok(related) => (id, related),
            Err(err) => {
                tracing::warn!(
                    kind = A::Entity::KIND,
                    id,
                    error = %err,
                    "Relationship lookup failed, treating as empty"
                );
                (id, Vec::new())
            }
        }
    });

    join_all(lookups).await.into_iter().collect()
}

/// Like [`resolve_related`] but keeps only the size of each list.
pub async fn resolve_counts<A: EntityApi>(api: &A, ids: &[DbId]) -> CountMap {
    resolve_related(api, ids)
        .await
        .into_iter()
        .map(|(id, related)| (id, related.len()))
        .collect()
}

/// Per-row relationship counts for one store, recomputed only when the
/// store's revision moves.
#[derive(Debug, Clone, Default)]
pub struct RelationCounts {
    counts: CountMap,
    revision: Option<u64>,
}

impl RelationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> &CountMap {
        &self.counts
    }

    /// Entities without a computed count read as zero.
    pub fn count(&self, id: DbId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn is_stale(&self, revision: u64) -> bool {
        self.revision != Some(revision)
    }

    /// Recompute against the store's current collection if it changed since
    /// the last run. Returns whether a recomputation happened.
    pub async fn refresh<A: EntityApi>(&mut self, store: &EntityStore<A>) -> bool {
        let (revision, ids) = store.id_snapshot();
        if !self.is_stale(revision) {
            return false;
        }
        self.counts = resolve_counts(store.api().as_ref(), &ids).await;
        self.revision = Some(revision);
        true
    }
}

/// Keep a [`CountMap`] in sync with a store in the background.
///
/// The task recomputes after every published change of the store's
/// collection and stops as soon as every receiver has been dropped, even
/// while the store stays idle.
pub fn spawn_count_tracker<A: EntityApi>(
    store: Arc<EntityStore<A>>,
) -> (watch::Receiver<CountMap>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(CountMap::new());

    let handle = tokio::spawn(async move {
        let mut changes = store.subscribe();
        let mut tracker = RelationCounts::new();
        loop {
            if tracker.refresh(&store).await {
                tx.send_replace(tracker.counts().clone());
            }
            tokio::select! {
                _ = tx.closed() => break,
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(kind = A::Entity::KIND, "Count tracker stopped");
    });

    (rx, handle)
}

/// The set of entities currently assigned to one owner, for rendering
/// assignment toggles.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    owner: DbId,
    assigned: HashSet<DbId>,
}

impl Membership {
    /// Load the owner's related ids through the store. A failed lookup is
    /// recorded on the store and yields an empty membership.
    pub async fn load<A: EntityApi>(store: &EntityStore<A>, owner: DbId) -> Self {
        let assigned = match store.related(owner).await {
            Ok(related) => related.iter().map(|item| item.id()).collect(),
            Err(_) => HashSet::new(),
        };
        Self { owner, assigned }
    }

    pub fn from_related<R: Entity>(owner: DbId, related: &[R]) -> Self {
        Self {
            owner,
            assigned: related.iter().map(|item| item.id()).collect(),
        }
    }

    pub fn owner(&self) -> DbId {
        self.owner
    }

    pub fn is_assigned(&self, id: DbId) -> bool {
        self.assigned.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Candidates that may be offered for a new assignment: active ones only.
pub fn assignable<T: Entity>(items: &[T]) -> Vec<&T> {
    items.iter().filter(|item| item.is_active()).collect()
}
