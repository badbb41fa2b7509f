//! Observable per-entity stores.
//!
//! An [`EntityStore`] owns the last fetched collection for one entity type
//! and republishes an [`EntityState`] snapshot on a `watch` channel after
//! every change. Mutations go through the store's [`EntityApi`] and then
//! update the local collection, either in place (create/update) or by
//! refetching (lifecycle and assignment changes, which may touch fields the
//! response does not carry).

use std::sync::Arc;

use tokio::sync::watch;

use devtrack_client::{ApiError, DeveloperService, EntityApi, ProjectService};
use devtrack_core::entity::Entity;
use devtrack_core::error::CoreError;
use devtrack_core::types::DbId;

use crate::notify::{Notification, Notifier};

pub type DeveloperStore = EntityStore<DeveloperService>;
pub type ProjectStore = EntityStore<ProjectService>;

/// Snapshot published to subscribers.
#[derive(Debug, Clone)]
pub struct EntityState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    /// Human-readable message of the most recent failure, if any.
    pub error: Option<String>,
    /// Bumped whenever `items` changes.
    pub revision: u64,
}

impl<T> Default for EntityState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            revision: 0,
        }
    }
}

pub struct EntityStore<A: EntityApi> {
    api: Arc<A>,
    state: watch::Sender<EntityState<A::Entity>>,
    notifier: Arc<Notifier>,
}

impl<A: EntityApi> EntityStore<A> {
    /// Create an empty store in the loading state without fetching.
    pub fn new(api: Arc<A>, notifier: Arc<Notifier>) -> Self {
        let (state, _) = watch::channel(EntityState::default());
        Self {
            api,
            state,
            notifier,
        }
    }

    /// Create a store and perform the initial fetch. A failed fetch is
    /// recorded in the state rather than returned.
    pub async fn open(api: Arc<A>, notifier: Arc<Notifier>) -> Self {
        let store = Self::new(api, notifier);
        let _ = store.fetch().await;
        store
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityState<A::Entity>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> EntityState<A::Entity> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<A::Entity> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Current revision together with the ids it covers, read atomically.
    pub fn id_snapshot(&self) -> (u64, Vec<DbId>) {
        let state = self.state.borrow();
        (state.revision, state.items.iter().map(|item| item.id()).collect())
    }

    pub fn find(&self, id: DbId) -> Option<A::Entity> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Reload the full collection. On failure the previous items are kept.
    pub async fn fetch(&self) -> Result<(), ApiError> {
        self.state.send_modify(|state| state.loading = true);

        match self.api.list().await {
            Ok(items) => {
                tracing::debug!(kind = A::Entity::KIND, count = items.len(), "Collection loaded");
                self.state.send_modify(|state| {
                    state.items = items;
                    state.error = None;
                    state.loading = false;
                    state.revision += 1;
                });
                Ok(())
            }
            Err(err) => {
                let message = failure_message("load", A::Entity::KIND, &err);
                tracing::warn!(kind = A::Entity::KIND, error = %err, "Failed to load collection");
                self.state.send_modify(|state| {
                    state.error = Some(message);
                    state.loading = false;
                });
                Err(err)
            }
        }
    }

    /// Pass-through single lookup; does not touch the collection.
    pub async fn get_by_id(&self, id: DbId) -> Result<A::Entity, ApiError> {
        self.api.get(id).await
    }

    /// Entities on the other side of the assignment relationship. Failures
    /// are recorded without a notification.
    pub async fn related(&self, id: DbId) -> Result<Vec<A::Related>, ApiError> {
        self.api.related(id).await.inspect_err(|err| {
            let message = failure_message("load related records for", A::Entity::KIND, err);
            self.state.send_modify(|state| state.error = Some(message));
        })
    }

    pub async fn create(&self, payload: &A::Payload) -> Result<A::Entity, ApiError> {
        let created = self
            .api
            .create(payload)
            .await
            .map_err(|err| self.fail("create", err))?;

        let item = created.clone();
        self.state.send_modify(|state| {
            state.items.push(item);
            state.revision += 1;
        });
        self.succeed("created");
        Ok(created)
    }

    /// Replace the matching item in place. An id not present locally leaves
    /// the collection unchanged.
    pub async fn update(&self, id: DbId, payload: &A::Payload) -> Result<A::Entity, ApiError> {
        let updated = self
            .api
            .update(id, payload)
            .await
            .map_err(|err| self.fail("update", err))?;

        let item = updated.clone();
        self.state.send_modify(|state| {
            if let Some(slot) = state.items.iter_mut().find(|existing| existing.id() == id) {
                *slot = item;
                state.revision += 1;
            }
        });
        self.succeed("updated");
        Ok(updated)
    }

    pub async fn deactivate(&self, id: DbId) -> Result<(), ApiError> {
        self.api
            .deactivate(id)
            .await
            .map_err(|err| self.fail("deactivate", err))?;
        self.refresh().await;
        self.succeed("deactivated");
        Ok(())
    }

    pub async fn reactivate(&self, id: DbId) -> Result<A::Entity, ApiError> {
        let reactivated = self
            .api
            .reactivate(id)
            .await
            .map_err(|err| self.fail("reactivate", err))?;
        self.refresh().await;
        self.succeed("reactivated");
        Ok(reactivated)
    }

    /// Link a developer and a project. Refused locally when either side is
    /// inactive; this store's side is read from the loaded items when
    /// present, the opposite side is always looked up.
    pub async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.ensure_assignable(developer_id, project_id)
            .await
            .map_err(|err| self.fail("assign", err))?;

        self.api
            .assign(developer_id, project_id)
            .await
            .map_err(|err| self.fail("assign", err))?;
        self.refresh().await;
        Ok(())
    }

    pub async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.api
            .unassign(developer_id, project_id)
            .await
            .map_err(|err| self.fail("unassign", err))?;
        self.refresh().await;
        Ok(())
    }

    async fn ensure_assignable(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        let own = A::own_side(developer_id, project_id);
        let own_active = match self.find(own) {
            Some(item) => item.is_active(),
            None => self.api.get(own).await?.is_active(),
        };
        if !own_active {
            return Err(CoreError::NotAssignable {
                entity: A::Entity::KIND,
                id: own,
            }
            .into());
        }

        let other = A::related_side(developer_id, project_id);
        if !self.api.get_related(other).await?.is_active() {
            return Err(CoreError::NotAssignable {
                entity: A::Related::KIND,
                id: other,
            }
            .into());
        }
        Ok(())
    }

    /// Refetch after a successful mutation. A failure here is recorded by
    /// `fetch` but does not fail the mutation.
    async fn refresh(&self) {
        if let Err(err) = self.fetch().await {
            tracing::warn!(kind = A::Entity::KIND, error = %err, "Refetch after mutation failed");
        }
    }

    fn fail(&self, action: &str, err: ApiError) -> ApiError {
        let message = failure_message(action, A::Entity::KIND, &err);
        tracing::error!(kind = A::Entity::KIND, action, error = %err, "Store mutation failed");
        self.state.send_modify(|state| state.error = Some(message.clone()));
        self.notifier.publish(Notification::error(message));
        err
    }

    fn succeed(&self, verb: &str) {
        self.notifier.publish(Notification::success(format!(
            "{} {verb} successfully",
            capitalize(A::Entity::KIND)
        )));
    }
}

fn failure_message(action: &str, kind: &str, err: &ApiError) -> String {
    format!("Could not {action} {kind}: {}", err.user_message())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
