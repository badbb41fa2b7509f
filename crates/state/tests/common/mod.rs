#![allow(dead_code)]

//! In-memory stand-in for the REST services, with scripted failures and a
//! call log.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use devtrack_client::{ApiError, EntityApi};
use devtrack_core::developer::{Developer, DeveloperPayload};
use devtrack_core::lifecycle::Lifecycle;
use devtrack_core::project::{Project, ProjectPayload};
use devtrack_core::types::DbId;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn developer(id: DbId, name: &str, years: u32, status: Lifecycle) -> Developer {
    Developer {
        id,
        full_name: name.to_string(),
        national_id: "11222333-4".to_string(),
        email: format!("dev{id}@example.com"),
        hire_date: day(2021, 5, 1),
        years_experience: years,
        status,
    }
}

pub fn project(id: DbId, name: &str, status: Lifecycle) -> Project {
    Project {
        id,
        name: name.to_string(),
        start_date: day(2024, 1, 1),
        end_date: day(2024, 12, 31),
        status,
    }
}

pub fn developer_payload(name: &str, years: u32) -> DeveloperPayload {
    DeveloperPayload {
        full_name: name.to_string(),
        national_id: "11222333-4".to_string(),
        email: "new@example.com".to_string(),
        hire_date: day(2023, 2, 1),
        years_experience: years,
    }
}

pub fn project_payload(name: &str) -> ProjectPayload {
    ProjectPayload {
        name: name.to_string(),
        start_date: day(2025, 1, 1),
        end_date: day(2025, 3, 31),
    }
}

pub fn server_error() -> ApiError {
    ApiError::Server {
        status: 500,
        body: r#"{"message":"boom"}"#.to_string(),
    }
}

#[derive(Default)]
pub struct Backend {
    pub developers: Vec<Developer>,
    pub projects: Vec<Project>,
    /// `(developer_id, project_id)` pairs.
    pub assignments: BTreeSet<(DbId, DbId)>,
    /// Operation names (`"list"`, `"create"`, ...) that fail with a 500.
    pub failing: HashSet<&'static str>,
    /// Ids whose relationship lookup fails.
    pub failing_related: HashSet<DbId>,
    /// Artificial latency for relationship lookups.
    pub related_delay: Option<Duration>,
    pub calls: Vec<String>,
    next_id: DbId,
}

impl Backend {
    fn record(&mut self, call: String, op: &'static str) -> Result<(), ApiError> {
        self.calls.push(call);
        if self.failing.contains(op) {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_developer(&mut self, name: &str, years: u32, status: Lifecycle) -> DbId {
        let id = self.next_id();
        self.developers.push(developer(id, name, years, status));
        id
    }

    pub fn add_project(&mut self, name: &str, status: Lifecycle) -> DbId {
        let id = self.next_id();
        self.projects.push(project(id, name, status));
        id
    }

    pub fn link(&mut self, developer_id: DbId, project_id: DbId) {
        self.assignments.insert((developer_id, project_id));
    }

    fn projects_of(&self, developer_id: DbId) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| self.assignments.contains(&(developer_id, p.id)))
            .cloned()
            .collect()
    }

    fn developers_of(&self, project_id: DbId) -> Vec<Developer> {
        self.developers
            .iter()
            .filter(|d| self.assignments.contains(&(d.id, project_id)))
            .cloned()
            .collect()
    }

    fn assign(&mut self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.record(format!("assign {developer_id} {project_id}"), "assign")?;
        self.assignments.insert((developer_id, project_id));
        Ok(())
    }

    fn unassign(&mut self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.record(format!("unassign {developer_id} {project_id}"), "unassign")?;
        if self.assignments.remove(&(developer_id, project_id)) {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: 404,
                body: r#"{"message":"assignment not found"}"#.to_string(),
            })
        }
    }
}

pub type SharedBackend = Arc<Mutex<Backend>>;

fn not_found() -> ApiError {
    ApiError::Server {
        status: 404,
        body: r#"{"message":"not found"}"#.to_string(),
    }
}

async fn related_gate(backend: &SharedBackend, id: DbId, call: String) -> Result<(), ApiError> {
    let delay = {
        let mut db = backend.lock().unwrap();
        db.calls.push(call);
        if db.failing.contains("related") || db.failing_related.contains(&id) {
            return Err(server_error());
        }
        db.related_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Ok(())
}

#[derive(Clone, Default)]
pub struct FakeDevelopers {
    pub backend: SharedBackend,
}

#[derive(Clone, Default)]
pub struct FakeProjects {
    pub backend: SharedBackend,
}

/// Both façades over one backend, so assignments are visible from either side.
pub fn fakes() -> (Arc<FakeDevelopers>, Arc<FakeProjects>, SharedBackend) {
    let backend = SharedBackend::default();
    (
        Arc::new(FakeDevelopers {
            backend: backend.clone(),
        }),
        Arc::new(FakeProjects {
            backend: backend.clone(),
        }),
        backend,
    )
}

impl FakeDevelopers {
    pub fn db(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }
}

impl FakeProjects {
    pub fn db(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }
}

#[async_trait]
impl EntityApi for FakeDevelopers {
    type Entity = Developer;
    type Related = Project;
    type Payload = DeveloperPayload;

    async fn list(&self) -> Result<Vec<Developer>, ApiError> {
        let mut db = self.db();
        db.record("list developers".into(), "list")?;
        Ok(db.developers.clone())
    }

    async fn get(&self, id: DbId) -> Result<Developer, ApiError> {
        let mut db = self.db();
        db.record(format!("get developer {id}"), "get")?;
        db.developers
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, payload: &DeveloperPayload) -> Result<Developer, ApiError> {
        payload.validate_fields()?;
        let mut db = self.db();
        db.record("create developer".into(), "create")?;
        let id = db.next_id();
        let created = Developer {
            id,
            full_name: payload.full_name.clone(),
            national_id: payload.national_id.clone(),
            email: payload.email.clone(),
            hire_date: payload.hire_date,
            years_experience: payload.years_experience,
            status: Lifecycle::Active,
        };
        db.developers.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &DeveloperPayload) -> Result<Developer, ApiError> {
        payload.validate_fields()?;
        let mut db = self.db();
        db.record(format!("update developer {id}"), "update")?;
        let record = db
            .developers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(not_found)?;
        record.full_name = payload.full_name.clone();
        record.national_id = payload.national_id.clone();
        record.email = payload.email.clone();
        record.hire_date = payload.hire_date;
        record.years_experience = payload.years_experience;
        Ok(record.clone())
    }

    async fn deactivate(&self, id: DbId) -> Result<(), ApiError> {
        let mut db = self.db();
        db.record(format!("deactivate developer {id}"), "deactivate")?;
        let record = db
            .developers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(not_found)?;
        record.status = Lifecycle::Inactive;
        Ok(())
    }

    async fn reactivate(&self, id: DbId) -> Result<Developer, ApiError> {
        let mut db = self.db();
        db.record(format!("reactivate developer {id}"), "reactivate")?;
        let record = db
            .developers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(not_found)?;
        record.status = Lifecycle::Active;
        Ok(record.clone())
    }

    async fn related(&self, id: DbId) -> Result<Vec<Project>, ApiError> {
        related_gate(&self.backend, id, format!("projects of {id}")).await?;
        Ok(self.db().projects_of(id))
    }

    async fn get_related(&self, id: DbId) -> Result<Project, ApiError> {
        let mut db = self.db();
        db.record(format!("get project {id}"), "get_related")?;
        db.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.db().assign(developer_id, project_id)
    }

    async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.db().unassign(developer_id, project_id)
    }

    fn own_side(developer_id: DbId, _project_id: DbId) -> DbId {
        developer_id
    }

    fn related_side(_developer_id: DbId, project_id: DbId) -> DbId {
        project_id
    }
}

#[async_trait]
impl EntityApi for FakeProjects {
    type Entity = Project;
    type Related = Developer;
    type Payload = ProjectPayload;

    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let mut db = self.db();
        db.record("list projects".into(), "list")?;
        Ok(db.projects.clone())
    }

    async fn get(&self, id: DbId) -> Result<Project, ApiError> {
        let mut db = self.db();
        db.record(format!("get project {id}"), "get")?;
        db.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        payload.validate_fields()?;
        let mut db = self.db();
        db.record("create project".into(), "create")?;
        let id = db.next_id();
        let created = Project {
            id,
            name: payload.name.clone(),
            start_date: payload.start_date,
            end_date: payload.end_date,
            status: Lifecycle::Active,
        };
        db.projects.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &ProjectPayload) -> Result<Project, ApiError> {
        payload.validate_fields()?;
        let mut db = self.db();
        db.record(format!("update project {id}"), "update")?;
        let record = db
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        record.name = payload.name.clone();
        record.start_date = payload.start_date;
        record.end_date = payload.end_date;
        Ok(record.clone())
    }

    async fn deactivate(&self, id: DbId) -> Result<(), ApiError> {
        let mut db = self.db();
        db.record(format!("deactivate project {id}"), "deactivate")?;
        let record = db
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        record.status = Lifecycle::Inactive;
        Ok(())
    }

    async fn reactivate(&self, id: DbId) -> Result<Project, ApiError> {
        let mut db = self.db();
        db.record(format!("reactivate project {id}"), "reactivate")?;
        let record = db
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        record.status = Lifecycle::Active;
        Ok(record.clone())
    }

    async fn related(&self, id: DbId) -> Result<Vec<Developer>, ApiError> {
        related_gate(&self.backend, id, format!("developers of {id}")).await?;
        Ok(self.db().developers_of(id))
    }

    async fn get_related(&self, id: DbId) -> Result<Developer, ApiError> {
        let mut db = self.db();
        db.record(format!("get developer {id}"), "get_related")?;
        db.developers
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn assign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.db().assign(developer_id, project_id)
    }

    async fn unassign(&self, developer_id: DbId, project_id: DbId) -> Result<(), ApiError> {
        self.db().unassign(developer_id, project_id)
    }

    fn own_side(_developer_id: DbId, project_id: DbId) -> DbId {
        project_id
    }

    fn related_side(developer_id: DbId, _project_id: DbId) -> DbId {
        developer_id
    }
}
