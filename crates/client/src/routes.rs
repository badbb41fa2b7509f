//! URL templates for every API endpoint.
//!
//! Each operation maps to exactly one deterministic path built from the
//! resource base and the ids involved.

use std::fmt;
use std::str::FromStr;

use devtrack_core::types::DbId;

pub const DEVELOPERS: &str = "/api/desarrolladores";
pub const PROJECTS: &str = "/api/proyectos";

/// Which URL shape the server uses for creating an assignment.
///
/// Unassignment is always `DELETE /api/proyectos/{p}/desarrolladores/{d}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignRoute {
    /// `POST /api/proyectos/{p}/desarrolladores/{d}`
    #[default]
    Nested,
    /// `POST /api/proyectos/{p}/asignarDesarrollador/{d}`
    Verb,
}

impl FromStr for AssignRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(Self::Nested),
            "verb" => Ok(Self::Verb),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for AssignRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nested => "nested",
            Self::Verb => "verb",
        })
    }
}

pub fn developer(id: DbId) -> String {
    format!("{DEVELOPERS}/{id}")
}

pub fn reactivate_developer(id: DbId) -> String {
    format!("{DEVELOPERS}/{id}/reactivar")
}

pub fn projects_for_developer(id: DbId) -> String {
    format!("{DEVELOPERS}/{id}/proyectos")
}

pub fn project(id: DbId) -> String {
    format!("{PROJECTS}/{id}")
}

pub fn reactivate_project(id: DbId) -> String {
    format!("{PROJECTS}/{id}/reactivar")
}

/// Collection of developers assigned to a project. Also the base for
/// unassignment (`DELETE {base}/{developer_id}`).
pub fn developers_for_project(id: DbId) -> String {
    format!("{PROJECTS}/{id}/desarrolladores")
}

pub fn assign(route: AssignRoute, developer_id: DbId, project_id: DbId) -> String {
    match route {
        AssignRoute::Nested => format!("{}/{developer_id}", developers_for_project(project_id)),
        AssignRoute::Verb => format!("{PROJECTS}/{project_id}/asignarDesarrollador/{developer_id}"),
    }
}
