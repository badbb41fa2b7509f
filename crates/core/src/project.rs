//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::lifecycle::Lifecycle;
use crate::types::DbId;

/// A project record as returned by `/api/proyectos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "codigoProyecto")]
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fechaInicio", with = "crate::dates::wire")]
    pub start_date: NaiveDate,
    #[serde(rename = "fechaTermino", with = "crate::dates::wire")]
    pub end_date: NaiveDate,
    #[serde(rename = "registroActivo", default)]
    pub status: Lifecycle,
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> DbId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn lifecycle(&self) -> Lifecycle {
        self.status
    }
}

/// Body for creating or updating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ProjectPayload {
    #[serde(rename = "nombre")]
    #[validate(length(min = 2, max = 50, message = "project name must be 2-50 characters"))]
    pub name: String,

    #[serde(rename = "fechaInicio", with = "crate::dates::wire")]
    pub start_date: NaiveDate,

    #[serde(rename = "fechaTermino", with = "crate::dates::wire")]
    pub end_date: NaiveDate,
}

impl ProjectPayload {
    pub fn validate_fields(&self) -> Result<(), CoreError> {
        crate::validation::check(self)
    }
}

impl From<&Project> for ProjectPayload {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}
