//! Developer entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::lifecycle::Lifecycle;
use crate::types::DbId;

/// A developer record as returned by `/api/desarrolladores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    #[serde(rename = "codigoDesarrollador")]
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "rut")]
    pub national_id: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
    #[serde(rename = "fechaContratacion", with = "crate::dates::wire")]
    pub hire_date: NaiveDate,
    #[serde(rename = "aniosExperiencia")]
    pub years_experience: u32,
    #[serde(rename = "registroActivo", default)]
    pub status: Lifecycle,
}

impl Entity for Developer {
    const KIND: &'static str = "developer";

    fn id(&self) -> DbId {
        self.id
    }

    fn name(&self) -> &str {
        &self.full_name
    }

    fn lifecycle(&self) -> Lifecycle {
        self.status
    }
}

/// Body for creating or updating a developer.
///
/// The id and the active flag are server-owned and never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DeveloperPayload {
    #[serde(rename = "nombre")]
    #[validate(length(min = 2, max = 200, message = "full name must be 2-200 characters"))]
    pub full_name: String,

    #[serde(rename = "rut")]
    #[validate(length(min = 7, max = 10, message = "national id must be 7-10 characters"))]
    pub national_id: String,

    #[serde(rename = "correoElectronico")]
    #[validate(
        email(message = "email is not a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,

    #[serde(rename = "fechaContratacion", with = "crate::dates::wire")]
    pub hire_date: NaiveDate,

    #[serde(rename = "aniosExperiencia")]
    #[validate(range(min = 1, max = 50, message = "years of experience must be 1-50"))]
    pub years_experience: u32,
}

impl DeveloperPayload {
    pub fn validate_fields(&self) -> Result<(), CoreError> {
        crate::validation::check(self)
    }
}

/// Prefill an edit form from an existing record.
impl From<&Developer> for DeveloperPayload {
    fn from(dev: &Developer) -> Self {
        Self {
            full_name: dev.full_name.clone(),
            national_id: dev.national_id.clone(),
            email: dev.email.clone(),
            hire_date: dev.hire_date,
            years_experience: dev.years_experience,
        }
    }
}
