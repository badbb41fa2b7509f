//! Multi-criteria list filtering for developers and projects.
//!
//! Every populated field of a filter must hold for an item to be kept
//! (logical AND). Unpopulated fields impose no constraint. Ranges are
//! inclusive on both ends.
//!
//! Filters are edited through [`Range::set_min`] / [`Range::set_max`] so the
//! min-above-max rule is applied at edit time rather than at match time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::developer::Developer;
use crate::entity::Entity;
use crate::lifecycle::Lifecycle;
use crate::project::Project;
use crate::types::CountMap;

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Inclusive range with independently optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    /// `true` if `value` satisfies both bounds that are present.
    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Set the lower bound.
    ///
    /// If the new lower bound exceeds the current upper bound, the upper
    /// bound is cleared instead of rejecting the edit.
    pub fn set_min(&mut self, min: Option<T>) {
        self.min = min;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                self.max = None;
            }
        }
    }

    /// Set the upper bound. No cross-field adjustment is made.
    pub fn set_max(&mut self, max: Option<T>) {
        self.max = max;
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Tri-state status constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, lifecycle: Lifecycle) -> bool {
        match self {
            Self::All => true,
            Self::Active => lifecycle.is_active(),
            Self::Inactive => !lifecycle.is_active(),
        }
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Filter trait and evaluation
// ---------------------------------------------------------------------------

/// A filter over entities of type `T`.
///
/// `related_count` is the derived count of opposite entities (projects for a
/// developer, developers for a project).
pub trait Filter<T> {
    fn matches(&self, item: &T, related_count: usize) -> bool;

    /// Whether any field currently constrains the result.
    fn is_active(&self) -> bool;
}

/// Keep the items that satisfy `filter`, preserving input order.
///
/// Ids missing from `counts` are treated as having zero related entities.
pub fn apply_filter<'a, T, F>(items: &'a [T], filter: &F, counts: &CountMap) -> Vec<&'a T>
where
    T: Entity,
    F: Filter<T>,
{
    items
        .iter()
        .filter(|item| {
            let count = counts.get(&item.id()).copied().unwrap_or(0);
            filter.matches(item, count)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Developer filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeveloperFilter {
    pub search_name: String,
    pub experience: Range<u32>,
    pub status: StatusFilter,
    /// Assigned-project count.
    pub projects: Range<usize>,
}

impl Filter<Developer> for DeveloperFilter {
    fn matches(&self, dev: &Developer, project_count: usize) -> bool {
        name_matches(&dev.full_name, &self.search_name)
            && self.experience.contains(dev.years_experience)
            && self.status.matches(dev.status)
            && self.projects.contains(project_count)
    }

    fn is_active(&self) -> bool {
        !self.search_name.is_empty()
            || !self.experience.is_unbounded()
            || self.status != StatusFilter::All
            || !self.projects.is_unbounded()
    }
}

// ---------------------------------------------------------------------------
// Project filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub search_name: String,
    pub start_date: Range<NaiveDate>,
    pub end_date: Range<NaiveDate>,
    pub status: StatusFilter,
    /// Assigned-developer count.
    pub developers: Range<usize>,
}

impl Filter<Project> for ProjectFilter {
    fn matches(&self, project: &Project, developer_count: usize) -> bool {
        name_matches(&project.name, &self.search_name)
            && self.start_date.contains(project.start_date)
            && self.end_date.contains(project.end_date)
            && self.status.matches(project.status)
            && self.developers.contains(developer_count)
    }

    fn is_active(&self) -> bool {
        !self.search_name.is_empty()
            || !self.start_date.is_unbounded()
            || !self.end_date.is_unbounded()
            || self.status != StatusFilter::All
            || !self.developers.is_unbounded()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
