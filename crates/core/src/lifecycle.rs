//! Soft-delete lifecycle state.
//!
//! The remote API models deactivation as a boolean `registroActivo` flag.
//! Entities are never physically removed; an inactive entity stays listable
//! until a filter hides it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether an entity is live or soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Inactive,
}

impl Lifecycle {
    /// Map the wire-level boolean flag to a lifecycle state.
    pub fn from_flag(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Human-readable label used by list output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl Serialize for Lifecycle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_active())
    }
}

impl<'de> Deserialize<'de> for Lifecycle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Self::from_flag)
    }
}
