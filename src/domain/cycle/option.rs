//! CycleOption value object.
//!
//! A `CycleOption` is the client-side handle for an assessment cycle: the pair
//! of identifier and display name. It is the unit that gets selected,
//! persisted and compared during reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A selectable assessment cycle.
///
/// Both fields are guaranteed non-empty. Equality is structural: two options
/// are equal only when id and name both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCycleOption")]
pub struct CycleOption {
    cycle_id: String,
    cycle_name: String,
}

/// Unvalidated wire shape, used so deserialization goes through `new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCycleOption {
    cycle_id: String,
    cycle_name: String,
}

impl CycleOption {
    /// Creates a new option, rejecting empty id or name.
    pub fn new(
        cycle_id: impl Into<String>,
        cycle_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let cycle_id = cycle_id.into();
        let cycle_name = cycle_name.into();

        if cycle_id.is_empty() {
            return Err(ValidationError::empty_field("cycle_id"));
        }
        if cycle_name.is_empty() {
            return Err(ValidationError::empty_field("cycle_name"));
        }

        Ok(Self {
            cycle_id,
            cycle_name,
        })
    }

    pub fn cycle_id(&self) -> &str {
        &self.cycle_id
    }

    pub fn cycle_name(&self) -> &str {
        &self.cycle_name
    }
}

impl TryFrom<RawCycleOption> for CycleOption {
    type Error = ValidationError;

    fn try_from(raw: RawCycleOption) -> Result<Self, Self::Error> {
        Self::new(raw.cycle_id, raw.cycle_name)
    }
}

impl fmt::Display for CycleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.cycle_name, self.cycle_id)
    }
}
