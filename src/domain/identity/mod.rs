//! Acting user identity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::EmployeeId;

/// The user on whose behalf cycles are listed.
///
/// Only `employee_id` takes part in cycle visibility; the remaining fields are
/// carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserIdentity {
    /// No signed-in user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A user identified by employee id.
    pub fn employee(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn employee_id(&self) -> Option<&EmployeeId> {
        self.employee_id.as_ref()
    }
}
