//! Start-up identity configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::EmployeeId;
use crate::domain::identity::UserIdentity;

/// The acting user at start-up
#[derive(Debug, Clone, Deserialize, Default)]
pub struct IdentityConfig {
    /// Employee id used for membership filtering
    pub employee_id: Option<String>,

    /// Display name for logs
    pub display_name: Option<String>,
}

impl IdentityConfig {
    /// Validate identity configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.user().map(|_| ())
    }

    /// Build the initial user identity
    pub fn user(&self) -> Result<UserIdentity, ValidationError> {
        let employee_id = self
            .employee_id
            .as_ref()
            .map(|id| EmployeeId::new(id.clone()).map_err(|_| ValidationError::EmptyEmployeeId))
            .transpose()?;

        Ok(UserIdentity {
            employee_id,
            display_name: self.display_name.clone(),
        })
    }
}
