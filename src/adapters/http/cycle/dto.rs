//! HTTP DTOs (Data Transfer Objects) for cycle endpoints.
//!
//! These types define the JSON request/response structure for the cycle API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::cycle::{CycleOption, CycleSnapshot};
use crate::domain::foundation::{EmployeeId, ValidationError};
use crate::domain::identity::UserIdentity;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to select a cycle. A JSON `null` body clears the selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCycleRequest {
    pub cycle_id: String,
    pub cycle_name: String,
}

impl SelectCycleRequest {
    pub fn into_option(self) -> Result<CycleOption, ValidationError> {
        CycleOption::new(self.cycle_id, self.cycle_name)
    }
}

/// Request to switch the acting user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIdentityRequest {
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SetIdentityRequest {
    pub fn into_identity(self) -> Result<UserIdentity, ValidationError> {
        Ok(UserIdentity {
            employee_id: self.employee_id.map(EmployeeId::new).transpose()?,
            display_name: self.display_name,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Cycle selection state as seen by consumers.
pub type CycleStateResponse = CycleSnapshot;

/// Response to an identity switch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIdentityResponse {
    /// Whether the acting user actually changed (and a refresh was triggered).
    pub changed: bool,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn validation(err: &ValidationError) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: err.to_string(),
            details: Some(serde_json::json!({ "field": err.field() })),
        }
    }
}
