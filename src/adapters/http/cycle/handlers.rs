//! HTTP handlers for cycle selection endpoints.
//!
//! These handlers connect Axum routes to the shared `CycleContext`.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::identity::WatchIdentityProvider;
use crate::application::cycle::CycleContext;
use crate::domain::foundation::ValidationError;

use super::dto::{
    CycleStateResponse, ErrorResponse, SelectCycleRequest, SetIdentityRequest,
    SetIdentityResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the cycle endpoints.
#[derive(Clone)]
pub struct CycleAppState {
    pub context: CycleContext,
    pub identity: Arc<WatchIdentityProvider>,
}

impl CycleAppState {
    pub fn new(context: CycleContext, identity: Arc<WatchIdentityProvider>) -> Self {
        Self { context, identity }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/cycles - Current cycle list and selection
pub async fn get_cycles(State(state): State<CycleAppState>) -> Json<CycleStateResponse> {
    Json(state.context.snapshot())
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (PUT/POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// PUT /api/cycles/selected - Select a cycle, or clear with `null`
pub async fn set_selected_cycle(
    State(state): State<CycleAppState>,
    Json(request): Json<Option<SelectCycleRequest>>,
) -> Result<Json<CycleStateResponse>, CycleApiError> {
    let option = request.map(SelectCycleRequest::into_option).transpose()?;

    state.context.set_selected_cycle(option);

    Ok(Json(state.context.snapshot()))
}

/// POST /api/cycles/refresh - Force a re-sync with the cycle service
pub async fn refresh_cycles(State(state): State<CycleAppState>) -> Json<CycleStateResponse> {
    state.context.refresh_cycles().await;
    Json(state.context.snapshot())
}

/// PUT /api/identity - Switch the acting user
pub async fn set_identity(
    State(state): State<CycleAppState>,
    Json(request): Json<SetIdentityRequest>,
) -> Result<impl IntoResponse, CycleApiError> {
    let user = request.into_identity()?;
    let changed = state.identity.set_user(user);

    Ok((StatusCode::ACCEPTED, Json(SetIdentityResponse { changed })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for cycle endpoints.
#[derive(Debug)]
pub enum CycleApiError {
    Validation(ValidationError),
}

impl From<ValidationError> for CycleApiError {
    fn from(err: ValidationError) -> Self {
        CycleApiError::Validation(err)
    }
}

impl IntoResponse for CycleApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            CycleApiError::Validation(err) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(&err))
            }
        };

        (status, Json(error)).into_response()
    }
}
