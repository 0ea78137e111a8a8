//! HTTP API module for the leave tracker.
//!
//! This module provides REST endpoints for registering employees,
//! submitting leave requests, running batch approval and reading
//! department statistics.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateEmployeeRequest, CreateLeaveRequest, LeaveRequestView, ProcessRequest, ProcessResponse,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
