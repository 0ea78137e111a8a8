//! HTTP request handlers for the leave tracker API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::task::JoinError;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::models::{Employee, EmployeeId};

use super::request::{
    CreateEmployeeRequest, CreateLeaveRequest, LeaveRequestView, ProcessRequest, ProcessResponse,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(create_employee_handler))
        .route("/employees/:id/history", get(employee_history_handler))
        .route("/leave-requests", post(create_leave_request_handler))
        .route("/leave-requests/process", post(process_pending_handler))
        .route("/departments/stats", get(department_stats_handler))
        .with_state(state)
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let employee: Employee = request.into();
    let registered = employee.clone();
    if let Err(err) = state
        .with_tracker(move |tracker| tracker.add_employee(registered))
        .await
    {
        return join_error_response(err, correlation_id);
    }

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id(),
        "Employee created"
    );
    json_response(StatusCode::CREATED, employee)
}

/// Handler for GET /employees/:id/history.
///
/// Unknown employees have an empty history.
async fn employee_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> Response {
    let tracker = state.tracker();
    let history: Vec<LeaveRequestView> = tracker
        .employee_leave_history(employee_id)
        .into_iter()
        .map(LeaveRequestView::from)
        .collect();

    json_response(StatusCode::OK, history)
}

/// Handler for POST /leave-requests.
async fn create_leave_request_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeaveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create leave request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let created = state
        .with_tracker(move |tracker| {
            tracker
                .create_leave_request(
                    request.employee_id,
                    request.start_date,
                    request.end_date,
                    request.reason,
                    request.leave_type,
                    request.has_medical_certificate,
                )
                .map(LeaveRequestView::from)
        })
        .await;

    match created {
        Ok(Ok(view)) => {
            info!(
                correlation_id = %correlation_id,
                request_id = view.id,
                "Leave request queued"
            );
            json_response(StatusCode::CREATED, view)
        }
        Ok(Err(err)) => error_response(err, correlation_id),
        Err(err) => join_error_response(err, correlation_id),
    }
}

/// Handler for POST /leave-requests/process.
async fn process_pending_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pending leave requests");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if request.approver.trim().is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("approver must not be empty"),
        );
    }

    let approver = request.approver;
    let result = state
        .with_tracker(move |tracker| tracker.process_pending_requests(&approver))
        .await;
    match result {
        Ok(Ok(outcomes)) => {
            info!(
                correlation_id = %correlation_id,
                decided = outcomes.len(),
                approved = outcomes.iter().filter(|o| o.is_approved()).count(),
                "Pending leave requests processed"
            );
            json_response(StatusCode::OK, ProcessResponse { outcomes })
        }
        Ok(Err(err)) => error_response(err, correlation_id),
        Err(err) => join_error_response(err, correlation_id),
    }
}

/// Handler for GET /departments/stats.
async fn department_stats_handler(State(state): State<AppState>) -> Response {
    let report = state.tracker().department_stats();
    json_response(StatusCode::OK, report)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: TrackerError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn join_error_response(err: JoinError, correlation_id: Uuid) -> Response {
    error!(correlation_id = %correlation_id, error = %err, "Tracker task failed");
    ApiErrorResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        error: ApiError::new("INTERNAL_ERROR", "Tracker task failed"),
    }
    .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
