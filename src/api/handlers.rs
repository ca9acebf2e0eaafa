//! Endpoint handlers
//!
//! Each handler parses path/body input, drives one [`QueueService`]
//! operation, and shapes the response the deployed clients expect.
//! Error kinds become status codes through the bridge in
//! [`crate::api::error`]; nothing here picks codes by hand except the
//! alert hook, which reports an unconfigured player as missing.

use super::AppState;
use super::types::{
    ActivityEntry, AlertRequest, BoardEntry, CallRequest, CompleteRequest, MuteRequest,
    PurgeRequest, ReturnRequest, StatusUpdateRequest, TakeNumberRequest, TicketView,
};
use crate::core::{Department, StaffStatus, TicketId};
use crate::error::{DesklineError, Result};
use crate::queue::{PreviousDayCheck, TakeNumber, VisitorStatus};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::warn;

/// Actor recorded when a staff console omits its identity.
const DEFAULT_ACTOR: &str = "admin";

fn actor(by: Option<String>) -> String {
    by.filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string())
}

/// `GET /` service banner.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Deskline queue service is running",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /queue": "Take a queue number",
            "GET /queue/:id": "Fetch a ticket (stamps first access)",
            "GET /queue/:id/status": "Visitor status page payload",
            "GET /admin/queue/:department": "Full FCFS board for a desk",
        },
    }))
}

/// `GET /health` liveness plus store reachability.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    let tickets = state.service.ticket_count()?;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "tickets": tickets,
    })))
}

/// `POST /queue` allocate a number and insert the ticket.
pub async fn take_number(
    State(state): State<AppState>,
    Json(body): Json<TakeNumberRequest>,
) -> Result<Json<Value>> {
    let department: Department = body.department.parse()?;
    let ticket = state.service.take_number(TakeNumber {
        id: body.id.map(TicketId::from),
        department,
        person: body.person,
    })?;
    let view = TicketView::new(&ticket, state.service.reporting_offset());
    Ok(Json(json!({
        "success": true,
        "message": "Queue entry created",
        "ticket": view,
    })))
}

/// `GET /queue/:id` visitor ticket view; first view stamps `accessed_at`.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketView>> {
    let ticket = state.service.view_ticket(&TicketId::from(id))?;
    Ok(Json(TicketView::new(
        &ticket,
        state.service.reporting_offset(),
    )))
}

/// `GET /queue/:id/status` the status-page payload.
pub async fn ticket_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VisitorStatus>> {
    Ok(Json(state.service.visitor_status(&TicketId::from(id))?))
}

/// `GET /queue/:id/accessed` whether the status page was ever opened.
pub async fn ticket_accessed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let ticket = state.service.ticket(&TicketId::from(id))?;
    Ok(Json(json!({
        "accessed": ticket.accessed_at.is_some(),
        "accessed_at": ticket.accessed_at,
    })))
}

/// `GET /queue/:id/mute-status`.
pub async fn mute_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let ticket = state.service.ticket(&TicketId::from(id))?;
    Ok(Json(json!({
        "is_muted": ticket.is_muted,
        "muted_at": ticket.muted_at,
        "muted_by": ticket.muted_by,
    })))
}

/// `GET /queue/:id/is-previous-day` stale-ticket check for kiosks.
pub async fn is_previous_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PreviousDayCheck>> {
    Ok(Json(state.service.previous_day_check(&TicketId::from(id))?))
}

/// `POST /queue/im-here/:id` visitor asserts presence.
pub async fn im_here(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let ticket = state.service.mark_present(&TicketId::from(id))?;
    Ok(Json(json!({
        "success": true,
        "message": "Successfully marked as present",
        "queue_number": ticket.number.to_string(),
    })))
}

/// `POST /queue/cancel-im-here/:id` visitor retracts presence.
pub async fn cancel_im_here(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let ticket = state.service.cancel_present(&TicketId::from(id))?;
    Ok(Json(json!({
        "success": true,
        "message": "Successfully cancelled present status",
        "queue_number": ticket.number.to_string(),
    })))
}

/// `GET /admin/queue/:department` full FCFS board, completed included.
pub async fn department_board(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Vec<BoardEntry>>> {
    let department: Department = department.parse()?;
    let offset = state.service.reporting_offset();
    let board = state.service.department_board(department)?;
    Ok(Json(
        board.iter().map(|t| BoardEntry::new(t, offset)).collect(),
    ))
}

/// `GET /admin/activity/:department` last completions, newest first.
pub async fn recent_activity(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Vec<ActivityEntry>>> {
    let department: Department = department.parse()?;
    let offset = state.service.reporting_offset();
    let recent = state.service.recent_activity(department)?;
    Ok(Json(
        recent.iter().map(|t| ActivityEntry::new(t, offset)).collect(),
    ))
}

/// `POST /admin/call-queue/:id`.
pub async fn call_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CallRequest>,
) -> Result<Json<Value>> {
    state
        .service
        .call(&TicketId::from(id), actor(body.called_by))?;
    Ok(Json(json!({
        "success": true,
        "message": "Queue called successfully",
        "status": "called",
    })))
}

/// `POST /admin/return-queue/:id`.
pub async fn return_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ReturnRequest>,
) -> Result<Json<Value>> {
    state
        .service
        .return_to_waiting(&TicketId::from(id), actor(body.returned_by))?;
    Ok(Json(json!({
        "success": true,
        "message": "Queue returned to waiting successfully",
        "status": "waiting",
    })))
}

/// `POST /admin/complete-queue/:id`.
pub async fn complete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CompleteRequest>,
) -> Result<Json<Value>> {
    state
        .service
        .complete(&TicketId::from(id), actor(body.completed_by))?;
    Ok(Json(json!({
        "success": true,
        "message": "Queue completed successfully",
    })))
}

/// `POST /admin/mute-queue/:id`.
pub async fn mute_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MuteRequest>,
) -> Result<Json<Value>> {
    let ticket = state
        .service
        .mute(&TicketId::from(id), actor(body.muted_by))?;
    Ok(Json(json!({
        "success": true,
        "message": "Queue audio alerts muted",
        "queue_number": ticket.number.to_string(),
    })))
}

/// `POST /admin/unmute-queue/:id`.
pub async fn unmute_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let ticket = state.service.unmute(&TicketId::from(id))?;
    Ok(Json(json!({
        "success": true,
        "message": "Queue audio alerts unmuted",
        "queue_number": ticket.number.to_string(),
    })))
}

/// `POST /admin/status` update a desk's availability.
pub async fn set_staff_status(
    State(state): State<AppState>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<Value>> {
    let department: Department = body.department.parse()?;
    let status: StaffStatus = body.status.parse()?;
    state.service.set_staff_status(department, status);
    Ok(Json(json!({
        "success": true,
        "department": department.prefix().to_string(),
        "status": status,
    })))
}

/// `GET /admin/status/:department` read a desk's availability.
pub async fn staff_status(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Value>> {
    let department: Department = department.parse()?;
    let status = state.service.staff_status(department);
    Ok(Json(json!({
        "success": true,
        "department": department.prefix().to_string(),
        "status": status,
    })))
}

/// `POST /admin/delete-all-queues` dean-only wipe with confirmation.
pub async fn purge_all(
    State(state): State<AppState>,
    Json(body): Json<PurgeRequest>,
) -> Result<Json<Value>> {
    let department: Department = body.department.parse()?;
    let removed = state.service.purge_all(department, &body.confirmation)?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully deleted all {removed} queues"),
        "deleted_count": removed,
    })))
}

/// `POST /emergency-audio` spawn the configured alert player, detached.
pub async fn emergency_audio(
    State(state): State<AppState>,
    Json(body): Json<AlertRequest>,
) -> Response {
    let number = body.queue_number.unwrap_or_else(|| "Unknown".to_string());
    let Some(command) = state.alert_command.as_deref() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "No alert command configured"})),
        )
            .into_response();
    };

    warn!(queue_number = %number, "emergency audio triggered");
    match tokio::process::Command::new(command).arg(&number).spawn() {
        Ok(_child) => Json(json!({
            "success": true,
            "message": format!("Emergency audio triggered for queue {number}"),
        }))
        .into_response(),
        Err(err) => DesklineError::from(err).into_response(),
    }
}
