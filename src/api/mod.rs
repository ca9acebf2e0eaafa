//! HTTP boundary for the queue service
//!
//! Builds the axum router over a shared [`QueueService`] and hosts it.
//! The deployed frontends are static pages served elsewhere, so the API
//! runs with a permissive CORS layer; requests are traced by
//! `tower-http`. Everything here is behind the default-on `api` feature.

pub mod error;
pub mod handlers;
pub mod types;

use crate::config::Config;
use crate::error::Result;
use crate::queue::QueueService;
use crate::storage::MemoryStorage;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The queue engine behind every endpoint
    pub service: Arc<QueueService<MemoryStorage>>,
    /// Program spawned by the emergency-audio hook, if configured
    pub alert_command: Option<String>,
}

impl AppState {
    /// Bundle a service and the alert hook configuration.
    #[must_use]
    pub const fn new(
        service: Arc<QueueService<MemoryStorage>>,
        alert_command: Option<String>,
    ) -> Self {
        Self {
            service,
            alert_command,
        }
    }
}

/// Build the router with every route and layer attached.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        // Visitor surface
        .route("/queue", post(handlers::take_number))
        .route("/queue/:id", get(handlers::get_ticket))
        .route("/queue/:id/status", get(handlers::ticket_status))
        .route("/queue/:id/accessed", get(handlers::ticket_accessed))
        .route("/queue/:id/mute-status", get(handlers::mute_status))
        .route("/queue/:id/is-previous-day", get(handlers::is_previous_day))
        .route("/queue/im-here/:id", post(handlers::im_here))
        .route("/queue/cancel-im-here/:id", post(handlers::cancel_im_here))
        // Staff surface
        .route("/admin/queue/:department", get(handlers::department_board))
        .route("/admin/activity/:department", get(handlers::recent_activity))
        .route("/admin/call-queue/:id", post(handlers::call_ticket))
        .route("/admin/return-queue/:id", post(handlers::return_ticket))
        .route("/admin/complete-queue/:id", post(handlers::complete_ticket))
        .route("/admin/mute-queue/:id", post(handlers::mute_ticket))
        .route("/admin/unmute-queue/:id", post(handlers::unmute_ticket))
        .route("/admin/status", post(handlers::set_staff_status))
        .route("/admin/status/:department", get(handlers::staff_status))
        .route("/admin/delete-all-queues", post(handlers::purge_all))
        .route("/emergency-audio", post(handlers::emergency_audio))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
///
/// # Errors
///
/// Returns an error when the address cannot be bound or the server
/// fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let service = Arc::new(QueueService::in_memory(config.reporting_offset()));
    let state = AppState::new(service, config.alert.command.clone());
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "deskline listening");
    axum::serve(listener, app).await?;
    Ok(())
}
