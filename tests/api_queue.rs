//! HTTP integration tests for the queue API
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`,
//! covering the visitor and staff flows end to end plus the error-code
//! mapping the frontends rely on.

#[cfg(feature = "api")]
mod api_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::FixedOffset;
    use deskline::api::{AppState, router};
    use deskline::queue::QueueService;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = Arc::new(QueueService::in_memory(FixedOffset::east_opt(0).unwrap()));
        router(AppState::new(service, None))
    }

    fn app_with_alert(command: &str) -> Router {
        let service = Arc::new(QueueService::in_memory(FixedOffset::east_opt(0).unwrap()));
        router(AppState::new(service, Some(command.to_string())))
    }

    async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read(response).await
    }

    async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn take(app: &Router, id: &str, department: &str) -> Value {
        let (status, body) = post(app, "/queue", json!({"id": id, "department": department})).await;
        assert_eq!(status, StatusCode::OK, "take_number failed: {body}");
        body
    }

    #[tokio::test]
    async fn test_take_number_assigns_sequential_tickets() {
        let app = app();

        let first = take(&app, "kiosk-1", "ie-chair").await;
        assert_eq!(first["success"], true);
        assert_eq!(first["message"], "Queue entry created");
        assert_eq!(first["ticket"]["number"], "B001");
        assert_eq!(first["ticket"]["person"], "IE Chairperson");
        assert_eq!(first["ticket"]["status"], "waiting");

        let second = take(&app, "kiosk-2", "B").await;
        assert_eq!(second["ticket"]["number"], "B002");
    }

    #[tokio::test]
    async fn test_ticket_view_carries_exact_field_set() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;

        let (status, body) = get(&app, "/queue/kiosk-1").await;
        assert_eq!(status, StatusCode::OK);
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "called",
                "completed",
                "date",
                "id",
                "is_muted",
                "is_present",
                "number",
                "person",
                "status",
                "time",
            ]
        );
        assert_eq!(body["id"], "kiosk-1");
        assert_eq!(body["called"], false);
        assert_eq!(body["completed"], false);
    }

    #[tokio::test]
    async fn test_full_visitor_and_staff_scenario() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;

        // Visitor opens the status page while waiting.
        let (status, body) = get(&app, "/queue/kiosk-1/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"]["text"], "Waiting");
        assert_eq!(body["status"]["class"], "status-waiting");
        assert_eq!(body["queue_number"], "A001");
        assert_eq!(body["position"], 1);
        assert_eq!(body["total_waiting"], 1);

        // Staff calls the visitor.
        let (status, body) = post(
            &app,
            "/admin/call-queue/kiosk-1",
            json!({"calledBy": "dean-desk"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Queue called successfully");
        assert_eq!(body["status"], "called");

        let (_, body) = get(&app, "/queue/kiosk-1/status").await;
        assert_eq!(body["status"]["text"], "Being called");
        assert_eq!(body["status"]["priority"], "high");
        assert_eq!(body["is_called"], true);

        // Visitor signals presence; staff mutes the repeating alert.
        let (status, body) = post(&app, "/queue/im-here/kiosk-1", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully marked as present");
        assert_eq!(body["queue_number"], "A001");

        let (_, body) = post(
            &app,
            "/admin/mute-queue/kiosk-1",
            json!({"mutedBy": "dean-desk"}),
        )
        .await;
        assert_eq!(body["message"], "Queue audio alerts muted");

        let (_, body) = get(&app, "/queue/kiosk-1/mute-status").await;
        assert_eq!(body["is_muted"], true);
        assert_eq!(body["muted_by"], "dean-desk");

        // Staff completes the ticket.
        let (status, body) = post(
            &app,
            "/admin/complete-queue/kiosk-1",
            json!({"completedBy": "dean-desk"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Queue completed successfully");

        // The status page disappears; the ticket itself stays readable.
        let (status, body) = get(&app, "/queue/kiosk-1/status").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Ticket not found or already completed");

        let (_, body) = get(&app, "/queue/kiosk-1").await;
        assert_eq!(body["completed"], true);
        assert_eq!(body["called"], true);
        assert_eq!(body["is_muted"], false);
        assert_eq!(body["is_present"], false);

        // And the activity feed shows the completion.
        let (status, body) = get(&app, "/admin/activity/dean").await;
        assert_eq!(status, StatusCode::OK);
        let feed = body.as_array().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0]["number"], "A001");
        assert!(feed[0]["completedAt"].is_string());
    }

    #[tokio::test]
    async fn test_error_code_mapping() {
        let app = app();

        // Unknown ticket and unknown department read as 404.
        let (status, body) = get(&app, "/queue/no-such-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Ticket not found or already completed");

        let (status, _) = post(&app, "/queue", json!({"department": "registrar"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&app, "/admin/queue/registrar").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Duplicate ids conflict.
        take(&app, "kiosk-1", "dean").await;
        let (status, _) =
            post(&app, "/queue", json!({"id": "kiosk-1", "department": "dean"})).await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Unknown staff status is a refused request.
        let (status, _) = post(
            &app,
            "/admin/status",
            json!({"department": "dean", "status": "offline"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejected_transition_reports_current_state() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;

        // Muting before the visitor is called violates the precondition.
        let (status, body) = post(&app, "/admin/mute-queue/kiosk-1", json!({})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["state"], "waiting");

        post(&app, "/admin/call-queue/kiosk-1", json!({})).await;
        let (status, body) = post(&app, "/admin/call-queue/kiosk-1", json!({})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["state"], "called");

        // Completion is terminal for every later action.
        post(&app, "/admin/complete-queue/kiosk-1", json!({})).await;
        let (status, body) = post(&app, "/queue/im-here/kiosk-1", json!({})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["state"], "completed");
    }

    #[tokio::test]
    async fn test_return_path_restores_waiting() {
        let app = app();
        take(&app, "kiosk-1", "others").await;
        post(&app, "/admin/call-queue/kiosk-1", json!({"calledBy": "front"})).await;

        let (status, body) = post(
            &app,
            "/admin/return-queue/kiosk-1",
            json!({"returnedBy": "front"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Queue returned to waiting successfully");
        assert_eq!(body["status"], "waiting");

        let (_, body) = get(&app, "/queue/kiosk-1/status").await;
        assert_eq!(body["status"]["text"], "Waiting");
        assert_eq!(body["is_called"], false);
    }

    #[tokio::test]
    async fn test_admin_board_is_fcfs_and_keeps_completed_rows() {
        let app = app();
        for i in 1..=3 {
            take(&app, &format!("kiosk-{i}"), "cpe-chair").await;
        }
        post(&app, "/admin/complete-queue/kiosk-1", json!({"completedBy": "cpe"})).await;

        let (status, body) = get(&app, "/admin/queue/cpe-chair").await;
        assert_eq!(status, StatusCode::OK);
        let board = body.as_array().unwrap();
        assert_eq!(board.len(), 3);
        let numbers: Vec<&str> = board
            .iter()
            .map(|row| row["number"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, vec!["C001", "C002", "C003"]);

        assert_eq!(board[0]["status"], "completed");
        assert!(board[0]["completed_at"].is_string());
        assert!(board[0]["completed_time"].is_string());
        assert!(board[0]["created_at"].is_string());
        assert_eq!(board[1]["status"], "waiting");
        assert!(board[1]["completed_at"].is_null());
    }

    #[tokio::test]
    async fn test_staff_status_register_round_trip() {
        let app = app();

        // Defaults to available, addressable by slug or prefix.
        let (status, body) = get(&app, "/admin/status/b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["department"], "B");
        assert_eq!(body["status"], "available");

        let (status, body) = post(
            &app,
            "/admin/status",
            json!({"department": "ie-chair", "status": "away"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["department"], "B");
        assert_eq!(body["status"], "away");

        let (_, body) = get(&app, "/admin/status/ie-chair").await;
        assert_eq!(body["status"], "away");

        // An away desk overrides the waiting banner.
        take(&app, "kiosk-1", "ie-chair").await;
        let (_, body) = get(&app, "/queue/kiosk-1/status").await;
        assert_eq!(body["status"]["text"], "Admin Away");
        assert_eq!(body["status"]["class"], "status-away");
        assert_eq!(body["admin_status"], "away");
    }

    #[tokio::test]
    async fn test_delete_all_queues_guard() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;

        // Only the dean's desk may ask, and only with the exact phrase.
        let (status, _) = post(
            &app,
            "/admin/delete-all-queues",
            json!({"department": "ie-chair", "confirmation": "DELETE_ALL_QUEUES_PERMANENTLY"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            &app,
            "/admin/delete-all-queues",
            json!({"department": "dean", "confirmation": "please"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post(
            &app,
            "/admin/delete-all-queues",
            json!({"department": "dean", "confirmation": "DELETE_ALL_QUEUES_PERMANENTLY"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted_count"], 1);

        // Numbering restarts once the queues are gone.
        let fresh = take(&app, "kiosk-2", "dean").await;
        assert_eq!(fresh["ticket"]["number"], "A001");
    }

    #[tokio::test]
    async fn test_accessed_is_stamped_by_first_view() {
        let app = app();
        take(&app, "kiosk-1", "ece-chair").await;

        let (_, body) = get(&app, "/queue/kiosk-1/accessed").await;
        assert_eq!(body["accessed"], false);
        assert!(body["accessed_at"].is_null());

        get(&app, "/queue/kiosk-1").await;
        let (_, body) = get(&app, "/queue/kiosk-1/accessed").await;
        assert_eq!(body["accessed"], true);
        assert!(body["accessed_at"].is_string());
    }

    #[tokio::test]
    async fn test_previous_day_check_on_fresh_ticket() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;

        let (status, body) = get(&app, "/queue/kiosk-1/is-previous-day").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_previous_day"], false);
        assert_eq!(body["queue_date"], body["today"]);
    }

    #[tokio::test]
    async fn test_banner_and_health() {
        let app = app();

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
        assert!(body["endpoints"].is_object());

        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["tickets"], 0);

        take(&app, "kiosk-1", "dean").await;
        let (_, body) = get(&app, "/health").await;
        assert_eq!(body["tickets"], 1);
    }

    #[tokio::test]
    async fn test_emergency_audio_requires_configured_command() {
        let app = app();
        let (status, body) = post(&app, "/emergency-audio", json!({"queue_number": "A001"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let app = app_with_alert("true");
        let (status, body) = post(&app, "/emergency-audio", json!({"queue_number": "A001"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_unmute_clears_flag_and_returns_number() {
        let app = app();
        take(&app, "kiosk-1", "dean").await;
        post(&app, "/admin/call-queue/kiosk-1", json!({})).await;
        post(&app, "/admin/mute-queue/kiosk-1", json!({"mutedBy": "desk"})).await;

        let (status, body) = post(&app, "/admin/unmute-queue/kiosk-1", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Queue audio alerts unmuted");
        assert_eq!(body["queue_number"], "A001");

        let (_, body) = get(&app, "/queue/kiosk-1/mute-status").await;
        assert_eq!(body["is_muted"], false);
        assert!(body["muted_by"].is_null());
    }
}
