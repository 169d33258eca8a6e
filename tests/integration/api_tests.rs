//! HTTP integration tests, driving the full router in-process

use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use minijinja::context;
use tower::ServiceExt;

use repairdesk_server::{
    config::{AppConfig, AssetsConfig, TemplatesConfig},
    create_app, fixtures,
    repository::Repository,
    services::Services,
    views::Templates,
    AppError, AppState,
};

fn state() -> AppState {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = AppConfig {
        templates: TemplatesConfig {
            dir: root.join("templates"),
        },
        assets: AssetsConfig {
            static_dir: root.join("static"),
        },
        ..Default::default()
    };

    let templates = Templates::load(&config.templates.dir).expect("Failed to load templates");
    let repository = Repository::new(
        fixtures::demo_tickets(Utc::now()),
        fixtures::demo_technicians(),
    );

    AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(repository)),
        templates: Arc::new(templates),
    }
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn send(request: Request<Body>) -> TestResponse {
    let response = create_app(state())
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("Invalid location header").to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}

async fn get(uri: &str) -> TestResponse {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn get_as(uri: &str, user: &str) -> TestResponse {
    send(
        Request::get(uri)
            .header("x-remote-user", user)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_form(uri: &str, form: &str) -> TestResponse {
    send(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_dashboard() {
    let response = get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<html"));
    assert!(response.body.contains("Dashboard"));
    assert!(response.body.contains("Admin User"));
    assert!(response.body.contains("John Doe"));
    assert!(response.body.contains("Carlos Rivera"));
    assert!(response.body.contains("Waiting for Parts"));
}

#[tokio::test]
async fn test_session_user_from_header() {
    let response = get_as("/", "Sarah Tech").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Sarah Tech"));
    assert!(!response.body.contains("Admin User"));
}

#[tokio::test]
async fn test_technician_queue() {
    let response = get_as("/technician", "Mike Tech").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("My Queue"));
    assert!(response.body.contains("#1001"));
    assert!(response.body.contains("#1003"));
    assert!(!response.body.contains("Jane Smith"));
}

#[tokio::test]
async fn test_view_ticket() {
    let response = get("/tickets/1001").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Ticket #1001"));
    assert!(response.body.contains("iPhone 13 Pro Screen Assembly"));
    assert!(response.body.contains("$95.98"));
    assert!(response.body.contains("$245.98"));
    assert!(response.body.contains("Customer confirmed backup was done."));
    assert!(response.body.contains("bg-blue-100 text-blue-800"));
}

#[tokio::test]
async fn test_technician_ticket_view_marks_overdue() {
    let response = get("/technician/1003").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Galaxy Tab S8"));
    assert!(response.body.contains("(overdue)"));
}

#[tokio::test]
async fn test_invalid_ticket_id() {
    assert_eq!(get("/tickets/abc").await.status, StatusCode::BAD_REQUEST);
    assert_eq!(get("/technician/abc").await.status, StatusCode::BAD_REQUEST);
    assert_eq!(get("/tickets/abc/edit").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ticket() {
    assert_eq!(get("/tickets/9999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        post_form("/tickets/9999/status", "status=ready").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_new_ticket_form() {
    let response = get("/tickets/new").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("New Ticket"));
    assert!(response.body.contains("Bob Repair"));
    assert!(response.body.contains("Waiting for Parts"));
}

#[tokio::test]
async fn test_edit_ticket_form() {
    let response = get("/tickets/1002/edit").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Edit Ticket #1002"));
    assert!(response.body.contains("Battery not charging"));
}

#[tokio::test]
async fn test_ticket_list_fragment() {
    let response = get("/tickets?status=in_progress").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("<html"));
    assert!(response.body.contains("Jane Smith"));
    assert!(!response.body.contains("John Doe"));
}

#[tokio::test]
async fn test_ticket_list_trailing_slash() {
    let response = get("/tickets/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("John Doe"));
    assert!(response.body.contains("Amy Chen"));
}

#[tokio::test]
async fn test_search_tickets() {
    let response = get("/tickets/search?search=galaxy").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Carlos Rivera"));
    assert!(!response.body.contains("Jane Smith"));

    let response = get("/tickets/search?search=toaster").await;
    assert!(response.body.contains("No tickets found."));
}

#[tokio::test]
async fn test_create_ticket() {
    let response = post_form(
        "/tickets",
        "customer_name=Ada+Lovelace&device_type=Laptop&estimated_cost=120.50&due_date=2026-11-01&priority=high",
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_create_ticket_with_blank_optional_fields() {
    let response = post_form("/tickets", "customer_name=Ada&estimated_cost=&due_date=").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_create_ticket_rejects_bad_input() {
    assert_eq!(
        post_form("/tickets", "estimated_cost=-5").await.status,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        post_form("/tickets", "estimated_cost=lots").await.status,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        post_form("/tickets", "due_date=tomorrow").await.status,
        StatusCode::BAD_REQUEST
    );

    let wrong_content_type = send(
        Request::post("/tickets")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(wrong_content_type.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_ticket() {
    let response = post_form("/tickets/1002", "customer_name=Jane+Smith&status=ready").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/tickets/1002"));
}

#[tokio::test]
async fn test_update_status() {
    let response = post_form("/tickets/1002/status", "status=ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("id=\"status-badge\""));
    assert!(response.body.contains("Ready for Pickup"));
    assert!(response.body.contains("bg-green-100 text-green-800"));
}

#[tokio::test]
async fn test_update_status_unknown_code() {
    let response = post_form("/tickets/1002/status", "status=on_hold").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("on_hold"));
    assert!(response.body.contains("bg-gray-100 text-gray-800"));
}

#[tokio::test]
async fn test_update_status_blank() {
    let response = post_form("/tickets/1002/status", "status=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post_form("/tickets/1002/status", "status=++").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_part() {
    let response = post_form("/tickets/1001/parts", "part_name=Battery&quantity=2&cost=12.50").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("<html"));
    assert!(response.body.contains("Battery"));
    assert!(response.body.contains("$12.50"));
    assert!(response.body.contains("part-3"));
}

#[tokio::test]
async fn test_add_part_rejects_bad_input() {
    for form in [
        "part_name=Battery&quantity=0&cost=12.50",
        "part_name=Battery&quantity=two&cost=12.50",
        "part_name=Battery&quantity=1&cost=-3",
        "part_name=Battery&quantity=1",
    ] {
        assert_eq!(
            post_form("/tickets/1001/parts", form).await.status,
            StatusCode::BAD_REQUEST,
            "form {form}"
        );
    }
}

#[tokio::test]
async fn test_delete_part() {
    let response = send(
        Request::builder()
            .method(Method::DELETE)
            .uri("/tickets/1001/parts/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_add_note_is_escaped_and_attributed() {
    let response = send(
        Request::post("/tickets/1001/notes")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("x-remote-user", "Mike Tech")
            .body(Body::from("note=%3Cb%3ESwapped+screen%3C%2Fb%3E"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Mike Tech"));
    assert!(response.body.contains("&lt;b&gt;Swapped screen"));
    assert!(!response.body.contains("<b>"));
}

#[tokio::test]
async fn test_add_blank_note() {
    let response = post_form("/tickets/1001/notes", "note=+++").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_open_tickets_count() {
    let response = get("/api/stats/open").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "3");
}

#[tokio::test]
async fn test_static_files() {
    let response = get("/static/css/app.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".htmx-request"));
}

#[tokio::test]
async fn test_health_check() {
    let response = get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&response.body).expect("Invalid JSON");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_pages() {
    let response = get("/ready").await;

    let body: serde_json::Value = serde_json::from_str(&response.body).expect("Invalid JSON");
    assert_eq!(body["pages"], 3);
}

#[tokio::test]
async fn test_unknown_page_is_server_error() {
    let state = state();

    let err = state
        .templates
        .render_page("no-such-page", context! {})
        .expect_err("page should not exist");
    let response = AppError::from(err).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    assert_eq!(&bytes[..], b"Internal server error");
}
