//! Integration tests for the portal.
//!
//! The gateway client runs against a real gateway router served on an
//! ephemeral local port, itself backed by a fake provider. The purchase
//! flow runs checkout, records, session and guards together over the
//! in-memory store.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use pinnacle_gateway::config::{ProviderConfig, ProviderKind};
use pinnacle_gateway::{build_router, create_provider, AppState};
use pinnacle_portal::catalog::{course_or_default, DEFAULT_COURSE};
use pinnacle_portal::checkout::build_checkout;
use pinnacle_portal::guard::{LOGIN_PATH, VERIFY_EMAIL_MESSAGE};
use pinnacle_portal::{
    resolve, AuthProvider, CheckoutConfig, CheckoutOutcome, ClientError, GatewayClient,
    MemoryStore, Navigation, Redirect, SessionUser, UserRecords, View,
};
use pinnacle_types::{ReconKind, UserId};
use serde_json::{json, Value};

// =========================================================================
// Helpers
// =========================================================================

async fn spawn_app(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn groq_echo(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    Json(json!({
        "choices": [{"message": {"content": format!("echo: {prompt}")}}]
    }))
}

async fn groq_down() -> (StatusCode, Json<Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": "overloaded"})),
    )
}

/// Serve a gateway whose provider is `upstream`; return a client for it.
async fn gateway(upstream: Router) -> (GatewayClient, Arc<AppState>) {
    let provider_addr = spawn_app(upstream).await;
    let config = ProviderConfig {
        kind: ProviderKind::Groq,
        api_url: format!("http://{provider_addr}"),
        api_key: String::from("test-key"),
        model: String::from("llama-3.1-70b-versatile"),
    };
    let state = Arc::new(AppState::new(create_provider(&config)));
    let app = build_router(Arc::clone(&state), &[String::from("http://localhost:3000")]);
    let addr = spawn_app(app).await;
    (GatewayClient::new(&format!("http://{addr}/")), state)
}

fn learner(verified: bool) -> SessionUser {
    SessionUser {
        uid: UserId::from("learner-7"),
        email: Some(String::from("learner7@example.com")),
        email_verified: verified,
    }
}

// =========================================================================
// Gateway client
// =========================================================================

#[tokio::test]
async fn test_client_ask_and_stats() {
    let (client, _state) = gateway(Router::new().route("/chat/completions", post(groq_echo))).await;

    let reply = client.ask("what is nmap?").await.unwrap();
    assert_eq!(reply, "echo: what is nmap?");

    client.recon_event("example.com", ReconKind::Dns).await.unwrap();
    client.forensics_event("dump.pcap").await.unwrap();

    let report = client.admin_stats().await.unwrap();
    assert_eq!(report.stats.total_chats, 1);
    assert_eq!(report.stats.total_recon_dns, 1);
    assert_eq!(report.stats.total_forensics_analyses, 1);
    assert_eq!(report.last_chat.map(|c| c.prompt).as_deref(), Some("what is nmap?"));
    assert_eq!(
        report.last_recon.and_then(|r| r.input).as_deref(),
        Some("example.com")
    );
}

#[tokio::test]
async fn test_client_surfaces_gateway_errors() {
    let (client, _state) = gateway(Router::new().route("/chat/completions", post(groq_down))).await;

    match client.ask("   ").await {
        Err(ClientError::Gateway { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing prompt");
        }
        other => panic!("expected 400, got {other:?}"),
    }

    match client.ask("hello").await {
        Err(ClientError::Gateway { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "AI Request Failed");
        }
        other => panic!("expected 500, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_unreachable_gateway_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GatewayClient::new(&format!("http://{addr}"));
    assert!(matches!(
        client.admin_stats().await,
        Err(ClientError::Request(_))
    ));
}

// =========================================================================
// Purchase flow
// =========================================================================

#[tokio::test]
async fn test_paid_course_unlocks_after_success() {
    let store = Arc::new(MemoryStore::new());
    let records = UserRecords::new(Arc::clone(&store));
    let auth = AuthProvider::new(Arc::clone(&store));
    let user = learner(true);

    records
        .create_user_record(&user.uid, user.email.as_deref())
        .await
        .unwrap();
    auth.on_auth_state_changed(Some(user.clone())).await;

    let course = course_or_default(DEFAULT_COURSE).unwrap();
    let locked = auth.current().record.unwrap();
    assert!(course.module_viewable(1, Some(&locked)));
    assert!(!course.module_viewable(2, Some(&locked)));

    let config = CheckoutConfig::from_lookup(|name| {
        (name == "PAYSTACK_PUBLIC_KEY").then(|| String::from("pk_test_abc"))
    });
    let request = build_checkout(&config, course, &user.uid, "learner7@example.com").unwrap();
    assert_eq!(request.amount, 1_500_000);

    let outcome = CheckoutOutcome::Success {
        reference: request.reference.clone(),
    };
    let unlocked = pinnacle_portal::checkout::complete_checkout(&records, &request, &outcome)
        .await
        .unwrap();
    assert!(unlocked);

    // The published snapshot is stale until the record is re-read.
    assert!(!course.module_viewable(2, auth.current().record.as_ref()));
    auth.refresh().await;
    assert!(course.module_viewable(2, auth.current().record.as_ref()));
}

#[tokio::test]
async fn test_dashboard_gate_follows_verification() {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthProvider::new(Arc::clone(&store));
    let mut rx = auth.subscribe();

    assert_eq!(
        resolve("/dashboard", &auth.current()),
        Navigation::Redirect(Redirect::to(LOGIN_PATH))
    );

    auth.on_auth_state_changed(Some(learner(false))).await;
    rx.changed().await.unwrap();
    assert_eq!(
        resolve("/dashboard", &rx.borrow_and_update()),
        Navigation::Redirect(Redirect {
            to: LOGIN_PATH,
            message: Some(VERIFY_EMAIL_MESSAGE),
        })
    );

    auth.on_auth_state_changed(Some(learner(true))).await;
    rx.changed().await.unwrap();
    assert!(matches!(
        resolve("/dashboard", &rx.borrow_and_update()),
        Navigation::Render {
            view: View::Dashboard,
            ..
        }
    ));
}
