//! Integration tests for the HTTP gateway.

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::{json, Value};
use switchboard_config::ApiConfig;
use switchboard_gateway::HttpGateway;
use switchboard_groups::{
    GatewayError, MutationCoordinator, NewGroup, NoticeLevel, RecordingNotifier, RequestGateway,
    SyncState,
};

fn api_config(server: &MockServer, token: Option<&str>) -> ApiConfig {
    ApiConfig {
        base_url: server.url("/api"),
        request_timeout_seconds: 2,
        auth_token: token.map(str::to_owned),
    }
}

#[tokio::test]
async fn get_sends_bearer_token_and_parses_body() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/groups")
                .header("Authorization", "Bearer session-token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{ "_id": "g1", "name": "Ops", "members": ["u1"] }]));
        })
        .await;

    let gateway = HttpGateway::new(&api_config(&server, Some("session-token"))).unwrap();
    let body = gateway.get("/groups").await.expect("groups should be returned");

    mock.assert_async().await;
    assert_eq!(body[0]["_id"], "g1");
}

#[tokio::test]
async fn post_and_put_send_json_bodies() {
    let server = MockServer::start_async().await;

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/groups")
                .json_body(json!({ "name": "Ops", "members": [] }));
            then.status(201).json_body(json!({ "id": "g1", "name": "Ops" }));
        })
        .await;
    let rename = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/groups/g1")
                .json_body(json!({ "name": "Ops 2" }));
            then.status(200).json_body(json!({ "id": "g1", "name": "Ops 2" }));
        })
        .await;

    let gateway = HttpGateway::new(&api_config(&server, None)).unwrap();

    let created = gateway
        .post("/groups", json!({ "name": "Ops", "members": [] }))
        .await
        .unwrap();
    let renamed = gateway
        .put("/groups/g1", json!({ "name": "Ops 2" }))
        .await
        .unwrap();

    create.assert_async().await;
    rename.assert_async().await;
    assert_eq!(created["name"], "Ops");
    assert_eq!(renamed["name"], "Ops 2");
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/groups/g1");
            then.status(204);
        })
        .await;

    let gateway = HttpGateway::new(&api_config(&server, None)).unwrap();

    assert_eq!(gateway.delete("/groups/g1").await.unwrap(), Value::Null);
}

#[tokio::test]
async fn error_status_carries_service_message() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/groups/g1/leave");
            then.status(403)
                .json_body(json!({ "message": "Owners cannot leave their group" }));
        })
        .await;

    let gateway = HttpGateway::new(&api_config(&server, None)).unwrap();
    let err = gateway
        .post("/groups/g1/leave", json!({}))
        .await
        .expect_err("forbidden expected");

    assert_eq!(
        err,
        GatewayError::service(403, Some("Owners cannot leave their group".to_string()))
    );
}

#[tokio::test]
async fn error_status_without_body_has_no_message() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/groups");
            then.status(503);
        })
        .await;

    let gateway = HttpGateway::new(&api_config(&server, None)).unwrap();
    let err = gateway.get("/groups").await.expect_err("http error expected");

    assert!(matches!(err, GatewayError::Service { status: 503, message: None }));
    assert_eq!(err.user_message(), None);
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        request_timeout_seconds: 1,
        auth_token: None,
    };

    let gateway = HttpGateway::new(&config).unwrap();
    let err = gateway.get("/groups").await.expect_err("connection should fail");

    assert!(matches!(err, GatewayError::Network { .. }));
}

#[tokio::test]
async fn coordinator_reports_service_message_over_http() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/groups");
            then.status(400).json_body(json!({ "error": "Group name is required" }));
        })
        .await;

    let gateway = Arc::new(HttpGateway::new(&api_config(&server, None)).unwrap());
    let notifier = Arc::new(RecordingNotifier::new());
    let state = SyncState::new();
    let coordinator = MutationCoordinator::new(gateway, state.clone(), notifier.clone());

    let created = coordinator.create_group(NewGroup::new("")).await;

    assert!(created.is_none());
    assert!(state.groups().is_empty());
    assert!(!state.flags().create_in_flight);
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        ["Group name is required"]
    );
}
