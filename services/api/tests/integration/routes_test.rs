use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;

use market_api::config::ApiConfig;
use market_api::router::build_router;
use market_api::state::AppState;

fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: String::new(),
        api_port: 0,
        jwt_secret: "test-secret".into(),
        bootstrap_admin_username: "superadmin".into(),
        bootstrap_admin_password: "admin123".into(),
        onesignal_app_id: String::new(),
        onesignal_api_key: String::new(),
        mail_api_url: String::new(),
        mail_api_key: String::new(),
        mail_from: String::new(),
        cloudinary_cloud_name: String::new(),
        cloudinary_upload_preset: String::new(),
    }
}

fn server() -> TestServer {
    // A disconnected handle is enough for routes that fail before any query.
    let state = AppState::new(DatabaseConnection::default(), test_config());
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn root_and_health_answer_without_a_database() {
    let server = server();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json_contains(&json!({ "success": true }));

    server.get("/health").await.assert_status_ok();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn admin_writes_require_a_bearer_token() {
    let server = server();

    let response = server
        .post("/categories")
        .json(&json!({ "name": "shoes", "imageUrl": "https://cdn.example.com/s.png" }))
        .await;
    response.assert_status_unauthorized();
    response.assert_json_contains(&json!({ "success": false }));
}

#[tokio::test]
async fn malformed_tokens_are_unauthorized() {
    let server = server();

    let response = server
        .delete("/posters/0190b5a0-0000-7000-8000-000000000000")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn unknown_routes_fall_through_to_404() {
    let server = server();
    server.get("/no-such-route").await.assert_status_not_found();
}
