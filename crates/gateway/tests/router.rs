use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use http_body_util::BodyExt;
use portal_auth::MemorySessionStore;
use portal_config::AppConfig;
use portal_content::{BackendError, MemoryTransport};
use portal_gateway::{create_router, GatewayState};
use portal_runtime::PortalServices;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    transport: Arc<MemoryTransport>,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestApp {
    fn new() -> Self {
        let transport = Arc::new(MemoryTransport::sample().expect("bundled snapshot"));
        let services = PortalServices::with_parts(
            &AppConfig::default(),
            transport.clone(),
            Arc::new(MemorySessionStore::new()),
        );

        Self {
            router: create_router(GatewayState::from(&services)),
            transport,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.request_as(None, method, uri, body).await
    }

    async fn request_as(
        &self,
        token: Option<&str>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json_body) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json_body).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router responds");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        TestResponse { status, body }
    }

    async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/admin/login",
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    async fn login_token(&self) -> String {
        let response = self.login("admin", "admin123").await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"]
            .as_str()
            .expect("login returns a token")
            .to_string()
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["content_source"], "fixtures");
}

#[tokio::test]
async fn home_combines_catalogue_and_feeds() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/api/home", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.body;
    assert_eq!(body["hero"]["title"], "SMK Negeri 4 Bogor");
    assert_eq!(body["programs"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["partners"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["events"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["events"][0]["dateLabel"], "3 Feb 2025");
    assert_eq!(body["announcements"][0]["cover"], json!({ "kind": "placeholder" }));
    assert_eq!(body["photos"][0]["categoryTitle"], "Prestasi");
}

#[tokio::test]
async fn home_stays_up_when_backend_fails() {
    let app = TestApp::new();
    app.transport
        .fail_with(BackendError::Transport("connection reset".to_string()))
        .await;

    let response = app.request(Method::GET, "/api/home", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["events"], json!([]));
    assert_eq!(response.body["announcements"], json!([]));
    assert_eq!(response.body["photos"], json!([]));
    assert_eq!(response.body["statistics"]["rates"][0]["percent"], 98);
}

#[tokio::test]
async fn single_feeds_are_served() {
    let app = TestApp::new();

    let agenda = app.request(Method::GET, "/api/agenda", None).await;
    assert_eq!(agenda.body.as_array().map(Vec::len), Some(3));

    let informasi = app.request(Method::GET, "/api/informasi", None).await;
    assert_eq!(informasi.body[0]["tone"], "important");

    let galeri = app.request(Method::GET, "/api/galeri", None).await;
    assert_eq!(galeri.body.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn programs_are_listed_and_looked_up() {
    let app = TestApp::new();

    let all = app.request(Method::GET, "/api/programs", None).await;
    assert_eq!(all.body.as_array().map(Vec::len), Some(4));

    let tjkt = app.request(Method::GET, "/api/programs/tjkt", None).await;
    assert_eq!(tjkt.status, StatusCode::OK);
    assert_eq!(tjkt.body["abbreviation"], "TJKT");

    let missing = app.request(Method::GET, "/api/programs/akuntansi", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_password_is_unauthorized_with_form_message() {
    let app = TestApp::new();
    let response = app.login("admin", "wrong").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Username atau password salah");
}

#[tokio::test]
async fn backend_failure_on_login_is_bad_gateway() {
    let app = TestApp::new();
    app.transport
        .fail_with(BackendError::Transport("timed out".to_string()))
        .await;

    let response = app.login("admin", "admin123").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["message"], "Terjadi kesalahan saat login");
}

#[tokio::test]
async fn admin_session_lifecycle() {
    let app = TestApp::new();

    let login = app.login("admin", "admin123").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["redirect"], "/admin");
    assert_eq!(
        login.body["admin"],
        json!({ "id": 1, "username": "admin", "password": "admin123" })
    );
    let token = login.body["token"].as_str().expect("token").to_string();

    let during = app
        .request_as(Some(&token), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(during.status, StatusCode::OK);
    assert_eq!(during.body["username"], "admin");

    let logout = app
        .request_as(Some(&token), Method::POST, "/api/admin/logout", None)
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let after = app
        .request_as(Some(&token), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_requires_a_marker_for_the_caller() {
    let app = TestApp::new();

    let anonymous = app.request(Method::GET, "/api/admin/session", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "401");

    let unknown = app
        .request_as(Some("not-a-session"), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn another_login_does_not_admit_other_clients() {
    let app = TestApp::new();
    let token = app.login_token().await;

    let anonymous = app.request(Method::GET, "/api/admin/session", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert!(anonymous.body.get("password").is_none());

    let forged = app
        .request_as(Some("forged"), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let anonymous_logout = app.request(Method::POST, "/api/admin/logout", None).await;
    assert_eq!(anonymous_logout.status, StatusCode::UNAUTHORIZED);

    let owner = app
        .request_as(Some(&token), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(owner.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_leaves_other_sessions_intact() {
    let app = TestApp::new();
    let first = app.login_token().await;
    let second = app.login_token().await;

    let logout = app
        .request_as(Some(&first), Method::POST, "/api/admin/logout", None)
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let first_after = app
        .request_as(Some(&first), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(first_after.status, StatusCode::UNAUTHORIZED);

    let second_after = app
        .request_as(Some(&second), Method::GET, "/api/admin/session", None)
        .await;
    assert_eq!(second_after.status, StatusCode::OK);
}
