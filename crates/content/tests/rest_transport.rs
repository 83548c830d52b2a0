use httpmock::prelude::*;
use portal_config::{BackendConfig, FeedConfig};
use portal_content::{BackendClient, BackendError, ContentRepository, FeedService};
use serde_json::json;

fn backend(server: &MockServer) -> BackendConfig {
    BackendConfig {
        url: server.base_url(),
        anon_key: Some("anon-key".to_string()),
        request_timeout_seconds: 5,
        schema: None,
    }
}

fn repository(server: &MockServer) -> ContentRepository {
    let client = BackendClient::rest(&backend(server)).expect("rest client builds");
    ContentRepository::new(client, FeedConfig::default())
}

#[tokio::test]
async fn event_query_is_sent_with_credentials() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/agenda")
                .query_param("select", "*,post:post_id(galery(foto(file)))")
                .query_param("status", "eq.aktif")
                .query_param("order", "tanggal.asc")
                .query_param("limit", "3")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer anon-key");
            then.status(200).json_body(json!([
                {
                    "id": 9,
                    "judul": "Rapat Orang Tua",
                    "tanggal": "2025-09-01",
                    "waktu": "09:00",
                    "lokasi": "Aula",
                    "deskripsi": "Pembagian rapor.",
                    "status": "aktif",
                    "post_id": 3,
                    "post": { "galery": [ { "foto": [ { "file": "rapat.jpg" } ] } ] }
                }
            ]));
        })
        .await;

    let events = repository(&server).fetch_events().await.expect("events load");

    mock.assert_async().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Rapat Orang Tua");
    assert_eq!(
        events[0].post.get().and_then(|post| post.cover_file()),
        Some("rapat.jpg")
    );
}

#[tokio::test]
async fn photo_query_filters_on_the_embedded_gallery() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/foto")
                .query_param("galery.status", "eq.1")
                .query_param("limit", "4");
            then.status(200).json_body(json!([
                { "id": 1, "file": "a.jpg", "judul": "A", "galery": null }
            ]));
        })
        .await;

    let photos = repository(&server).fetch_photos().await.expect("photos load");

    mock.assert_async().await;
    assert_eq!(photos.len(), 1);
    assert!(!photos[0].galery.is_present());
}

#[tokio::test]
async fn error_envelope_becomes_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/informasi");
            then.status(400).json_body(json!({
                "code": "PGRST100",
                "message": "failed to parse order",
                "details": null,
                "hint": null
            }));
        })
        .await;

    let err = repository(&server)
        .fetch_announcements()
        .await
        .expect_err("bad request must fail");

    assert_eq!(
        err,
        BackendError::Rejected {
            status: 400,
            code: Some("PGRST100".to_string()),
            message: "failed to parse order".to_string(),
        }
    );
    assert_eq!(err.diagnostic(), "failed to parse order");
}

#[tokio::test]
async fn non_array_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/agenda");
            then.status(200).json_body(json!({ "id": 1 }));
        })
        .await;

    let err = repository(&server).fetch_events().await.expect_err("object body");
    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_degrades_to_empty_feed() {
    let config = BackendConfig {
        url: "http://127.0.0.1:9".to_string(),
        anon_key: None,
        request_timeout_seconds: 1,
        schema: None,
    };
    let client = BackendClient::rest(&config).expect("rest client builds");
    let feeds = FeedService::new(ContentRepository::new(client, FeedConfig::default()));

    assert!(feeds.events().await.is_empty());
    assert!(feeds.photos().await.is_empty());
}
