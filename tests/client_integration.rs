//! Integration tests for the endoflife.date client against a wiremock upstream

use std::time::Duration;

use endoflife_exporter::endoflife::{
    EndOfLifeClient, NOT_AVAILABLE, ReleaseSource, UpstreamError, no_eol_announced, parse_date,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client rooted at `<mock>/api/v1`, mirroring the public API layout.
fn client_for(server: &MockServer, timeout: Duration) -> EndOfLifeClient {
    EndOfLifeClient::new(&format!("{}/api/v1", server.uri()), timeout)
        .expect("Failed to create client")
}

#[tokio::test]
async fn test_fetch_release_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/mongo/releases/8.0"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema_version": "1.2.0",
            "result": {
                "name": "8.0",
                "isLts": false,
                "isEol": false,
                "isMaintained": true,
                "releaseDate": "2024-10-02",
                "eolFrom": "2029-10-31",
                "latest": {"name": "8.0.4", "date": "2024-12-02"}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    assert_eq!(client.base_url().path(), "/api/v1");

    let release = client
        .fetch_release("mongo", "8.0")
        .await
        .expect("Failed to fetch release");

    assert_eq!(release.release_cycle_name, "8.0");
    assert!(!release.is_eol);
    assert!(!release.is_lts);
    assert!(release.is_maintained);
    assert_eq!(release.latest_version, "8.0.4");
    assert_eq!(release.latest_version_date, parse_date("2024-12-02").unwrap());
    assert_eq!(release.release_cycle_date, parse_date("2024-10-02").unwrap());
    assert_eq!(release.eol_from, parse_date("2029-10-31").unwrap());
}

#[tokio::test]
async fn test_fetch_release_applies_fallbacks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/ubuntu/releases/24.04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"name": "24.04", "isLts": true, "releaseDate": "2024-04-25", "latest": null}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let release = client.fetch_release("ubuntu", "24.04").await.unwrap();

    assert!(release.is_lts);
    assert_eq!(release.latest_version, NOT_AVAILABLE);
    assert_eq!(release.latest_version_date.timestamp(), 0);
    assert_eq!(release.eol_from, no_eol_announced());
}

#[tokio::test]
async fn test_fetch_release_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/mongo/releases/0.1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.fetch_release("mongo", "0.1").await.unwrap_err();

    match err {
        UpstreamError::Status { status, reason } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_release_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/mongo/releases/8.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.fetch_release("mongo", "8.0").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)), "got {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_fetch_all_releases_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/ubuntu"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema_version": "1.2.0",
            "result": {
                "name": "ubuntu",
                "releases": [
                    {"name": "24.04", "isLts": true, "isEol": false, "releaseDate": "2024-04-25", "eolFrom": "2029-05-31"},
                    {"name": "23.10", "isLts": false, "isEol": true, "releaseDate": "2023-10-12", "eolFrom": "2024-07-11"},
                    {"name": "22.04", "isLts": true, "isEol": false, "releaseDate": "2022-04-21", "eolFrom": "2027-06-01"}
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let releases = client
        .fetch_all_releases("ubuntu")
        .await
        .expect("Failed to fetch releases");

    let names: Vec<_> = releases
        .iter()
        .map(|r| r.release_cycle_name.as_str())
        .collect();
    assert_eq!(names, ["24.04", "23.10", "22.04"]);
    assert!(releases[1].is_eol);
    assert_eq!(releases[2].eol_from, parse_date("2027-06-01").unwrap());
}

#[tokio::test]
async fn test_fetch_all_releases_rejects_malformed_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/ubuntu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "releases": [
                    {"name": "24.04"},
                    {"name": 2310}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.fetch_all_releases("ubuntu").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_all_releases_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/ubuntu"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.fetch_all_releases("ubuntu").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Status { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/mongo/releases/8.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"name": "8.0"}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_millis(100));
    let err = client.fetch_release("mongo", "8.0").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Timeout), "got {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener to get a port nothing is serving on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EndOfLifeClient::new(&format!("http://{addr}/api/v1"), Duration::from_secs(2))
        .expect("Failed to create client");
    let err = client.fetch_release("mongo", "8.0").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)), "got {err:?}");
    assert!(err.is_transport());
}
