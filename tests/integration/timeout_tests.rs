//! Failure classification over the REST transport.

use std::time::{Duration, Instant};

use permit::{ErrorKind, PermitConfig, ReadApi};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestFixture;

#[tokio::test]
async fn test_stalled_api_times_out() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/roles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&fixture.api)
        .await;

    let client = fixture
        .client_with_api_timeout(Duration::from_secs(1))
        .expect("client");
    let op = client.api().list_roles(None, None).expect("plan");
    assert_eq!(op.timeout(), Some(Duration::from_secs(1)));

    let start = Instant::now();
    let err = client.execute(&op).await.expect_err("should time out");
    let elapsed = start.elapsed();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.is_transport());
    assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_pdp_timeout_applies_only_to_pdp() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/allowed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "allow": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&fixture.pdp)
        .await;
    Mock::given(method("GET"))
        .and(path("/cloud/users/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "key": "u1" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&fixture.api)
        .await;

    let client = fixture
        .client_with(fixture.config().pdp_timeout(Duration::from_millis(300)))
        .expect("client");

    let err = client
        .check("u1", "read", "document:1")
        .await
        .expect_err("PDP call should time out");
    assert!(err.is_timeout());

    // No api_timeout: the slower cloud call completes.
    let op = client.api().get_user("u1").expect("plan");
    assert_eq!(op.timeout(), None);
    client.execute(&op).await.expect("cloud call succeeds");
}

#[tokio::test]
async fn test_refused_connection_is_connection_error() {
    let config = PermitConfig::builder()
        .token("tok")
        .api_url("http://127.0.0.1:1")
        .api_timeout(Duration::from_secs(2))
        .build()
        .expect("config");
    let client = permit::Client::new(config).expect("client");

    let op = client.api().get_user("u1").expect("plan");
    let err = client.execute(&op).await.expect_err("nothing listens on port 1");
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!err.is_timeout());
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_json_is_invalid_response() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"key\": "))
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().get_user("u1").expect("plan");
    let err = client.execute(&op).await.expect_err("body is truncated");
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_failures_do_not_poison_later_calls() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/roles/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&fixture.api)
        .await;
    Mock::given(method("GET"))
        .and(path("/cloud/roles/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "fast" })))
        .mount(&fixture.api)
        .await;

    let client = fixture
        .client_with_api_timeout(Duration::from_millis(300))
        .expect("client");

    let slow = client.api().get_role("slow").expect("plan");
    let fast = client.api().get_role("fast").expect("plan");

    for _ in 0..3 {
        assert!(client.execute(&slow).await.expect_err("slow").is_timeout());
        let outcome = client.execute(&fast).await.expect("fast");
        assert_eq!(outcome.body(), Some(&json!({ "key": "fast" })));
    }
}
