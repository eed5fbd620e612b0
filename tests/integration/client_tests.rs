//! Client facade tests: permission checks and configuration loading.

use std::time::Duration;

use permit::{CheckQuery, CheckResource, MultiTenancyConfig, PermitConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestFixture;

#[tokio::test]
async fn test_check_applies_default_tenant() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/allowed"))
        .and(body_json(json!({
            "user": { "key": "alice" },
            "action": "read",
            "resource": { "type": "document", "key": "readme", "tenant": "acme" },
            "context": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "allow": true })))
        .expect(1)
        .mount(&fixture.pdp)
        .await;

    let client = fixture
        .client_with(
            fixture
                .config()
                .multi_tenancy(MultiTenancyConfig::builder().default_tenant("acme").build()),
        )
        .expect("client");

    let allowed = client
        .check("alice", "read", "document:readme")
        .await
        .expect("check");
    assert!(allowed);
}

#[tokio::test]
async fn test_check_denied_is_not_an_error() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/allowed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "allow": false })))
        .mount(&fixture.pdp)
        .await;

    let client = fixture.client().expect("client");
    let resource = CheckResource::from("document:secret").with_tenant("t1");
    assert!(!client.check("bob", "read", resource).await.expect("check"));
}

#[tokio::test]
async fn test_bulk_check() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/allowed/bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "allow": [{ "allow": true }, { "allow": false }]
        })))
        .expect(1)
        .mount(&fixture.pdp)
        .await;

    let client = fixture.client().expect("client");
    let decisions = client
        .bulk_check(vec![
            CheckQuery::new("alice", "read", "document:1"),
            CheckQuery::new("alice", "delete", "document:1"),
        ])
        .await
        .expect("bulk check");
    assert_eq!(decisions, vec![true, false]);
}

#[tokio::test]
async fn test_config_from_lookup_drives_client() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "u1" })))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let pdp_uri = fixture.pdp.uri();
    let api_uri = fixture.api.uri();
    let config = PermitConfig::from_lookup(|key| match key {
        "PERMIT_TOKEN" => Some("tok".to_string()),
        "PERMIT_PDP_URL" => Some(pdp_uri.clone()),
        "PERMIT_API_URL" => Some(api_uri.clone()),
        "PERMIT_API_TIMEOUT" => Some("2".to_string()),
        "PERMIT_SYNCED_FACTS" => Some("true".to_string()),
        _ => None,
    })
    .expect("config");

    assert_eq!(config.api_timeout(), Some(Duration::from_secs(2)));
    assert!(!config.synced_facts());
    assert_eq!(config.warnings().len(), 1);

    let client = permit::Client::new(config).expect("client");
    let op = permit::ReadApi::get_user(client.api(), "u1").expect("plan");
    client.execute(&op).await.expect("execute");
}
