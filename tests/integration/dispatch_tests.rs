//! Wire-contract tests for planned operations executed over HTTP.

use permit::{ReadApi, RoleInput, RoleUpdate, TenantInput, UserInput, WriteApi};
use serde_json::json;
use wiremock::matchers::{
    body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TEST_TOKEN, TestFixture};

#[tokio::test]
async fn test_assign_role_posts_assignment() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/cloud/role_assignments"))
        .and(body_json(json!({ "role": "viewer", "user": "u1", "scope": "t1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ra_1" })))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().assign_role("u1", "viewer", "t1").expect("plan");
    assert!(op.is_write());

    let outcome = client.execute(&op).await.expect("execute");
    assert_eq!(outcome.body(), Some(&json!({ "id": "ra_1" })));
}

#[tokio::test]
async fn test_unassign_role_sends_query_and_no_body() {
    let fixture = TestFixture::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cloud/role_assignments"))
        .and(query_param("role", "viewer"))
        .and(query_param("user", "u1"))
        .and(query_param("scope", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().unassign_role("u1", "viewer", "t1").expect("plan");
    client.execute(&op).await.expect("execute");

    let requests = fixture.api.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_assigned_roles_tenant_is_optional() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/role_assignments"))
        .and(query_param("user", "u1"))
        .and(query_param_is_missing("tenant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&fixture.api)
        .await;
    Mock::given(method("GET"))
        .and(path("/cloud/role_assignments"))
        .and(query_param("user", "u1"))
        .and(query_param("tenant", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": "viewer" }])))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");

    let all = client.api().get_assigned_roles("u1", None).expect("plan");
    assert_eq!(client.execute(&all).await.expect("execute").body(), Some(&json!([])));

    let scoped = client.api().get_assigned_roles("u1", Some("t1")).expect("plan");
    assert_eq!(
        client.execute(&scoped).await.expect("execute").body(),
        Some(&json!([{ "role": "viewer" }]))
    );
}

#[tokio::test]
async fn test_headers_on_every_call() {
    let fixture = TestFixture::start().await;
    let bearer = format!("Bearer {}", TEST_TOKEN);
    Mock::given(method("GET"))
        .and(path("/cloud/users/u1"))
        .and(header("Authorization", bearer.as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "u1" })))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().get_user("u1").expect("plan");
    client.execute(&op).await.expect("execute");
}

#[tokio::test]
async fn test_sync_user_omits_unset_fields() {
    let fixture = TestFixture::start().await;
    Mock::given(method("PUT"))
        .and(path("/cloud/users"))
        .and(body_json(json!({ "key": "u1", "email": "u1@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "u1" })))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let user = UserInput::builder().key("u1").email("u1@example.com").build();
    let op = client.api().sync_user(user).expect("plan");
    client.execute(&op).await.expect("execute");
}

#[tokio::test]
async fn test_delete_returns_status_for_non_json_body() {
    let fixture = TestFixture::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cloud/tenants/t1"))
        .respond_with(ResponseTemplate::new(204).set_body_string("deleted"))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().delete_tenant("t1").expect("plan");
    let outcome = client.execute(&op).await.expect("execute");

    let status = outcome.status().expect("status outcome");
    assert_eq!(status.status, 204);
    assert!(status.is_success());
}

#[tokio::test]
async fn test_non_success_status_is_returned_as_data() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/roles/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error_code": "NOT_FOUND" })),
        )
        .mount(&fixture.api)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cloud/roles/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");

    let op = client.api().get_role("missing").expect("plan");
    let outcome = client.execute(&op).await.expect("404 is not an error");
    assert_eq!(outcome.body(), Some(&json!({ "error_code": "NOT_FOUND" })));

    let op = client.api().delete_role("missing").expect("plan");
    let outcome = client.execute(&op).await.expect("404 is not an error");
    assert_eq!(outcome.status().map(|s| s.status), Some(404));
}

#[tokio::test]
async fn test_role_and_tenant_management() {
    let fixture = TestFixture::start().await;
    Mock::given(method("PUT"))
        .and(path("/cloud/roles"))
        .and(body_json(json!({ "key": "editor", "name": "Editor", "permissions": ["doc:write"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "editor" })))
        .expect(1)
        .mount(&fixture.api)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/cloud/roles/editor"))
        .and(body_json(json!({ "description": "Can edit" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "editor" })))
        .expect(1)
        .mount(&fixture.api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/cloud/tenants"))
        .and(body_json(json!({ "externalId": "acme", "name": "Acme" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "acme" })))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let ops = vec![
        client
            .api()
            .create_role(
                RoleInput::builder()
                    .key("editor")
                    .name("Editor")
                    .permissions(vec!["doc:write".into()])
                    .build(),
            )
            .expect("plan"),
        client
            .api()
            .update_role("editor", RoleUpdate::builder().description("Can edit").build())
            .expect("plan"),
        client
            .api()
            .create_tenant(TenantInput::builder().key("acme").name("Acme").build())
            .expect("plan"),
    ];

    for result in client.execute_all(&ops).await {
        assert!(result.expect("execute").body().is_some());
    }
}

#[tokio::test]
async fn test_list_roles_pagination() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/roles"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().list_roles(Some(2), Some(10)).expect("plan");
    client.execute(&op).await.expect("execute");
}

#[tokio::test]
async fn test_proxied_facts_go_to_pdp() {
    let fixture = TestFixture::start().await;
    Mock::given(method("POST"))
        .and(path("/cloud/role_assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&fixture.pdp)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&fixture.api)
        .await;

    let client = fixture
        .client_with(fixture.config().proxy_facts_via_pdp(true))
        .expect("client");
    let op = client.api().assign_role("u1", "viewer", "t1").expect("plan");
    client.execute(&op).await.expect("execute");
}

#[tokio::test]
async fn test_operation_reexecutes() {
    let fixture = TestFixture::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/tenants/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "t1" })))
        .expect(2)
        .mount(&fixture.api)
        .await;

    let client = fixture.client().expect("client");
    let op = client.api().get_tenant("t1").expect("plan");
    client.execute(&op).await.expect("first");
    client.execute(&op).await.expect("second");
}
