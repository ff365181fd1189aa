// Integration tests for `CmdbClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forticfg_api::{CmdbClient, Error, Scope};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CmdbClient) {
    let server = MockServer::start().await;
    let client = CmdbClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn success_envelope(results: serde_json::Value) -> serde_json::Value {
    json!({
        "http_method": "GET",
        "revision": "abc123",
        "results": results,
        "vdom": "root",
        "status": "success",
        "http_status": 200,
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_addresses() {
    let (server, client) = setup().await;

    let body = success_envelope(json!([
        { "name": "all", "type": "ipmask", "subnet": "0.0.0.0 0.0.0.0" },
        { "name": "lan", "type": "ipmask", "subnet": "10.0.0.0 255.255.255.0" },
    ]));

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let items = client
        .list("firewall/address", &Scope::Vdom("root".into()))
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "all");
    assert_eq!(items[1]["subnet"], "10.0.0.0 255.255.255.0");
}

#[tokio::test]
async fn test_get_single_object() {
    let (server, client) = setup().await;

    let body = success_envelope(json!([
        { "name": "lan", "type": "ipmask", "subnet": "10.0.0.0 255.255.255.0" },
    ]));

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/lan"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let obj = client
        .get("firewall/address", "lan", &Scope::Vdom("root".into()))
        .await
        .unwrap();

    assert_eq!(obj["name"], "lan");
    assert_eq!(obj["type"], "ipmask");
}

#[tokio::test]
async fn test_get_encodes_mkey_segment() {
    let (server, client) = setup().await;

    // mkeys may contain slashes and spaces; they must travel as one segment.
    let body = success_envelope(json!([{ "name": "net 10/8" }]));

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/net%2010%2F8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let obj = client
        .get("firewall/address", "net 10/8", &Scope::Global)
        .await
        .unwrap();

    assert_eq!(obj["name"], "net 10/8");
}

#[tokio::test]
async fn test_create_returns_assigned_mkey() {
    let (server, client) = setup().await;

    let payload = json!({ "name": "dmz", "subnet": "172.16.0.0 255.255.0.0" });

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .and(query_param("vdom", "root"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "mkey": "dmz",
            "revision": "def456",
        })))
        .mount(&server)
        .await;

    let mkey = client
        .create("firewall/address", &Scope::Vdom("root".into()), &payload)
        .await
        .unwrap();

    assert_eq!(mkey, "dmz");
}

#[tokio::test]
async fn test_create_returns_auto_assigned_integer_mkey() {
    let (server, client) = setup().await;

    // policyid 0 asks the gateway to assign the next free id.
    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/policy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "mkey": 7,
        })))
        .mount(&server)
        .await;

    let mkey = client
        .create(
            "firewall/policy",
            &Scope::Vdom("root".into()),
            &json!({ "policyid": 0, "name": "allow-lan" }),
        )
        .await
        .unwrap();

    assert_eq!(mkey, "7");
}

#[tokio::test]
async fn test_update_and_delete() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/cmdb/firewall/address/lan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "lan",
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/address/lan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "lan",
        })))
        .mount(&server)
        .await;

    let scope = Scope::Vdom("root".into());
    client
        .update("firewall/address", "lan", &scope, &json!({ "comment": "updated" }))
        .await
        .unwrap();
    client.delete("firewall/address", "lan", &scope).await.unwrap();
}

#[tokio::test]
async fn test_global_scope_query_param() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/system/global"))
        .and(query_param("global", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!([{}]))),
        )
        .mount(&server)
        .await;

    client.list("system/global", &Scope::Global).await.unwrap();
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_missing_object_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "http_status": 404,
            "error": -3,
        })))
        .mount(&server)
        .await;

    let err = client
        .get("firewall/address", "ghost", &Scope::Vdom("root".into()))
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err}");
    match err {
        Error::NotFound { path, mkey } => {
            assert_eq!(path, "firewall/address");
            assert_eq!(mkey.as_deref(), Some("ghost"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_missing_object_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/address/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error", "http_status": 404, "error": -3,
        })))
        .mount(&server)
        .await;

    let err = client
        .delete("firewall/address", "ghost", &Scope::Vdom("root".into()))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_cli_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "http_status": 500,
            "error": -5,
            "cli_error": "entry already exists",
        })))
        .mount(&server)
        .await;

    let err = client
        .create(
            "firewall/address",
            &Scope::Vdom("root".into()),
            &json!({ "name": "dup" }),
        )
        .await
        .unwrap_err();

    assert_eq!(err.cli_error_code(), Some(-5));
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "entry already exists");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list("firewall/address", &Scope::Vdom("root".into()))
        .await
        .unwrap_err();

    assert!(err.is_auth_expired(), "expected auth error, got: {err}");
}

#[tokio::test]
async fn test_rate_limited_request_is_retried_once() {
    let (server, client) = setup().await;

    // First response throttles; the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!([{ "name": "all" }]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let items = client
        .list("firewall/address", &Scope::Vdom("root".into()))
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client
        .list("firewall/address", &Scope::Vdom("root".into()))
        .await
        .unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("<html>")),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}
