// End-to-end tests for the `Cmdb` handle: catalog definitions + schema
// engine + transport against a wiremock gateway.

use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forticfg_api::CmdbClient;
use forticfg_core::{Cmdb, CoreError, Scope, catalog};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Cmdb) {
    let server = MockServer::start().await;
    let client = CmdbClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let cmdb = Cmdb::from_client(client, Scope::Vdom("root".into()));
    (server, cmdb)
}

fn attrs(v: Value) -> Map<String, Value> {
    v.as_object().unwrap().clone()
}

fn success(results: Value) -> Value {
    json!({ "status": "success", "http_status": 200, "results": results })
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn get_flattens_wire_object_through_the_catalog_schema() {
    let (server, cmdb) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/policy/4"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!([{
            "policyid": 4,
            "name": "allow-lan",
            "srcaddr": [{ "name": "zulu", "q_origin_key": "zulu" }, { "name": "alpha" }],
            "dstaddr": [{ "name": "all" }],
            "action": "accept",
            "utm-status": "disable",
            "some-unmodeled-field": 42,
        }]))))
        .mount(&server)
        .await;

    let got = cmdb.get(&catalog::firewall::POLICY, "4").await.unwrap();

    assert_eq!(got["policyid"], json!(4));
    assert_eq!(got["utm_status"], json!("disable"));
    // set-like member table sorted by mkey
    assert_eq!(
        got["srcaddr"],
        json!([{ "name": "alpha" }, { "name": "zulu" }])
    );
    assert!(!got.contains_key("some-unmodeled-field"));
}

#[tokio::test]
async fn list_flattens_every_object() {
    let (server, cmdb) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/router/static"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!([
            { "seq-num": 1, "dst": "0.0.0.0 0.0.0.0", "gateway": "192.168.1.1", "distance": "10" },
            { "seq-num": 2, "dst": "10.0.0.0 255.0.0.0", "device": "port2" },
        ]))))
        .mount(&server)
        .await;

    let routes = cmdb.list(&catalog::router::STATIC).await.unwrap();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0]["seq_num"], json!(1));
    // loosely typed wire scalar coerced to the schema kind
    assert_eq!(routes[0]["distance"], json!(10));
    assert_eq!(routes[1]["device"], json!("port2"));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_expands_local_attrs_to_wire_names() {
    let (server, cmdb) = setup().await;

    // allow_routing must leave the process as allow-routing.
    let expected_body = json!({
        "name": "dmz",
        "subnet": "172.16.0.0 255.255.0.0",
        "allow-routing": "enable",
    });

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "dmz",
        })))
        .mount(&server)
        .await;

    let mkey = cmdb
        .create(
            &catalog::firewall::ADDRESS,
            &attrs(json!({
                "name": "dmz",
                "subnet": "172.16.0.0 255.255.0.0",
                "allow_routing": "enable",
            })),
        )
        .await
        .unwrap();

    assert_eq!(mkey, "dmz");
}

#[tokio::test]
async fn create_rejects_unknown_attributes_before_any_request() {
    let (_server, cmdb) = setup().await;

    let err = cmdb
        .create(
            &catalog::firewall::ADDRESS,
            &attrs(json!({ "name": "x", "subnett": "typo" })),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)), "got: {err}");
}

#[tokio::test]
async fn set_creates_when_update_hits_not_found() {
    let (server, cmdb) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/cmdb/firewall/address/edge"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error", "http_status": 404, "error": -3,
        })))
        .mount(&server)
        .await;

    // The fallback create must carry the mkey attribute.
    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/address"))
        .and(body_json(json!({ "name": "edge", "subnet": "192.0.2.0 255.255.255.0" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "edge",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mkey = cmdb
        .set(
            &catalog::firewall::ADDRESS,
            "edge",
            &attrs(json!({ "subnet": "192.0.2.0 255.255.255.0" })),
        )
        .await
        .unwrap();

    assert_eq!(mkey, "edge");
}

#[tokio::test]
async fn delete_missing_object_reports_catalog_name() {
    let (server, cmdb) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/addrgrp/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error", "http_status": 404, "error": -3,
        })))
        .mount(&server)
        .await;

    let err = cmdb
        .delete(&catalog::firewall::ADDRGRP, "ghost")
        .await
        .unwrap_err();

    match err {
        CoreError::NotFound { resource, mkey } => {
            assert_eq!(resource, "firewall.addrgrp");
            assert_eq!(mkey, "ghost");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn exists_distinguishes_present_and_absent() {
    let (server, cmdb) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/system/zone/trust"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(json!([{ "name": "trust" }]))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/system/zone/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error", "http_status": 404, "error": -3,
        })))
        .mount(&server)
        .await;

    assert!(cmdb.exists(&catalog::system::ZONE, "trust").await.unwrap());
    assert!(!cmdb.exists(&catalog::system::ZONE, "ghost").await.unwrap());
}

#[tokio::test]
async fn rejected_change_carries_cli_error_code() {
    let (server, cmdb) = setup().await;

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

    let err = cmdb
        .create(&catalog::firewall::ADDRESS, &attrs(json!({ "name": "dup" })))
        .await
        .unwrap_err();

    match err {
        CoreError::Rejected { code, message } => {
            assert_eq!(code, Some(-5));
            assert_eq!(message, "entry already exists");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}
