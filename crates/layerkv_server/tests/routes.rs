//! Route-level tests for the store server.

use layerkv_core::SharedMap;
use layerkv_server::{KvServer, Request, Response, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

fn server() -> KvServer {
    KvServer::new(ServerConfig::default())
}

fn set(server: &KvServer, key: &str, value: Value) -> Response {
    let body = json!({ "key": key, "value": value }).to_string();
    server.handle_route("POST", "/set", Some(body.as_bytes()))
}

fn get(server: &KvServer, key: &str) -> Response {
    server.handle_route("GET", &format!("/get/{key}"), None)
}

fn post(server: &KvServer, path: &str) -> Response {
    server.handle_route("POST", path, None)
}

fn keys(server: &KvServer) -> Value {
    server.handle_route("GET", "/keys", None).body["keys"].clone()
}

#[test]
fn set_get_flow() {
    let server = server();
    let response = set(&server, "a", json!(1));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({"status": "ok"}));

    let response = get(&server, "a");
    assert_eq!(response.status, 200);
    assert_eq!(response.body["value"], json!(1));
}

#[test]
fn tx_rollback_flow() {
    let server = server();
    set(&server, "a", json!(1));
    post(&server, "/begin");
    set(&server, "a", json!(2));
    post(&server, "/rollback");

    assert_eq!(get(&server, "a").body["value"], json!(1));
}

#[test]
fn tx_commit_last_write_wins() {
    let server = server();
    set(&server, "k", json!("v1"));
    post(&server, "/begin");
    set(&server, "k", json!("v2"));
    let response = post(&server, "/commit");
    assert_eq!(response.body, json!({"status": "ok", "depth": 0}));

    assert_eq!(get(&server, "k").body["value"], json!("v2"));
}

#[test]
fn delete_shadows_until_rollback() {
    let server = server();
    set(&server, "k", json!({"nested": [1, 2]}));
    post(&server, "/begin");

    let response = server.handle_route("DELETE", "/delete/k", None);
    assert_eq!(response.status, 200);
    assert_eq!(get(&server, "k").status, 404);
    assert_eq!(
        server.handle_route("GET", "/exists/k", None).body,
        json!({"exists": false})
    );

    post(&server, "/rollback");
    assert_eq!(get(&server, "k").body["value"], json!({"nested": [1, 2]}));
}

#[test]
fn delete_missing_key_succeeds_by_default() {
    let server = server();
    let response = server.handle_route("DELETE", "/delete/ghost", None);
    assert_eq!(response.status, 200);

    post(&server, "/begin");
    let response = server.handle_route("DELETE", "/delete/ghost", None);
    assert_eq!(response.status, 200);
}

#[test]
fn commit_and_rollback_without_transaction() {
    let server = server();
    set(&server, "a", json!(1));

    for path in ["/commit", "/rollback"] {
        let response = post(&server, path);
        assert_eq!(response.status, 400);
        assert!(response.error_message().unwrap().starts_with("no transaction"));
    }
    assert_eq!(keys(&server), json!(["a"]));
}

#[test]
fn keys_reflect_active_depth() {
    let server = server();
    set(&server, "a", json!(1));
    set(&server, "b", json!(2));
    post(&server, "/begin");
    server.handle_route("DELETE", "/delete/a", None);
    set(&server, "c", json!(3));

    assert_eq!(keys(&server), json!(["b", "c"]));
    post(&server, "/rollback");
    assert_eq!(keys(&server), json!(["a", "b"]));
}

#[test]
fn encoded_keys_round_trip_through_paths() {
    let server = server();
    set(&server, "a b", json!(1));

    assert_eq!(get(&server, "a%20b").body["value"], json!(1));
    assert_eq!(
        server.handle_route("GET", "/exists/a%20b", None).body,
        json!({"exists": true})
    );
    assert_eq!(keys(&server), json!(["a b"]));

    let response = server.handle_route("DELETE", "/delete/a%20b", None);
    assert_eq!(response.status, 200);
    assert_eq!(get(&server, "a%20b").status, 404);
}

#[test]
fn bad_set_requests() {
    let server = server();

    let response = server.handle_route("POST", "/set", Some(br#"{"key": "a"}"#));
    assert_eq!(response.status, 400);
    assert_eq!(response.error_message(), Some("key and value required"));

    let response = server.handle_route("POST", "/set", Some(b"garbage"));
    assert_eq!(response.status, 400);
    assert_eq!(response.error_message(), Some("invalid request"));

    assert!(keys(&server).as_array().unwrap().is_empty());
}

#[test]
fn decoded_requests_match_routes() {
    let server = server();
    let response = server.handle(Request::Set {
        key: "a".into(),
        value: json!(true),
    });
    assert!(response.is_success());
    assert_eq!(get(&server, "a").body["value"], json!(true));
    assert_eq!(server.depth(), 0);
}

#[test]
fn servers_can_share_one_map() {
    let map = SharedMap::default();
    let first = KvServer::with_map(ServerConfig::default(), map.clone());
    let second = KvServer::with_map(ServerConfig::default(), map);

    set(&first, "a", json!(1));
    assert_eq!(get(&second, "a").body["value"], json!(1));
}

#[test]
fn concurrent_writers_are_serialized() {
    let server = Arc::new(server());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let server = Arc::clone(&server);
            thread::spawn(move || {
                for i in 0..50 {
                    let response = set(&server, &format!("k{t}_{i}"), json!(i));
                    assert_eq!(response.status, 200);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(keys(&server).as_array().unwrap().len(), 200);
}
