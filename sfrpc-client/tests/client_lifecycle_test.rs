//! Client lifecycle integration tests
//!
//! Tests for building clients from configuration, sharing them across clones
//! and tasks, and the per-call independence of concurrent requests.

mod common;

use common::{client_with, mock_response, FakeTransport, TEST_ENDPOINT};
use serde_json::json;
use sfrpc_client::{SfClient, MAX_REQUEST_ID, MIN_REQUEST_ID};
use sfrpc_core::{BlockSize, EndpointConfig, Error};
use std::collections::HashSet;
use std::io::Write;

#[tokio::test]
async fn test_client_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tenantID": 7, "endPoint": "{TEST_ENDPOINT}", "apiVersion": "10.1", "defaultBlockSize": 512}}"#
    )
    .unwrap();

    let config = EndpointConfig::from_file(file.path()).unwrap();
    let client = SfClient::builder(config)
        .with_transport(FakeTransport::replying(|req| mock_response(req.id, json!({}))))
        .build()
        .unwrap();

    assert_eq!(client.tenant_id(), 7);
    assert_eq!(client.api_version(), "10.1");
    assert_eq!(client.endpoint(), TEST_ENDPOINT);
    assert_eq!(client.config().default_block_size, BlockSize::B512);
    assert!(client.config().use_chap);
}

#[tokio::test]
async fn test_client_rejects_bad_endpoint() {
    let result = SfClient::builder(EndpointConfig::new("ftp://10.0.0.1/json-rpc/9.0"))
        .with_transport(FakeTransport::refusing())
        .build();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_clones_share_transport() {
    let transport = FakeTransport::replying(|req| mock_response(req.id, json!({"accounts": []})));
    let client = client_with(transport.clone());
    let clone = client.clone();

    client.call_value("ListAccounts", &json!({})).await.unwrap();
    clone.call_value("ListAccounts", &json!({})).await.unwrap();

    assert_eq!(transport.calls(), 2);
    assert_eq!(clone.endpoint(), client.endpoint());
}

#[tokio::test]
async fn test_seeded_clients_draw_same_ids() {
    let first = FakeTransport::replying(|req| mock_response(req.id, json!({})));
    let second = FakeTransport::replying(|req| mock_response(req.id, json!({})));

    for transport in [&first, &second] {
        let client = SfClient::builder(EndpointConfig::new(TEST_ENDPOINT))
            .with_transport(transport.clone())
            .id_seed(2024)
            .build()
            .unwrap();
        client.call_value("GetClusterInfo", &json!({})).await.unwrap();
    }

    assert_eq!(
        first.last_request().unwrap().id,
        second.last_request().unwrap().id
    );
}

#[tokio::test]
async fn test_concurrent_calls_from_tasks() {
    let transport = FakeTransport::replying(|req| {
        let volume_id = req.params["volumeID"].as_i64().unwrap_or(-1);
        mock_response(req.id, json!({"volume": {"volumeID": volume_id}}))
    });
    let client = client_with(transport.clone());

    let mut handles = Vec::new();
    for volume_id in 0..20i64 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let result = client
                .call_value("GetVolumeStats", &json!({"volumeID": volume_id}))
                .await
                .unwrap();
            (volume_id, result)
        }));
    }

    for handle in handles {
        let (volume_id, result) = handle.await.unwrap();
        // Each call gets its own response back
        assert_eq!(result["volume"]["volumeID"], json!(volume_id));
    }

    assert_eq!(transport.calls(), 20);
}

#[tokio::test]
async fn test_ids_stay_in_range_across_calls() {
    let transport = FakeTransport::replying(|req| mock_response(req.id, json!({})));
    let client = client_with(transport.clone());

    let mut seen = HashSet::new();
    for _ in 0..100 {
        client.call_value("GetClusterCapacity", &json!({})).await.unwrap();
        let id = transport.last_request().unwrap().id;
        assert!((MIN_REQUEST_ID..=MAX_REQUEST_ID).contains(&id));
        seen.insert(id);
    }

    assert!(seen.len() > 1);
}

#[tokio::test]
async fn test_failed_call_does_not_poison_client() {
    let transport = FakeTransport::new(|req| {
        let body = if req.method == "Broken" {
            "not json".to_string()
        } else {
            mock_response(req.id, json!({"ok": true}))
        };
        Ok(sfrpc_client::RawResponse::from_bytes("200 OK", body))
    });
    let client = client_with(transport);

    assert!(matches!(
        client.call_value("Broken", &json!({})).await,
        Err(Error::Decode { .. })
    ));
    assert_eq!(
        client.call_value("Working", &json!({})).await.unwrap(),
        json!({"ok": true})
    );
}
