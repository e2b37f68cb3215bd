#![cfg(not(target_arch = "wasm32"))]

use std::sync::Arc;

use firebase_analytics_bridge::analytics::{
    Analytics, AnalyticsConfig, ConsentMap, ConsentStatus, ConsentType, ParameterBundle,
    ParameterValue, RecordingAnalyticsSdk, SdkCall,
};
use firebase_analytics_bridge::bridge::{AnalyticsPlugin, BridgeResponse};

fn init_plugin() -> (AnalyticsPlugin, RecordingAnalyticsSdk) {
    let sdk = RecordingAnalyticsSdk::new();
    let config = AnalyticsConfig::from_json(r#"{"maxParameterDepth": 8}"#).expect("config");
    let plugin = AnalyticsPlugin::new(Analytics::with_config(Arc::new(sdk.clone()), config));
    plugin.initialize();
    (plugin, sdk)
}

#[tokio::test(flavor = "current_thread")]
async fn ecommerce_event_reaches_sdk_with_typed_items() {
    let (plugin, sdk) = init_plugin();
    let response = plugin
        .exec(
            "logEvent",
            r#"["purchase", {
                "transaction_id": "T-1001",
                "value": 25.5,
                "quantity": 3,
                "timestamp_ms": 1700000000000,
                "gift": true,
                "items": [
                    {"item_id": "sku-1", "price": 10.5},
                    {"item_id": "sku-2", "price": 15}
                ]
            }]"#,
        )
        .await;
    assert_eq!(response, BridgeResponse::ok());

    let expected = ParameterBundle::new()
        .with("transaction_id", "T-1001")
        .with("value", 25.5)
        .with("quantity", 3)
        .with("timestamp_ms", 1_700_000_000_000i64)
        .with(
            "items",
            vec![
                ParameterBundle::new().with("item_id", "sku-1").with("price", 10.5),
                ParameterBundle::new().with("item_id", "sku-2").with("price", 15),
            ],
        );
    assert_eq!(
        sdk.take_calls(),
        vec![SdkCall::LogEvent {
            name: "purchase".into(),
            params: expected,
        }]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn screen_and_user_calls_map_to_sdk() {
    let (plugin, sdk) = init_plugin();
    assert!(plugin.exec("setUserId", r#"["12345"]"#).await.is_success());
    assert!(plugin.exec("setCurrentScreen", r#"["User dashboard"]"#).await.is_success());
    assert!(plugin.exec("setDefaultEventParameters", "[]").await.is_success());
    assert!(plugin.exec("resetAnalyticsData", "").await.is_success());

    let calls = sdk.take_calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], SdkCall::SetUserId("12345".into()));
    match &calls[1] {
        SdkCall::LogEvent { name, params } => {
            assert_eq!(name, "screen_view");
            assert_eq!(
                params.get("screen_name"),
                Some(&ParameterValue::String("User dashboard".into()))
            );
        }
        other => panic!("unexpected call {other:?}"),
    }
    assert_eq!(calls[2], SdkCall::SetDefaultEventParameters(ParameterBundle::new()));
    assert_eq!(calls[3], SdkCall::ResetAnalyticsData);
}

#[tokio::test(flavor = "current_thread")]
async fn consent_denial_turns_identifiers_into_null() {
    let (plugin, sdk) = init_plugin();
    let instance_id = plugin.exec("getAppInstanceId", "[]").await;
    let instance_id = instance_id.payload().expect("instance id").to_string();
    assert_ne!(instance_id, "null");

    let response = plugin
        .exec(
            "setConsent",
            r#"[{"analytics_storage": "denied", "AD_PERSONALIZATION": "Granted"}]"#,
        )
        .await;
    assert_eq!(response, BridgeResponse::ok());
    assert_eq!(
        sdk.take_calls(),
        vec![SdkCall::SetConsent(ConsentMap::from([
            (ConsentType::AnalyticsStorage, ConsentStatus::Denied),
            (ConsentType::AdPersonalization, ConsentStatus::Granted),
        ]))]
    );

    assert_eq!(plugin.exec("getAppInstanceId", "[]").await, BridgeResponse::ok_with("null"));
    assert_eq!(plugin.exec("getSessionId", "[]").await, BridgeResponse::ok_with("null"));
}

#[tokio::test(flavor = "current_thread")]
async fn native_failure_becomes_error_response() {
    let (plugin, sdk) = init_plugin();
    sdk.fail_next_lookup("Analytics not available");
    assert_eq!(
        plugin.exec("getSessionId", "[]").await,
        BridgeResponse::error("Failed to retrieve session ID: Analytics not available")
    );
    let session_id = plugin.exec("getSessionId", "[]").await;
    assert!(session_id.payload().unwrap().parse::<i64>().is_ok());
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_invocations_get_one_error_each() {
    let (plugin, sdk) = init_plugin();
    assert_eq!(
        plugin.exec("setEnabled", r#"["yes"]"#).await,
        BridgeResponse::error("argument at index 0 must be a boolean, got string")
    );
    assert_eq!(
        plugin.exec("setConsent", "[]").await,
        BridgeResponse::error("missing argument at index 0")
    );
    assert!(!plugin.exec("logEvent", "{not json").await.is_success());
    assert_eq!(
        plugin.exec("setConsent", r#"[{"bogus_type": "granted"}]"#).await,
        BridgeResponse::error("Invalid consent type: bogus_type")
    );
    assert!(sdk.calls().is_empty());
}
