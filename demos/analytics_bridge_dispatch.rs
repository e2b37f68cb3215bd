//! Drives the plugin the way the JavaScript facade would: method names plus JSON argument arrays.
//! Calls land in an in-memory SDK which is printed at the end.

use std::sync::Arc;

use firebase_analytics_bridge::analytics::{Analytics, AnalyticsConfig, RecordingAnalyticsSdk};
use firebase_analytics_bridge::bridge::AnalyticsPlugin;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AnalyticsConfig::from_json(r#"{"analyticsCollectionEnabled": true}"#)?;
    let sdk = RecordingAnalyticsSdk::new();
    let plugin = AnalyticsPlugin::new(Analytics::with_config(Arc::new(sdk.clone()), config));
    plugin.initialize();

    let invocations = [
        ("setUserId", r#"["12345"]"#),
        ("setCurrentScreen", r#"["User dashboard"]"#),
        (
            "logEvent",
            r#"["purchase", {"currency": "USD", "value": 9.99, "items": [{"item_id": "sku-1"}]}]"#,
        ),
        ("setConsent", r#"[{"ad_storage": "denied", "analytics_storage": "granted"}]"#),
        ("setConsent", r#"[{"ad_storage": "maybe"}]"#),
        ("getSessionId", "[]"),
        ("getAppInstanceId", "[]"),
    ];

    for (action, args) in invocations {
        let response = plugin.exec(action, args).await;
        println!("{action}: {}", serde_json::to_string(&response)?);
    }

    for call in sdk.calls() {
        println!("native: {call:?}");
    }

    Ok(())
}
