use std::fmt;
use std::sync::Arc;

use crate::analytics::config::AnalyticsConfig;
use crate::analytics::consent::{map_consent_object, ConsentMap};
use crate::analytics::constants::{EVENT_SCREEN_VIEW, NULL_PAYLOAD, PARAM_SCREEN_NAME};
use crate::analytics::error::{native_error, AnalyticsResult};
use crate::analytics::marshal::{ParameterMap, ParameterMarshaler};
use crate::analytics::params::ParameterBundle;
use crate::analytics::sdk::AnalyticsSdk;

/// Client handle wrapping a native analytics SDK.
///
/// The handle is constructed explicitly by whoever owns the SDK and passed to the dispatch
/// layer; cloning it shares the same SDK.
#[derive(Clone)]
pub struct Analytics {
    inner: Arc<AnalyticsInner>,
}

struct AnalyticsInner {
    sdk: Arc<dyn AnalyticsSdk>,
    config: AnalyticsConfig,
    marshaler: ParameterMarshaler,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Analytics {
    pub fn new(sdk: Arc<dyn AnalyticsSdk>) -> Self {
        Self::with_config(sdk, AnalyticsConfig::default())
    }

    pub fn with_config(sdk: Arc<dyn AnalyticsSdk>, config: AnalyticsConfig) -> Self {
        let marshaler = config.marshaler();
        Self {
            inner: Arc::new(AnalyticsInner {
                sdk,
                config,
                marshaler,
            }),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.inner.config
    }

    /// Converts `params` into a native bundle. Unsupported values are dropped with a warning.
    pub fn marshal(&self, params: &ParameterMap) -> ParameterBundle {
        self.inner.marshaler.marshal(params)
    }

    pub fn log_event(&self, name: &str, params: &ParameterMap) {
        let bundle = self.marshal(params);
        self.inner.sdk.log_event(name, bundle);
    }

    pub fn set_user_id(&self, user_id: &str) {
        self.inner.sdk.set_user_id(user_id);
    }

    pub fn set_user_property(&self, name: &str, value: &str) {
        self.inner.sdk.set_user_property(name, value);
    }

    /// Clears all analytics data for this instance and resets the app instance id.
    pub fn reset_analytics_data(&self) {
        self.inner.sdk.reset_analytics_data();
    }

    pub fn set_analytics_collection_enabled(&self, enabled: bool) {
        self.inner.sdk.set_analytics_collection_enabled(enabled);
    }

    /// Records the current screen by logging a `screen_view` event.
    pub fn set_current_screen(&self, screen_name: &str) {
        let bundle = ParameterBundle::new().with(PARAM_SCREEN_NAME, screen_name);
        self.inner.sdk.log_event(EVENT_SCREEN_VIEW, bundle);
    }

    /// Sets parameters the SDK attaches to every event, including automatic ones.
    pub fn set_default_event_parameters(&self, params: &ParameterMap) {
        let bundle = self.marshal(params);
        self.inner.sdk.set_default_event_parameters(bundle);
    }

    /// Validates every entry before the SDK sees any of them. An invalid type or status leaves
    /// the SDK consent state untouched.
    pub fn set_consent(&self, settings: &ParameterMap) -> AnalyticsResult<ConsentMap> {
        let consent = map_consent_object(settings)?;
        self.inner.sdk.set_consent(consent.clone());
        Ok(consent)
    }

    /// Returns the current session id, or `"null"` when the SDK reports none.
    pub async fn get_session_id(&self) -> AnalyticsResult<String> {
        match self.inner.sdk.session_id().await {
            Ok(Some(session_id)) => Ok(session_id.to_string()),
            Ok(None) => Ok(NULL_PAYLOAD.to_string()),
            Err(err) => Err(native_error(format!(
                "Failed to retrieve session ID: {}",
                err.message()
            ))),
        }
    }

    /// Returns the app instance id, or `"null"` when analytics storage is denied.
    pub async fn get_app_instance_id(&self) -> AnalyticsResult<String> {
        match self.inner.sdk.app_instance_id().await {
            Ok(Some(app_instance_id)) => Ok(app_instance_id),
            Ok(None) => Ok(NULL_PAYLOAD.to_string()),
            Err(err) => Err(native_error(format!(
                "Failed to retrieve App Instance ID: {}",
                err.message()
            ))),
        }
    }
}
