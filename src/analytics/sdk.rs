//! Seam between the bridge and the vendor analytics SDK.
//!
//! Host integrations implement [`AnalyticsSdk`] on top of the platform SDK. The
//! [`RecordingAnalyticsSdk`] keeps everything in memory and is what tests and demos use.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::analytics::consent::{ConsentMap, ConsentStatus, ConsentType};
use crate::analytics::params::ParameterBundle;

/// Failure reported by an asynchronous native call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeError {
    message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NativeError {}

pub type NativeResult<T> = Result<T, NativeError>;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AnalyticsSdk: Send + Sync {
    fn log_event(&self, name: &str, params: ParameterBundle);

    fn set_user_id(&self, user_id: &str);

    fn set_user_property(&self, name: &str, value: &str);

    fn set_analytics_collection_enabled(&self, enabled: bool);

    fn reset_analytics_data(&self);

    fn set_default_event_parameters(&self, params: ParameterBundle);

    fn set_consent(&self, consent: ConsentMap);

    /// Resolves to `None` when the SDK has no instance id, e.g. analytics storage is denied.
    async fn app_instance_id(&self) -> NativeResult<Option<String>>;

    /// Resolves to `None` when no session is active.
    async fn session_id(&self) -> NativeResult<Option<i64>>;
}

/// One call observed by [`RecordingAnalyticsSdk`].
#[derive(Clone, Debug, PartialEq)]
pub enum SdkCall {
    LogEvent { name: String, params: ParameterBundle },
    SetUserId(String),
    SetUserProperty { name: String, value: String },
    SetAnalyticsCollectionEnabled(bool),
    ResetAnalyticsData,
    SetDefaultEventParameters(ParameterBundle),
    SetConsent(ConsentMap),
}

/// In-memory [`AnalyticsSdk`] that records every call.
#[derive(Clone, Default)]
pub struct RecordingAnalyticsSdk {
    inner: Arc<RecordingInner>,
}

#[derive(Default)]
struct RecordingInner {
    calls: Mutex<Vec<SdkCall>>,
    app_instance_id: Mutex<Option<String>>,
    session_started_at: Mutex<Option<i64>>,
    analytics_storage_denied: AtomicBool,
    pending_failure: Mutex<Option<String>>,
}

impl fmt::Debug for RecordingAnalyticsSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingAnalyticsSdk")
            .field("calls", &self.inner.calls.lock().unwrap().len())
            .finish()
    }
}

impl RecordingAnalyticsSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SdkCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<SdkCall> {
        std::mem::take(&mut *self.inner.calls.lock().unwrap())
    }

    /// Makes the next identifier lookup fail with `message`.
    pub fn fail_next_lookup(&self, message: impl Into<String>) {
        *self.inner.pending_failure.lock().unwrap() = Some(message.into());
    }

    fn record(&self, call: SdkCall) {
        log::debug!("native analytics call: {call:?}");
        self.inner.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self) -> NativeResult<()> {
        match self.inner.pending_failure.lock().unwrap().take() {
            Some(message) => Err(NativeError::new(message)),
            None => Ok(()),
        }
    }

    fn storage_denied(&self) -> bool {
        self.inner.analytics_storage_denied.load(Ordering::SeqCst)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AnalyticsSdk for RecordingAnalyticsSdk {
    fn log_event(&self, name: &str, params: ParameterBundle) {
        self.record(SdkCall::LogEvent {
            name: name.to_string(),
            params,
        });
    }

    fn set_user_id(&self, user_id: &str) {
        self.record(SdkCall::SetUserId(user_id.to_string()));
    }

    fn set_user_property(&self, name: &str, value: &str) {
        self.record(SdkCall::SetUserProperty {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn set_analytics_collection_enabled(&self, enabled: bool) {
        self.record(SdkCall::SetAnalyticsCollectionEnabled(enabled));
    }

    fn reset_analytics_data(&self) {
        self.inner.app_instance_id.lock().unwrap().take();
        self.inner.session_started_at.lock().unwrap().take();
        self.record(SdkCall::ResetAnalyticsData);
    }

    fn set_default_event_parameters(&self, params: ParameterBundle) {
        self.record(SdkCall::SetDefaultEventParameters(params));
    }

    fn set_consent(&self, consent: ConsentMap) {
        if let Some(status) = consent.get(&ConsentType::AnalyticsStorage) {
            self.inner
                .analytics_storage_denied
                .store(*status == ConsentStatus::Denied, Ordering::SeqCst);
        }
        self.record(SdkCall::SetConsent(consent));
    }

    async fn app_instance_id(&self) -> NativeResult<Option<String>> {
        self.take_failure()?;
        if self.storage_denied() {
            return Ok(None);
        }
        let mut guard = self.inner.app_instance_id.lock().unwrap();
        Ok(Some(guard.get_or_insert_with(generate_app_instance_id).clone()))
    }

    async fn session_id(&self) -> NativeResult<Option<i64>> {
        self.take_failure()?;
        if self.storage_denied() {
            return Ok(None);
        }
        let mut guard = self.inner.session_started_at.lock().unwrap();
        Ok(Some(*guard.get_or_insert_with(|| Utc::now().timestamp())))
    }
}

fn generate_app_instance_id() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .take(32)
        .collect()
}
