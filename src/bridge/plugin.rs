use crate::analytics::constants::PLUGIN_NAME;
use crate::analytics::error::AnalyticsResult;
use crate::analytics::Analytics;
use crate::bridge::args::BridgeArgs;
use crate::bridge::callback::{BridgeResponse, CallbackContext};
use crate::bridge::method::BridgeMethod;

/// Dispatch layer translating bridge invocations into [`Analytics`] calls.
#[derive(Clone, Debug)]
pub struct AnalyticsPlugin {
    analytics: Analytics,
}

impl AnalyticsPlugin {
    pub fn new(analytics: Analytics) -> Self {
        Self { analytics }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Called once by the host before the first invocation.
    pub fn initialize(&self) {
        log::debug!("Starting Firebase Analytics plugin");
        if let Some(enabled) = self.analytics.config().analytics_collection_enabled {
            self.analytics.set_analytics_collection_enabled(enabled);
        }
    }

    /// Runs `action` and completes `callback` exactly once. Unknown actions and malformed
    /// arguments complete with an error.
    pub async fn execute(&self, action: &str, args: &BridgeArgs, callback: CallbackContext) {
        let method = match action.parse::<BridgeMethod>() {
            Ok(method) => method,
            Err(err) => {
                log::warn!("{PLUGIN_NAME}: {err}");
                callback.error(err.to_string());
                return;
            }
        };
        log::debug!("{PLUGIN_NAME}.{method} invoked with {} argument(s)", args.len());
        if method.is_deferred() {
            log::debug!("{PLUGIN_NAME}.{method} waiting for native callback");
        }

        match self.dispatch(method, args).await {
            Ok(Some(payload)) => callback.success_with(payload),
            Ok(None) => callback.success(),
            Err(err) => {
                log::debug!("{PLUGIN_NAME}.{method} failed: {err}");
                callback.error(err.message());
            }
        }
    }

    /// Decodes wire arguments, runs `action` and returns its single response.
    pub async fn exec(&self, action: &str, raw_args: &str) -> BridgeResponse {
        let (callback, pending) = CallbackContext::new();
        match BridgeArgs::from_json(raw_args) {
            Ok(args) => self.execute(action, &args, callback).await,
            Err(err) => callback.respond(err.into()),
        }
        pending.wait().await
    }

    async fn dispatch(&self, method: BridgeMethod, args: &BridgeArgs) -> AnalyticsResult<Option<String>> {
        let analytics = &self.analytics;
        match method {
            BridgeMethod::LogEvent => {
                let name = args.get_string(0)?;
                let params = args.opt_object(1)?;
                analytics.log_event(&name, &params);
            }
            BridgeMethod::SetUserId => analytics.set_user_id(&args.get_string(0)?),
            BridgeMethod::SetUserProperty => {
                let name = args.get_string(0)?;
                let value = args.get_string(1)?;
                analytics.set_user_property(&name, &value);
            }
            BridgeMethod::ResetAnalyticsData => analytics.reset_analytics_data(),
            BridgeMethod::SetAnalyticsCollectionEnabled | BridgeMethod::SetEnabled => {
                analytics.set_analytics_collection_enabled(args.get_bool(0)?)
            }
            BridgeMethod::SetCurrentScreen => analytics.set_current_screen(&args.get_string(0)?),
            BridgeMethod::SetDefaultEventParameters => {
                let params = args.opt_object(0)?;
                analytics.set_default_event_parameters(&params);
            }
            BridgeMethod::GetSessionId => return analytics.get_session_id().await.map(Some),
            BridgeMethod::GetAppInstanceId => return analytics.get_app_instance_id().await.map(Some),
            BridgeMethod::SetConsent => {
                analytics.set_consent(args.get_object(0)?)?;
            }
        }
        Ok(None)
    }
}
