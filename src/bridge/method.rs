use std::fmt;
use std::str::FromStr;

/// Methods the JavaScript facade can invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BridgeMethod {
    LogEvent,
    SetUserId,
    SetUserProperty,
    ResetAnalyticsData,
    SetAnalyticsCollectionEnabled,
    /// Older name for `setAnalyticsCollectionEnabled`, still sent by the facade.
    SetEnabled,
    SetCurrentScreen,
    SetDefaultEventParameters,
    GetSessionId,
    GetAppInstanceId,
    SetConsent,
}

impl BridgeMethod {
    pub const ALL: [BridgeMethod; 11] = [
        BridgeMethod::LogEvent,
        BridgeMethod::SetUserId,
        BridgeMethod::SetUserProperty,
        BridgeMethod::ResetAnalyticsData,
        BridgeMethod::SetAnalyticsCollectionEnabled,
        BridgeMethod::SetEnabled,
        BridgeMethod::SetCurrentScreen,
        BridgeMethod::SetDefaultEventParameters,
        BridgeMethod::GetSessionId,
        BridgeMethod::GetAppInstanceId,
        BridgeMethod::SetConsent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeMethod::LogEvent => "logEvent",
            BridgeMethod::SetUserId => "setUserId",
            BridgeMethod::SetUserProperty => "setUserProperty",
            BridgeMethod::ResetAnalyticsData => "resetAnalyticsData",
            BridgeMethod::SetAnalyticsCollectionEnabled => "setAnalyticsCollectionEnabled",
            BridgeMethod::SetEnabled => "setEnabled",
            BridgeMethod::SetCurrentScreen => "setCurrentScreen",
            BridgeMethod::SetDefaultEventParameters => "setDefaultEventParameters",
            BridgeMethod::GetSessionId => "getSessionId",
            BridgeMethod::GetAppInstanceId => "getAppInstanceId",
            BridgeMethod::SetConsent => "setConsent",
        }
    }

    /// Whether the method completes on a later native callback.
    pub fn is_deferred(&self) -> bool {
        matches!(self, BridgeMethod::GetSessionId | BridgeMethod::GetAppInstanceId)
    }
}

impl fmt::Display for BridgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for BridgeMethod {
    type Err = UnknownMethod;

    fn from_str(action: &str) -> Result<Self, Self::Err> {
        BridgeMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == action)
            .ok_or_else(|| UnknownMethod(action.to_string()))
    }
}
