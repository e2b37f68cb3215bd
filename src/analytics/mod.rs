mod api;
mod config;
pub mod consent;
pub mod constants;
pub mod error;
pub mod marshal;
pub mod params;
pub mod sdk;

pub use api::Analytics;
pub use config::AnalyticsConfig;
pub use consent::{map_consent, map_consent_object, ConsentError, ConsentMap, ConsentStatus, ConsentType};
pub use marshal::{marshal, ParameterMap, ParameterMarshaler};
pub use params::{ParameterBundle, ParameterValue};
pub use sdk::{AnalyticsSdk, NativeError, NativeResult, RecordingAnalyticsSdk, SdkCall};
