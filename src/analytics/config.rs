use serde::Deserialize;

use crate::analytics::constants::DEFAULT_MAX_PARAMETER_DEPTH;
use crate::analytics::error::{invalid_argument, AnalyticsResult};
use crate::analytics::marshal::ParameterMarshaler;

/// Plugin level configuration, typically read from the host's plugin preferences.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Maximum nesting of parameter lists accepted by the marshaler.
    pub max_parameter_depth: usize,
    /// Collection flag applied once when the plugin initializes. `None` leaves the SDK default.
    pub analytics_collection_enabled: Option<bool>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            max_parameter_depth: DEFAULT_MAX_PARAMETER_DEPTH,
            analytics_collection_enabled: None,
        }
    }
}

impl AnalyticsConfig {
    /// Parses and validates a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(input: &str) -> AnalyticsResult<Self> {
        let config: AnalyticsConfig = serde_json::from_str(input)
            .map_err(|err| invalid_argument(format!("invalid analytics configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_parameter_depth(mut self, depth: usize) -> Self {
        self.max_parameter_depth = depth;
        self
    }

    pub fn with_analytics_collection_enabled(mut self, enabled: bool) -> Self {
        self.analytics_collection_enabled = Some(enabled);
        self
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.max_parameter_depth == 0 {
            return Err(invalid_argument("maxParameterDepth must be at least 1"));
        }
        Ok(())
    }

    pub(crate) fn marshaler(&self) -> ParameterMarshaler {
        ParameterMarshaler::new().with_max_depth(self.max_parameter_depth)
    }
}
