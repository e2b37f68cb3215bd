//! Validation of string-keyed consent settings into typed consent entries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentType {
    AnalyticsStorage,
    AdStorage,
    AdUserData,
    AdPersonalization,
}

impl ConsentType {
    pub const ALL: [ConsentType; 4] = [
        ConsentType::AnalyticsStorage,
        ConsentType::AdStorage,
        ConsentType::AdUserData,
        ConsentType::AdPersonalization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentType::AnalyticsStorage => "ANALYTICS_STORAGE",
            ConsentType::AdStorage => "AD_STORAGE",
            ConsentType::AdUserData => "AD_USER_DATA",
            ConsentType::AdPersonalization => "AD_PERSONALIZATION",
        }
    }
}

impl fmt::Display for ConsentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentType {
    type Err = ();

    /// Matches after full Unicode upper-casing, so `ı` and `ſ` fold to `I` and `S`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.to_uppercase();
        ConsentType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == upper)
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Granted,
    Denied,
}

impl ConsentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentStatus::Granted => "GRANTED",
            ConsentStatus::Denied => "DENIED",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.to_uppercase();
        [ConsentStatus::Granted, ConsentStatus::Denied]
            .into_iter()
            .find(|candidate| candidate.as_str() == upper)
            .ok_or(())
    }
}

pub type ConsentMap = BTreeMap<ConsentType, ConsentStatus>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsentError {
    UnknownType(String),
    /// Carries the offending key and the status exactly as supplied.
    UnknownStatus(String, String),
}

impl fmt::Display for ConsentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsentError::UnknownType(key) => write!(f, "Invalid consent type: {key}"),
            ConsentError::UnknownStatus(key, status) => write!(
                f,
                "Invalid consent status for type {key}: {}",
                status.to_uppercase()
            ),
        }
    }
}

impl std::error::Error for ConsentError {}

/// Builds a [`ConsentMap`] from string pairs, failing on the first unknown type or status.
///
/// Nothing is returned on failure, so a caller can never forward a partially validated map.
pub fn map_consent<I, K, V>(input: I) -> Result<ConsentMap, ConsentError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut consent = ConsentMap::new();
    for (key, value) in input {
        let (key, value) = (key.as_ref(), value.as_ref());
        let consent_type = key
            .parse::<ConsentType>()
            .map_err(|_| ConsentError::UnknownType(key.to_string()))?;
        let status = value
            .parse::<ConsentStatus>()
            .map_err(|_| ConsentError::UnknownStatus(key.to_string(), value.to_string()))?;
        consent.insert(consent_type, status);
    }
    Ok(consent)
}

/// Same as [`map_consent`] for a JSON object. Non-string values are read through their JSON
/// text, so `{"ad_storage": 1}` reports the status `1`.
pub fn map_consent_object(input: &Map<String, Value>) -> Result<ConsentMap, ConsentError> {
    map_consent(input.iter().map(|(key, value)| {
        let status = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        (key.as_str(), status)
    }))
}
