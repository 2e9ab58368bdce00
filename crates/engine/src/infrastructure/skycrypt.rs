//! SkyCrypt community aggregator client
//!
//! Unauthenticated, keyed by display name. Used only to backfill skill and
//! slayer data the primary source did not supply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::infrastructure::config::StatsConfig;
use crate::infrastructure::ports::{AggregatorPort, AggregatorProfile, UpstreamError};

const SOURCE: &str = "skycrypt";

/// Client for the SkyCrypt profile API
#[derive(Clone)]
pub struct SkyCryptClient {
    client: Client,
    base_url: String,
}

impl SkyCryptClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(&config.skycrypt_base_url, config.timeout)
    }

    /// Public stats page for a display name.
    pub fn profile_page_url(&self, display_name: &str) -> Result<Url, UpstreamError> {
        self.url_with_segments(&["stats", display_name])
    }

    fn profile_api_url(&self, display_name: &str) -> Result<Url, UpstreamError> {
        self.url_with_segments(&["api", "v2", "profile", display_name])
    }

    /// Append percent-encoded path segments to the base URL.
    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| UpstreamError::request_failed(SOURCE, e))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::request_failed(SOURCE, "base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl AggregatorPort for SkyCryptClient {
    async fn get_profiles(&self, display_name: &str) -> Result<Vec<AggregatorProfile>, UpstreamError> {
        let url = self.profile_api_url(display_name)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::request_failed(SOURCE, e))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                source_name: SOURCE,
                status: response.status().as_u16(),
            });
        }

        let body: ProfilesResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::invalid_response(SOURCE, e))?;

        Ok(convert_profiles(body))
    }
}

/// Accept `profiles` as either a list or an object keyed by profile id.
fn convert_profiles(body: ProfilesResponse) -> Vec<AggregatorProfile> {
    let entries: Vec<Value> = match body.profiles {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ProfileDto>(entry).ok())
        .map(|profile| AggregatorProfile {
            cute_name: profile.cute_name,
            selected: profile.selected.unwrap_or(false),
            members: profile.members.unwrap_or_default(),
        })
        .collect()
}

// =============================================================================
// SkyCrypt API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProfilesResponse {
    profiles: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    cute_name: Option<String>,
    selected: Option<bool>,
    members: Option<Map<String, Value>>,
}
