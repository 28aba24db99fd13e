/// Trait for providing date range limits, abstracting over the HTTP endpoint and mock implementations
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{RangeError, RangeResult};
use crate::types::RangeLimits;

/// Timeout applied to range requests
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Source of authoritative range limits, implemented by the HTTP provider and mocks
#[async_trait]
pub trait RangeLimitsProvider: Send + Sync {
    /// Fetch the current range limits
    async fn range_limits(&self) -> RangeResult<RangeLimits>;

    /// Fetch the range limits, bypassing any memoized response
    async fn refresh(&self) -> RangeResult<RangeLimits> {
        self.range_limits().await
    }
}

/// Fetches range limits with a parameterless GET against a fixed endpoint
pub struct HttpRangeProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpRangeProvider {
    /// Create a provider for the given endpoint
    pub fn new(url: impl Into<String>) -> RangeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RangeLimitsProvider for HttpRangeProvider {
    async fn range_limits(&self) -> RangeResult<RangeLimits> {
        debug!("Requesting range limits from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RangeError::Status(status.as_u16()));
        }

        Ok(response.json::<RangeLimits>().await?)
    }
}
