/// Mock range provider for development and testing
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use crate::data_provider::RangeLimitsProvider;
use crate::error::{RangeError, RangeResult};
use crate::fixtures;
use crate::types::RangeLimits;

/// Mock provider that answers from fixture data instead of the network
pub struct MockProvider {
    response: Option<RangeLimits>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Provider returning the fixture season
    pub fn new() -> Self {
        info!("Creating MockProvider for development mode");
        Self::with_limits(fixtures::create_mock_range_limits())
    }

    /// Provider returning the given record
    pub fn with_limits(limits: RangeLimits) -> Self {
        Self {
            response: Some(limits),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every fetch fails, as an unreachable endpoint would
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RangeLimitsProvider for MockProvider {
    async fn range_limits(&self) -> RangeResult<RangeLimits> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(limits) => {
                info!("MockProvider: Returning range limits {:?}", limits);
                Ok(limits.clone())
            }
            None => {
                info!("MockProvider: Simulating an unreachable range endpoint");
                Err(RangeError::Status(503))
            }
        }
    }
}
