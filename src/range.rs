//! Resolution of the allowed date range
//!
//! Bounds come from the authoritative provider when it answers, else from the
//! last persisted response, else from a symmetric window around today.
//! Resolution never fails.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::cache::{RangeLimitsStore, RANGE_LIMITS_KEY};
use crate::data_provider::RangeLimitsProvider;
use crate::types::{shift_months, Bounds};

/// Months on either side of today used when no range is known
pub const DEFAULT_RANGE_OFFSET_MONTHS: u32 = 9;

/// Where a set of resolved bounds came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSource {
    Authoritative,
    Cache,
    Default,
}

impl fmt::Display for BoundsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BoundsSource::Authoritative => "range endpoint",
            BoundsSource::Cache => "cache",
            BoundsSource::Default => "default window",
        };
        f.write_str(label)
    }
}

/// Bounds along with their provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBounds {
    pub bounds: Bounds,
    pub source: BoundsSource,
}

/// Symmetric window of `offset_months` either side of `today`
pub fn default_bounds(today: NaiveDate, offset_months: u32) -> Bounds {
    let offset = i32::try_from(offset_months).unwrap_or(i32::MAX);
    let min = shift_months(today, -offset).unwrap_or(NaiveDate::MIN);
    let max = shift_months(today, offset).unwrap_or(NaiveDate::MAX);
    Bounds::spanning(min, max)
}

/// Produces the effective `[min, max]` bounds for the picker
pub struct BoundsResolver {
    provider: Option<Arc<dyn RangeLimitsProvider>>,
    store: Arc<dyn RangeLimitsStore>,
    offset_months: u32,
}

impl BoundsResolver {
    /// Create a resolver; `provider` is `None` when no authoritative source is configured
    pub fn new(
        provider: Option<Arc<dyn RangeLimitsProvider>>,
        store: Arc<dyn RangeLimitsStore>,
    ) -> Self {
        Self {
            provider,
            store,
            offset_months: DEFAULT_RANGE_OFFSET_MONTHS,
        }
    }

    /// Override the default window's offset
    pub fn with_offset_months(mut self, months: u32) -> Self {
        self.offset_months = months;
        self
    }

    pub fn offset_months(&self) -> u32 {
        self.offset_months
    }

    /// Resolve bounds relative to the local current date
    pub async fn resolve(&self) -> Bounds {
        self.resolve_on(Local::now().date_naive()).await.bounds
    }

    /// Resolve bounds, using `today` for the default window
    pub async fn resolve_on(&self, today: NaiveDate) -> ResolvedBounds {
        self.resolve_with(today, false).await
    }

    /// Like `resolve_on`, but ask the provider to bypass any memoized response
    pub async fn refresh_on(&self, today: NaiveDate) -> ResolvedBounds {
        self.resolve_with(today, true).await
    }

    async fn resolve_with(&self, today: NaiveDate, bypass_memo: bool) -> ResolvedBounds {
        if let Some(bounds) = self.fetch_authoritative(bypass_memo).await {
            return ResolvedBounds {
                bounds,
                source: BoundsSource::Authoritative,
            };
        }

        if let Some(bounds) = self.read_cached().await {
            debug!("Using cached range limits {}", bounds);
            return ResolvedBounds {
                bounds,
                source: BoundsSource::Cache,
            };
        }

        let bounds = default_bounds(today, self.offset_months);
        info!(
            "No range limits available, using default window of {} months: {}",
            self.offset_months, bounds
        );
        ResolvedBounds {
            bounds,
            source: BoundsSource::Default,
        }
    }

    async fn fetch_authoritative(&self, bypass_memo: bool) -> Option<Bounds> {
        let Some(provider) = self.provider.as_ref() else {
            debug!("No range endpoint configured");
            return None;
        };

        let fetched = if bypass_memo {
            provider.refresh().await
        } else {
            provider.range_limits().await
        };

        let bounds = match fetched.and_then(|limits| limits.to_bounds()) {
            Ok(bounds) => bounds,
            Err(e) => {
                warn!("Range limits fetch failed, falling back to cache: {}", e);
                return None;
            }
        };

        if let Some(record) = bounds.to_limits() {
            if let Err(e) = self.store.write(RANGE_LIMITS_KEY, &record).await {
                warn!("Failed to persist range limits: {}", e);
            }
        }
        Some(bounds)
    }

    async fn read_cached(&self) -> Option<Bounds> {
        let limits = self.store.read(RANGE_LIMITS_KEY).await?;
        match limits.to_bounds() {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                warn!("Ignoring unusable cached range limits: {}", e);
                None
            }
        }
    }
}
