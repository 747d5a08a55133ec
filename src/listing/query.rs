use serde::Deserialize;

use super::order::OrderBy;
use crate::config::ListingConfig;

/// Raw listing parameters as they arrive on the query string.
///
/// Everything is optional and stringly typed on purpose: bookmarked and
/// hand-edited URLs are clamped into a valid descriptor instead of being
/// rejected with a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub order_by: Option<String>,
    pub tags: Option<String>,
    pub search: Option<String>,
}

/// Validated listing query descriptor.
///
/// Invariants: `page >= 1`, `1 <= per_page`. Built fresh per request and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub page: u32,
    pub per_page: u32,
    pub order_by: OrderBy,
    pub tags: Vec<String>,
    pub search: Option<String>,
}

impl ListingQuery {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            order_by: OrderBy::default(),
            tags: vec![],
            search: None,
        }
    }

    /// Clamp raw wire parameters into a valid descriptor.
    ///
    /// Unparsable or sub-1 `page` falls back to 1; unparsable `per_page`
    /// falls back to the configured default and is capped by the configured
    /// maximum; unknown `order_by` falls back to newest-first. Tags keep
    /// their given order and are not deduplicated.
    pub fn from_params(params: &ListingParams, config: &ListingConfig) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1);

        let per_page = params
            .per_page
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(config.default_per_page)
            .clamp(1, config.max_per_page);

        let order_by = params
            .order_by
            .as_deref()
            .map(OrderBy::parse)
            .unwrap_or_default();

        let tags = params
            .tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            page,
            per_page,
            order_by,
            tags,
            search,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Total page count for a matching-row count: `ceil(total / per_page)`.
    pub fn total_pages(&self, total_matches: u64) -> u32 {
        total_matches.div_ceil(u64::from(self.per_page)) as u32
    }

    /// Copy of this descriptor pointing at another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}
