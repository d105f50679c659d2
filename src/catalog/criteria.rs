//! # Filter Criteria
//!
//! Typed, already-validated inputs of a catalog query.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::model::GameRecord;

/// Maximum page size
pub const MAX_PER_PAGE: u32 = 100;

/// Default page size if not specified
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Default upper price bound if not specified
pub const DEFAULT_MAX_PRICE: f64 = 100.0;

/// Genres a request may filter on
pub const GENRES: &[&str] = &["Action", "Shooter", "Horror", "RPG", "Adventure"];

/// Platforms a request may filter on
pub const PLATFORMS: &[&str] = &["PC", "Xbox", "PlayStation", "Nintendo"];

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most expensive first
    HighPrice,
    /// Cheapest first
    LowPrice,
    /// Earliest release first
    Oldest,
    /// Latest release first
    #[default]
    Newest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::HighPrice,
        SortOrder::LowPrice,
        SortOrder::Oldest,
        SortOrder::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::HighPrice => "HIGH_PRICE",
            SortOrder::LowPrice => "LOW_PRICE",
            SortOrder::Oldest => "OLDEST",
            SortOrder::Newest => "NEWEST",
        }
    }

    /// ORDER BY fragment for this sort
    pub fn order_by(&self) -> &'static str {
        match self {
            SortOrder::HighPrice => "price DESC",
            SortOrder::LowPrice => "price ASC",
            SortOrder::Oldest => "release_date ASC",
            SortOrder::Newest => "release_date DESC",
        }
    }

    /// In-memory equivalent of [`SortOrder::order_by`].
    pub fn compare(&self, a: &GameRecord, b: &GameRecord) -> Ordering {
        match self {
            SortOrder::HighPrice => b.price.total_cmp(&a.price),
            SortOrder::LowPrice => a.price.total_cmp(&b.price),
            SortOrder::Oldest => a.release_date.cmp(&b.release_date),
            SortOrder::Newest => b.release_date.cmp(&a.release_date),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// The empty string selects the default ordering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(SortOrder::default()),
            "HIGH_PRICE" => Ok(SortOrder::HighPrice),
            "LOW_PRICE" => Ok(SortOrder::LowPrice),
            "OLDEST" => Ok(SortOrder::Oldest),
            "NEWEST" => Ok(SortOrder::Newest),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// 1-based page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a page request, clamping both values into their valid ranges.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Validated filter, sort and pagination inputs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Exclusive lower price bound
    pub price_min: f64,
    /// Exclusive upper price bound
    pub price_max: f64,
    /// Inclusive lower rating bound
    pub rating_min: f64,
    /// Substring matched against title, developer and publisher
    pub search_term: String,
    /// Every listed genre must be present on a match
    pub genres: Vec<String>,
    pub platform: Option<String>,
    /// `Some(true)` restricts results to adult age ratings
    pub adult_only: Option<bool>,
    pub sort: SortOrder,
    pub page: PageRequest,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            price_min: 0.0,
            price_max: DEFAULT_MAX_PRICE,
            rating_min: 0.0,
            search_term: String::new(),
            genres: Vec::new(),
            platform: None,
            adult_only: None,
            sort: SortOrder::default(),
            page: PageRequest::default(),
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_rating_min(mut self, rating: f64) -> Self {
        self.rating_min = rating;
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_adult_only(mut self, adult_only: bool) -> Self {
        self.adult_only = Some(adult_only);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = PageRequest::new(page, per_page);
        self
    }

    /// Platform filter, treating an empty string as absent
    pub fn active_platform(&self) -> Option<&str> {
        self.platform.as_deref().filter(|p| !p.is_empty())
    }
}
