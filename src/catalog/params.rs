//! # Query Parameter Parser
//!
//! Validates raw `/games` query parameters into [`FilterCriteria`].
//!
//! Enumerated fields are checked against a single rule table so every field
//! gets the same normalization and allowlist treatment. Parsing stops at the
//! first invalid field; nothing here touches the store.

use std::collections::HashMap;

use super::criteria::{
    FilterCriteria, PageRequest, SortOrder, DEFAULT_MAX_PRICE, DEFAULT_PER_PAGE, GENRES,
    MAX_PER_PAGE, PLATFORMS,
};
use super::errors::{CatalogError, CatalogResult};

pub const PARAM_PAGE: &str = "page";
pub const PARAM_PER_PAGE: &str = "perPage";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_SEARCH: &str = "searchTerm";
pub const PARAM_GENRES: &str = "genres";
pub const PARAM_PLATFORM: &str = "platform";
pub const PARAM_RATING: &str = "rating";
pub const PARAM_MIN_PRICE: &str = "minPrice";
pub const PARAM_MAX_PRICE: &str = "maxPrice";
pub const PARAM_ADULT_ONLY: &str = "isAdultOnly";

/// Normalization applied to a raw value before the allowlist check
pub type Normalizer = fn(&str) -> String;

/// Allowlist rule for an enumerated parameter
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub allowed: &'static [&'static str],
    pub normalize: Normalizer,
}

impl FieldRule {
    /// Normalize a non-empty value and check it against the allowlist
    pub fn check(&self, raw: &str) -> CatalogResult<String> {
        let value = (self.normalize)(raw);
        if self.allowed.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(CatalogError::invalid_param(
                self.name,
                format!("'{}' is not one of {}", value, self.allowed.join(", ")),
            ))
        }
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

const SORT_NAMES: &[&str] = &["HIGH_PRICE", "LOW_PRICE", "OLDEST", "NEWEST"];

/// Enumerated parameters and their allowed values
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: PARAM_SORT,
        allowed: SORT_NAMES,
        normalize: trimmed,
    },
    FieldRule {
        name: PARAM_GENRES,
        allowed: GENRES,
        normalize: trimmed,
    },
    FieldRule {
        name: PARAM_PLATFORM,
        allowed: PLATFORMS,
        normalize: trimmed,
    },
    FieldRule {
        name: PARAM_ADULT_ONLY,
        allowed: &["true", "false"],
        normalize: trimmed,
    },
];

/// Look up the rule for an enumerated parameter
pub fn rule(name: &str) -> Option<&'static FieldRule> {
    FIELD_RULES.iter().find(|r| r.name == name)
}

/// Apply the named rule. Empty values are treated as absent.
fn check_enum(name: &str, raw: Option<&str>) -> CatalogResult<Option<String>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match rule(name) {
        Some(rule) => rule.check(raw).map(Some),
        None => Err(CatalogError::invalid_param(name, "no validation rule registered")),
    }
}

/// Parsed `/games` parameters
pub struct GameQueryParams<'a> {
    raw: &'a HashMap<String, String>,
}

impl<'a> GameQueryParams<'a> {
    pub fn new(raw: &'a HashMap<String, String>) -> Self {
        Self { raw }
    }

    /// Non-empty trimmed value for a key
    fn get(&self, key: &str) -> Option<&'a str> {
        self.raw
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Validate every parameter and build the criteria
    pub fn parse(&self) -> CatalogResult<FilterCriteria> {
        let page = match self.get(PARAM_PAGE) {
            Some(v) => parse_page(v)?,
            None => 1,
        };
        let per_page = match self.get(PARAM_PER_PAGE) {
            Some(v) => parse_per_page(v)?,
            None => DEFAULT_PER_PAGE,
        };

        let sort = match check_enum(PARAM_SORT, self.get(PARAM_SORT))? {
            Some(name) => name
                .parse::<SortOrder>()
                .map_err(|e| CatalogError::invalid_param(PARAM_SORT, e))?,
            None => SortOrder::default(),
        };

        let search_term = self
            .raw
            .get(PARAM_SEARCH)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        let genres = match self.get(PARAM_GENRES) {
            Some(v) => parse_genres(v)?,
            None => Vec::new(),
        };

        let platform = check_enum(PARAM_PLATFORM, self.get(PARAM_PLATFORM))?;

        let rating_min = parse_number(PARAM_RATING, self.get(PARAM_RATING), 0.0)?;
        let price_min = parse_number(PARAM_MIN_PRICE, self.get(PARAM_MIN_PRICE), 0.0)?;
        let price_max = parse_number(PARAM_MAX_PRICE, self.get(PARAM_MAX_PRICE), DEFAULT_MAX_PRICE)?;

        let adult_only = check_enum(PARAM_ADULT_ONLY, self.get(PARAM_ADULT_ONLY))?
            .map(|v| v == "true");

        Ok(FilterCriteria {
            price_min,
            price_max,
            rating_min,
            search_term,
            genres,
            platform,
            adult_only,
            sort,
            page: PageRequest::new(page, per_page),
        })
    }
}

/// Parse and validate a raw parameter map
pub fn parse_criteria(raw: &HashMap<String, String>) -> CatalogResult<FilterCriteria> {
    GameQueryParams::new(raw).parse()
}

fn parse_page(value: &str) -> CatalogResult<u32> {
    let page: u32 = value.parse().map_err(|_| {
        CatalogError::invalid_param(PARAM_PAGE, format!("'{}' is not an integer", value))
    })?;
    if page == 0 {
        return Err(CatalogError::invalid_param(PARAM_PAGE, "must be at least 1"));
    }
    Ok(page)
}

fn parse_per_page(value: &str) -> CatalogResult<u32> {
    let per_page: u32 = value.parse().map_err(|_| {
        CatalogError::invalid_param(PARAM_PER_PAGE, format!("'{}' is not an integer", value))
    })?;
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(CatalogError::invalid_param(
            PARAM_PER_PAGE,
            format!("must be between 1 and {}", MAX_PER_PAGE),
        ));
    }
    Ok(per_page)
}

/// Parse a finite decimal, falling back to `default` when absent
fn parse_number(name: &str, value: Option<&str>, default: f64) -> CatalogResult<f64> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CatalogError::invalid_param(
            name,
            format!("'{}' is not a number", value),
        )),
    }
}

/// Split a `|`- or `,`-delimited genre list, dropping blanks and duplicates
fn parse_genres(value: &str) -> CatalogResult<Vec<String>> {
    let mut genres: Vec<String> = Vec::new();
    for part in value.split(['|', ',']) {
        if let Some(genre) = check_enum(PARAM_GENRES, Some(part).filter(|p| !p.trim().is_empty()))? {
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }
    }
    Ok(genres)
}
