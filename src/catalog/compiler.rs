//! # Filter Compiler
//!
//! Turns [`FilterCriteria`] into an ordered list of conditions, rendered as a
//! parameterized SQL predicate plus the values bound to its placeholders.
//!
//! The same [`CompiledFilter`] feeds both the page query and the count query,
//! so the two can never disagree about which rows match.

use super::criteria::FilterCriteria;
use super::model::GameRecord;

/// Number of parameters bound by the base conditions ($1-$4)
pub const BASE_PARAM_COUNT: usize = 4;

/// Predicate emitted when no optional filter is active
pub const BASE_PREDICATE: &str = "price > $1 AND price < $2 AND rating >= $3 \
AND (title ILIKE '%' || $4 || '%' OR developer ILIKE '%' || $4 || '%' OR publisher ILIKE '%' || $4 || '%')";

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Float(f64),
    Int(i64),
    Text(String),
    TextList(Vec<String>),
}

/// One conjunct of the catalog predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// price > value
    PriceAbove(f64),
    /// price < value
    PriceBelow(f64),
    /// rating >= value
    RatingAtLeast(f64),
    /// Case-insensitive substring of title, developer or publisher
    Search(String),
    /// age_rating is M or AO
    AdultOnly,
    /// platforms contains value
    OnPlatform(String),
    /// genres contains every value
    HasGenres(Vec<String>),
}

impl Condition {
    /// Parameter consumed by this condition, if any
    pub fn param(&self) -> Option<SqlParam> {
        match self {
            Condition::PriceAbove(v) | Condition::PriceBelow(v) | Condition::RatingAtLeast(v) => {
                Some(SqlParam::Float(*v))
            }
            Condition::Search(term) => Some(SqlParam::Text(escape_like(term))),
            Condition::AdultOnly => None,
            Condition::OnPlatform(platform) => Some(SqlParam::Text(platform.clone())),
            Condition::HasGenres(genres) => Some(SqlParam::TextList(genres.clone())),
        }
    }

    /// Render the SQL fragment, using `slot` for its placeholder.
    fn render(&self, slot: usize) -> String {
        match self {
            Condition::PriceAbove(_) => format!("price > ${}", slot),
            Condition::PriceBelow(_) => format!("price < ${}", slot),
            Condition::RatingAtLeast(_) => format!("rating >= ${}", slot),
            Condition::Search(_) => format!(
                "(title ILIKE '%' || ${0} || '%' OR developer ILIKE '%' || ${0} || '%' OR publisher ILIKE '%' || ${0} || '%')",
                slot
            ),
            Condition::AdultOnly => "age_rating::text IN ('M', 'AO')".to_string(),
            Condition::OnPlatform(_) => format!("${} = ANY(platforms::text[])", slot),
            Condition::HasGenres(_) => format!("genres::text[] @> ${}", slot),
        }
    }

    /// Evaluate this condition against a record in memory
    pub fn matches(&self, game: &GameRecord) -> bool {
        match self {
            Condition::PriceAbove(min) => game.price > *min,
            Condition::PriceBelow(max) => game.price < *max,
            Condition::RatingAtLeast(min) => game.rating >= *min,
            Condition::Search(term) => {
                if term.is_empty() {
                    return true;
                }
                let needle = term.to_lowercase();
                [&game.title, &game.developer, &game.publisher]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            Condition::AdultOnly => game.age_rating.is_adult(),
            Condition::OnPlatform(platform) => game.platforms.iter().any(|p| p == platform),
            Condition::HasGenres(genres) => genres.iter().all(|g| game.genres.contains(g)),
        }
    }
}

/// Escape LIKE metacharacters so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Predicate text and bound parameters shared by the page and count queries
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    conditions: Vec<Condition>,
    predicate: String,
    params: Vec<SqlParam>,
}

impl CompiledFilter {
    fn from_conditions(conditions: Vec<Condition>) -> Self {
        let mut predicate = String::new();
        let mut params = Vec::with_capacity(conditions.len());

        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                predicate.push_str(" AND ");
            }
            let slot = params.len() + 1;
            predicate.push_str(&condition.render(slot));
            if let Some(param) = condition.param() {
                params.push(param);
            }
        }

        Self {
            conditions,
            predicate,
            params,
        }
    }

    /// WHERE-clause body, without the `WHERE` keyword
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// All bound values, in placeholder order
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Values bound after the four base parameters (platform, then genres)
    pub fn extra_params(&self) -> &[SqlParam] {
        &self.params[BASE_PARAM_COUNT..]
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// First placeholder number free for the caller to use
    pub fn next_slot(&self) -> usize {
        self.params.len() + 1
    }

    /// Check if a record satisfies every condition
    pub fn matches(&self, game: &GameRecord) -> bool {
        self.conditions.iter().all(|c| c.matches(game))
    }
}

/// Compile criteria into a predicate.
///
/// The base conditions always occupy $1-$4 in the order min price, max price,
/// min rating, search term. Optional conditions follow: adult-only (no
/// parameter), platform, genres.
pub fn compile(criteria: &FilterCriteria) -> CompiledFilter {
    let mut conditions = vec![
        Condition::PriceAbove(criteria.price_min),
        Condition::PriceBelow(criteria.price_max),
        Condition::RatingAtLeast(criteria.rating_min),
        Condition::Search(criteria.search_term.clone()),
    ];

    if criteria.adult_only == Some(true) {
        conditions.push(Condition::AdultOnly);
    }

    if let Some(platform) = criteria.active_platform() {
        conditions.push(Condition::OnPlatform(platform.to_string()));
    }

    if !criteria.genres.is_empty() {
        conditions.push(Condition::HasGenres(criteria.genres.clone()));
    }

    CompiledFilter::from_conditions(conditions)
}
