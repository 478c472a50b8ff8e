//! Ordered phrase rules
//!
//! Rules are evaluated in list order and the first satisfied trigger commits.
//! Specific numeric and text patterns come before the bare keyword fallbacks
//! ("highest", "recent", ...) that would otherwise shadow them.
//!
//! A committed rule never yields to a later one: if its parameter cannot be
//! extracted, matching fails with `REEL_MALFORMED_PARAMETER`.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::errors::{TranslateError, TranslateResult};

/// Limit used by keyword rules when the phrase names no number
pub const DEFAULT_LIMIT: u64 = 10;

/// Rule identifiers, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// "show/find/list/get/give me N movies"
    ShowMovies,
    /// "top/best N movies"
    TopMovies,
    /// "rated R stars", "R star movies"
    RatedStars,
    /// "from/in/during YYYY"
    FromYear,
    /// "watched in/during/on YYYY"
    WatchedInYear,
    /// "all/list of YYYY movies"
    YearMovies,
    /// "last/recent/latest N movies"
    LastMovies,
    /// "per year", "by year", "each year"
    PerYear,
    /// "rating distribution", "ratings breakdown"
    RatingDistribution,
    /// "average rating"
    AverageRating,
    /// "total movies", "how many movies"
    TotalMovies,
    /// "R or higher/above/more/up"
    RatingOrHigher,
    /// "R or lower/below/less/down"
    RatingOrLower,
    /// "between R1 and R2"
    RatingBetween,
    /// "from/between YYYY to/and YYYY"
    YearRange,
    /// "with/called/named/titled TEXT (in the) name"
    TitleNamed,
    /// "like/containing/with TEXT" at the end of the phrase
    TitleContains,
    /// "highest", "best rated"
    HighestRated,
    /// "lowest", "worst rated"
    LowestRated,
    /// "recent", "latest"
    MostRecent,
    /// "oldest", "earliest"
    Oldest,
}

impl RuleId {
    /// Stable rule name
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::ShowMovies => "show_movies",
            RuleId::TopMovies => "top_movies",
            RuleId::RatedStars => "rated_stars",
            RuleId::FromYear => "from_year",
            RuleId::WatchedInYear => "watched_in_year",
            RuleId::YearMovies => "year_movies",
            RuleId::LastMovies => "last_movies",
            RuleId::PerYear => "per_year",
            RuleId::RatingDistribution => "rating_distribution",
            RuleId::AverageRating => "average_rating",
            RuleId::TotalMovies => "total_movies",
            RuleId::RatingOrHigher => "rating_or_higher",
            RuleId::RatingOrLower => "rating_or_lower",
            RuleId::RatingBetween => "rating_between",
            RuleId::YearRange => "year_range",
            RuleId::TitleNamed => "title_named",
            RuleId::TitleContains => "title_contains",
            RuleId::HighestRated => "highest_rated",
            RuleId::LowestRated => "lowest_rated",
            RuleId::MostRecent => "most_recent",
            RuleId::Oldest => "oldest",
        }
    }
}

/// Typed values extracted from a phrase
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    None,
    Limit(u64),
    Rating(f64),
    Year(i32),
    RatingRange(f64, f64),
    YearRange(i32, i32),
    Text(String),
}

/// A committed rule and its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub rule: RuleId,
    pub params: Params,
}

/// Veto over a regex match
type Guard = fn(&Captures<'_>) -> bool;

enum Trigger {
    /// Regex over normalized text, optionally vetoed by a guard
    Pattern { regex: Regex, guard: Option<Guard> },
    /// Keyword presence check
    Keywords(fn(&str) -> bool),
}

enum Fired<'t> {
    Captures(Captures<'t>),
    Keywords,
}

/// A named, ordered phrase recognizer
pub struct Rule {
    id: RuleId,
    trigger: Trigger,
}

impl Rule {
    fn pattern(id: RuleId, pattern: &str) -> Self {
        Self::guarded(id, pattern, None)
    }

    fn guarded(id: RuleId, pattern: &str, guard: Option<Guard>) -> Self {
        // Patterns are compile-time constants covered by the rule tests.
        let regex = Regex::new(pattern).expect("rule pattern must compile");
        Self {
            id,
            trigger: Trigger::Pattern { regex, guard },
        }
    }

    fn keywords(id: RuleId, check: fn(&str) -> bool) -> Self {
        Self {
            id,
            trigger: Trigger::Keywords(check),
        }
    }

    /// Returns the rule identifier
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Returns true if the trigger fires on normalized text
    pub fn triggers(&self, text: &str) -> bool {
        self.fire(text).is_some()
    }

    fn fire<'t>(&self, text: &'t str) -> Option<Fired<'t>> {
        match &self.trigger {
            Trigger::Pattern { regex, guard } => {
                let caps = regex.captures(text)?;
                match guard {
                    Some(allow) if !allow(&caps) => None,
                    _ => Some(Fired::Captures(caps)),
                }
            }
            Trigger::Keywords(check) => check(text).then_some(Fired::Keywords),
        }
    }

    fn extract(&self, text: &str, fired: &Fired<'_>) -> TranslateResult<Params> {
        let caps = match fired {
            Fired::Captures(caps) => Some(caps),
            Fired::Keywords => None,
        };

        match self.id {
            RuleId::ShowMovies => Ok(Params::Limit(limit(group(caps, 3)?)?)),
            RuleId::TopMovies | RuleId::LastMovies => Ok(Params::Limit(limit(group(caps, 2)?)?)),
            RuleId::RatedStars => {
                let literal = group(caps, 1).or_else(|_| group(caps, 2))?;
                Ok(Params::Rating(rating(literal)?))
            }
            RuleId::FromYear | RuleId::WatchedInYear | RuleId::YearMovies => {
                Ok(Params::Year(year(group(caps, 2)?)?))
            }
            RuleId::RatingOrHigher | RuleId::RatingOrLower => {
                Ok(Params::Rating(rating(group(caps, 1)?)?))
            }
            RuleId::RatingBetween => Ok(Params::RatingRange(
                rating(group(caps, 1)?)?,
                rating(group(caps, 2)?)?,
            )),
            RuleId::YearRange => Ok(Params::YearRange(
                year(group(caps, 2)?)?,
                year(group(caps, 4)?)?,
            )),
            RuleId::TitleNamed | RuleId::TitleContains => Ok(Params::Text(title(group(caps, 2)?)?)),
            RuleId::PerYear
            | RuleId::RatingDistribution
            | RuleId::AverageRating
            | RuleId::TotalMovies => Ok(Params::None),
            RuleId::HighestRated | RuleId::LowestRated | RuleId::MostRecent | RuleId::Oldest => {
                let found = first_integer().find(text).map(|m| m.as_str());
                Ok(Params::Limit(match found {
                    Some(literal) => limit(literal)?,
                    None => DEFAULT_LIMIT,
                }))
            }
        }
    }
}

fn group<'t>(caps: Option<&Captures<'t>>, index: usize) -> TranslateResult<&'t str> {
    caps.and_then(|c| c.get(index))
        .map(|m| m.as_str())
        .ok_or_else(|| TranslateError::malformed_parameter("Expected value is missing"))
}

fn limit(literal: &str) -> TranslateResult<u64> {
    literal.parse::<u64>().map_err(|_| {
        TranslateError::malformed_parameter(format!("'{}' is not a usable row count", literal))
    })
}

fn rating(literal: &str) -> TranslateResult<f64> {
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TranslateError::malformed_parameter(format!(
            "'{}' is not a usable rating",
            literal
        ))),
    }
}

fn year(literal: &str) -> TranslateResult<i32> {
    literal.parse::<i32>().map_err(|_| {
        TranslateError::malformed_parameter(format!("'{}' is not a usable year", literal))
    })
}

fn title(fragment: &str) -> TranslateResult<String> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return Err(TranslateError::malformed_parameter("Title text is empty"));
    }
    Ok(trimmed.to_string())
}

fn first_integer() -> &'static Regex {
    static FIRST_INTEGER: OnceLock<Regex> = OnceLock::new();
    FIRST_INTEGER.get_or_init(|| Regex::new(r"\d+").expect("integer pattern must compile"))
}

/// "from YYYY to YYYY" belongs to the year-range rule
fn not_a_year_range(caps: &Captures<'_>) -> bool {
    !(&caps[1] == "from" && caps.get(3).is_some())
}

fn per_year(text: &str) -> bool {
    text.contains("per year") || text.contains("by year") || text.contains("each year")
}

fn rating_distribution(text: &str) -> bool {
    text.contains("rating") && (text.contains("distribution") || text.contains("breakdown"))
}

fn average_rating(text: &str) -> bool {
    text.contains("average") && text.contains("rating")
}

fn total_movies(text: &str) -> bool {
    (text.contains("total") && text.contains("movies")) || text.contains("how many movies")
}

fn highest(text: &str) -> bool {
    text.contains("highest") || text.contains("best rated")
}

fn lowest(text: &str) -> bool {
    text.contains("lowest") || text.contains("worst rated")
}

fn recent(text: &str) -> bool {
    text.contains("recent") || text.contains("latest")
}

fn oldest(text: &str) -> bool {
    text.contains("oldest") || text.contains("earliest")
}

fn build_rules() -> Vec<Rule> {
    vec![
        Rule::pattern(
            RuleId::ShowMovies,
            r"\b(show|find|list|get|give me)\s+(me\s+)?(\d+)\s+movies?",
        ),
        Rule::pattern(RuleId::TopMovies, r"\b(top|best)\s+(\d+)\s+movies?"),
        Rule::pattern(
            RuleId::RatedStars,
            r"\b(?:rated|with|of)\s+(\d+(?:\.\d+)?)\s+stars?|\b(\d+(?:\.\d+)?)\s+star\s+movies?",
        ),
        Rule::guarded(
            RuleId::FromYear,
            r"\b(from|in|during)\s+(\d{4})\b(\s+(?:to|and)\s+\d{4}\b)?",
            Some(not_a_year_range),
        ),
        Rule::pattern(
            RuleId::WatchedInYear,
            r"\bwatched\s+(in|during|on)\s+(\d{4})\b",
        ),
        Rule::pattern(RuleId::YearMovies, r"\b(all|list of)\s+(\d{4})\s+movies?"),
        Rule::pattern(RuleId::LastMovies, r"\b(last|recent|latest)\s+(\d+)\s+movies?"),
        Rule::keywords(RuleId::PerYear, per_year),
        Rule::keywords(RuleId::RatingDistribution, rating_distribution),
        Rule::keywords(RuleId::AverageRating, average_rating),
        Rule::keywords(RuleId::TotalMovies, total_movies),
        Rule::pattern(
            RuleId::RatingOrHigher,
            r"\b(\d+(?:\.\d+)?)\s+or\s+(higher|above|more|up)\b",
        ),
        Rule::pattern(
            RuleId::RatingOrLower,
            r"\b(\d+(?:\.\d+)?)\s+or\s+(lower|below|less|down)\b",
        ),
        Rule::pattern(
            RuleId::RatingBetween,
            r"\bbetween\s+(\d(?:\.\d+)?)\s+and\s+(\d(?:\.\d+)?)\b",
        ),
        Rule::pattern(
            RuleId::YearRange,
            r"\b(from|between)\s+(\d{4})\s+(to|and)\s+(\d{4})\b",
        ),
        Rule::pattern(
            RuleId::TitleNamed,
            r#"\b(with|called|named|titled)\s+["']?([^"']+?)["']?\s+(?:in\s+)?(?:the\s+)?name\b"#,
        ),
        Rule::pattern(
            RuleId::TitleContains,
            r#"\b(like|containing|with)\s+["']?([^"']+)["']?$"#,
        ),
        Rule::keywords(RuleId::HighestRated, highest),
        Rule::keywords(RuleId::LowestRated, lowest),
        Rule::keywords(RuleId::MostRecent, recent),
        Rule::keywords(RuleId::Oldest, oldest),
    ]
}

/// Returns the process-wide rule list in priority order
pub fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(build_rules)
}

/// Finds the first rule whose trigger fires on normalized text.
///
/// Returns `None` when no trigger fires. Once a trigger fires the rule is
/// committed: an extraction failure is returned as `Some(Err(_))`.
pub fn match_rules(text: &str) -> Option<TranslateResult<RuleMatch>> {
    rules().iter().find_map(|rule| {
        let fired = rule.fire(text)?;
        Some(
            rule.extract(text, &fired)
                .map(|params| RuleMatch {
                    rule: rule.id,
                    params,
                })
                .map_err(|e| e.with_rule(rule.id)),
        )
    })
}
