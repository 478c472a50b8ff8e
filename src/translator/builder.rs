//! Plan construction per rule
//!
//! Maps a committed rule and its parameters to the canonical plan for that
//! phrasing category, then validates the result.

use serde_json::json;

use super::errors::{TranslateError, TranslateResult};
use super::plan::{Predicate, QueryPlan, SelectItem, SortSpec};
use super::rules::{Params, RuleId};
use crate::dataset::Column;

/// Column list for "recently watched" style listings
const WATCH_COLUMNS: [Column; 4] = [Column::Title, Column::Year, Column::Rating, Column::Date];

/// Builds the plan for a committed rule.
///
/// Parameters that do not fit the rule are reported as `REEL_INVALID_PLAN`;
/// they indicate a mismatch between extraction and construction, not bad input.
pub fn build_plan(rule: RuleId, params: &Params, table: &str) -> TranslateResult<QueryPlan> {
    let base = QueryPlan::new(table);

    let plan = match (rule, params) {
        (RuleId::ShowMovies, Params::Limit(n)) => base.with_sort(SortSpec::desc(Column::Date)).with_limit(*n),

        (RuleId::TopMovies, Params::Limit(n)) | (RuleId::HighestRated, Params::Limit(n)) => {
            by_rating_desc(base).with_limit(*n)
        }

        (RuleId::RatedStars, Params::Rating(r)) => base
            .with_filter(Predicate::eq(Column::Rating, json!(r)))
            .with_sort(SortSpec::desc(Column::Date)),

        (RuleId::FromYear, Params::Year(y))
        | (RuleId::WatchedInYear, Params::Year(y))
        | (RuleId::YearMovies, Params::Year(y)) => base
            .with_filter(Predicate::eq(Column::Year, json!(y)))
            .with_sort(SortSpec::desc(Column::Date)),

        (RuleId::LastMovies, Params::Limit(n)) | (RuleId::MostRecent, Params::Limit(n)) => base
            .with_columns(&WATCH_COLUMNS)
            .with_sort(SortSpec::desc(Column::Date))
            .with_limit(*n),

        (RuleId::PerYear, Params::None) => base
            .with_items(vec![SelectItem::column(Column::Year), SelectItem::count("count")])
            .with_group_by(Column::Year)
            .with_sort(SortSpec::asc(Column::Year)),

        (RuleId::RatingDistribution, Params::None) => base
            .with_items(vec![SelectItem::column(Column::Rating), SelectItem::count("count")])
            .with_group_by(Column::Rating)
            .with_sort(SortSpec::desc(Column::Rating)),

        (RuleId::AverageRating, Params::None) => {
            base.with_items(vec![SelectItem::average(Column::Rating, "average_rating")])
        }

        (RuleId::TotalMovies, Params::None) => base.with_items(vec![SelectItem::count("total_movies")]),

        (RuleId::RatingOrHigher, Params::Rating(r)) => {
            by_rating_desc(base.with_filter(Predicate::gte(Column::Rating, json!(r))))
        }

        (RuleId::RatingOrLower, Params::Rating(r)) => {
            by_rating_desc(base.with_filter(Predicate::lte(Column::Rating, json!(r))))
        }

        (RuleId::RatingBetween, Params::RatingRange(low, high)) => by_rating_desc(
            base.with_filter(Predicate::between(Column::Rating, json!(low), json!(high))),
        ),

        (RuleId::YearRange, Params::YearRange(from, to)) => base
            .with_filter(Predicate::between(Column::Year, json!(from), json!(to)))
            .with_sort(SortSpec::asc(Column::Year))
            .with_sort(SortSpec::desc(Column::Date)),

        (RuleId::TitleNamed, Params::Text(text)) | (RuleId::TitleContains, Params::Text(text)) => base
            .with_filter(Predicate::contains(Column::Title, text.clone()))
            .with_sort(SortSpec::desc(Column::Date)),

        (RuleId::LowestRated, Params::Limit(n)) => base
            .with_filter(Predicate::gt(Column::Rating, json!(0)))
            .with_sort(SortSpec::asc(Column::Rating))
            .with_sort(SortSpec::desc(Column::Date))
            .with_limit(*n),

        (RuleId::Oldest, Params::Limit(n)) => base
            .with_columns(&WATCH_COLUMNS)
            .with_sort(SortSpec::asc(Column::Date))
            .with_limit(*n),

        (rule, params) => {
            return Err(TranslateError::invalid_plan(format!(
                "Parameters {:?} do not fit rule '{}'",
                params,
                rule.name()
            ))
            .with_rule(rule))
        }
    };

    plan.validate().map_err(|e| e.with_rule(rule))?;
    Ok(plan)
}

fn by_rating_desc(plan: QueryPlan) -> QueryPlan {
    plan.with_sort(SortSpec::desc(Column::Rating))
        .with_sort(SortSpec::desc(Column::Date))
}
