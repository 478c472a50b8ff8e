//! Rule Table Tests
//!
//! Every rule is exercised through the public translator:
//! - The committed rule for each phrasing
//! - Parameters extracted into the plan
//! - Priority between overlapping phrasings

use reelquery::dataset::Column;
use reelquery::translator::{
    FilterOp, Predicate, QueryPlan, RuleId, SelectItem, Selection, SortSpec, Translation,
    Translator, DEFAULT_LIMIT,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn plan_for(text: &str) -> (RuleId, QueryPlan) {
    match Translator::default().translate(text) {
        Translation::Plan { rule, plan } => (rule, plan),
        other => panic!("'{}' did not produce a plan: {:?}", text, other),
    }
}

fn rule_for(text: &str) -> RuleId {
    plan_for(text).0
}

fn filter_op(plan: &QueryPlan) -> &FilterOp {
    &plan.filter.as_ref().expect("plan has a filter").op
}

// =============================================================================
// Rule Selection
// =============================================================================

/// Each phrasing commits the expected rule.
#[test]
fn test_rule_table() {
    let cases = [
        ("show me 10 movies", RuleId::ShowMovies),
        ("find 3 movies", RuleId::ShowMovies),
        ("give me 7 movies", RuleId::ShowMovies),
        ("top 3 movies", RuleId::TopMovies),
        ("best 5 movies", RuleId::TopMovies),
        ("movies rated 5 stars", RuleId::RatedStars),
        ("4.5 star movies", RuleId::RatedStars),
        ("movies with 3.5 stars", RuleId::RatedStars),
        ("movies from 2024", RuleId::FromYear),
        ("films during 2022", RuleId::FromYear),
        ("movies watched on 2021", RuleId::WatchedInYear),
        ("all 2019 movies", RuleId::YearMovies),
        ("list of 2018 movies", RuleId::YearMovies),
        ("last 5 movies", RuleId::LastMovies),
        ("recent 3 movies", RuleId::LastMovies),
        ("movies per year", RuleId::PerYear),
        ("movies watched each year", RuleId::PerYear),
        ("rating distribution", RuleId::RatingDistribution),
        ("rating breakdown", RuleId::RatingDistribution),
        ("what is my average rating", RuleId::AverageRating),
        ("total movies", RuleId::TotalMovies),
        ("how many movies have i watched", RuleId::TotalMovies),
        ("movies rated 4 or higher", RuleId::RatingOrHigher),
        ("3.5 or above", RuleId::RatingOrHigher),
        ("movies 2 or lower", RuleId::RatingOrLower),
        ("movies rated between 3 and 4.5", RuleId::RatingBetween),
        ("movies from 2019 to 2021", RuleId::YearRange),
        ("movies between 2019 and 2021", RuleId::YearRange),
        ("movies with 'love' in the name", RuleId::TitleNamed),
        ("movies titled matrix in name", RuleId::TitleNamed),
        ("movies like star wars", RuleId::TitleContains),
        ("movies containing \"dune\"", RuleId::TitleContains),
        ("highest rated movies", RuleId::HighestRated),
        ("best rated movies", RuleId::HighestRated),
        ("lowest rated movies", RuleId::LowestRated),
        ("worst rated 3", RuleId::LowestRated),
        ("most recent movies", RuleId::MostRecent),
        ("latest watches", RuleId::MostRecent),
        ("oldest movies", RuleId::Oldest),
        ("earliest 5 watched", RuleId::Oldest),
    ];

    for (text, expected) in cases {
        assert_eq!(rule_for(text), expected, "phrase: '{}'", text);
    }
}

// =============================================================================
// Scenario Table
// =============================================================================

/// Show N movies lists everything, newest watch first.
#[test]
fn test_show_me_ten_movies() {
    let (_, plan) = plan_for("show me 10 movies");
    assert_eq!(plan.selection, Selection::All);
    assert!(plan.filter.is_none());
    assert_eq!(plan.order_by, vec![SortSpec::desc(Column::Date)]);
    assert_eq!(plan.limit, Some(10));
}

/// Top N sorts by rating, ties broken by watch date.
#[test]
fn test_top_three_movies() {
    let (_, plan) = plan_for("top 3 movies");
    assert_eq!(
        plan.order_by,
        vec![SortSpec::desc(Column::Rating), SortSpec::desc(Column::Date)]
    );
    assert_eq!(plan.limit, Some(3));
}

#[test]
fn test_movies_rated_five_stars() {
    let (_, plan) = plan_for("movies rated 5 stars");
    assert_eq!(plan.filter, Some(Predicate::eq(Column::Rating, json!(5.0))));
    assert_eq!(plan.order_by, vec![SortSpec::desc(Column::Date)]);
    assert_eq!(plan.limit, None);
}

#[test]
fn test_movies_from_2024() {
    let (_, plan) = plan_for("movies from 2024");
    assert_eq!(plan.filter, Some(Predicate::eq(Column::Year, json!(2024))));
    assert_eq!(plan.order_by, vec![SortSpec::desc(Column::Date)]);
}

#[test]
fn test_movies_per_year() {
    let (_, plan) = plan_for("movies per year");
    assert_eq!(
        plan.selection,
        Selection::Items(vec![
            SelectItem::column(Column::Year),
            SelectItem::count("count")
        ])
    );
    assert_eq!(plan.group_by, Some(Column::Year));
    assert_eq!(plan.order_by, vec![SortSpec::asc(Column::Year)]);
    assert_eq!(plan.limit, None);
}

#[test]
fn test_average_rating() {
    let (_, plan) = plan_for("average rating");
    assert_eq!(
        plan.selection,
        Selection::Items(vec![SelectItem::average(Column::Rating, "average_rating")])
    );
    assert!(plan.filter.is_none());
    assert!(plan.order_by.is_empty());
}

// =============================================================================
// Parameter Extraction
// =============================================================================

/// Decimal ratings survive extraction.
#[test]
fn test_decimal_rating() {
    let (_, plan) = plan_for("4.5 star movies");
    assert_eq!(filter_op(&plan), &FilterOp::Eq(json!(4.5)));
}

#[test]
fn test_rating_bounds() {
    assert_eq!(
        filter_op(&plan_for("movies rated 4 or higher").1),
        &FilterOp::Gte(json!(4.0))
    );
    assert_eq!(
        filter_op(&plan_for("movies 2 or lower").1),
        &FilterOp::Lte(json!(2.0))
    );
    assert_eq!(
        filter_op(&plan_for("movies rated between 3 and 4.5").1),
        &FilterOp::Between(json!(3.0), json!(4.5))
    );
}

#[test]
fn test_year_range_ordering() {
    let (_, plan) = plan_for("movies from 2019 to 2021");
    assert_eq!(filter_op(&plan), &FilterOp::Between(json!(2019), json!(2021)));
    assert_eq!(
        plan.order_by,
        vec![SortSpec::asc(Column::Year), SortSpec::desc(Column::Date)]
    );
}

/// Surrounding quotes are not part of the title fragment.
#[test]
fn test_title_fragments() {
    assert_eq!(
        filter_op(&plan_for("movies with 'love' in the name").1),
        &FilterOp::Contains("love".into())
    );
    assert_eq!(
        filter_op(&plan_for("movies titled matrix in name").1),
        &FilterOp::Contains("matrix".into())
    );
    assert_eq!(
        filter_op(&plan_for("Movies like Star Wars").1),
        &FilterOp::Contains("star wars".into())
    );
    assert_eq!(
        filter_op(&plan_for("movies containing \"dune\"").1),
        &FilterOp::Contains("dune".into())
    );
}

/// Fallback rules take the first integer anywhere, else the default.
#[test]
fn test_fallback_limits() {
    assert_eq!(plan_for("highest rated movies").1.limit, Some(DEFAULT_LIMIT));
    assert_eq!(plan_for("highest rated 20").1.limit, Some(20));
    assert_eq!(plan_for("worst rated 3").1.limit, Some(3));
    assert_eq!(plan_for("earliest 5 watched").1.limit, Some(5));
}

#[test]
fn test_lowest_rated_skips_unrated() {
    let (_, plan) = plan_for("lowest rated movies");
    assert_eq!(filter_op(&plan), &FilterOp::Gt(json!(0)));
    assert_eq!(
        plan.order_by,
        vec![SortSpec::asc(Column::Rating), SortSpec::desc(Column::Date)]
    );
}

#[test]
fn test_recent_and_oldest_columns() {
    let expected = Selection::Items(
        [Column::Title, Column::Year, Column::Rating, Column::Date]
            .into_iter()
            .map(SelectItem::column)
            .collect(),
    );

    let (_, recent) = plan_for("most recent movies");
    assert_eq!(recent.selection, expected);
    assert_eq!(recent.order_by, vec![SortSpec::desc(Column::Date)]);

    let (_, oldest) = plan_for("oldest movies");
    assert_eq!(oldest.selection, expected);
    assert_eq!(oldest.order_by, vec![SortSpec::asc(Column::Date)]);
}

// =============================================================================
// Priority
// =============================================================================

/// "top 5 movies" also reads as "best rated"; the earlier rule wins.
#[test]
fn test_top_beats_fallbacks() {
    assert_eq!(rule_for("top 5 movies"), RuleId::TopMovies);
}

#[test]
fn test_earlier_rules_win() {
    assert_eq!(rule_for("show me 5 movies from 2024"), RuleId::ShowMovies);
    assert_eq!(rule_for("rating distribution per year"), RuleId::PerYear);
    assert_eq!(rule_for("average rating of 4 star movies"), RuleId::RatedStars);
    assert_eq!(rule_for("select movies from 2024"), RuleId::FromYear);
}

/// "watched in YYYY" is claimed by the earlier "in YYYY" rule.
#[test]
fn test_watched_in_is_from_year() {
    let (rule, plan) = plan_for("movies watched in 2020");
    assert_eq!(rule, RuleId::FromYear);
    assert_eq!(filter_op(&plan), &FilterOp::Eq(json!(2020)));
}
