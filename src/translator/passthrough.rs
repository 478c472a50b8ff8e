//! Passthrough detection and the failure hint
//!
//! Consulted only after every rule declined. Text that already carries query
//! keywords is forwarded verbatim; anything else fails with example phrasings.

/// Keywords marking text as an already-structured query
const QUERY_KEYWORDS: [&str; 5] = ["select", "from", "where", "order by", "group by"];

/// Phrasings shown to the user when nothing matched
pub const EXAMPLE_PHRASES: [&str; 4] = [
    "Show me 10 movies",
    "Movies rated 5 stars",
    "Movies from 2024",
    "Movies per year",
];

/// Fixed guidance attached to every failed translation
pub const HINT: &str = "Could not understand your query. Try phrases like:\n\
- 'Show me 10 movies'\n\
- 'Movies rated 5 stars'\n\
- 'Movies from 2024'\n\
- 'Movies per year'";

/// Returns true if normalized text contains any structured-query keyword
pub fn looks_like_query(normalized: &str) -> bool {
    QUERY_KEYWORDS.iter().any(|k| normalized.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_query_keywords() {
        assert!(looks_like_query("select * from 'ratings.csv'"));
        assert!(looks_like_query("count rows group by year"));
        assert!(looks_like_query("where rating = 5"));
    }

    #[test]
    fn test_plain_text_is_not_a_query() {
        assert!(!looks_like_query("asdf qwerty"));
        assert!(!looks_like_query(""));
    }

    #[test]
    fn test_hint_lists_every_example() {
        for phrase in EXAMPLE_PHRASES {
            assert!(HINT.contains(phrase), "hint is missing '{}'", phrase);
        }
    }
}
