//! Record and column definitions
//!
//! Column headers follow the Letterboxd ratings export: `Date`, `Name`,
//! `Year`, `Rating`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Columns of the watch-log table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Date the movie was watched
    Date,
    /// Movie title
    Title,
    /// Release year
    Year,
    /// Star rating, 0.5 to 5 in half steps (0 when unrated)
    Rating,
}

impl Column {
    /// Logical column name used in plans
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Title => "title",
            Column::Year => "year",
            Column::Rating => "rating",
        }
    }

    /// Header name in the source dataset
    pub fn source_name(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Title => "Name",
            Column::Year => "Year",
            Column::Rating => "Rating",
        }
    }
}

/// One watched-movie entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Name")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Rating")]
    pub rating: f64,
}

impl Record {
    pub fn new(date: NaiveDate, title: impl Into<String>, year: i32, rating: f64) -> Self {
        Self {
            date,
            title: title.into(),
            year,
            rating,
        }
    }

    /// Returns the value stored under a column.
    ///
    /// Dates are rendered as ISO-8601 strings so they compare lexically.
    pub fn value(&self, column: Column) -> Value {
        match column {
            Column::Date => json!(self.date.format("%Y-%m-%d").to_string()),
            Column::Title => json!(self.title),
            Column::Year => json!(self.year),
            Column::Rating => json!(self.rating),
        }
    }
}
