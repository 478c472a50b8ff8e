//! reelquery - A deterministic phrase-to-query translator for movie watch logs
//!
//! Phrases like "top 5 movies" or "movies from 2024" are matched against an
//! ordered rule list and turned into structured query plans, then rendered as
//! parameterized SQL over the ratings CSV.

pub mod cli;
pub mod dataset;
pub mod http_server;
pub mod observability;
pub mod render;
pub mod translator;
