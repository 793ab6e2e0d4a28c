//! Sort Engine

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::models::Stock;

/// Ordering applied to the filtered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortBy {
    /// Highest score first
    Score,
    /// Alphabetical by symbol
    Symbol,
    /// Unrecognized mode; leaves the order untouched
    Other(String),
}

impl SortBy {
    pub fn as_str(&self) -> &str {
        match self {
            SortBy::Score => "score",
            SortBy::Symbol => "symbol",
            SortBy::Other(s) => s,
        }
    }
}

impl FromStr for SortBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "score" => SortBy::Score,
            "symbol" => SortBy::Symbol,
            _ => SortBy::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for SortBy {
    fn from(s: String) -> Self {
        match s.parse::<SortBy>() {
            Ok(sort_by) => sort_by,
            Err(never) => match never {},
        }
    }
}

impl From<SortBy> for String {
    fn from(sort_by: SortBy) -> Self {
        sort_by.as_str().to_string()
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return a sorted copy of `stocks`. The sort is stable.
pub fn sort_stocks(stocks: &[Stock], sort_by: &SortBy) -> Vec<Stock> {
    let mut sorted = stocks.to_vec();
    match sort_by {
        SortBy::Score => sorted.sort_by(|a, b| compare_scores_desc(a.score, b.score)),
        SortBy::Symbol => sorted.sort_by(|a, b| compare_symbols(&a.symbol, &b.symbol)),
        SortBy::Other(mode) => {
            tracing::debug!("Unknown sort mode '{}', keeping input order", mode);
        }
    }
    sorted
}

/// Descending by score; stocks without a score go last.
fn compare_scores_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-style symbol comparison: letters compare case-insensitively first,
/// then lowercase sorts before uppercase.
pub fn compare_symbols(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
