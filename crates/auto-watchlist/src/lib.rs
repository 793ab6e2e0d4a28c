//! Auto-Watchlist Module
//!
//! Presentation engine for the screener's auto-watchlist: normalizes raw
//! screener records, filters and sorts them under operator control, and
//! tracks which rows are expanded.

pub mod controller;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalizer;
pub mod selection;
pub mod sort;
pub mod source;

pub use controller::{DisplayRow, LoadState, LoadTicket, WatchlistView};
pub use error::{FetchError, FetchResult};
pub use filter::{filter_stocks, matches_filters, visible_tiers, FilterState, TierVisibility};
pub use models::{Stock, Tier, TierHits, KNOWN_TAGS};
pub use normalizer::{normalize_record, normalize_records};
pub use selection::SelectionState;
pub use sort::{compare_symbols, sort_stocks, SortBy};
pub use source::WatchlistSource;
