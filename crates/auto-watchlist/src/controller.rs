//! View Controller
//!
//! Owns everything the watchlist view mutates: the canonical list from the
//! last successful fetch, the operator's filter and sort settings, and the
//! row expansion state. Filter and sort run eagerly after every change so
//! [`WatchlistView::display`] is always current.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

use crate::error::FetchResult;
use crate::filter::{filter_stocks, visible_tiers, FilterState};
use crate::models::{Stock, Tier, KNOWN_TAGS};
use crate::normalizer::normalize_records;
use crate::selection::SelectionState;
use crate::sort::{sort_stocks, SortBy};
use crate::source::WatchlistSource;

/// Progress of the most recent activation
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Never activated
    Idle,
    Loading,
    Ready,
    /// Last fetch failed; any previously loaded list is still shown
    Failed(String),
}

/// Identifies one activation. Only the latest ticket may complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One entry of the display list as the renderer needs it
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow<'a> {
    pub stock: &'a Stock,
    pub expanded: bool,
    /// Tier badges to show (tier visible and has hits)
    pub badges: Vec<Tier>,
}

pub struct WatchlistView {
    source: Arc<dyn WatchlistSource>,
    stocks: Vec<Stock>,
    filters: FilterState,
    selection: SelectionState,
    load_state: LoadState,
    loaded_at: Option<DateTime<Utc>>,
    display: Vec<Stock>,
    generation: u64,
}

impl WatchlistView {
    pub fn new(source: Arc<dyn WatchlistSource>) -> Self {
        Self {
            source,
            stocks: Vec::new(),
            filters: FilterState::default(),
            selection: SelectionState::default(),
            load_state: LoadState::Idle,
            loaded_at: None,
            display: Vec::new(),
            generation: 0,
        }
    }

    /// Fetch once from the source and apply the result.
    ///
    /// Filter and selection state are kept; the canonical list is replaced on
    /// success and left alone on failure.
    pub async fn activate(&mut self) -> &LoadState {
        let ticket = self.begin_load();
        let source = Arc::clone(&self.source);
        tracing::debug!("Fetching watchlist from {}", source.source_name());
        let result = source.fetch_records().await;
        self.finish_load(ticket, result);
        &self.load_state
    }

    /// Enter the loading state and hand out a ticket for the completion.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded
    /// by a later activation, in which case nothing changes.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: FetchResult<Vec<Value>>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                "Discarding stale watchlist response (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }

        match result {
            Ok(records) => {
                self.stocks = normalize_records(&records);
                self.loaded_at = Some(Utc::now());
                self.load_state = LoadState::Ready;
                self.refresh_display();
                tracing::info!(
                    "Loaded {} watchlist records, {} listed",
                    self.stocks.len(),
                    self.display.len()
                );
            }
            Err(e) => {
                tracing::error!("Failed to fetch autowatchlist: {}", e);
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    pub fn toggle_tier(&mut self, tier: Tier) {
        self.filters.tiers_shown.toggle(tier);
        tracing::debug!("Tier {} shown: {}", tier, self.filters.tiers_shown.is_shown(tier));
        self.refresh_display();
    }

    pub fn toggle_risk_display(&mut self) {
        self.filters.show_risk = !self.filters.show_risk;
        tracing::debug!("Risk display: {}", self.filters.show_risk);
        self.refresh_display();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.filters.toggle_tag(tag);
        tracing::debug!("Tag filters: {:?}", self.filters.tag_filters);
        self.refresh_display();
    }

    pub fn set_sort(&mut self, sort_by: SortBy) {
        tracing::debug!("Sort by {}", sort_by);
        self.filters.sort_by = sort_by;
        self.refresh_display();
    }

    /// Expand or collapse a row. Symbols missing from the current list are
    /// ignored and `false` is returned.
    pub fn toggle_row(&mut self, symbol: &str, extend: bool) -> bool {
        if !self.stocks.iter().any(|s| s.symbol == symbol) {
            tracing::debug!("Ignoring toggle for unknown symbol '{}'", symbol);
            return false;
        }
        self.selection.toggle(symbol, extend);
        true
    }

    fn refresh_display(&mut self) {
        let filtered = filter_stocks(&self.stocks, &self.filters);
        self.display = sort_stocks(&filtered, &self.filters.sort_by);
    }

    /// Filtered and sorted list
    pub fn display(&self) -> &[Stock] {
        &self.display
    }

    pub fn rows(&self) -> Vec<DisplayRow<'_>> {
        self.display
            .iter()
            .map(|stock| DisplayRow {
                stock,
                expanded: self.selection.is_expanded(&stock.symbol),
                badges: visible_tiers(stock, &self.filters),
            })
            .collect()
    }

    /// Canonical list from the last successful fetch
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Tag choices for the operator: the known catalog, then any other tag
    /// seen in the current list in first-seen order.
    pub fn tag_options(&self) -> Vec<String> {
        let mut options: Vec<String> = KNOWN_TAGS.iter().map(|t| t.to_string()).collect();
        for tag in self.stocks.iter().flat_map(|s| s.tags.iter()) {
            if !options.contains(tag) {
                options.push(tag.clone());
            }
        }
        options
    }
}
