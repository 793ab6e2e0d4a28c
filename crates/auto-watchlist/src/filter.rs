//! Filter Engine
//!
//! Narrows the canonical list by tier visibility, tag selection and risk
//! display. Pure functions over a [`FilterState`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{Stock, Tier};
use crate::sort::SortBy;

/// Which tiers the operator currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierVisibility {
    pub t1: bool,
    pub t2: bool,
    pub t3: bool,
}

impl Default for TierVisibility {
    fn default() -> Self {
        Self {
            t1: true,
            t2: true,
            t3: true,
        }
    }
}

impl TierVisibility {
    pub fn is_shown(&self, tier: Tier) -> bool {
        match tier {
            Tier::T1 => self.t1,
            Tier::T2 => self.t2,
            Tier::T3 => self.t3,
        }
    }

    pub fn set(&mut self, tier: Tier, shown: bool) {
        match tier {
            Tier::T1 => self.t1 = shown,
            Tier::T2 => self.t2 = shown,
            Tier::T3 => self.t3 = shown,
        }
    }

    pub fn toggle(&mut self, tier: Tier) {
        let shown = self.is_shown(tier);
        self.set(tier, !shown);
    }
}

/// Operator-controlled filter and sort settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub tiers_shown: TierVisibility,
    /// Show risk-blocked stocks
    pub show_risk: bool,
    /// Selected tags; empty means no tag restriction
    pub tag_filters: BTreeSet<String>,
    pub sort_by: SortBy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            tiers_shown: TierVisibility::default(),
            show_risk: true,
            tag_filters: BTreeSet::new(),
            sort_by: SortBy::Score,
        }
    }
}

impl FilterState {
    /// Add the tag if absent, remove it if present
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tag_filters.remove(tag) {
            self.tag_filters.insert(tag.to_string());
        }
    }
}

/// Tiers with hits that are currently shown. A stock is listed only when
/// this is non-empty.
pub fn visible_tiers(stock: &Stock, state: &FilterState) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| state.tiers_shown.is_shown(*tier) && stock.tier_hits.has_hits(*tier))
        .collect()
}

/// Per-stock predicate: tier visibility AND tag match AND risk display.
pub fn matches_filters(stock: &Stock, state: &FilterState) -> bool {
    let matches_tier = Tier::ALL
        .iter()
        .any(|tier| state.tiers_shown.is_shown(*tier) && stock.tier_hits.has_hits(*tier));

    let matches_tags = state.tag_filters.is_empty()
        || state.tag_filters.iter().any(|tag| stock.has_tag(tag));

    let passes_risk = state.show_risk || !stock.is_blocked;

    matches_tier && matches_tags && passes_risk
}

/// Stocks passing [`matches_filters`], in input order
pub fn filter_stocks(stocks: &[Stock], state: &FilterState) -> Vec<Stock> {
    stocks
        .iter()
        .filter(|stock| matches_filters(stock, state))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Stock> {
        vec![
            Stock::new("AAA", 5.0).with_tier_hits(Tier::T1, &["x"]),
            Stock::new("BBB", 9.0)
                .with_tier_hits(Tier::T2, &["y"])
                .blocked(&["thin"]),
        ]
    }

    fn symbols(stocks: &[Stock]) -> Vec<&str> {
        stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn test_default_state_passes_both() {
        let filtered = filter_stocks(&scenario(), &FilterState::default());
        assert_eq!(symbols(&filtered), vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_risk_hidden_drops_blocked() {
        let state = FilterState {
            show_risk: false,
            ..Default::default()
        };
        let filtered = filter_stocks(&scenario(), &state);
        assert_eq!(symbols(&filtered), vec!["AAA"]);
    }

    #[test]
    fn test_hidden_tier_excludes() {
        let mut state = FilterState::default();
        state.tiers_shown.toggle(Tier::T1);
        let filtered = filter_stocks(&scenario(), &state);
        assert_eq!(symbols(&filtered), vec!["BBB"]);
    }

    #[test]
    fn test_stock_with_hits_in_shown_and_hidden_tier_passes() {
        let stock = Stock::new("CCC", 1.0)
            .with_tier_hits(Tier::T1, &["gap_up"])
            .with_tier_hits(Tier::T3, &["high_volume"]);
        let mut state = FilterState::default();
        state.tiers_shown.set(Tier::T1, false);

        assert!(matches_filters(&stock, &state));
        assert_eq!(visible_tiers(&stock, &state), vec![Tier::T3]);
    }

    #[test]
    fn test_no_tier_hits_never_listed() {
        let stock = Stock::new("ZZZ", 100.0);
        assert!(!matches_filters(&stock, &FilterState::default()));
    }

    #[test]
    fn test_tag_filter_any_match() {
        let stocks = vec![
            Stock::new("AAA", 1.0)
                .with_tier_hits(Tier::T1, &["x"])
                .with_tags(&["Strong Setup"]),
            Stock::new("BBB", 2.0)
                .with_tier_hits(Tier::T1, &["x"])
                .with_tags(&["Squeeze Watch", "Early Watch"]),
            Stock::new("CCC", 3.0).with_tier_hits(Tier::T1, &["x"]),
        ];

        let mut state = FilterState::default();
        state.toggle_tag("Early Watch");
        assert_eq!(symbols(&filter_stocks(&stocks, &state)), vec!["BBB"]);

        state.toggle_tag("Strong Setup");
        assert_eq!(symbols(&filter_stocks(&stocks, &state)), vec!["AAA", "BBB"]);

        state.toggle_tag("Early Watch");
        state.toggle_tag("Strong Setup");
        assert!(state.tag_filters.is_empty());
        assert_eq!(filter_stocks(&stocks, &state).len(), 3);
    }

    #[test]
    fn test_filter_idempotent() {
        let mut state = FilterState::default();
        state.show_risk = false;
        let once = filter_stocks(&scenario(), &state);
        let twice = filter_stocks(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_monotone() {
        let stocks = vec![
            Stock::new("AAA", 1.0)
                .with_tier_hits(Tier::T1, &["x"])
                .with_tags(&["Strong Setup"]),
            Stock::new("BBB", 2.0)
                .with_tier_hits(Tier::T2, &["y"])
                .blocked(&["wide_spread"]),
            Stock::new("CCC", 3.0)
                .with_tier_hits(Tier::T3, &["z"])
                .with_tags(&["Early Watch"]),
        ];

        let mut strict = FilterState {
            show_risk: false,
            ..Default::default()
        };
        strict.tiers_shown = TierVisibility {
            t1: true,
            t2: false,
            t3: false,
        };
        strict.toggle_tag("Strong Setup");
        let base = filter_stocks(&stocks, &strict);

        let mut relaxations = Vec::new();

        let mut more_tiers = strict.clone();
        more_tiers.tiers_shown.set(Tier::T3, true);
        relaxations.push(more_tiers);

        let mut no_tags = strict.clone();
        no_tags.tag_filters.clear();
        relaxations.push(no_tags);

        let mut risk_on = strict.clone();
        risk_on.show_risk = true;
        relaxations.push(risk_on);

        for relaxed in relaxations {
            let wider = filter_stocks(&stocks, &relaxed);
            for stock in &base {
                assert!(wider.contains(stock), "{} dropped by relaxation", stock.symbol);
            }
        }
    }

    #[test]
    fn test_listed_null_hit_counts_and_empty_string_does_not() {
        use crate::normalizer::normalize_record;
        use serde_json::json;

        let state = FilterState::default();
        let null_hit = normalize_record(&json!({ "symbol": "NUL", "score": 1, "tier1": [null] }));
        let empty_hit = normalize_record(&json!({ "symbol": "EMP", "score": 1, "tier1": "" }));

        assert!(matches_filters(&null_hit, &state));
        assert_eq!(visible_tiers(&null_hit, &state), vec![Tier::T1]);
        assert!(!matches_filters(&empty_hit, &state));
    }

    #[test]
    fn test_empty_tag_string_does_not_match_tag_filter() {
        use crate::normalizer::normalize_record;
        use serde_json::json;

        let stock = normalize_record(&json!({ "symbol": "EMP", "tags": "", "tier2": ["y"] }));
        let mut state = FilterState::default();
        state.toggle_tag("");

        assert!(stock.tags.is_empty());
        assert!(!matches_filters(&stock, &state));
    }
}
