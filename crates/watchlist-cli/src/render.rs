//! Plain-text rendering of the watchlist view

use auto_watchlist::{DisplayRow, FilterState, LoadState, Tier, WatchlistView};

const PLACEHOLDER: &str = "—";

pub fn render_view(view: &WatchlistView) -> String {
    let mut out = String::new();

    match view.load_state() {
        LoadState::Idle => {
            out.push_str("Watchlist not loaded.\n");
            return out;
        }
        LoadState::Loading => {
            out.push_str("Loading watchlist...\n");
            return out;
        }
        LoadState::Failed(msg) => {
            out.push_str(&format!("! Failed to load watchlist: {}\n", msg));
        }
        LoadState::Ready => {}
    }

    out.push_str(&render_controls(view.filters()));
    out.push('\n');

    if let Some(loaded_at) = view.loaded_at() {
        out.push_str(&format!(
            "{} of {} listed, as of {}\n",
            view.display().len(),
            view.stocks().len(),
            loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    let rows = view.rows();
    if rows.is_empty() {
        out.push_str("No tickers found.\n");
        return out;
    }

    for row in &rows {
        out.push_str(&render_row(row));
    }
    out
}

/// One-line summary of the operator's controls
pub fn render_controls(filters: &FilterState) -> String {
    let tiers: Vec<String> = Tier::ALL
        .iter()
        .map(|tier| {
            let mark = if filters.tiers_shown.is_shown(*tier) { 'x' } else { ' ' };
            format!("[{}] {}", mark, tier)
        })
        .collect();

    let tags = if filters.tag_filters.is_empty() {
        "any".to_string()
    } else {
        filters
            .tag_filters
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "{}  Risk: {}  Tags: {}  Sort: {}",
        tiers.join(" "),
        if filters.show_risk { "ON" } else { "OFF" },
        tags,
        filters.sort_by
    )
}

pub fn render_row(row: &DisplayRow<'_>) -> String {
    let stock = row.stock;
    let mut out = String::new();

    let symbol = if stock.symbol.is_empty() {
        PLACEHOLDER
    } else {
        stock.symbol.as_str()
    };
    let marker = if row.expanded { '▲' } else { '▼' };
    out.push_str(&format!(
        "{} {:<8} Score: {}",
        marker,
        symbol,
        format_score(stock.score)
    ));

    for tag in &stock.tags {
        out.push_str(&format!("  [{}]", tag));
    }
    for tier in &row.badges {
        out.push_str(&format!("  {}", tier));
    }
    out.push('\n');

    if row.expanded {
        for tier in Tier::ALL {
            let hits = stock.tier_hits.get(tier);
            let listed = if hits.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                hits.iter()
                    .map(|hit| format!("✓ {}", hit))
                    .collect::<Vec<_>>()
                    .join("  ")
            };
            out.push_str(&format!("    {}: {}\n", tier.title(), listed));
        }
        if !stock.reasons.is_empty() {
            let flags = stock
                .reasons
                .iter()
                .map(|flag| format!("⚠ {}", flag))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(&format!("    Risk Flags: {}\n", flags));
        }
    }
    out
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use auto_watchlist::{FetchError, FetchResult, SortBy, WatchlistSource};
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct NullSource;

    #[async_trait]
    impl WatchlistSource for NullSource {
        async fn fetch_records(&self) -> FetchResult<Vec<Value>> {
            Ok(Vec::new())
        }

        fn source_name(&self) -> &'static str {
            "null"
        }
    }

    fn loaded_view(records: Vec<Value>) -> WatchlistView {
        let mut view = WatchlistView::new(Arc::new(NullSource));
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(records));
        view
    }

    fn scenario() -> Vec<Value> {
        vec![
            json!({ "symbol": "AAA", "score": 5, "tier1": ["x"], "tags": ["Strong Setup"] }),
            json!({ "symbol": "BBB", "score": 9.5, "tier2": ["y"], "isBlocked": true, "reasons": ["thin"] }),
        ]
    }

    #[test]
    fn test_loading_and_idle() {
        let mut view = WatchlistView::new(Arc::new(NullSource));
        assert_eq!(render_view(&view), "Watchlist not loaded.\n");
        view.begin_load();
        assert_eq!(render_view(&view), "Loading watchlist...\n");
    }

    #[test]
    fn test_rows_in_display_order() {
        let view = loaded_view(scenario());
        let out = render_view(&view);

        let bbb = out.find("BBB").unwrap();
        let aaa = out.find("AAA").unwrap();
        assert!(bbb < aaa);
        assert!(out.contains("Score: 9.5"));
        assert!(out.contains("Score: 5"));
        assert!(out.contains("[Strong Setup]"));
        assert!(out.contains("2 of 2 listed"));
    }

    #[test]
    fn test_expanded_row_shows_detail() {
        let mut view = loaded_view(scenario());
        view.toggle_row("BBB", false);
        let out = render_view(&view);

        assert!(out.contains("▲ BBB"));
        assert!(out.contains("▼ AAA"));
        assert!(out.contains("    Tier 1: —"));
        assert!(out.contains("    Tier 2: ✓ y"));
        assert!(out.contains("    Risk Flags: ⚠ thin"));
    }

    #[test]
    fn test_hidden_tier_badge() {
        let mut view = loaded_view(vec![json!({
            "symbol": "CCC", "score": 1, "tier1": ["gap_up"], "tier3": ["high_volume"]
        })]);
        view.toggle_tier(Tier::T1);
        let rows = view.rows();
        let line = render_row(&rows[0]);

        assert!(line.contains("T3"));
        assert!(!line.contains("T1"));
    }

    #[test]
    fn test_empty_list_message() {
        let mut view = loaded_view(scenario());
        view.toggle_tag("Early Watch");
        let out = render_view(&view);
        assert!(out.contains("No tickers found."));
        assert!(out.contains("Tags: Early Watch"));
    }

    #[test]
    fn test_failure_banner_keeps_controls() {
        let mut view = WatchlistView::new(Arc::new(NullSource));
        let ticket = view.begin_load();
        view.finish_load(
            ticket,
            Err(FetchError::Status {
                status: 500,
                body: "boom".into(),
            }),
        );
        let out = render_view(&view);

        assert!(out.starts_with("! Failed to load watchlist: "));
        assert!(out.contains("Risk: ON"));
        assert!(out.contains("No tickers found."));
    }

    #[test]
    fn test_controls_line() {
        let mut filters = FilterState::default();
        filters.tiers_shown.set(Tier::T2, false);
        filters.show_risk = false;
        filters.sort_by = SortBy::Symbol;
        assert_eq!(
            render_controls(&filters),
            "[x] T1 [ ] T2 [x] T3  Risk: OFF  Tags: any  Sort: symbol"
        );
    }

    #[test]
    fn test_placeholders() {
        let view = loaded_view(vec![json!({ "tier1": ["gap_up"] })]);
        let out = render_view(&view);
        assert!(out.contains("▼ —"));
        assert!(out.contains("Score: —"));
    }
}
