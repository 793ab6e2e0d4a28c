//! One-shot `list` command

use auto_watchlist::{LoadState, SortBy, WatchlistSource, WatchlistView};
use std::process::ExitCode;
use std::sync::Arc;

use crate::cli::ListArgs;
use crate::render::render_view;

/// Exit code when the screener could not be reached
const EXIT_FETCH_FAILED: u8 = 3;

pub async fn run(source: Arc<dyn WatchlistSource>, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let mut view = WatchlistView::new(source);
    view.activate().await;
    apply_args(&mut view, args);

    if args.json {
        println!("{}", serde_json::to_string_pretty(view.display())?);
    } else {
        print!("{}", render_view(&view));
    }

    Ok(match view.load_state() {
        LoadState::Failed(_) => ExitCode::from(EXIT_FETCH_FAILED),
        _ => ExitCode::SUCCESS,
    })
}

/// Drive the view's controls from command-line flags. Each flag sets a
/// state rather than flipping it, so repeating a flag is harmless.
pub fn apply_args(view: &mut WatchlistView, args: &ListArgs) {
    for tier in &args.hide_tiers {
        if view.filters().tiers_shown.is_shown(*tier) {
            view.toggle_tier(*tier);
        }
    }

    if args.no_risk && view.filters().show_risk {
        view.toggle_risk_display();
    }

    for tag in &args.tags {
        if !view.filters().tag_filters.contains(tag) {
            view.toggle_tag(tag);
        }
    }

    view.set_sort(args.sort.parse::<SortBy>().unwrap_or(SortBy::Score));

    for symbol in &args.expand {
        if !view.selection().is_expanded(symbol) && !view.toggle_row(symbol, true) {
            tracing::warn!("Cannot expand {}: not in the current list", symbol);
        }
    }
}
