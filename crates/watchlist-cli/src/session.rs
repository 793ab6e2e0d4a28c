//! Interactive watchlist session
//!
//! Each stdin line is one operator control. The view is re-rendered after
//! every change; `refresh` re-activates the same view, `reset` tears it down
//! and starts over with default filters.

use auto_watchlist::{SortBy, Tier, WatchlistSource, WatchlistView};
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::render_view;

pub const HELP: &str = "\
Commands:
  tier <T1|T2|T3>   toggle a tier
  risk              toggle display of risk-blocked stocks
  tag <name>        toggle a tag filter
  tags              list available tags
  sort <mode>       sort by score or symbol
  open <SYMBOL>     expand a row (closes the others)
  open+ <SYMBOL>    expand or collapse a row, keeping the others
  refresh           fetch again, keeping filters
  reset             start over with default filters
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Tier(Tier),
    Risk,
    Tag(String),
    Tags,
    Sort(SortBy),
    Open { symbol: String, extend: bool },
    Refresh,
    Reset,
    Help,
    Quit,
}

/// What the loop should do after a command was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render,
    Print(String),
    Refresh,
    Reset,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "tier" => {
            let tier = Tier::parse(rest)
                .ok_or_else(|| format!("unknown tier '{}', expected T1, T2 or T3", rest))?;
            SessionCommand::Tier(tier)
        }
        "risk" => SessionCommand::Risk,
        "tag" => {
            if rest.is_empty() {
                return Err("usage: tag <name>".to_string());
            }
            SessionCommand::Tag(rest.to_string())
        }
        "tags" => SessionCommand::Tags,
        "sort" => {
            if rest.is_empty() {
                return Err("usage: sort <score|symbol>".to_string());
            }
            match rest.parse::<SortBy>() {
                Ok(sort_by) => SessionCommand::Sort(sort_by),
                Err(never) => match never {},
            }
        }
        "open" | "open+" => {
            if rest.is_empty() {
                return Err(format!("usage: {} <SYMBOL>", word));
            }
            SessionCommand::Open {
                symbol: rest.to_string(),
                extend: word.ends_with('+'),
            }
        }
        "refresh" => SessionCommand::Refresh,
        "reset" => SessionCommand::Reset,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

/// Apply a command that needs no I/O; fetching is left to the caller.
pub fn apply_command(view: &mut WatchlistView, command: SessionCommand) -> Outcome {
    match command {
        SessionCommand::Tier(tier) => {
            view.toggle_tier(tier);
            Outcome::Render
        }
        SessionCommand::Risk => {
            view.toggle_risk_display();
            Outcome::Render
        }
        SessionCommand::Tag(name) => {
            let tag = resolve_tag(view, &name);
            view.toggle_tag(&tag);
            Outcome::Render
        }
        SessionCommand::Tags => Outcome::Print(view.tag_options().join("\n")),
        SessionCommand::Sort(sort_by) => {
            view.set_sort(sort_by);
            Outcome::Render
        }
        SessionCommand::Open { symbol, extend } => {
            if view.toggle_row(&symbol, extend) {
                Outcome::Render
            } else {
                Outcome::Print(format!("{} is not in the current list", symbol))
            }
        }
        SessionCommand::Refresh => Outcome::Refresh,
        SessionCommand::Reset => Outcome::Reset,
        SessionCommand::Help => Outcome::Print(HELP.to_string()),
        SessionCommand::Quit => Outcome::Quit,
    }
}

/// Match a typed tag against the known options ignoring case
fn resolve_tag(view: &WatchlistView, name: &str) -> String {
    view.tag_options()
        .into_iter()
        .find(|option| option.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| name.to_string())
}

pub async fn run(source: Arc<dyn WatchlistSource>) -> anyhow::Result<()> {
    let mut view = WatchlistView::new(Arc::clone(&source));
    activate_and_render(&mut view).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match apply_command(&mut view, command) {
            Outcome::Render => print!("{}", render_view(&view)),
            Outcome::Print(text) => println!("{}", text),
            Outcome::Refresh => activate_and_render(&mut view).await,
            Outcome::Reset => {
                view = WatchlistView::new(Arc::clone(&source));
                activate_and_render(&mut view).await;
            }
            Outcome::Quit => break,
        }
    }

    tracing::debug!("Watch session ended");
    Ok(())
}

async fn activate_and_render(view: &mut WatchlistView) {
    println!("Loading watchlist...");
    view.activate().await;
    print!("{}", render_view(view));
}
