//! Auto-Watchlist Data Models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags the screener assigns to a setup pattern.
pub const KNOWN_TAGS: [&str; 3] = ["Strong Setup", "Squeeze Watch", "Early Watch"];

/// Confidence tier of a matched signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    T1,
    T2,
    T3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::T1, Tier::T2, Tier::T3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        }
    }

    /// Heading used for the expanded detail columns
    pub fn title(&self) -> &'static str {
        match self {
            Tier::T1 => "Tier 1",
            Tier::T2 => "Tier 2",
            Tier::T3 => "Tier 3",
        }
    }

    /// Name of the upstream field carrying this tier's hits
    pub fn upstream_field(&self) -> &'static str {
        match self {
            Tier::T1 => "tier1",
            Tier::T2 => "tier2",
            Tier::T3 => "tier3",
        }
    }

    /// Accepts `T1`, `t1`, `1` and `tier1`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t1" | "1" | "tier1" => Some(Tier::T1),
            "t2" | "2" | "tier2" => Some(Tier::T2),
            "t3" | "3" | "tier3" => Some(Tier::T3),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals that fired for a stock, grouped by tier.
///
/// Every tier is always present; a tier with no hits holds an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierHits {
    #[serde(rename = "T1", default)]
    pub t1: Vec<String>,
    #[serde(rename = "T2", default)]
    pub t2: Vec<String>,
    #[serde(rename = "T3", default)]
    pub t3: Vec<String>,
}

impl TierHits {
    pub fn new(t1: Vec<String>, t2: Vec<String>, t3: Vec<String>) -> Self {
        Self { t1, t2, t3 }
    }

    pub fn get(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::T1 => &self.t1,
            Tier::T2 => &self.t2,
            Tier::T3 => &self.t3,
        }
    }

    pub fn has_hits(&self, tier: Tier) -> bool {
        !self.get(tier).is_empty()
    }

    /// True when no tier has any hit
    pub fn is_empty(&self) -> bool {
        Tier::ALL.iter().all(|tier| !self.has_hits(*tier))
    }
}

/// A screened instrument in canonical form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Ticker symbol, the identity key within one fetch. Empty when upstream
    /// omitted it.
    pub symbol: String,
    /// Ranking score as reported upstream
    pub score: Option<f64>,
    /// Setup labels, in upstream order
    pub tags: Vec<String>,
    /// Named signals that fired, per tier
    pub tier_hits: TierHits,
    /// Disqualified by upstream risk checks
    pub is_blocked: bool,
    /// Risk flags behind `is_blocked`
    pub reasons: Vec<String>,
}

impl Stock {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
impl Stock {
    pub fn new(symbol: impl Into<String>, score: f64) -> Self {
        Self {
            symbol: symbol.into(),
            score: Some(score),
            tags: Vec::new(),
            tier_hits: TierHits::default(),
            is_blocked: false,
            reasons: Vec::new(),
        }
    }

    pub fn with_tier_hits(mut self, tier: Tier, hits: &[&str]) -> Self {
        let hits = hits.iter().map(|s| s.to_string()).collect();
        match tier {
            Tier::T1 => self.tier_hits.t1 = hits,
            Tier::T2 => self.tier_hits.t2 = hits,
            Tier::T3 => self.tier_hits.t3 = hits,
        }
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn blocked(mut self, reasons: &[&str]) -> Self {
        self.is_blocked = true;
        self.reasons = reasons.iter().map(|s| s.to_string()).collect();
        self
    }
}
