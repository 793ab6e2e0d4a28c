//! Record Normalizer
//!
//! Turns loosely-shaped screener records into canonical [`Stock`]s. Every
//! field has an explicit fallback, so normalization never fails: a missing
//! list becomes empty, a missing flag becomes `false`, and a missing symbol or
//! score is carried through as an empty symbol or `None`.

use serde_json::Value;

use crate::models::{Stock, Tier, TierHits};

/// Normalize a batch of records, preserving order.
pub fn normalize_records(records: &[Value]) -> Vec<Stock> {
    records.iter().map(normalize_record).collect()
}

/// Normalize a single record. Non-object values yield an all-default stock.
pub fn normalize_record(record: &Value) -> Stock {
    Stock {
        symbol: symbol_field(record.get("symbol")),
        score: score_field(record.get("score")),
        tags: string_list(record.get("tags")),
        tier_hits: TierHits::new(
            string_list(record.get(Tier::T1.upstream_field())),
            string_list(record.get(Tier::T2.upstream_field())),
            string_list(record.get(Tier::T3.upstream_field())),
        ),
        is_blocked: flag_field(record.get("isBlocked")),
        reasons: string_list(record.get("reasons")),
    }
}

fn symbol_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn score_field(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn flag_field(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Element count is preserved: a listed null still counts as an entry.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
