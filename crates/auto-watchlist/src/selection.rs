//! Row expansion state
//!
//! A plain toggle behaves like a radio button: it opens the row as the only
//! open one, or closes it when it already is. An extending toggle (modifier
//! held) flips a single row and leaves the rest alone.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    expanded: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, symbol: &str, extend: bool) {
        if extend {
            self.toggle_extend(symbol);
        } else {
            self.toggle_exclusive(symbol);
        }
    }

    fn toggle_exclusive(&mut self, symbol: &str) {
        let sole_open = self.expanded.len() == 1 && self.expanded.contains(symbol);
        self.expanded.clear();
        if !sole_open {
            self.expanded.insert(symbol.to_string());
        }
    }

    fn toggle_extend(&mut self, symbol: &str) {
        if !self.expanded.remove(symbol) {
            self.expanded.insert(symbol.to_string());
        }
    }

    pub fn is_expanded(&self, symbol: &str) -> bool {
        self.expanded.contains(symbol)
    }

    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
