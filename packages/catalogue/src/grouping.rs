//! Splitting multi-valued cells into logical entries.
//!
//! Wanted-item and wanted-quantity cells list several values separated by
//! line breaks. Some professions break a single description over several
//! lines instead; those are registered in [`GroupingRules`] so the
//! splitting algorithm itself stays free of special cases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::raw::RawCell;

/// How the lines of a multi-line cell map to logical entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoiningStrategy {
    /// Every line is its own entry.
    #[default]
    Split,

    /// All lines together form one entry, joined with spaces.
    Join,
}

/// A `(profession, level) -> strategy` exception, as read from settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoiningRule {
    pub profession: String,
    pub level: String,
    #[serde(default = "default_rule_strategy")]
    pub strategy: JoiningStrategy,
}

fn default_rule_strategy() -> JoiningStrategy {
    JoiningStrategy::Join
}

/// Registry of per-profession joining exceptions.
///
/// Keys are compared after trimming and lower-casing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingRules {
    rules: HashMap<(String, String), JoiningStrategy>,
}

impl GroupingRules {
    /// Create an empty registry (every cell is split).
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register a strategy for a profession/level pair.
    pub fn register(&mut self, profession: &str, level: &str, strategy: JoiningStrategy) {
        self.rules.insert(rule_key(profession, level), strategy);
    }

    /// Register every rule from a list, overriding existing entries.
    pub fn extend<'a>(&mut self, rules: impl IntoIterator<Item = &'a JoiningRule>) {
        for rule in rules {
            self.register(&rule.profession, &rule.level, rule.strategy);
        }
    }

    /// Strategy for a profession/level pair, [`JoiningStrategy::Split`] if unregistered.
    #[must_use]
    pub fn strategy_for(&self, profession: &str, level: &str) -> JoiningStrategy {
        self.rules
            .get(&rule_key(profession, level))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_rule(&self, profession: &str, level: &str) -> bool {
        self.rules.contains_key(&rule_key(profession, level))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn rule_key(profession: &str, level: &str) -> (String, String) {
    (profession.trim().to_lowercase(), level.trim().to_lowercase())
}

/// Create the rule registry for the Java-edition trading page.
///
/// The fisherman's master trade lists the accepted boat types one per
/// line, but they describe a single wanted item.
#[must_use]
pub fn default_grouping_rules() -> GroupingRules {
    let mut rules = GroupingRules::new();
    rules.register("fisherman", "master", JoiningStrategy::Join);
    rules
}

/// Splits cells into logical, normalized entries.
#[derive(Debug, Clone, Copy)]
pub struct CellGrouper<'r> {
    rules: &'r GroupingRules,
}

impl<'r> CellGrouper<'r> {
    #[must_use]
    pub fn new(rules: &'r GroupingRules) -> Self {
        Self { rules }
    }

    /// Split a possibly multi-valued cell for the given profession and level.
    ///
    /// A cell without line breaks yields its normalized text as the only
    /// entry. Otherwise each line is normalized on its own and blank lines
    /// are dropped, unless a joining rule is registered for the pair.
    #[must_use]
    pub fn split(&self, cell: &RawCell, profession: &str, level: &str) -> Vec<String> {
        if !cell.has_line_break() {
            return vec![normalize(&cell.text)];
        }

        match self.rules.strategy_for(profession, level) {
            JoiningStrategy::Split => cell
                .lines()
                .map(normalize)
                .filter(|line| !line.is_empty())
                .collect(),
            JoiningStrategy::Join => vec![Self::join(cell)],
        }
    }

    /// Collapse a cell into a single value, joining its lines with spaces.
    #[must_use]
    pub fn join(cell: &RawCell) -> String {
        if !cell.has_line_break() {
            return normalize(&cell.text);
        }

        let joined = cell
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        normalize(&joined)
    }
}
