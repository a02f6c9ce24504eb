//! User settings persisted as YAML in the data directory.
//!
//! A missing or empty settings file is replaced by the defaults on first
//! load, so the file always exists for users to edit.

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use villager_trades_catalogue::{default_grouping_rules, GroupingRules, JoiningRule, TableLayout};

use crate::config::PageLayout;
use crate::error::Result;

/// How much of each exchange is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Item names only: `a, b -> given`.
    #[default]
    Simple,

    /// Quantities and price multiplier.
    Complex,

    /// Everything, including XP and the trade limit.
    Full,
}

impl DisplayMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub display_mode: DisplayMode,
    pub display_job_site: bool,

    /// Overrides for the trade-table column layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_layout: Option<TableLayout>,

    /// Overrides for which page blocks hold Java-edition data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_layout: Option<PageLayout>,

    /// Extra (profession, level) pairs whose multi-line cells are one item.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub joining_rules: Vec<JoiningRule>,
}

impl Settings {
    /// Load settings from `path`, writing the defaults when the file is
    /// missing or blank.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            let settings = Self::default();
            settings.save(path)?;
            tracing::info!(path = %path.display(), "Wrote default settings");
            return Ok(settings);
        }

        let settings: Self = serde_yaml_ng::from_str(&content)?;
        tracing::debug!(path = %path.display(), mode = %settings.display_mode, "Loaded settings");
        Ok(settings)
    }

    /// Write settings to `path`, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml_ng::to_string(self)?)?;
        Ok(())
    }

    #[must_use]
    pub fn table_layout(&self) -> TableLayout {
        self.table_layout.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn page_layout(&self) -> PageLayout {
        self.page_layout.clone().unwrap_or_default()
    }

    /// Built-in joining rules plus any configured ones.
    #[must_use]
    pub fn grouping_rules(&self) -> GroupingRules {
        let mut rules = default_grouping_rules();
        rules.extend(&self.joining_rules);
        rules
    }
}
