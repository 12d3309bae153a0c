//! Configuration system (layered: defaults < config file < env).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, TurnPlanError};
use crate::types::ToolKind;

/// Comma-separated tool names to group; an empty value disables grouping.
pub const GROUPABLE_TOOLS_ENV: &str = "TURNPLAN_GROUPABLE_TOOLS";
/// `all_occurrences` or `contiguous_run`.
pub const GROUPING_STRATEGY_ENV: &str = "TURNPLAN_GROUPING_STRATEGY";

const CONFIG_FILE_NAME: &str = "turnplan.toml";

/// How occurrences of a groupable tool are gathered into groups.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GroupingStrategy {
    /// One group per tool for the whole turn, anchored at its first part.
    #[default]
    AllOccurrences,
    /// One group per maximal run of consecutive parts of the tool.
    ContiguousRun,
}

/// Settings for the render plan builder.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Tools to group. `None` uses the catalogue defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupable: Option<BTreeSet<ToolKind>>,
    #[builder(default)]
    pub strategy: GroupingStrategy,
    /// Emit reasoning units even when their text is blank.
    #[builder(default)]
    pub keep_empty_reasoning: bool,
}

impl PlanConfig {
    pub fn is_groupable(&self, kind: &ToolKind) -> bool {
        match &self.groupable {
            Some(kinds) => kinds.contains(kind),
            None => kind.is_groupable_by_default(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TurnPlanError::Configuration(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// `~/.turnplan/turnplan.toml`.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".turnplan"))
            .unwrap_or_else(|| PathBuf::from(".turnplan"))
            .join(CONFIG_FILE_NAME)
    }

    /// Defaults overlaid with environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::default().with_vars(|key| std::env::var(key).ok())
    }

    /// Full layered load.
    ///
    /// An explicit `path` must exist; the default path is read only if
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading turnplan config");
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        base.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values looked up by env-var name.
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(list) = lookup(GROUPABLE_TOOLS_ENV) {
            let kinds = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToolKind::from_name)
                .collect();
            self.groupable = Some(kinds);
        }

        if let Some(strategy) = lookup(GROUPING_STRATEGY_ENV) {
            self.strategy = strategy.trim().parse().map_err(|_| {
                TurnPlanError::Configuration(format!(
                    "{GROUPING_STRATEGY_ENV}: unknown grouping strategy '{strategy}'"
                ))
            })?;
        }

        Ok(self)
    }
}
