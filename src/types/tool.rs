//! Tool catalogue.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Tools the assistant can invoke within a turn.
///
/// Wire names are camelCase (`tool:searchDatasets`). Names outside the
/// catalogue parse as [`ToolKind::Custom`] and are never grouped by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolKind {
    SearchDatasets,
    GetDatasetDetails,
    SearchResources,
    GetResourceDetails,
    CreateDocument,
    UpdateDocument,
    AnalyzeResource,
    SuggestQuestions,
    /// Unknown tool by name.
    Custom(String),
}

impl ToolKind {
    /// Resolve a tool name, falling back to [`ToolKind::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "searchDatasets" | "search" => Self::SearchDatasets,
            "getDatasetDetails" => Self::GetDatasetDetails,
            "searchResources" => Self::SearchResources,
            "getResourceDetails" => Self::GetResourceDetails,
            "createDocument" => Self::CreateDocument,
            "updateDocument" => Self::UpdateDocument,
            "analyzeResource" => Self::AnalyzeResource,
            "suggestQuestions" => Self::SuggestQuestions,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Wire name of the tool.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SearchDatasets => "searchDatasets",
            Self::GetDatasetDetails => "getDatasetDetails",
            Self::SearchResources => "searchResources",
            Self::GetResourceDetails => "getResourceDetails",
            Self::CreateDocument => "createDocument",
            Self::UpdateDocument => "updateDocument",
            Self::AnalyzeResource => "analyzeResource",
            Self::SuggestQuestions => "suggestQuestions",
            Self::Custom(name) => name,
        }
    }

    /// Whether repeated calls of this tool collapse into one group unless
    /// configuration says otherwise. Search-style and detail-lookup tools do.
    pub fn is_groupable_by_default(&self) -> bool {
        match self {
            Self::SearchDatasets
            | Self::GetDatasetDetails
            | Self::SearchResources
            | Self::GetResourceDetails => true,
            Self::CreateDocument
            | Self::UpdateDocument
            | Self::AnalyzeResource
            | Self::SuggestQuestions
            | Self::Custom(_) => false,
        }
    }
}

impl FromStr for ToolKind {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(name))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ToolKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for ToolKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ToolKind> for String {
    fn from(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// Typed output of the dataset search tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSearchOutput {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
