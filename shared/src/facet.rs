use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== LIFECYCLE STATE =====

/// Load progress of one facet, as published by the data-loading store.
///
/// The store owns every transition; views only read the current value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacetLifecycleState {
    /// No fetch attempted yet, or the data was invalidated.
    #[default]
    #[serde(rename = "stale", alias = "FACET_STALE", alias = "STALE")]
    Stale,
    /// Fetch in flight, nothing arrived yet.
    #[serde(rename = "fetching", alias = "FACET_FETCHING", alias = "FETCHING")]
    Fetching,
    /// Some data arrived, the fetch may still be running.
    #[serde(rename = "partial", alias = "FACET_PARTIAL", alias = "PARTIAL")]
    Partial,
    /// Fetch complete, data is final.
    #[serde(rename = "loaded", alias = "FACET_LOADED", alias = "LOADED")]
    Loaded,
    /// Fetch failed terminally.
    #[serde(rename = "error", alias = "FACET_ERROR", alias = "ERROR")]
    Error,
}

impl FacetLifecycleState {
    pub const ALL: [FacetLifecycleState; 5] = [
        Self::Stale,
        Self::Fetching,
        Self::Partial,
        Self::Loaded,
        Self::Error,
    ];

    /// Canonical wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Stale => "stale",
            Self::Fetching => "fetching",
            Self::Partial => "partial",
            Self::Loaded => "loaded",
            Self::Error => "error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stale => "Stale",
            Self::Fetching => "Fetching...",
            Self::Partial => "Partial",
            Self::Loaded => "Loaded",
            Self::Error => "Error",
        }
    }

    pub fn tone(self) -> BadgeTone {
        match self {
            Self::Stale => BadgeTone::Gray,
            Self::Fetching => BadgeTone::Blue,
            Self::Partial => BadgeTone::Yellow,
            Self::Loaded => BadgeTone::Green,
            Self::Error => BadgeTone::Red,
        }
    }

    /// `Loaded` and `Error` are final answers; nothing more will arrive.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Loaded | Self::Error)
    }
}

impl fmt::Display for FacetLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized facet state '{0}'")]
pub struct UnrecognizedState(pub String);

impl FromStr for FacetLifecycleState {
    type Err = UnrecognizedState;

    /// Accepts the lowercase wire tags, the `FACET_` prefixed tags and the bare
    /// uppercase tags. Anything else is rejected rather than read as `Stale`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let bare = tag.strip_prefix("FACET_").unwrap_or(tag);
        match bare {
            "stale" | "STALE" => Ok(Self::Stale),
            "fetching" | "FETCHING" => Ok(Self::Fetching),
            "partial" | "PARTIAL" => Ok(Self::Partial),
            "loaded" | "LOADED" => Ok(Self::Loaded),
            "error" | "ERROR" => Ok(Self::Error),
            _ => Err(UnrecognizedState(tag.to_string())),
        }
    }
}

/// Badge color for a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Gray,
    Blue,
    Yellow,
    Green,
    Red,
}

// ===== LEGACY PROJECTION =====

/// Three-state load status still used by older stores.
///
/// The projection is lossy: `Partial`, `Loaded` and `Error` all collapse into
/// `Loaded`, so a failed fetch and a partial one are indistinguishable here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegacyLoadState {
    Stale,
    Fetching,
    Loaded,
}

impl From<FacetLifecycleState> for LegacyLoadState {
    fn from(state: FacetLifecycleState) -> Self {
        match state {
            FacetLifecycleState::Stale => Self::Stale,
            FacetLifecycleState::Fetching => Self::Fetching,
            FacetLifecycleState::Partial
            | FacetLifecycleState::Loaded
            | FacetLifecycleState::Error => Self::Loaded,
        }
    }
}

impl From<LegacyLoadState> for FacetLifecycleState {
    fn from(state: LegacyLoadState) -> Self {
        match state {
            LegacyLoadState::Stale => Self::Stale,
            LegacyLoadState::Fetching => Self::Fetching,
            LegacyLoadState::Loaded => Self::Loaded,
        }
    }
}

// ===== FACET IDENTIFIERS =====

/// Every facet the view shell knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetId {
    Statements,
    OpenApprovals,
    ApprovalLogs,
    Transfers,
    AssetCharts,
}

impl FacetId {
    pub const ALL: [FacetId; 5] = [
        Self::Statements,
        Self::OpenApprovals,
        Self::ApprovalLogs,
        Self::Transfers,
        Self::AssetCharts,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn key(self) -> &'static str {
        match self {
            Self::Statements => "exports.statements",
            Self::OpenApprovals => "exports.openapprovals",
            Self::ApprovalLogs => "exports.approvallogs",
            Self::Transfers => "exports.transfers",
            Self::AssetCharts => "exports.assetcharts",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Statements => "Statements",
            Self::OpenApprovals => "Open Approvals",
            Self::ApprovalLogs => "Approval Logs",
            Self::Transfers => "Transfers",
            Self::AssetCharts => "Asset Charts",
        }
    }

    /// Position in `ALL`, used as a dense table index.
    pub(crate) fn ordinal(self) -> usize {
        match self {
            Self::Statements => 0,
            Self::OpenApprovals => 1,
            Self::ApprovalLogs => 2,
            Self::Transfers => 3,
            Self::AssetCharts => 4,
        }
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown facet '{0}'")]
pub struct UnknownFacet(pub String);

impl FromStr for FacetId {
    type Err = UnknownFacet;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.key() == key)
            .ok_or_else(|| UnknownFacet(key.to_string()))
    }
}

impl Serialize for FacetId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for FacetId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
