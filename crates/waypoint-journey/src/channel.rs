//! Channel classification (paid vs. organic).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Broad classification of a marketing channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Bought media (ads, sponsored search).
    Paid,

    /// Owned or earned media (email, site visits, referrals).
    Organic,

    /// Not present in the catalog.
    Unclassified,
}

impl ChannelKind {
    /// Returns all channel kinds.
    pub fn all() -> Vec<Self> {
        vec![Self::Paid, Self::Organic, Self::Unclassified]
    }

    /// Returns the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Organic => "Organic",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mapping from channel name to [`ChannelKind`].
#[derive(Debug, Clone)]
pub struct ChannelCatalog {
    kinds: HashMap<String, ChannelKind>,
}

impl ChannelCatalog {
    /// Create an empty catalog. Every channel classifies as
    /// [`ChannelKind::Unclassified`].
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Add or replace a channel classification.
    pub fn insert(&mut self, channel: impl Into<String>, kind: ChannelKind) {
        self.kinds.insert(channel.into(), kind);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, channel: impl Into<String>, kind: ChannelKind) -> Self {
        self.insert(channel, kind);
        self
    }

    /// Classify a channel.
    pub fn kind(&self, channel: &str) -> ChannelKind {
        self.kinds
            .get(channel)
            .copied()
            .unwrap_or(ChannelKind::Unclassified)
    }

    /// Channels of one kind, sorted by name.
    pub fn channels_of(&self, kind: ChannelKind) -> Vec<&str> {
        let mut channels: Vec<&str> = self
            .kinds
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(c, _)| c.as_str())
            .collect();
        channels.sort_unstable();
        channels
    }

    /// Number of classified channels.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn default_entries() -> Vec<(&'static str, ChannelKind)> {
        vec![
            ("Facebook Ad", ChannelKind::Paid),
            ("Google Search", ChannelKind::Paid),
            ("Instagram Ad", ChannelKind::Paid),
            ("YouTube Ad", ChannelKind::Paid),
            ("Website Visit", ChannelKind::Organic),
            ("Email Newsletter", ChannelKind::Organic),
            ("Discount Code Email", ChannelKind::Organic),
            ("Recommend a Friend", ChannelKind::Organic),
            ("Blog Post View", ChannelKind::Organic),
            ("Product Review", ChannelKind::Organic),
        ]
    }
}

impl Default for ChannelCatalog {
    /// Stock classification of the common ad networks and owned channels.
    fn default() -> Self {
        let kinds = Self::default_entries()
            .into_iter()
            .map(|(c, k)| (c.to_string(), k))
            .collect();
        Self { kinds }
    }
}
