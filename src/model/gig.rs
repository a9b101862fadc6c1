use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a gig sits for the signed-in creator. Each status is also a dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GigStatus {
    Recommended,
    Saved,
    Applied,
    InProgress,
    Canceled,
}

impl GigStatus {
    /// Tab order on the dashboard.
    pub const ALL: [GigStatus; 5] = [
        GigStatus::Recommended,
        GigStatus::Saved,
        GigStatus::Applied,
        GigStatus::InProgress,
        GigStatus::Canceled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GigStatus::Recommended => "Recommended",
            GigStatus::Saved => "Saved",
            GigStatus::Applied => "Applied",
            GigStatus::InProgress => "In Progress",
            GigStatus::Canceled => "Canceled",
        }
    }

    /// Path segment for `GET /creator/gigs/{slug}`.
    pub fn slug(self) -> &'static str {
        match self {
            GigStatus::Recommended => "recommended",
            GigStatus::Saved => "saved",
            GigStatus::Applied => "applied",
            GigStatus::InProgress => "in-progress",
            GigStatus::Canceled => "canceled",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace('_', "-");
        GigStatus::ALL.into_iter().find(|t| t.slug() == s)
    }

    /// Which creator actions the gig card offers in this tab.
    pub fn actions(self) -> &'static [GigAction] {
        match self {
            GigStatus::Recommended => &[GigAction::Apply, GigAction::Save, GigAction::NotInterested],
            GigStatus::Saved => &[GigAction::Apply, GigAction::NotInterested],
            GigStatus::Applied | GigStatus::InProgress | GigStatus::Canceled => &[],
        }
    }
}

impl fmt::Display for GigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GigAction {
    Apply,
    Save,
    NotInterested,
}

impl GigAction {
    pub fn label(self) -> &'static str {
        match self {
            GigAction::Apply => "Apply",
            GigAction::Save => "Save",
            GigAction::NotInterested => "Not interested",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatPair {
    pub label: String,
    pub value: String,
}

impl StatPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A campaign as the creator dashboard displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gig {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub stats: Vec<StatPair>,
    pub status: GigStatus,
}
