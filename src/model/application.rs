use std::fmt;

use serde::{Deserialize, Serialize};

// ---------- deliverable status ----------

/// Seven-state lifecycle of one deliverable.
///
/// The nominal order is the declaration order below, with `Cancelled` as an
/// alternate terminal state. The status control lets the brand pick any state
/// from any state, so nothing here rejects a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    ContentInProgress,
    ApprovedForPosting,
    Live,
    AnalyticsSubmitted,
    PaymentPending,
    Completed,
    Cancelled,
}

impl DeliverableStatus {
    pub const ALL: [DeliverableStatus; 7] = [
        DeliverableStatus::ContentInProgress,
        DeliverableStatus::ApprovedForPosting,
        DeliverableStatus::Live,
        DeliverableStatus::AnalyticsSubmitted,
        DeliverableStatus::PaymentPending,
        DeliverableStatus::Completed,
        DeliverableStatus::Cancelled,
    ];

    pub const INITIAL: DeliverableStatus = DeliverableStatus::ContentInProgress;

    pub fn label(self) -> &'static str {
        match self {
            DeliverableStatus::ContentInProgress => "Content in progress",
            DeliverableStatus::ApprovedForPosting => "Approved for posting",
            DeliverableStatus::Live => "Live",
            DeliverableStatus::AnalyticsSubmitted => "Analytics submitted",
            DeliverableStatus::PaymentPending => "Payment pending",
            DeliverableStatus::Completed => "Completed",
            DeliverableStatus::Cancelled => "Cancelled",
        }
    }

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliverableStatus::ContentInProgress => "content_in_progress",
            DeliverableStatus::ApprovedForPosting => "approved_for_posting",
            DeliverableStatus::Live => "live",
            DeliverableStatus::AnalyticsSubmitted => "analytics_submitted",
            DeliverableStatus::PaymentPending => "payment_pending",
            DeliverableStatus::Completed => "completed",
            DeliverableStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let s = if s == "canceled" { "cancelled".to_string() } else { s };
        DeliverableStatus::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Total mapping from whatever the server stored. Unknown values fall back
    /// to the initial state so the UI always has one of the seven labels.
    pub fn from_stored(s: &str) -> Self {
        match Self::parse(s) {
            Some(status) => status,
            None => {
                tracing::warn!(stored = s, "unknown deliverable status, showing initial state");
                Self::INITIAL
            }
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeliverableStatus::Completed | DeliverableStatus::Cancelled)
    }

    /// Position in the nominal pipeline; `None` for `Cancelled`.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            DeliverableStatus::Cancelled => None,
            other => DeliverableStatus::ALL.iter().position(|s| *s == other),
        }
    }

    /// True when `next` is the following pipeline step, or a cancellation.
    pub fn follows_order(self, next: DeliverableStatus) -> bool {
        if next == DeliverableStatus::Cancelled {
            return !self.is_terminal();
        }
        match (self.ordinal(), next.ordinal()) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------- contract ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    NotSent,
    Pending,
    Approved,
    Rejected,
}

impl ContractStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::NotSent => "Not sent",
            ContractStatus::Pending => "Pending",
            ContractStatus::Approved => "Approved",
            ContractStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "" | "not_sent" | "none" => Some(ContractStatus::NotSent),
            "pending" | "sent" => Some(ContractStatus::Pending),
            "approved" | "accepted" | "signed" => Some(ContractStatus::Approved),
            "rejected" | "declined" => Some(ContractStatus::Rejected),
            _ => None,
        }
    }
}

// ---------- application ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    /// Hidden until the brand asks for it.
    Withheld,
    /// Brand asked; the creator has not shared yet.
    Requested,
    Revealed { email: String, phone: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deliverable {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,
    pub status: DeliverableStatus,
}

/// One creator's application to a brand campaign, as the brand sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorApplication {
    pub id: String,
    pub creator_name: String,
    pub handle: String,
    pub platform: String,
    pub followers: Option<u64>,
    pub contact: Contact,
    pub contract: ContractStatus,
    pub deliverables: Vec<Deliverable>,
}

impl CreatorApplication {
    pub fn can_send_contract(&self) -> bool {
        matches!(self.contract, ContractStatus::NotSent | ContractStatus::Rejected)
    }

    pub fn can_request_contact(&self) -> bool {
        self.contact == Contact::Withheld
    }

    /// Deliverables count only once a contract is in place.
    pub fn can_add_deliverable(&self) -> bool {
        self.contract == ContractStatus::Approved
    }

    pub fn completed_deliverables(&self) -> usize {
        self.deliverables
            .iter()
            .filter(|d| d.status == DeliverableStatus::Completed)
            .count()
    }
}

/// A campaign in the brand's own list (selector on the selected-creators screen).
#[derive(Debug, Clone, PartialEq)]
pub struct BrandCampaign {
    pub id: String,
    pub title: String,
    pub applicants: u32,
}
