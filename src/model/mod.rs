pub mod application;
pub mod gig;
pub mod message;

pub use application::{
    BrandCampaign, Contact, ContractStatus, CreatorApplication, Deliverable, DeliverableStatus,
};
pub use gig::{Gig, GigAction, GigStatus, StatPair};
pub use message::{Author, Conversation, Message};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Brand,
    Creator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    pub role: Role,
    /// False until the onboarding wizard has been submitted.
    #[serde(default)]
    pub onboarded: bool,
}
