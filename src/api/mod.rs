//! Network boundary: the `MarketplaceApi` seam, request payloads, and the
//! gloo-net implementation in [`http`].

pub mod http;
pub mod schema;

#[cfg(test)]
pub mod fake;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiResult;
use crate::form::validator::value_of;
use crate::form::FormRecord;
use crate::model::{
    BrandCampaign, Conversation, CreatorApplication, DeliverableStatus, Gig, GigAction, GigStatus,
    Message, User,
};

pub use http::HttpApi;

/// Token plus the user it belongs to, as returned by login and OTP verification.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

// ---------- request payloads ----------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandOnboarding {
    pub company_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub industry: String,
    pub company_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<String>,
    pub contact_name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorOnboarding {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub niche: String,
    pub platform: String,
    pub handle: String,
    pub followers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliverable {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

fn text(record: &FormRecord, field: &str) -> String {
    value_of(record, field).trim().to_string()
}

fn optional(record: &FormRecord, field: &str) -> Option<String> {
    Some(text(record, field)).filter(|v| !v.is_empty())
}

/// A select with an "other" escape hatch sends the free-text value instead.
fn choice_or_other(record: &FormRecord, field: &str, other_field: &str) -> String {
    let choice = text(record, field);
    if choice == "other" {
        optional(record, other_field).unwrap_or(choice)
    } else {
        choice
    }
}

impl LoginRequest {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            email: text(record, "email").to_lowercase(),
            password: value_of(record, "password").to_string(),
        }
    }
}

impl VerifyOtpRequest {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            email: text(record, "email").to_lowercase(),
            code: text(record, "code"),
        }
    }
}

impl BrandOnboarding {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            company_name: text(record, "companyName"),
            email: text(record, "email").to_lowercase(),
            website: optional(record, "website"),
            industry: choice_or_other(record, "industry", "industryOther"),
            company_size: text(record, "companySize"),
            monthly_budget: optional(record, "monthlyBudget"),
            contact_name: text(record, "contactName"),
            password: value_of(record, "password").to_string(),
        }
    }
}

impl CreatorOnboarding {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            full_name: text(record, "fullName"),
            email: text(record, "email").to_lowercase(),
            phone: optional(record, "phone"),
            niche: choice_or_other(record, "niche", "nicheOther"),
            platform: text(record, "platform"),
            handle: text(record, "handle"),
            // The wizard has already checked the number.
            followers: text(record, "followers").parse().unwrap_or(0),
            portfolio: optional(record, "portfolio"),
            password: value_of(record, "password").to_string(),
        }
    }
}

impl NewDeliverable {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            title: text(record, "title"),
            due_date: optional(record, "dueDate"),
        }
    }
}

// ---------- the seam ----------

/// Every call the client makes to the marketplace backend.
///
/// Futures are not `Send`: everything runs on the browser thread.
#[async_trait(?Send)]
pub trait MarketplaceApi {
    async fn login(&self, req: &LoginRequest) -> ApiResult<AuthSession>;
    async fn send_otp(&self, email: &str) -> ApiResult<()>;
    async fn verify_otp(&self, req: &VerifyOtpRequest) -> ApiResult<AuthSession>;
    /// The user behind the current token.
    async fn me(&self) -> ApiResult<User>;

    /// Creates the brand account; the server emails an OTP to confirm it.
    async fn onboard_brand(&self, req: &BrandOnboarding) -> ApiResult<()>;
    async fn onboard_creator(&self, req: &CreatorOnboarding) -> ApiResult<()>;

    async fn list_gigs(&self, tab: GigStatus) -> ApiResult<Vec<Gig>>;
    async fn gig_action(&self, gig_id: &str, action: GigAction) -> ApiResult<()>;

    async fn list_brand_campaigns(&self) -> ApiResult<Vec<BrandCampaign>>;
    async fn list_applications(&self, campaign_id: &str) -> ApiResult<Vec<CreatorApplication>>;
    async fn request_contact(&self, application_id: &str) -> ApiResult<()>;
    async fn send_contract(&self, application_id: &str) -> ApiResult<()>;
    async fn add_deliverable(&self, application_id: &str, req: &NewDeliverable) -> ApiResult<()>;
    async fn set_deliverable_status(
        &self,
        application_id: &str,
        deliverable_id: &str,
        status: DeliverableStatus,
    ) -> ApiResult<()>;

    async fn list_conversations(&self) -> ApiResult<Vec<Conversation>>;
    async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<Message>>;
    async fn send_message(&self, conversation_id: &str, body: &str) -> ApiResult<()>;
}

/// Shared handle passed through Yew context. Equality is identity.
#[derive(Clone)]
pub struct ApiHandle(pub Rc<dyn MarketplaceApi>);

impl ApiHandle {
    pub fn new(api: impl MarketplaceApi + 'static) -> Self {
        Self(Rc::new(api))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ApiHandle {
    type Target = dyn MarketplaceApi;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
