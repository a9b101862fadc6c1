// Wire shapes of the marketplace API and their conversion into domain records.
//
// The server is loose about field names and types, so records accept the
// aliases we have seen and everything optional is defaulted here, once.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::model::{
    Author, BrandCampaign, Contact, ContractStatus, Conversation, CreatorApplication, Deliverable,
    DeliverableStatus, Gig, GigStatus, Message, StatPair, User,
};

pub const PLACEHOLDER_IMAGE: &str = "/assets/campaign-placeholder.svg";
pub const UNTITLED_CAMPAIGN: &str = "Untitled campaign";
pub const NO_DESCRIPTION: &str = "No description provided.";

/// `{ "success": bool, "data": T?, "message": string? }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data
            .ok_or_else(|| ApiError::Schema("response has no data".into()))
    }

    pub fn into_unit(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection())
        }
    }

    fn rejection(&self) -> ApiError {
        ApiError::Rejected {
            message: self
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Request was not accepted.".into()),
        }
    }
}

pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<Envelope<T>> {
    serde_json::from_str(body).map_err(|e| ApiError::Schema(e.to_string()))
}

/// Pulls `message` out of an error body, if the server sent one.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

// ---------- scalar helpers ----------

/// Ids arrive as strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    fn into_string(self) -> Option<String> {
        match self {
            RecordId::Text(s) if s.trim().is_empty() => None,
            RecordId::Text(s) => Some(s),
            RecordId::Number(n) => Some(n.to_string()),
        }
    }
}

fn require_id(id: Option<RecordId>, what: &str) -> ApiResult<String> {
    id.and_then(RecordId::into_string)
        .ok_or_else(|| ApiError::Schema(format!("{what} without id")))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Renders a loose JSON scalar for display.
fn display_value(v: &Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(if *b { "Yes" } else { "No" }.to_string()),
        _ => None,
    }
}

fn as_u64(v: &Option<Value>) -> Option<u64> {
    match v {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Counts shown in badges; values past `u32::MAX` saturate.
fn as_u32(v: &Option<Value>) -> Option<u32> {
    as_u64(v).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Converts a list, dropping (and logging) records that fail validation.
pub fn convert_all<R, T>(records: Vec<R>, what: &'static str, f: impl Fn(R) -> ApiResult<T>) -> Vec<T> {
    let total = records.len();
    let out: Vec<T> = records
        .into_iter()
        .filter_map(|r| match f(r) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(what, error = %e, "dropping invalid record");
                None
            }
        })
        .collect();
    if out.len() != total {
        tracing::warn!(what, kept = out.len(), total, "some records were dropped");
    }
    out
}

// ---------- auth ----------

#[derive(Debug, Deserialize)]
pub struct AuthRecord {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: User,
}

// ---------- campaigns / gigs ----------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CampaignRecord {
    #[serde(alias = "_id", alias = "campaignId", alias = "campaign_id")]
    pub id: Option<RecordId>,
    #[serde(alias = "name")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "imageUrl", alias = "image_url", alias = "coverImage", alias = "cover_image")]
    pub image: Option<String>,
    #[serde(alias = "brandName", alias = "brand_name")]
    pub brand: Option<String>,
    pub budget: Option<Value>,
    pub platform: Option<String>,
    #[serde(alias = "minFollowers", alias = "min_followers")]
    pub followers: Option<Value>,
    #[serde(alias = "endDate", alias = "end_date")]
    pub deadline: Option<String>,
    #[serde(alias = "applicantsCount", alias = "applicants_count", alias = "applications")]
    pub applicants: Option<Value>,
}

/// Server campaign -> dashboard gig. The gig belongs to the tab it was fetched for.
pub fn gig_from_record(r: CampaignRecord, tab: GigStatus) -> ApiResult<Gig> {
    let id = require_id(r.id, "campaign")?;
    let budget = display_value(&r.budget)
        .map(|b| if b.chars().all(|c| c.is_ascii_digit()) { format!("${b}") } else { b })
        .unwrap_or_else(|| "Negotiable".into());
    let stats = vec![
        StatPair::new("Brand", non_empty(r.brand).unwrap_or_else(|| "Confidential".into())),
        StatPair::new("Budget", budget),
        StatPair::new("Platform", non_empty(r.platform).unwrap_or_else(|| "Any".into())),
        StatPair::new(
            "Min. followers",
            as_u64(&r.followers).map(|n| n.to_string()).unwrap_or_else(|| "Any".into()),
        ),
        StatPair::new("Deadline", non_empty(r.deadline).unwrap_or_else(|| "Flexible".into())),
    ];
    Ok(Gig {
        id,
        title: non_empty(r.title).unwrap_or_else(|| UNTITLED_CAMPAIGN.into()),
        description: non_empty(r.description).unwrap_or_else(|| NO_DESCRIPTION.into()),
        image: non_empty(r.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.into()),
        stats,
        status: tab,
    })
}

pub fn brand_campaign_from_record(r: CampaignRecord) -> ApiResult<BrandCampaign> {
    Ok(BrandCampaign {
        id: require_id(r.id, "campaign")?,
        title: non_empty(r.title).unwrap_or_else(|| UNTITLED_CAMPAIGN.into()),
        applicants: as_u32(&r.applicants).unwrap_or(0),
    })
}

// ---------- brand: applications ----------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeliverableRecord {
    #[serde(alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(alias = "name")]
    pub title: Option<String>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<String>,
    pub status: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationRecord {
    #[serde(alias = "_id", alias = "applicationId", alias = "application_id")]
    pub id: Option<RecordId>,
    #[serde(alias = "creatorName", alias = "creator_name")]
    pub name: Option<String>,
    #[serde(alias = "username")]
    pub handle: Option<String>,
    pub platform: Option<String>,
    #[serde(alias = "followerCount", alias = "follower_count")]
    pub followers: Option<Value>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "contactStatus")]
    pub contact_status: Option<String>,
    #[serde(alias = "contractStatus")]
    pub contract_status: Option<Value>,
    pub deliverables: Vec<DeliverableRecord>,
}

pub fn deliverable_from_record(r: DeliverableRecord) -> ApiResult<Deliverable> {
    Ok(Deliverable {
        id: require_id(r.id, "deliverable")?,
        title: non_empty(r.title).unwrap_or_else(|| "Untitled deliverable".into()),
        due_date: non_empty(r.due_date),
        status: DeliverableStatus::from_stored(&display_value(&r.status).unwrap_or_default()),
    })
}

pub fn application_from_record(r: ApplicationRecord) -> ApiResult<CreatorApplication> {
    let id = require_id(r.id, "application")?;
    let raw_contract = display_value(&r.contract_status).unwrap_or_default();
    let contract = ContractStatus::parse(&raw_contract)
        .ok_or_else(|| ApiError::Schema(format!("unknown contract status {raw_contract:?}")))?;
    let contact = match non_empty(r.email) {
        Some(email) => Contact::Revealed { email, phone: non_empty(r.phone) },
        None if r.contact_status.as_deref().map(str::trim) == Some("requested") => Contact::Requested,
        None => Contact::Withheld,
    };
    Ok(CreatorApplication {
        id,
        creator_name: non_empty(r.name).unwrap_or_else(|| "Unnamed creator".into()),
        handle: non_empty(r.handle).unwrap_or_default(),
        platform: non_empty(r.platform).unwrap_or_default(),
        followers: as_u64(&r.followers),
        contact,
        contract,
        deliverables: convert_all(r.deliverables, "deliverable", deliverable_from_record),
    })
}

// ---------- messaging ----------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConversationRecord {
    #[serde(alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(alias = "counterpartName", alias = "name", alias = "with")]
    pub counterpart: Option<String>,
    #[serde(alias = "lastMessage", alias = "last_message")]
    pub preview: Option<String>,
    #[serde(alias = "unreadCount", alias = "unread_count")]
    pub unread: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageRecord {
    #[serde(alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(alias = "text", alias = "content")]
    pub body: Option<String>,
    #[serde(alias = "fromMe", alias = "from_me", alias = "mine")]
    pub is_mine: bool,
    #[serde(alias = "sentAt", alias = "createdAt", alias = "created_at")]
    pub sent_at: Option<String>,
}

pub fn conversation_from_record(r: ConversationRecord) -> ApiResult<Conversation> {
    Ok(Conversation {
        id: require_id(r.id, "conversation")?,
        counterpart: non_empty(r.counterpart).unwrap_or_else(|| "Unknown".into()),
        preview: non_empty(r.preview).unwrap_or_default(),
        unread: as_u32(&r.unread).unwrap_or(0),
    })
}

pub fn message_from_record(r: MessageRecord) -> ApiResult<Message> {
    Ok(Message {
        id: require_id(r.id, "message")?,
        author: if r.is_mine { Author::Me } else { Author::Them },
        body: r.body.unwrap_or_default(),
        sent_at: non_empty(r.sent_at).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn envelope_success_without_data_is_a_schema_error() {
        let env: Envelope<Vec<CampaignRecord>> = parse_envelope(r#"{ "success": true }"#).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Schema(_))));
    }

    #[test]
    fn envelope_failure_carries_server_message() {
        let env: Envelope<Value> =
            parse_envelope(r#"{ "success": false, "message": "Already applied" }"#).unwrap();
        assert_eq!(
            env.into_unit(),
            Err(ApiError::Rejected { message: "Already applied".into() })
        );
    }

    #[test]
    fn envelope_without_success_flag_is_rejected_at_parse() {
        let res = parse_envelope::<Value>(r#"{ "data": [] }"#);
        assert!(matches!(res, Err(ApiError::Schema(_))));
    }

    #[test]
    fn campaign_defaults_fill_missing_fields() {
        let rec: CampaignRecord = serde_json::from_str(r#"{ "_id": 42, "budget": 1500 }"#).unwrap();
        let gig = gig_from_record(rec, GigStatus::Saved).unwrap();
        assert_eq!(gig.id, "42");
        assert_eq!(gig.title, UNTITLED_CAMPAIGN);
        assert_eq!(gig.image, PLACEHOLDER_IMAGE);
        assert_eq!(gig.status, GigStatus::Saved);
        let labels: Vec<&str> = gig.stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Brand", "Budget", "Platform", "Min. followers", "Deadline"]);
        assert_eq!(gig.stats[1].value, "$1500");
        assert_eq!(gig.stats[4].value, "Flexible");
    }

    #[test]
    fn campaign_without_id_is_dropped_from_lists() {
        let recs: Vec<CampaignRecord> =
            serde_json::from_str(r#"[ { "title": "No id" }, { "id": "c-1", "name": "Glow" } ]"#).unwrap();
        let gigs = convert_all(recs, "campaign", |r| gig_from_record(r, GigStatus::Recommended));
        assert_eq!(gigs.len(), 1);
        assert_eq!(gigs[0].title, "Glow");
    }

    #[test]
    fn application_contact_and_statuses() {
        let rec: ApplicationRecord = serde_json::from_str(
            r#"{
                "id": "app-9",
                "creatorName": "Mia",
                "followerCount": "12,400",
                "contactStatus": "requested",
                "contractStatus": "pending",
                "deliverables": [
                    { "id": 1, "title": "Reel", "status": "live" },
                    { "id": 2, "title": "Story", "status": "posted-ish" },
                    { "title": "no id" }
                ]
            }"#,
        )
        .unwrap();
        let app = application_from_record(rec).unwrap();
        assert_eq!(app.contact, Contact::Requested);
        assert_eq!(app.contract, ContractStatus::Pending);
        assert_eq!(app.followers, Some(12_400));
        assert_eq!(app.deliverables.len(), 2);
        assert_eq!(app.deliverables[0].status, DeliverableStatus::Live);
        assert_eq!(app.deliverables[1].status, DeliverableStatus::ContentInProgress);
    }

    #[test]
    fn revealed_contact_wins_over_status() {
        let rec: ApplicationRecord = serde_json::from_str(
            r#"{ "id": "a", "email": "mia@studio.tv", "contact_status": "requested" }"#,
        )
        .unwrap();
        let app = application_from_record(rec).unwrap();
        assert_eq!(app.contract, ContractStatus::NotSent);
        assert_eq!(
            app.contact,
            Contact::Revealed { email: "mia@studio.tv".into(), phone: None }
        );
    }

    #[test]
    fn unknown_contract_status_is_a_schema_error() {
        let rec: ApplicationRecord =
            serde_json::from_str(r#"{ "id": "a", "contractStatus": "maybe" }"#).unwrap();
        assert!(matches!(application_from_record(rec), Err(ApiError::Schema(_))));

        let recs: Vec<ApplicationRecord> =
            serde_json::from_str(r#"[ { "id": "a", "contractStatus": 7 }, { "id": "b" } ]"#).unwrap();
        let apps = convert_all(recs, "application", application_from_record);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, "b");
    }

    #[test]
    fn numeric_deliverable_status_does_not_sink_the_list() {
        let env: Envelope<Vec<ApplicationRecord>> = parse_envelope(
            r#"{ "success": true, "data": [
                { "id": "a1", "deliverables": [ { "id": "d1", "title": "Reel", "status": 3 } ] },
                { "id": "a2", "deliverables": [ { "id": "d2", "title": "Post", "status": "live" } ] }
            ] }"#,
        )
        .unwrap();
        let apps = convert_all(env.into_data().unwrap(), "application", application_from_record);
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].deliverables[0].status, DeliverableStatus::ContentInProgress);
        assert_eq!(apps[1].deliverables[0].status, DeliverableStatus::Live);
    }

    #[test]
    fn string_unread_count_is_parsed() {
        let env: Envelope<Vec<ConversationRecord>> = parse_envelope(
            r#"{ "success": true, "data": [
                { "id": "c1", "unread": "2" },
                { "id": "c2", "unreadCount": true },
                { "id": "c3", "unread_count": 5 }
            ] }"#,
        )
        .unwrap();
        let convs = convert_all(env.into_data().unwrap(), "conversation", conversation_from_record);
        let unread: Vec<u32> = convs.iter().map(|c| c.unread).collect();
        assert_eq!(unread, [2, 0, 5]);
    }

    #[test]
    fn oversized_applicant_count_saturates() {
        let rec: CampaignRecord =
            serde_json::from_str(r#"{ "id": "c", "applicants": 4294967296 }"#).unwrap();
        assert_eq!(brand_campaign_from_record(rec).unwrap().applicants, u32::MAX);
    }

    #[test]
    fn auth_record_accepts_access_token_alias() {
        let env: Envelope<AuthRecord> = parse_envelope(
            r#"{ "success": true, "data": { "accessToken": "t0k",
                 "user": { "id": "u1", "email": "a@b.co", "role": "brand" } } }"#,
        )
        .unwrap();
        let auth = env.into_data().unwrap();
        assert_eq!(auth.token, "t0k");
        assert_eq!(auth.user.role, Role::Brand);
        assert!(!auth.user.onboarded);
    }

    #[test]
    fn error_body_message_is_extracted() {
        assert_eq!(error_message(r#"{ "message": "Invalid OTP" }"#), "Invalid OTP");
        assert_eq!(error_message("<html>"), "");
    }
}
