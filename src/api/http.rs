use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::schema::{
    self, convert_all, parse_envelope, ApplicationRecord, AuthRecord, CampaignRecord,
    ConversationRecord, Envelope, MessageRecord,
};
use super::{
    AuthSession, BrandOnboarding, CreatorOnboarding, LoginRequest, MarketplaceApi, NewDeliverable,
    VerifyOtpRequest,
};
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{
    BrandCampaign, Conversation, CreatorApplication, DeliverableStatus, Gig, GigAction, GigStatus,
    Message, User,
};

/// gloo-net client. One instance per session: the bearer token is fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: AppConfig,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: AppConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => builder.header("Authorization", &format!("Bearer {t}")),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let req = self
            .authorize(Request::get(&self.config.endpoint(path)))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        exchange::<T>("GET", path, req).await?.into_data()
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let req = self
            .authorize(Request::post(&self.config.endpoint(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        exchange("POST", path, req).await
    }

    async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let req = self
            .authorize(Request::patch(&self.config.endpoint(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        exchange::<Value>("PATCH", path, req).await?.into_unit()
    }

    async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.post::<B, Value>(path, body).await?.into_unit()
    }
}

async fn exchange<T: DeserializeOwned>(method: &str, path: &str, req: Request) -> ApiResult<Envelope<T>> {
    tracing::debug!(method, path, "request");
    let resp = req.send().await.map_err(|e| {
        tracing::warn!(method, path, error = %e, "request failed");
        ApiError::Network(e.to_string())
    })?;
    let status = resp.status();
    let ok = resp.ok();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !ok {
        tracing::warn!(method, path, status, "server returned an error");
        return Err(ApiError::Http { status, message: schema::error_message(&body) });
    }
    parse_envelope(&body)
}

/// Ids come from the server; each one is a single path segment.
fn seg(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

fn action_path(gig_id: &str, action: GigAction) -> String {
    let verb = match action {
        GigAction::Apply => "apply",
        GigAction::Save => "save",
        GigAction::NotInterested => "not-interested",
    };
    format!("/campaigns/{}/{verb}", seg(gig_id))
}

fn applications_path(campaign_id: &str) -> String {
    format!("/brand/campaigns/{}/applications", seg(campaign_id))
}

fn application_path(application_id: &str, tail: &str) -> String {
    format!("/brand/applications/{}/{tail}", seg(application_id))
}

fn deliverable_path(application_id: &str, deliverable_id: &str) -> String {
    format!("{}/{}", application_path(application_id, "deliverables"), seg(deliverable_id))
}

fn thread_path(conversation_id: &str) -> String {
    format!("/conversations/{}/messages", seg(conversation_id))
}

#[async_trait(?Send)]
impl MarketplaceApi for HttpApi {
    async fn login(&self, req: &LoginRequest) -> ApiResult<AuthSession> {
        let auth: AuthRecord = self.post("/auth/login", req).await?.into_data()?;
        Ok(AuthSession { token: auth.token, user: auth.user })
    }

    async fn send_otp(&self, email: &str) -> ApiResult<()> {
        self.post_unit("/auth/otp/send", &json!({ "email": email })).await
    }

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> ApiResult<AuthSession> {
        let auth: AuthRecord = self.post("/auth/otp/verify", req).await?.into_data()?;
        Ok(AuthSession { token: auth.token, user: auth.user })
    }

    async fn me(&self) -> ApiResult<User> {
        self.get("/auth/me").await
    }

    async fn onboard_brand(&self, req: &BrandOnboarding) -> ApiResult<()> {
        self.post_unit("/brands/onboarding", req).await
    }

    async fn onboard_creator(&self, req: &CreatorOnboarding) -> ApiResult<()> {
        self.post_unit("/creators/onboarding", req).await
    }

    async fn list_gigs(&self, tab: GigStatus) -> ApiResult<Vec<Gig>> {
        let records: Vec<CampaignRecord> = self.get(&format!("/creator/gigs/{}", tab.slug())).await?;
        Ok(convert_all(records, "campaign", |r| schema::gig_from_record(r, tab)))
    }

    async fn gig_action(&self, gig_id: &str, action: GigAction) -> ApiResult<()> {
        self.post_unit(&action_path(gig_id, action), &json!({})).await
    }

    async fn list_brand_campaigns(&self) -> ApiResult<Vec<BrandCampaign>> {
        let records: Vec<CampaignRecord> = self.get("/brand/campaigns").await?;
        Ok(convert_all(records, "campaign", schema::brand_campaign_from_record))
    }

    async fn list_applications(&self, campaign_id: &str) -> ApiResult<Vec<CreatorApplication>> {
        let records: Vec<ApplicationRecord> = self
            .get(&applications_path(campaign_id))
            .await?;
        Ok(convert_all(records, "application", schema::application_from_record))
    }

    async fn request_contact(&self, application_id: &str) -> ApiResult<()> {
        self.post_unit(&application_path(application_id, "contact-request"), &json!({}))
            .await
    }

    async fn send_contract(&self, application_id: &str) -> ApiResult<()> {
        self.post_unit(&application_path(application_id, "contract"), &json!({}))
            .await
    }

    async fn add_deliverable(&self, application_id: &str, req: &NewDeliverable) -> ApiResult<()> {
        self.post_unit(&application_path(application_id, "deliverables"), req)
            .await
    }

    async fn set_deliverable_status(
        &self,
        application_id: &str,
        deliverable_id: &str,
        status: DeliverableStatus,
    ) -> ApiResult<()> {
        self.patch(
            &deliverable_path(application_id, deliverable_id),
            &json!({ "status": status.as_str() }),
        )
        .await
    }

    async fn list_conversations(&self) -> ApiResult<Vec<Conversation>> {
        let records: Vec<ConversationRecord> = self.get("/conversations").await?;
        Ok(convert_all(records, "conversation", schema::conversation_from_record))
    }

    async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<Message>> {
        let records: Vec<MessageRecord> = self
            .get(&thread_path(conversation_id))
            .await?;
        Ok(convert_all(records, "message", schema::message_from_record))
    }

    async fn send_message(&self, conversation_id: &str, body: &str) -> ApiResult<()> {
        self.post_unit(
            &thread_path(conversation_id),
            &json!({ "body": body }),
        )
        .await
    }
}
