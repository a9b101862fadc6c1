// In-memory MarketplaceApi for tests. Mutations behave like the real server
// closely enough for refetch-after-submit flows.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use super::{
    AuthSession, BrandOnboarding, CreatorOnboarding, LoginRequest, MarketplaceApi, NewDeliverable,
    VerifyOtpRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::model::{
    Author, BrandCampaign, Contact, ContractStatus, Conversation, CreatorApplication, Deliverable,
    DeliverableStatus, Gig, GigAction, GigStatus, Message, Role, User,
};

#[derive(Default)]
pub struct FakeApi {
    pub gigs: RefCell<HashMap<GigStatus, Vec<Gig>>>,
    pub campaigns: RefCell<Vec<BrandCampaign>>,
    pub applications: RefCell<Vec<CreatorApplication>>,
    pub conversations: RefCell<Vec<Conversation>>,
    pub messages: RefCell<HashMap<String, Vec<Message>>>,
    pub calls: RefCell<Vec<String>>,
    fail_next: RefCell<Option<ApiError>>,
}

pub fn gig(id: &str, status: GigStatus) -> Gig {
    Gig {
        id: id.into(),
        title: format!("Campaign {id}"),
        description: String::new(),
        image: String::new(),
        stats: vec![],
        status,
    }
}

pub fn application(id: &str, contract: ContractStatus) -> CreatorApplication {
    CreatorApplication {
        id: id.into(),
        creator_name: format!("Creator {id}"),
        handle: format!("@{id}"),
        platform: "instagram".into(),
        followers: Some(1_000),
        contact: Contact::Withheld,
        contract,
        deliverables: vec![],
    }
}

pub fn user(role: Role) -> User {
    User {
        id: "u-1".into(),
        email: "jo@acme.io".into(),
        display_name: "Jo".into(),
        role,
        onboarded: true,
    }
}

impl FakeApi {
    pub fn with_gigs(gigs: Vec<Gig>) -> Self {
        let api = FakeApi::default();
        for g in gigs {
            api.gigs.borrow_mut().entry(g.status).or_default().push(g);
        }
        api
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn call(&self, name: impl Into<String>) -> ApiResult<()> {
        self.calls.borrow_mut().push(name.into());
        match self.fail_next.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn with_application<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut CreatorApplication) -> R,
    ) -> ApiResult<R> {
        let mut apps = self.applications.borrow_mut();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::Http { status: 404, message: "Application not found".into() })?;
        Ok(f(app))
    }

    fn move_gig(&self, id: &str, to: Option<GigStatus>) {
        let mut gigs = self.gigs.borrow_mut();
        let mut found = None;
        for bucket in gigs.values_mut() {
            if let Some(pos) = bucket.iter().position(|g| g.id == id) {
                found = Some(bucket.remove(pos));
            }
        }
        if let (Some(mut g), Some(to)) = (found, to) {
            g.status = to;
            gigs.entry(to).or_default().push(g);
        }
    }
}

#[async_trait(?Send)]
impl MarketplaceApi for FakeApi {
    async fn login(&self, req: &LoginRequest) -> ApiResult<AuthSession> {
        self.call(format!("login {}", req.email))?;
        Ok(AuthSession { token: "tok-login".into(), user: user(Role::Creator) })
    }

    async fn send_otp(&self, email: &str) -> ApiResult<()> {
        self.call(format!("send_otp {email}"))
    }

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> ApiResult<AuthSession> {
        self.call(format!("verify_otp {} {}", req.email, req.code))?;
        Ok(AuthSession { token: "tok-otp".into(), user: user(Role::Brand) })
    }

    async fn me(&self) -> ApiResult<User> {
        self.call("me")?;
        Ok(user(Role::Creator))
    }

    async fn onboard_brand(&self, req: &BrandOnboarding) -> ApiResult<()> {
        self.call(format!("onboard_brand {}", req.company_name))
    }

    async fn onboard_creator(&self, req: &CreatorOnboarding) -> ApiResult<()> {
        self.call(format!("onboard_creator {}", req.handle))
    }

    async fn list_gigs(&self, tab: GigStatus) -> ApiResult<Vec<Gig>> {
        self.call(format!("list_gigs {}", tab.slug()))?;
        Ok(self.gigs.borrow().get(&tab).cloned().unwrap_or_default())
    }

    async fn gig_action(&self, gig_id: &str, action: GigAction) -> ApiResult<()> {
        self.call(format!("gig_action {gig_id} {action:?}"))?;
        let to = match action {
            GigAction::Apply => Some(GigStatus::Applied),
            GigAction::Save => Some(GigStatus::Saved),
            GigAction::NotInterested => None,
        };
        self.move_gig(gig_id, to);
        Ok(())
    }

    async fn list_brand_campaigns(&self) -> ApiResult<Vec<BrandCampaign>> {
        self.call("list_brand_campaigns")?;
        Ok(self.campaigns.borrow().clone())
    }

    async fn list_applications(&self, campaign_id: &str) -> ApiResult<Vec<CreatorApplication>> {
        self.call(format!("list_applications {campaign_id}"))?;
        Ok(self.applications.borrow().clone())
    }

    async fn request_contact(&self, application_id: &str) -> ApiResult<()> {
        self.call(format!("request_contact {application_id}"))?;
        self.with_application(application_id, |a| a.contact = Contact::Requested)
    }

    async fn send_contract(&self, application_id: &str) -> ApiResult<()> {
        self.call(format!("send_contract {application_id}"))?;
        self.with_application(application_id, |a| a.contract = ContractStatus::Pending)
    }

    async fn add_deliverable(&self, application_id: &str, req: &NewDeliverable) -> ApiResult<()> {
        self.call(format!("add_deliverable {application_id} {}", req.title))?;
        self.with_application(application_id, |a| {
            let id = format!("d{}", a.deliverables.len() + 1);
            a.deliverables.push(Deliverable {
                id,
                title: req.title.clone(),
                due_date: req.due_date.clone(),
                status: DeliverableStatus::INITIAL,
            });
        })
    }

    async fn set_deliverable_status(
        &self,
        application_id: &str,
        deliverable_id: &str,
        status: DeliverableStatus,
    ) -> ApiResult<()> {
        self.call(format!("set_deliverable_status {application_id} {deliverable_id} {}", status.as_str()))?;
        self.with_application(application_id, |a| {
            if let Some(d) = a.deliverables.iter_mut().find(|d| d.id == deliverable_id) {
                d.status = status;
            }
        })
    }

    async fn list_conversations(&self) -> ApiResult<Vec<Conversation>> {
        self.call("list_conversations")?;
        Ok(self.conversations.borrow().clone())
    }

    async fn list_messages(&self, conversation_id: &str) -> ApiResult<Vec<Message>> {
        self.call(format!("list_messages {conversation_id}"))?;
        Ok(self
            .messages
            .borrow()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, conversation_id: &str, body: &str) -> ApiResult<()> {
        self.call(format!("send_message {conversation_id}"))?;
        let mut all = self.messages.borrow_mut();
        let thread = all.entry(conversation_id.to_string()).or_default();
        let id = format!("m{}", thread.len() + 1);
        thread.push(Message { id, author: Author::Me, body: body.into(), sent_at: String::new() });
        Ok(())
    }
}
