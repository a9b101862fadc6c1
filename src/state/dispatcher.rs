//! Fire-and-refetch submission of every mutating action.
//!
//! A mutation is sent once. Success yields a success notice and the view to
//! reload; failure yields an error notice and nothing else, so local state
//! stays as it was. No optimistic updates, no retries.

use crate::api::{
    AuthSession, BrandOnboarding, CreatorOnboarding, LoginRequest, MarketplaceApi, NewDeliverable,
    VerifyOtpRequest,
};
use crate::error::ApiResult;
use crate::form::validator::value_of;
use crate::form::FormRecord;
use crate::model::{DeliverableStatus, GigAction};
use crate::state::notify::Level;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Gig {
        gig_id: String,
        action: GigAction,
    },
    RequestContact {
        application_id: String,
    },
    SendContract {
        application_id: String,
    },
    AddDeliverable {
        application_id: String,
        deliverable: NewDeliverable,
    },
    SetDeliverableStatus {
        application_id: String,
        deliverable_id: String,
        from: DeliverableStatus,
        to: DeliverableStatus,
    },
    SendMessage {
        conversation_id: String,
        body: String,
    },
}

impl Mutation {
    fn name(&self) -> &'static str {
        match self {
            Mutation::Gig { action: GigAction::Apply, .. } => "apply",
            Mutation::Gig { action: GigAction::Save, .. } => "save",
            Mutation::Gig { action: GigAction::NotInterested, .. } => "not_interested",
            Mutation::RequestContact { .. } => "request_contact",
            Mutation::SendContract { .. } => "send_contract",
            Mutation::AddDeliverable { .. } => "add_deliverable",
            Mutation::SetDeliverableStatus { .. } => "set_deliverable_status",
            Mutation::SendMessage { .. } => "send_message",
        }
    }

    fn success_text(&self) -> String {
        match self {
            Mutation::Gig { action: GigAction::Apply, .. } => "Application sent".into(),
            Mutation::Gig { action: GigAction::Save, .. } => "Saved for later".into(),
            Mutation::Gig { action: GigAction::NotInterested, .. } => {
                "Got it. We'll show fewer campaigns like this".into()
            }
            Mutation::RequestContact { .. } => "Contact request sent".into(),
            Mutation::SendContract { .. } => "Contract sent".into(),
            Mutation::AddDeliverable { .. } => "Deliverable added".into(),
            Mutation::SetDeliverableStatus { to, .. } => format!("Deliverable marked \"{}\"", to.label()),
            Mutation::SendMessage { .. } => "Message sent".into(),
        }
    }

    fn refresh(&self) -> Refresh {
        match self {
            Mutation::Gig { .. } => Refresh::GigTab,
            Mutation::RequestContact { .. }
            | Mutation::SendContract { .. }
            | Mutation::AddDeliverable { .. }
            | Mutation::SetDeliverableStatus { .. } => Refresh::Roster,
            Mutation::SendMessage { conversation_id, .. } => Refresh::Thread(conversation_id.clone()),
        }
    }
}

/// Which view to reload after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The active dashboard tab.
    GigTab,
    /// The open campaign's applications.
    Roster,
    Thread(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub level: Level,
    pub text: String,
    pub refresh: Option<Refresh>,
}

async fn send(api: &dyn MarketplaceApi, m: &Mutation) -> ApiResult<()> {
    match m {
        Mutation::Gig { gig_id, action } => api.gig_action(gig_id, *action).await,
        Mutation::RequestContact { application_id } => api.request_contact(application_id).await,
        Mutation::SendContract { application_id } => api.send_contract(application_id).await,
        Mutation::AddDeliverable { application_id, deliverable } => {
            api.add_deliverable(application_id, deliverable).await
        }
        Mutation::SetDeliverableStatus { application_id, deliverable_id, from, to } => {
            if !from.follows_order(*to) {
                // Allowed on purpose; the status control is free-form.
                tracing::info!(
                    from = from.as_str(),
                    to = to.as_str(),
                    "deliverable status set out of pipeline order"
                );
            }
            api.set_deliverable_status(application_id, deliverable_id, *to).await
        }
        Mutation::SendMessage { conversation_id, body } => {
            api.send_message(conversation_id, body.trim()).await
        }
    }
}

pub async fn submit(api: &dyn MarketplaceApi, m: &Mutation) -> Outcome {
    match send(api, m).await {
        Ok(()) => {
            tracing::info!(action = m.name(), "mutation accepted");
            Outcome { level: Level::Success, text: m.success_text(), refresh: Some(m.refresh()) }
        }
        Err(e) => {
            tracing::warn!(action = m.name(), error = %e, "mutation failed");
            Outcome { level: Level::Error, text: e.user_message(), refresh: None }
        }
    }
}

// ---------- form submissions (auth + onboarding) ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    VerifyOtp,
    BrandOnboarding,
    CreatorOnboarding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormDone {
    SignedIn(AuthSession),
    /// Account created; an OTP was emailed to this address.
    AwaitingOtp { email: String },
}

/// Sends a completed wizard record. The caller turns errors into a notice
/// and leaves the wizard on its terminal step.
pub async fn submit_form(api: &dyn MarketplaceApi, kind: FormKind, record: &FormRecord) -> ApiResult<FormDone> {
    let result = match kind {
        FormKind::Login => api.login(&LoginRequest::from_record(record)).await.map(FormDone::SignedIn),
        FormKind::VerifyOtp => api
            .verify_otp(&VerifyOtpRequest::from_record(record))
            .await
            .map(FormDone::SignedIn),
        FormKind::BrandOnboarding => {
            let payload = BrandOnboarding::from_record(record);
            let email = payload.email.clone();
            api.onboard_brand(&payload).await.map(|_| FormDone::AwaitingOtp { email })
        }
        FormKind::CreatorOnboarding => {
            let payload = CreatorOnboarding::from_record(record);
            let email = payload.email.clone();
            api.onboard_creator(&payload).await.map(|_| FormDone::AwaitingOtp { email })
        }
    };
    match &result {
        Ok(_) => tracing::info!(form = ?kind, "form submitted"),
        Err(e) => tracing::warn!(form = ?kind, error = %e, "form submission failed"),
    }
    result
}

/// Re-sends the OTP for the address in the record.
pub async fn resend_otp(api: &dyn MarketplaceApi, record: &FormRecord) -> Outcome {
    let email = value_of(record, "email").trim().to_lowercase();
    match api.send_otp(&email).await {
        Ok(()) => Outcome { level: Level::Info, text: format!("We sent a new code to {email}"), refresh: None },
        Err(e) => {
            tracing::warn!(error = %e, "resending OTP failed");
            Outcome { level: Level::Error, text: e.user_message(), refresh: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{application, gig, FakeApi};
    use crate::error::ApiError;
    use crate::model::{Contact, ContractStatus, GigStatus, Role};

    fn record(pairs: &[(&'static str, &str)]) -> FormRecord {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[tokio::test]
    async fn apply_success_asks_for_tab_refresh() {
        let api = FakeApi::with_gigs(vec![gig("g1", GigStatus::Recommended)]);
        let m = Mutation::Gig { gig_id: "g1".into(), action: GigAction::Apply };
        let out = submit(&api, &m).await;
        assert_eq!(out.level, Level::Success);
        assert_eq!(out.text, "Application sent");
        assert_eq!(out.refresh, Some(Refresh::GigTab));
        assert_eq!(api.gigs.borrow()[&GigStatus::Applied][0].id, "g1");
    }

    #[tokio::test]
    async fn failure_reports_error_and_skips_refresh() {
        let api = FakeApi::default();
        api.fail_next(ApiError::Rejected { message: "Campaign is full".into() });
        let m = Mutation::Gig { gig_id: "g1".into(), action: GigAction::Save };
        let out = submit(&api, &m).await;
        assert_eq!(out.level, Level::Error);
        assert_eq!(out.text, "Campaign is full");
        assert_eq!(out.refresh, None);
    }

    #[tokio::test]
    async fn deliverable_status_jump_is_accepted() {
        let api = FakeApi::default();
        let mut app = application("a1", ContractStatus::Approved);
        app.deliverables.push(crate::model::Deliverable {
            id: "d1".into(),
            title: "Reel".into(),
            due_date: None,
            status: DeliverableStatus::ContentInProgress,
        });
        api.applications.borrow_mut().push(app);

        let m = Mutation::SetDeliverableStatus {
            application_id: "a1".into(),
            deliverable_id: "d1".into(),
            from: DeliverableStatus::ContentInProgress,
            to: DeliverableStatus::Completed,
        };
        let out = submit(&api, &m).await;
        assert_eq!(out.refresh, Some(Refresh::Roster));
        assert_eq!(out.text, "Deliverable marked \"Completed\"");
        assert_eq!(
            api.applications.borrow()[0].deliverables[0].status,
            DeliverableStatus::Completed
        );
    }

    #[tokio::test]
    async fn send_message_refreshes_its_thread() {
        let api = FakeApi::default();
        let m = Mutation::SendMessage { conversation_id: "c7".into(), body: "  hello  ".into() };
        let out = submit(&api, &m).await;
        assert_eq!(out.refresh, Some(Refresh::Thread("c7".into())));
        assert_eq!(api.messages.borrow()["c7"][0].body, "hello");
    }

    #[tokio::test]
    async fn contact_request_marks_application_and_refreshes_roster() {
        let api = FakeApi::default();
        api.applications.borrow_mut().push(application("a1", ContractStatus::NotSent));
        let out = submit(&api, &Mutation::RequestContact { application_id: "a1".into() }).await;
        assert_eq!(out.level, Level::Success);
        assert_eq!(out.text, "Contact request sent");
        assert_eq!(out.refresh, Some(Refresh::Roster));
        assert_eq!(api.applications.borrow()[0].contact, Contact::Requested);
    }

    #[tokio::test]
    async fn send_contract_moves_application_to_pending() {
        let api = FakeApi::default();
        api.applications.borrow_mut().push(application("a1", ContractStatus::Rejected));
        let out = submit(&api, &Mutation::SendContract { application_id: "a1".into() }).await;
        assert_eq!(out.text, "Contract sent");
        assert_eq!(out.refresh, Some(Refresh::Roster));
        assert_eq!(api.applications.borrow()[0].contract, ContractStatus::Pending);
    }

    #[tokio::test]
    async fn contract_for_missing_application_reports_server_message() {
        let api = FakeApi::default();
        let out = submit(&api, &Mutation::SendContract { application_id: "gone".into() }).await;
        assert_eq!(out.level, Level::Error);
        assert_eq!(out.text, "Application not found");
        assert_eq!(out.refresh, None);
    }

    #[tokio::test]
    async fn added_deliverable_starts_in_progress() {
        let api = FakeApi::default();
        api.applications.borrow_mut().push(application("a1", ContractStatus::Approved));
        let m = Mutation::AddDeliverable {
            application_id: "a1".into(),
            deliverable: NewDeliverable { title: "Unboxing reel".into(), due_date: Some("2026-11-02".into()) },
        };
        let out = submit(&api, &m).await;
        assert_eq!(out.text, "Deliverable added");
        assert_eq!(out.refresh, Some(Refresh::Roster));
        let apps = api.applications.borrow();
        let d = &apps[0].deliverables[0];
        assert_eq!(d.title, "Unboxing reel");
        assert_eq!(d.due_date.as_deref(), Some("2026-11-02"));
        assert_eq!(d.status, DeliverableStatus::ContentInProgress);
    }

    #[tokio::test]
    async fn login_signs_in_with_lowercased_email() {
        let api = FakeApi::default();
        let r = record(&[("email", " Jo@Acme.io "), ("password", "hunter22")]);
        match submit_form(&api, FormKind::Login, &r).await.unwrap() {
            FormDone::SignedIn(auth) => {
                assert_eq!(auth.token, "tok-login");
                assert_eq!(auth.user.role, Role::Creator);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(api.calls(), ["login jo@acme.io"]);
    }

    #[tokio::test]
    async fn resend_otp_confirms_address() {
        let api = FakeApi::default();
        let out = resend_otp(&api, &record(&[("email", "Ops@Acme.io")])).await;
        assert_eq!(out.level, Level::Info);
        assert_eq!(out.text, "We sent a new code to ops@acme.io");
        assert_eq!(out.refresh, None);
        assert_eq!(api.calls(), ["send_otp ops@acme.io"]);
    }

    #[tokio::test]
    async fn resend_otp_failure_is_an_error_notice() {
        let api = FakeApi::default();
        api.fail_next(ApiError::Http { status: 429, message: "Too many requests".into() });
        let out = resend_otp(&api, &record(&[("email", "ops@acme.io")])).await;
        assert_eq!(out.level, Level::Error);
        assert_eq!(out.text, "Too many requests");
        assert_eq!(out.refresh, None);
    }

    #[tokio::test]
    async fn brand_onboarding_waits_for_otp() {
        let api = FakeApi::default();
        let r = record(&[("companyName", "Acme"), ("email", "Ops@Acme.io")]);
        let done = submit_form(&api, FormKind::BrandOnboarding, &r).await.unwrap();
        assert_eq!(done, FormDone::AwaitingOtp { email: "ops@acme.io".into() });
        assert_eq!(api.calls(), ["onboard_brand Acme"]);
    }

    #[tokio::test]
    async fn otp_verification_signs_in() {
        let api = FakeApi::default();
        let r = record(&[("email", "ops@acme.io"), ("code", "123456")]);
        match submit_form(&api, FormKind::VerifyOtp, &r).await.unwrap() {
            FormDone::SignedIn(auth) => {
                assert_eq!(auth.token, "tok-otp");
                assert_eq!(auth.user.role, Role::Brand);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_form_submission_is_returned_as_error() {
        let api = FakeApi::default();
        api.fail_next(ApiError::Http { status: 409, message: "Email already registered".into() });
        let err = submit_form(&api, FormKind::CreatorOnboarding, &FormRecord::new())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Email already registered");
    }
}
