use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::wizard_form::{Submission, WizardForm};
use super::{use_app, AppContext, Screen};
use crate::form::catalog::{BRAND_ONBOARDING, CREATOR_ONBOARDING, LOGIN, VERIFY_OTP};
use crate::form::FormRecord;
use crate::model::Role;
use crate::state::dispatcher::{self, resend_otp, FormDone, FormKind};
use crate::state::Level;

/// Sends a finished auth/onboarding wizard and routes on the result.
fn run_form(ctx: AppContext, kind: FormKind, sub: Submission) {
    spawn_local(async move {
        match dispatcher::submit_form(&*ctx.api, kind, &sub.record).await {
            Ok(FormDone::SignedIn(auth)) => ctx.sign_in.emit(auth),
            Ok(FormDone::AwaitingOtp { email }) => {
                ctx.toast(Level::Info, format!("We emailed a 6-digit code to {email}"));
                ctx.navigate.emit(Screen::VerifyOtp { email });
            }
            Err(e) => {
                ctx.toast(Level::Error, e.user_message());
                sub.finish.emit(());
            }
        }
    });
}

#[function_component(Welcome)]
pub fn welcome() -> Html {
    let ctx = use_app();
    let go = |target: Screen| {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(target.clone()))
    };
    let to_login = {
        let navigate = ctx.navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigate.emit(Screen::Login);
        })
    };

    html! {
      <div class="hero">
        <h2>{ "Brands meet creators" }</h2>
        <p class="small">{ "Tell us who you are to get started." }</p>
        <div class="grid">
          <div class="card">
            <div class="title">{ "I'm a brand" }</div>
            <p class="text">{ "Post campaigns, review applicants and manage deliverables." }</p>
            <button onclick={go(Screen::Onboarding(Role::Brand))}>{ "Join as a brand" }</button>
          </div>
          <div class="card">
            <div class="title">{ "I'm a creator" }</div>
            <p class="text">{ "Find paid campaigns that fit your audience." }</p>
            <button onclick={go(Screen::Onboarding(Role::Creator))}>{ "Join as a creator" }</button>
          </div>
        </div>
        <p class="small">
          { "Already have an account? " }
          <a href="#" onclick={to_login}>{ "Sign in" }</a>
        </p>
      </div>
    }
}

#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let ctx = use_app();
    let on_submit = Callback::from(move |sub: Submission| run_form(ctx.clone(), FormKind::Login, sub));
    html! { <WizardForm spec={LOGIN} {on_submit} /> }
}

#[derive(Properties, PartialEq)]
pub struct OnboardingProps {
    pub role: Role,
}

#[function_component(OnboardingScreen)]
pub fn onboarding_screen(props: &OnboardingProps) -> Html {
    let ctx = use_app();
    let (spec, kind) = match props.role {
        Role::Brand => (BRAND_ONBOARDING, FormKind::BrandOnboarding),
        Role::Creator => (CREATOR_ONBOARDING, FormKind::CreatorOnboarding),
    };
    // Signed-in users finishing onboarding keep their address.
    let prefill: Vec<(&'static str, String)> = ctx
        .session
        .user
        .as_ref()
        .map(|u| vec![("email", u.email.clone())])
        .unwrap_or_default();
    let on_submit = {
        let ctx = ctx.clone();
        Callback::from(move |sub: Submission| run_form(ctx.clone(), kind, sub))
    };
    // Keyed so switching role starts a fresh wizard.
    html! { <WizardForm key={spec.id} {spec} {prefill} {on_submit} /> }
}

#[derive(Properties, PartialEq)]
pub struct VerifyOtpProps {
    pub email: String,
}

#[function_component(VerifyOtpScreen)]
pub fn verify_otp_screen(props: &VerifyOtpProps) -> Html {
    let ctx = use_app();
    let resending = use_state(|| false);

    let on_submit = {
        let ctx = ctx.clone();
        Callback::from(move |sub: Submission| run_form(ctx.clone(), FormKind::VerifyOtp, sub))
    };

    let on_resend = {
        let ctx = ctx.clone();
        let email = props.email.clone();
        let resending = resending.clone();
        Callback::from(move |_: MouseEvent| {
            let ctx = ctx.clone();
            let record = FormRecord::from([("email", email.clone())]);
            let resending = resending.clone();
            resending.set(true);
            spawn_local(async move {
                let outcome = resend_otp(&*ctx.api, &record).await;
                ctx.toast(outcome.level, outcome.text);
                resending.set(false);
            });
        })
    };

    html! {
      <WizardForm spec={VERIFY_OTP} prefill={vec![("email", props.email.clone())]} {on_submit}>
        <button type="button" class="linkish" onclick={on_resend} disabled={*resending}>
          { "Resend code" }
        </button>
      </WizardForm>
    }
}
