use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::auth::{LoginScreen, OnboardingScreen, VerifyOtpScreen, Welcome};
use super::banner::AnnouncementBanner;
use super::dashboard::CreatorDashboard;
use super::hooks::use_model;
use super::messages::MessagesScreen;
use super::roster::SelectedCreators;
use super::toast::Toasts;
use super::{landing_screen, resolve, use_app, AppContext, Screen};
use crate::api::{ApiHandle, AuthSession, HttpApi};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::model::Role;
use crate::session::{self, Session};
use crate::state::{Level, Notices};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config: Rc<AppConfig> = use_memo(props.config.clone(), |c| c.clone());
    let session = use_state(|| session::load_token().map(Session::from_token).unwrap_or_default());
    let screen = use_state(|| Screen::Restoring);
    let notices = use_model(Notices::default);

    // One client per token; signing in or out swaps it.
    let api: Rc<ApiHandle> = {
        let config = config.clone();
        use_memo(session.token.clone(), move |token| {
            ApiHandle::new(HttpApi::new((*config).clone(), token.clone()))
        })
    };

    let notify = {
        let notices = notices.clone();
        let ms = config.notice_ms;
        Callback::from(move |(level, text): (Level, String)| {
            let id = notices.update(|n| n.push(level, text));
            let notices = notices.clone();
            Timeout::new(ms, move || notices.update(|n| n.dismiss(id))).forget();
        })
    };

    let sign_in = {
        let session = session.clone();
        let screen = screen.clone();
        Callback::from(move |auth: AuthSession| {
            session::store_token(&auth.token);
            tracing::info!(role = ?auth.user.role, "signed in");
            let next = Session::from_auth(auth);
            screen.set(landing_screen(&next));
            session.set(next);
        })
    };

    let sign_out = {
        let session = session.clone();
        let screen = screen.clone();
        let notify = notify.clone();
        Callback::from(move |_| {
            session::clear_token();
            session.set(Session::default());
            screen.set(Screen::Welcome);
            notify.emit((Level::Info, "Signed out".to_string()));
        })
    };

    // Fetch the user behind a token read from the cookie.
    {
        let session = session.clone();
        let screen = screen.clone();
        let notify = notify.clone();
        let api = (*api).clone();
        use_effect_with(session.token.clone(), move |token| {
            if let Some(token) = token.clone().filter(|_| session.user.is_none()) {
                spawn_local(async move {
                    match api.me().await {
                        Ok(user) => {
                            let next = Session { token: Some(token), user: Some(user) };
                            screen.set(landing_screen(&next));
                            session.set(next);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "restoring session failed");
                            if matches!(e, ApiError::Http { status: 401, .. }) {
                                session::clear_token();
                            }
                            notify.emit((Level::Error, e.user_message()));
                            session.set(Session::default());
                            screen.set(Screen::Welcome);
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_dismiss = {
        let notices = notices.clone();
        Callback::from(move |id: u64| notices.update(|n| n.dismiss(id)))
    };

    let ctx = AppContext {
        session: Rc::new((*session).clone()),
        api: (*api).clone(),
        config: config.clone(),
        navigate: {
            let screen = screen.clone();
            Callback::from(move |next: Screen| screen.set(next))
        },
        sign_in,
        sign_out,
        notify,
    };

    let current = resolve(&screen, &session);
    let body = match current.clone() {
        Screen::Welcome => html! { <Welcome /> },
        Screen::Login => html! { <LoginScreen /> },
        Screen::Onboarding(role) => html! { <OnboardingScreen {role} /> },
        Screen::VerifyOtp { email } => html! { <VerifyOtpScreen {email} /> },
        Screen::Restoring => html! { <div class="small">{ "Loading your account…" }</div> },
        Screen::Dashboard => html! { <CreatorDashboard /> },
        Screen::SelectedCreators => html! { <SelectedCreators /> },
        Screen::Messages => html! { <MessagesScreen /> },
    };

    let banner = match &config.announcement {
        Some(a) => html! { <AnnouncementBanner id={a.id.clone()} text={a.text.clone()} /> },
        None => html! {},
    };

    let items = notices.borrow().items().to_vec();

    html! {
      <ContextProvider<AppContext> context={ctx}>
        <div class="wrap">
          <Nav {current} />
          { banner }
          <main class="screen">{ body }</main>
          <Toasts {items} {on_dismiss} />
        </div>
      </ContextProvider<AppContext>>
    }
}

#[derive(Properties, PartialEq)]
struct NavProps {
    current: Screen,
}

#[function_component(Nav)]
fn nav(props: &NavProps) -> Html {
    let ctx = use_app();

    let chip = |label: &'static str, target: Screen| {
        let active = props.current == target;
        let navigate = ctx.navigate.clone();
        let onclick = Callback::from(move |_: MouseEvent| navigate.emit(target.clone()));
        html! {
          <button class={classes!("chip", active.then_some("active"))} {onclick}>{ label }</button>
        }
    };

    let links = match ctx.session.user.as_ref().filter(|u| u.onboarded).map(|u| u.role) {
        Some(Role::Creator) => html! {
          <>
            { chip("Dashboard", Screen::Dashboard) }
            { chip("Messages", Screen::Messages) }
          </>
        },
        Some(Role::Brand) => html! {
          <>
            { chip("Selected creators", Screen::SelectedCreators) }
            { chip("Messages", Screen::Messages) }
          </>
        },
        None if !ctx.session.is_authenticated() => html! {
          <>
            { chip("Get started", Screen::Welcome) }
            { chip("Sign in", Screen::Login) }
          </>
        },
        None => html! {},
    };

    let account = if ctx.session.is_authenticated() {
        let sign_out = ctx.sign_out.clone();
        html! {
          <div class="account">
            <span class="small">{ ctx.session.display_name().to_string() }</span>
            <button class="secondary" onclick={Callback::from(move |_: MouseEvent| sign_out.emit(()))}>
              { "Sign out" }
            </button>
          </div>
        }
    } else {
        html! {}
    };

    html! {
      <header class="toprow">
        <h1>{ "Creator Marketplace" }</h1>
        <nav class="chips">{ links }</nav>
        { account }
      </header>
    }
}
