//! Yew function components. Screens pull everything they need from
//! [`AppContext`]; domain state lives in the plain structs under `state`.

pub mod app;
pub mod auth;
pub mod banner;
pub mod dashboard;
pub mod hooks;
pub mod messages;
pub mod roster;
pub mod toast;
pub mod wizard_form;

use std::rc::Rc;

use yew::prelude::*;

use crate::api::{ApiHandle, AuthSession};
use crate::config::AppConfig;
use crate::model::Role;
use crate::session::Session;
use crate::state::dispatcher::{self, Mutation, Refresh};
use crate::state::Level;

pub use app::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Role chooser for visitors.
    Welcome,
    Login,
    /// Doubles as account creation; an OTP confirms it.
    Onboarding(Role),
    VerifyOtp { email: String },
    /// A token was found but the user behind it is still being fetched.
    Restoring,
    Dashboard,
    SelectedCreators,
    Messages,
}

pub fn home(role: Role) -> Screen {
    match role {
        Role::Brand => Screen::SelectedCreators,
        Role::Creator => Screen::Dashboard,
    }
}

/// Where a session should land right after sign-in or restore.
pub fn landing_screen(session: &Session) -> Screen {
    if !session.is_authenticated() {
        return Screen::Welcome;
    }
    match &session.user {
        None => Screen::Restoring,
        Some(u) if !u.onboarded => Screen::Onboarding(u.role),
        Some(u) => home(u.role),
    }
}

/// The screen actually rendered for `requested`, given who is signed in.
pub fn resolve(requested: &Screen, session: &Session) -> Screen {
    match requested {
        Screen::Welcome | Screen::Login | Screen::Onboarding(_) | Screen::VerifyOtp { .. } => {
            match &session.user {
                Some(u) if u.onboarded => home(u.role),
                _ => requested.clone(),
            }
        }
        Screen::Restoring => landing_screen(session),
        Screen::Dashboard | Screen::SelectedCreators | Screen::Messages => {
            let user = match (&session.user, session.is_authenticated()) {
                (_, false) => return Screen::Welcome,
                (None, true) => return Screen::Restoring,
                (Some(u), true) => u,
            };
            match (requested, user.role) {
                (Screen::Dashboard, Role::Brand) | (Screen::SelectedCreators, Role::Creator) => {
                    home(user.role)
                }
                _ => requested.clone(),
            }
        }
    }
}

/// Everything a screen needs from the shell.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub session: Rc<Session>,
    pub api: ApiHandle,
    pub config: Rc<AppConfig>,
    pub navigate: Callback<Screen>,
    pub sign_in: Callback<AuthSession>,
    pub sign_out: Callback<()>,
    pub notify: Callback<(Level, String)>,
}

impl AppContext {
    pub fn toast(&self, level: Level, text: impl Into<String>) {
        self.notify.emit((level, text.into()));
    }
}

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext provider missing")
}

/// Sends one mutation and shows its outcome. Returns the view to reload.
pub async fn dispatch(ctx: &AppContext, mutation: &Mutation) -> Option<Refresh> {
    let outcome = dispatcher::submit(&*ctx.api, mutation).await;
    ctx.toast(outcome.level, outcome.text);
    outcome.refresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::user;

    fn signed_in(role: Role, onboarded: bool) -> Session {
        let mut u = user(role);
        u.onboarded = onboarded;
        Session { token: Some("t".into()), user: Some(u) }
    }

    #[test]
    fn landing_depends_on_role_and_onboarding() {
        assert_eq!(landing_screen(&Session::default()), Screen::Welcome);
        assert_eq!(landing_screen(&Session::from_token("t".into())), Screen::Restoring);
        assert_eq!(landing_screen(&signed_in(Role::Brand, true)), Screen::SelectedCreators);
        assert_eq!(landing_screen(&signed_in(Role::Creator, true)), Screen::Dashboard);
        assert_eq!(
            landing_screen(&signed_in(Role::Creator, false)),
            Screen::Onboarding(Role::Creator)
        );
    }

    #[test]
    fn private_screens_need_a_session() {
        let anon = Session::default();
        assert_eq!(resolve(&Screen::Messages, &anon), Screen::Welcome);
        assert_eq!(resolve(&Screen::Dashboard, &Session::from_token("t".into())), Screen::Restoring);
        assert_eq!(resolve(&Screen::Login, &anon), Screen::Login);
    }

    #[test]
    fn each_role_keeps_to_its_own_screens() {
        let brand = signed_in(Role::Brand, true);
        assert_eq!(resolve(&Screen::Dashboard, &brand), Screen::SelectedCreators);
        assert_eq!(resolve(&Screen::Messages, &brand), Screen::Messages);
        assert_eq!(resolve(&Screen::Login, &brand), Screen::SelectedCreators);

        let creator = signed_in(Role::Creator, true);
        assert_eq!(resolve(&Screen::SelectedCreators, &creator), Screen::Dashboard);
    }

    #[test]
    fn unfinished_onboarding_stays_reachable() {
        let s = signed_in(Role::Brand, false);
        assert_eq!(resolve(&Screen::Onboarding(Role::Brand), &s), Screen::Onboarding(Role::Brand));
    }
}
