//! Explicit session context: who is signed in and the bearer token for the API.
//!
//! The token lives in a short-lived cookie so a reload keeps the user signed in.

use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use crate::api::AuthSession;
use crate::model::User;

pub const TOKEN_COOKIE: &str = "auth_token";
/// Twelve hours.
pub const TOKEN_MAX_AGE_SECS: u32 = 43_200;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn from_auth(auth: AuthSession) -> Self {
        Self { token: Some(auth.token), user: Some(auth.user) }
    }

    /// Token found in the cookie, user not fetched yet.
    pub fn from_token(token: String) -> Self {
        Self { token: Some(token), user: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn needs_onboarding(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.onboarded)
    }

    pub fn display_name(&self) -> &str {
        match &self.user {
            Some(u) if !u.display_name.is_empty() => &u.display_name,
            Some(u) => &u.email,
            None => "",
        }
    }
}

// ---------- cookie ----------

pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k.trim() == name && !v.trim().is_empty()).then(|| v.trim().to_string())
    })
}

pub fn token_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={token}; max-age={TOKEN_MAX_AGE_SECS}; path=/; SameSite=Lax")
}

pub fn expired_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; max-age=0; path=/; SameSite=Lax")
}

fn html_document() -> Option<HtmlDocument> {
    window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

pub fn load_token() -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    parse_cookie(&cookies, TOKEN_COOKIE)
}

pub fn store_token(token: &str) {
    write_cookie(&token_cookie(token), "store");
}

pub fn clear_token() {
    write_cookie(&expired_token_cookie(), "clear");
}

fn write_cookie(cookie: &str, action: &'static str) {
    match html_document() {
        Some(doc) => {
            cookie_written(doc.set_cookie(cookie), action);
        }
        None => tracing::warn!(action, "no document; auth cookie untouched"),
    }
}

/// Logs a failed cookie write. Returns whether the write went through.
fn cookie_written<E>(result: Result<(), E>, action: &'static str) -> bool {
    if result.is_err() {
        tracing::warn!(action, "could not write auth cookie");
    }
    result.is_ok()
}
