use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Field name -> raw value as typed. Optional fields may be absent or empty.
pub type FormRecord = BTreeMap<&'static str, String>;

/// Free mail providers rejected where a company address is required.
pub const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "icloud.com",
    "aol.com",
    "proton.me",
    "protonmail.com",
    "gmx.com",
    "mail.com",
    "yandex.com",
];

pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address";
pub const MSG_COMPANY_DOMAIN: &str = "Company domain email required";
pub const MSG_INVALID_DATE: &str = "Use the format YYYY-MM-DD";
pub const MSG_INVALID_URL: &str = "Enter a full URL starting with http:// or https://";
pub const MSG_INVALID_NUMBER: &str = "Enter a whole number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required(&'static str),
    Email,
    CompanyDomain,
    MinLength(usize, &'static str),
    MaxLength(usize, &'static str),
    /// Exactly n ASCII digits.
    Digits(usize),
    Date,
    Url,
    Number,
    /// Must equal the value of another field (compared verbatim).
    MatchesField(&'static str, &'static str),
    /// Required only while `sibling` holds `equals`.
    RequiredIf {
        sibling: &'static str,
        equals: &'static str,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    /// `(value, label)` pairs; the first entry is the empty prompt.
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required(_)))
    }

    /// Only shown while a sibling holds the trigger value (e.g. "other").
    pub fn shown_when(&self) -> Option<(&'static str, &'static str)> {
        self.rules.iter().find_map(|r| match r {
            Rule::RequiredIf { sibling, equals, .. } => Some((*sibling, *equals)),
            _ => None,
        })
    }

    pub fn is_visible(&self, record: &FormRecord) -> bool {
        match self.shown_when() {
            Some((sibling, equals)) => value_of(record, sibling).trim() == equals,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub errors: BTreeMap<&'static str, String>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

pub fn value_of<'a>(record: &'a FormRecord, field: &str) -> &'a str {
    record.get(field).map(String::as_str).unwrap_or("")
}

/// Checks `fields` against `record`. The first failing rule of each field wins.
pub fn validate(fields: &[FieldSpec], record: &FormRecord) -> Report {
    let mut report = Report::default();
    for field in fields {
        let raw = value_of(record, field.name);
        let value = if field.kind == FieldKind::Password { raw } else { raw.trim() };
        if let Some(msg) = field.rules.iter().find_map(|rule| check(*rule, value, record)) {
            report.errors.insert(field.name, msg);
        }
    }
    report
}

fn check(rule: Rule, value: &str, record: &FormRecord) -> Option<String> {
    match rule {
        Rule::Required(msg) => value.trim().is_empty().then(|| msg.to_string()),
        Rule::RequiredIf { sibling, equals, message } => {
            let triggered = value_of(record, sibling).trim() == equals;
            (triggered && value.trim().is_empty()).then(|| message.to_string())
        }
        Rule::MatchesField(other, msg) => (value != value_of(record, other)).then(|| msg.to_string()),
        // Format rules leave empty optional fields alone.
        _ if value.is_empty() => None,
        Rule::Email => (!email_re().is_match(value)).then(|| MSG_INVALID_EMAIL.to_string()),
        Rule::CompanyDomain => is_free_mail(value).then(|| MSG_COMPANY_DOMAIN.to_string()),
        Rule::MinLength(n, msg) => (value.chars().count() < n).then(|| msg.to_string()),
        Rule::MaxLength(n, msg) => (value.chars().count() > n).then(|| msg.to_string()),
        Rule::Digits(n) => {
            let ok = value.len() == n && value.bytes().all(|b| b.is_ascii_digit());
            (!ok).then(|| format!("Enter the {n}-digit code"))
        }
        Rule::Date => (!date_re().is_match(value)).then(|| MSG_INVALID_DATE.to_string()),
        Rule::Url => (!url_re().is_match(value)).then(|| MSG_INVALID_URL.to_string()),
        Rule::Number => value.parse::<u64>().is_err().then(|| MSG_INVALID_NUMBER.to_string()),
    }
}

pub fn is_free_mail(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => {
            let domain = domain.trim().to_ascii_lowercase();
            FREE_MAIL_DOMAINS.iter().any(|d| *d == domain)
        }
        None => false,
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap())
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap())
}
