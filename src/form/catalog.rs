// Every form in the app, as static step/field/rule tables.

use super::validator::{FieldKind, FieldSpec, Rule};
use super::wizard::{StepSpec, WizardSpec};

pub const MSG_COMPANY_NAME_REQUIRED: &str = "Company name is required";
pub const MSG_PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const MAX_MESSAGE_CHARS: usize = 2000;

const PASSWORD_RULES: &[Rule] = &[
    Rule::Required("Password is required"),
    Rule::MinLength(8, "Password must be at least 8 characters"),
];

const CONFIRM_RULES: &[Rule] = &[
    Rule::Required("Confirm your password"),
    Rule::MatchesField("password", MSG_PASSWORDS_DIFFER),
];

const PASSWORD: FieldSpec = FieldSpec {
    name: "password",
    label: "Password",
    kind: FieldKind::Password,
    placeholder: "At least 8 characters",
    rules: PASSWORD_RULES,
};

const CONFIRM_PASSWORD: FieldSpec = FieldSpec {
    name: "confirmPassword",
    label: "Confirm password",
    kind: FieldKind::Password,
    placeholder: "",
    rules: CONFIRM_RULES,
};

// ---------- brand onboarding ----------

const INDUSTRIES: &[(&str, &str)] = &[
    ("", "Select an industry"),
    ("beauty", "Beauty & personal care"),
    ("fashion", "Fashion & apparel"),
    ("food", "Food & beverage"),
    ("tech", "Tech & gadgets"),
    ("fitness", "Health & fitness"),
    ("travel", "Travel & hospitality"),
    ("other", "Other"),
];

const COMPANY_SIZES: &[(&str, &str)] = &[
    ("", "Select a size"),
    ("1-10", "1-10"),
    ("11-50", "11-50"),
    ("51-200", "51-200"),
    ("201+", "201+"),
];

const BUDGETS: &[(&str, &str)] = &[
    ("", "Select a monthly budget"),
    ("lt-1k", "Under $1k"),
    ("1k-5k", "$1k - $5k"),
    ("5k-20k", "$5k - $20k"),
    ("20k+", "$20k+"),
];

pub const BRAND_ONBOARDING: WizardSpec = WizardSpec {
    id: "brand-onboarding",
    title: "Set up your brand",
    submit_label: "Create brand account",
    steps: &[
        StepSpec {
            title: "Company",
            fields: &[
                FieldSpec {
                    name: "companyName",
                    label: "Company name",
                    kind: FieldKind::Text,
                    placeholder: "Acme Inc.",
                    rules: &[Rule::Required(MSG_COMPANY_NAME_REQUIRED)],
                },
                FieldSpec {
                    name: "email",
                    label: "Work email",
                    kind: FieldKind::Email,
                    placeholder: "you@company.com",
                    rules: &[Rule::Required("Work email is required"), Rule::Email, Rule::CompanyDomain],
                },
                FieldSpec {
                    name: "website",
                    label: "Website",
                    kind: FieldKind::Text,
                    placeholder: "https://",
                    rules: &[Rule::Url],
                },
            ],
        },
        StepSpec {
            title: "About your brand",
            fields: &[
                FieldSpec {
                    name: "industry",
                    label: "Industry",
                    kind: FieldKind::Select(INDUSTRIES),
                    placeholder: "",
                    rules: &[Rule::Required("Select an industry")],
                },
                FieldSpec {
                    name: "industryOther",
                    label: "Your industry",
                    kind: FieldKind::Text,
                    placeholder: "",
                    rules: &[Rule::RequiredIf {
                        sibling: "industry",
                        equals: "other",
                        message: "Tell us your industry",
                    }],
                },
                FieldSpec {
                    name: "companySize",
                    label: "Company size",
                    kind: FieldKind::Select(COMPANY_SIZES),
                    placeholder: "",
                    rules: &[Rule::Required("Select a company size")],
                },
                FieldSpec {
                    name: "monthlyBudget",
                    label: "Creator budget",
                    kind: FieldKind::Select(BUDGETS),
                    placeholder: "",
                    rules: &[],
                },
            ],
        },
        StepSpec {
            title: "Your account",
            fields: &[
                FieldSpec {
                    name: "contactName",
                    label: "Your name",
                    kind: FieldKind::Text,
                    placeholder: "",
                    rules: &[Rule::Required("Your name is required")],
                },
                PASSWORD,
                CONFIRM_PASSWORD,
            ],
        },
    ],
};

// ---------- creator onboarding ----------

const NICHES: &[(&str, &str)] = &[
    ("", "Select your niche"),
    ("lifestyle", "Lifestyle"),
    ("beauty", "Beauty"),
    ("fashion", "Fashion"),
    ("gaming", "Gaming"),
    ("fitness", "Fitness"),
    ("food", "Food"),
    ("tech", "Tech"),
    ("other", "Other"),
];

const PLATFORMS: &[(&str, &str)] = &[
    ("", "Select a platform"),
    ("instagram", "Instagram"),
    ("tiktok", "TikTok"),
    ("youtube", "YouTube"),
    ("twitch", "Twitch"),
    ("x", "X"),
];

pub const CREATOR_ONBOARDING: WizardSpec = WizardSpec {
    id: "creator-onboarding",
    title: "Join as a creator",
    submit_label: "Create creator account",
    steps: &[
        StepSpec {
            title: "About you",
            fields: &[
                FieldSpec {
                    name: "fullName",
                    label: "Full name",
                    kind: FieldKind::Text,
                    placeholder: "",
                    rules: &[Rule::Required("Full name is required")],
                },
                FieldSpec {
                    name: "email",
                    label: "Email",
                    kind: FieldKind::Email,
                    placeholder: "you@example.com",
                    rules: &[Rule::Required("Email is required"), Rule::Email],
                },
                FieldSpec {
                    name: "phone",
                    label: "Phone",
                    kind: FieldKind::Text,
                    placeholder: "Optional",
                    rules: &[],
                },
            ],
        },
        StepSpec {
            title: "Your content",
            fields: &[
                FieldSpec {
                    name: "niche",
                    label: "Niche",
                    kind: FieldKind::Select(NICHES),
                    placeholder: "",
                    rules: &[Rule::Required("Select your niche")],
                },
                FieldSpec {
                    name: "nicheOther",
                    label: "Your niche",
                    kind: FieldKind::Text,
                    placeholder: "",
                    rules: &[Rule::RequiredIf {
                        sibling: "niche",
                        equals: "other",
                        message: "Tell us your niche",
                    }],
                },
                FieldSpec {
                    name: "platform",
                    label: "Main platform",
                    kind: FieldKind::Select(PLATFORMS),
                    placeholder: "",
                    rules: &[Rule::Required("Select your main platform")],
                },
                FieldSpec {
                    name: "handle",
                    label: "Handle",
                    kind: FieldKind::Text,
                    placeholder: "@yourname",
                    rules: &[Rule::Required("Your handle is required")],
                },
            ],
        },
        StepSpec {
            title: "Audience",
            fields: &[
                FieldSpec {
                    name: "followers",
                    label: "Followers",
                    kind: FieldKind::Number,
                    placeholder: "e.g. 25000",
                    rules: &[Rule::Required("Follower count is required"), Rule::Number],
                },
                FieldSpec {
                    name: "portfolio",
                    label: "Portfolio link",
                    kind: FieldKind::Text,
                    placeholder: "https://",
                    rules: &[Rule::Url],
                },
            ],
        },
        StepSpec {
            title: "Your account",
            fields: &[PASSWORD, CONFIRM_PASSWORD],
        },
    ],
};

// ---------- auth ----------

pub const LOGIN: WizardSpec = WizardSpec {
    id: "login",
    title: "Sign in",
    submit_label: "Sign in",
    steps: &[StepSpec {
        title: "Sign in",
        fields: &[
            FieldSpec {
                name: "email",
                label: "Email",
                kind: FieldKind::Email,
                placeholder: "you@example.com",
                rules: &[Rule::Required("Email is required"), Rule::Email],
            },
            FieldSpec {
                name: "password",
                label: "Password",
                kind: FieldKind::Password,
                placeholder: "",
                rules: &[Rule::Required("Password is required")],
            },
        ],
    }],
};

pub const VERIFY_OTP: WizardSpec = WizardSpec {
    id: "verify-otp",
    title: "Check your email",
    submit_label: "Verify",
    steps: &[StepSpec {
        title: "Enter the 6-digit code we sent you",
        fields: &[
            FieldSpec {
                name: "email",
                label: "Email",
                kind: FieldKind::Email,
                placeholder: "",
                rules: &[Rule::Required("Email is required"), Rule::Email],
            },
            FieldSpec {
                name: "code",
                label: "Code",
                kind: FieldKind::Text,
                placeholder: "123456",
                rules: &[Rule::Required("Enter the code we emailed you"), Rule::Digits(6)],
            },
        ],
    }],
};

// ---------- brand tools / messaging ----------

pub const ADD_DELIVERABLE: WizardSpec = WizardSpec {
    id: "add-deliverable",
    title: "Add deliverable",
    submit_label: "Add",
    steps: &[StepSpec {
        title: "Deliverable",
        fields: &[
            FieldSpec {
                name: "title",
                label: "What should be delivered",
                kind: FieldKind::Text,
                placeholder: "1x Instagram reel",
                rules: &[
                    Rule::Required("Deliverable title is required"),
                    Rule::MaxLength(120, "Keep the title under 120 characters"),
                ],
            },
            FieldSpec {
                name: "dueDate",
                label: "Due date",
                kind: FieldKind::Date,
                placeholder: "YYYY-MM-DD",
                rules: &[Rule::Date],
            },
        ],
    }],
};

pub const COMPOSE_MESSAGE: WizardSpec = WizardSpec {
    id: "compose",
    title: "Message",
    submit_label: "Send",
    steps: &[StepSpec {
        title: "Message",
        fields: &[FieldSpec {
            name: "body",
            label: "Message",
            kind: FieldKind::TextArea,
            placeholder: "Write a message…",
            rules: &[
                Rule::Required("Message cannot be empty"),
                Rule::MaxLength(MAX_MESSAGE_CHARS, "Messages are limited to 2000 characters"),
            ],
        }],
    }],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validator::MSG_COMPANY_DOMAIN;
    use crate::form::wizard::{Advance, Wizard};
    use proptest::prelude::*;

    fn fill_brand_step1(w: &mut Wizard, company: &str, email: &str) {
        w.edit("companyName", company);
        w.edit("email", email);
    }

    #[test]
    fn brand_step1_empty_company_name_stays_on_step_one() {
        let mut w = Wizard::new(BRAND_ONBOARDING);
        fill_brand_step1(&mut w, "", "ops@acme.io");
        assert_eq!(w.advance(), Advance::Blocked);
        assert_eq!(w.step(), 1);
        assert_eq!(w.error("companyName"), Some("Company name is required"));
    }

    #[test]
    fn brand_step1_rejects_gmail() {
        let mut w = Wizard::new(BRAND_ONBOARDING);
        fill_brand_step1(&mut w, "Acme", "user@gmail.com");
        assert_eq!(w.advance(), Advance::Blocked);
        assert_eq!(w.error("email"), Some(MSG_COMPANY_DOMAIN));
    }

    #[test]
    fn brand_wizard_walks_to_submission() {
        let mut w = Wizard::new(BRAND_ONBOARDING);
        fill_brand_step1(&mut w, "Acme", "ops@acme.io");
        assert_eq!(w.advance(), Advance::Moved);

        w.edit("industry", "other");
        w.edit("companySize", "11-50");
        assert_eq!(w.advance(), Advance::Blocked);
        assert_eq!(w.error("industryOther"), Some("Tell us your industry"));
        w.edit("industryOther", "Pet care");
        assert_eq!(w.advance(), Advance::Moved);

        w.edit("contactName", "Jo");
        w.edit("password", "longenough");
        w.edit("confirmPassword", "longenougH");
        assert_eq!(w.advance(), Advance::Blocked);
        assert_eq!(w.error("confirmPassword"), Some(MSG_PASSWORDS_DIFFER));
        w.edit("confirmPassword", "longenough");
        assert_eq!(w.advance(), Advance::Submit);
        assert_eq!(w.step(), 3);
    }

    #[test]
    fn creator_followers_must_be_numeric() {
        let mut w = Wizard::new(CREATOR_ONBOARDING);
        w.edit("fullName", "Sam");
        w.edit("email", "sam@gmail.com");
        assert_eq!(w.advance(), Advance::Moved);
        w.edit("niche", "gaming");
        w.edit("platform", "twitch");
        w.edit("handle", "@sam");
        assert_eq!(w.advance(), Advance::Moved);
        w.edit("followers", "25k");
        assert_eq!(w.advance(), Advance::Blocked);
        assert_eq!(w.step(), 3);
    }

    #[test]
    fn every_step_declares_at_least_one_field() {
        for spec in [BRAND_ONBOARDING, CREATOR_ONBOARDING, LOGIN, VERIFY_OTP, ADD_DELIVERABLE, COMPOSE_MESSAGE] {
            assert!(spec.step_count() >= 1, "{}", spec.id);
            for step in spec.steps {
                assert!(!step.fields.is_empty(), "{} / {}", spec.id, step.title);
            }
        }
    }

    proptest! {
        // Blank out one required field of any step: the wizard must not move.
        #[test]
        fn a_blank_required_field_blocks_every_step(
            which in 0usize..2,
            step_pick in 0usize..4,
            field_pick in 0usize..4,
        ) {
            let spec = if which == 0 { BRAND_ONBOARDING } else { CREATOR_ONBOARDING };
            let step_no = step_pick % spec.step_count() + 1;
            let required: Vec<&FieldSpec> = spec.steps[step_no - 1]
                .fields
                .iter()
                .filter(|f| f.is_required())
                .collect();
            prop_assume!(!required.is_empty());
            let blank = required[field_pick % required.len()].name;

            let mut w = Wizard::new(spec);
            for _ in 1..step_no {
                for f in w.current().fields {
                    w.edit(f.name, valid_value(f.name));
                }
                prop_assert_eq!(w.advance(), Advance::Moved);
            }
            for f in w.current().fields {
                if f.name != blank {
                    w.edit(f.name, valid_value(f.name));
                }
            }
            w.edit(blank, "   ");
            prop_assert_eq!(w.advance(), Advance::Blocked);
            prop_assert_eq!(w.step(), step_no);
            prop_assert!(w.error(blank).is_some());
        }
    }

    fn valid_value(field: &str) -> &'static str {
        match field {
            "email" => "team@acme.io",
            "website" | "portfolio" => "https://acme.io",
            "industry" | "niche" => "beauty",
            "industryOther" | "nicheOther" | "phone" => "",
            "companySize" => "11-50",
            "monthlyBudget" => "1k-5k",
            "platform" => "instagram",
            "followers" => "1200",
            "password" | "confirmPassword" => "s3cret-pass",
            _ => "Filled",
        }
    }
}
