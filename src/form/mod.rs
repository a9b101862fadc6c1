pub mod catalog;
pub mod validator;
pub mod wizard;

pub use validator::{validate, FieldKind, FieldSpec, FormRecord, Report, Rule};
pub use wizard::{Advance, StepSpec, Wizard, WizardSpec};
