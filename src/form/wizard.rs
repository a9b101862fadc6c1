use std::collections::BTreeMap;

use super::validator::{validate, value_of, FieldSpec, FormRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Static description of a multi-step form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub steps: &'static [StepSpec],
}

impl WizardSpec {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let steps: &'static [StepSpec] = self.steps;
        steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }
}

/// What `advance()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Active step failed validation; errors are set and the step is unchanged.
    Blocked,
    Moved,
    /// The terminal step validated; the caller should submit the record.
    Submit,
}

/// Step controller for one wizard instance. Lives as long as the form is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    spec: WizardSpec,
    step: usize,
    record: FormRecord,
    errors: BTreeMap<&'static str, String>,
    submitting: bool,
}

impl Wizard {
    pub fn new(spec: WizardSpec) -> Self {
        Self {
            spec,
            step: 1,
            record: FormRecord::new(),
            errors: BTreeMap::new(),
            submitting: false,
        }
    }

    /// Starts with some fields filled in (e.g. email carried over from signup).
    pub fn prefilled(spec: WizardSpec, values: &[(&'static str, String)]) -> Self {
        let mut w = Self::new(spec);
        for (name, value) in values {
            w.record.insert(*name, value.clone());
        }
        w
    }

    pub fn spec(&self) -> &WizardSpec {
        &self.spec
    }

    /// 1-based.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_terminal(&self) -> bool {
        self.step == self.spec.step_count()
    }

    pub fn current(&self) -> &'static StepSpec {
        let steps: &'static [StepSpec] = self.spec.steps;
        &steps[self.step - 1]
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn value(&self, field: &str) -> &str {
        value_of(&self.record, field)
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Stores a value and clears that field's error. Unknown fields are ignored.
    pub fn edit(&mut self, field: &str, value: impl Into<String>) {
        let Some(spec) = self.spec.field(field) else {
            tracing::warn!(wizard = self.spec.id, field, "edit for unknown field ignored");
            return;
        };
        self.record.insert(spec.name, value.into());
        self.errors.remove(spec.name);
    }

    /// Validates the active step only. Moves forward one step when it passes,
    /// or asks for submission on the terminal step.
    pub fn advance(&mut self) -> Advance {
        if self.submitting {
            return Advance::Blocked;
        }
        let report = validate(self.current().fields, &self.record);
        if !report.passed() {
            tracing::debug!(
                wizard = self.spec.id,
                step = self.step,
                failed = report.errors.len(),
                "step blocked by validation"
            );
            self.errors = report.errors;
            return Advance::Blocked;
        }
        self.errors.clear();
        if self.is_terminal() {
            Advance::Submit
        } else {
            self.step += 1;
            Advance::Moved
        }
    }

    /// Goes back one step without validating. Stays on step 1.
    pub fn retreat(&mut self) {
        if self.submitting {
            return;
        }
        self.errors.clear();
        self.step = self.step.saturating_sub(1).max(1);
    }

    /// Marks the form as in flight; transitions are ignored until
    /// `finish_submit`.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// A failed submission leaves the form exactly as it was.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}
