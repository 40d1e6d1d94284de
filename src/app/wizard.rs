//! Add-user wizard: form data, per-step validation and the step machine.
//!
//! The wizard walks through three steps. Identity and address fields are
//! validated before moving forward; going back never validates. Validation is a
//! pure function of the form and the active step and always rebuilds the whole
//! error map.
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Input fields collected by the wizard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Street,
    City,
    Zip,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Street => "Street",
            Field::City => "City",
            Field::Zip => "Zip",
        }
    }
}

/// Position in the add-user flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Identity,
    Address,
    Review,
}

impl Step {
    /// One-based step number shown in the title.
    pub fn number(self) -> u8 {
        match self {
            Step::Identity => 1,
            Step::Address => 2,
            Step::Review => 3,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Identity => Some(Step::Address),
            Step::Address => Some(Step::Review),
            Step::Review => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Step::Identity => None,
            Step::Address => Some(Step::Identity),
            Step::Review => Some(Step::Address),
        }
    }

    /// Editable fields on this step, in display order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Identity => &[Field::Name, Field::Email],
            Step::Address => &[Field::Street, Field::City, Field::Zip],
            Step::Review => &[],
        }
    }
}

/// Free-form text collected across the first two steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormRecord {
    pub name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl FormRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::Zip => &self.zip,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::Zip => &mut self.zip,
        }
    }
}

/// Per-field validation messages for the active step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, msg: impl Into<String>) {
        self.0.insert(field, msg.into());
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Syntactic sanity check: something, `@`, something, `.`, something.
pub fn looks_like_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Compute the errors for `step` from scratch.
pub fn validate(form: &FormRecord, step: Step) -> FieldErrors {
    let mut errors = FieldErrors::default();
    match step {
        Step::Identity => {
            if is_blank(&form.name) {
                errors.insert(Field::Name, "Name is required");
            }
            if is_blank(&form.email) {
                errors.insert(Field::Email, "Email is required");
            } else if !looks_like_email(&form.email) {
                errors.insert(Field::Email, "Invalid email");
            }
        }
        Step::Address => {
            for &field in Step::Address.fields() {
                if is_blank(form.get(field)) {
                    errors.insert(field, format!("{} is required", field.label()));
                }
            }
        }
        Step::Review => {}
    }
    errors
}

/// Owns the form for one wizard session.
#[derive(Clone, Debug)]
pub struct Wizard {
    form: FormRecord,
    errors: FieldErrors,
    step: Step,
    submitted: bool,
    focus: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            form: FormRecord::default(),
            errors: FieldErrors::default(),
            step: Step::Identity,
            submitted: false,
            focus: 0,
        }
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Write `value` into `field` and drop that field's error. Other errors stay.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        *self.form.slot_mut(field) = value.into();
        self.errors.clear(field);
    }

    /// Replace the error map with a fresh validation of the active step.
    pub fn validate_current_step(&mut self) -> bool {
        self.errors = validate(&self.form, self.step);
        self.errors.is_empty()
    }

    /// Move forward if the active step validates. Stays on the last step.
    pub fn advance(&mut self) {
        if !self.validate_current_step() {
            tracing::debug!(step = self.step.number(), errors = self.errors.len(), "step blocked");
            return;
        }
        if let Some(next) = self.step.next() {
            self.set_step(next);
        }
    }

    /// Move back one step without validating. No-op on the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.set_step(prev);
        }
    }

    /// Mark the form as submitted and emit it on the diagnostic log.
    ///
    /// Only the review step can submit; returns whether the submit happened.
    pub fn submit(&mut self) -> bool {
        if self.step != Step::Review {
            return false;
        }
        tracing::info!(
            name = %self.form.name,
            email = %self.form.email,
            street = %self.form.street,
            city = %self.form.city,
            zip = %self.form.zip,
            "Submitted Data"
        );
        self.submitted = true;
        true
    }

    fn set_step(&mut self, step: Step) {
        self.step = step;
        self.focus = 0;
    }

    /// Field with keyboard focus on the active step, if the step has inputs.
    pub fn focused_field(&self) -> Option<Field> {
        self.step.fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let n = self.step.fields().len();
        if n > 0 {
            self.focus = (self.focus + 1) % n;
        }
    }

    pub fn focus_prev(&mut self) {
        let n = self.step.fields().len();
        if n > 0 {
            self.focus = (self.focus + n - 1) % n;
        }
    }

    /// Append a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            let mut value = self.form.get(field).to_string();
            value.push(c);
            self.update_field(field, value);
        }
    }

    /// Remove the last character of the focused field.
    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused_field() {
            let mut value = self.form.get(field).to_string();
            value.pop();
            self.update_field(field, value);
        }
    }
}
