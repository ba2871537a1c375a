//! Beta signup form values, validation and submission phases.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.\S+$").expect("email pattern is valid"));

pub const MIN_NAME_LEN: usize = 2;

pub const NAME_MESSAGE: &str = "Please enter your name (at least 2 characters).";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const USECASE_MESSAGE: &str = "Please tell us how you plan to use SoulTune.";
pub const CONSENT_MESSAGE: &str = "Please accept the privacy policy to join the beta.";
pub const FAILURE_MESSAGE: &str =
    "Something went wrong while sending your signup. Please try again in a moment.";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Raw values as typed by the visitor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub usecase: String,
    pub consent: bool,
}

/// A form that passed validation, trimmed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidSignup {
    pub name: String,
    pub email: String,
    pub usecase: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors(Vec<&'static str>);

impl ValidationErrors {
    pub fn messages(&self) -> &[&'static str] {
        &self.0
    }
}

impl SignupForm {
    /// Checks every rule and reports all failures together.
    pub fn validate(&self) -> Result<ValidSignup, ValidationErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let usecase = self.usecase.trim();

        let mut errors = Vec::new();
        if name.chars().count() < MIN_NAME_LEN {
            errors.push(NAME_MESSAGE);
        }
        if !is_valid_email(email) {
            errors.push(EMAIL_MESSAGE);
        }
        if usecase.is_empty() {
            errors.push(USECASE_MESSAGE);
        }
        if !self.consent {
            errors.push(CONSENT_MESSAGE);
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }
        Ok(ValidSignup {
            name: name.to_string(),
            email: email.to_string(),
            usecase: usecase.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormPhase {
    Idle,
    Invalid(ValidationErrors),
    Submitting,
    Success,
    Failure,
}

impl FormPhase {
    /// Submit pressed. Ignored while a submission is in flight.
    pub fn on_submit(&self, form: &SignupForm) -> (FormPhase, Option<ValidSignup>) {
        if *self == FormPhase::Submitting {
            return (FormPhase::Submitting, None);
        }
        match form.validate() {
            Ok(valid) => (FormPhase::Submitting, Some(valid)),
            Err(errors) => (FormPhase::Invalid(errors), None),
        }
    }

    /// Outcome of a send, with the form values to show next: cleared after
    /// a success, untouched after a failure so the visitor can retry.
    pub fn on_sent<E>(result: &Result<(), E>, form: SignupForm) -> (FormPhase, SignupForm) {
        match result {
            Ok(()) => (FormPhase::Success, SignupForm::default()),
            Err(_) => (FormPhase::Failure, form),
        }
    }

    pub fn submit_disabled(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    pub fn show_success(&self) -> bool {
        matches!(self, FormPhase::Success)
    }

    /// Lines for the error container; empty hides it.
    pub fn error_messages(&self) -> &[&'static str] {
        match self {
            FormPhase::Invalid(errors) => errors.messages(),
            FormPhase::Failure => &[FAILURE_MESSAGE],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SignupForm {
        SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            usecase: "focus".into(),
            consent: true,
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.b@com"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.de"));
    }

    #[test]
    fn collects_every_error() {
        let form = SignupForm {
            name: " ".into(),
            email: "nope".into(),
            usecase: String::new(),
            consent: false,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.messages().len(), 4);
        assert_eq!(
            errors.messages(),
            &[NAME_MESSAGE, EMAIL_MESSAGE, USECASE_MESSAGE, CONSENT_MESSAGE]
        );
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let form = SignupForm {
            name: "  A  ".into(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err().messages(), &[NAME_MESSAGE]);
    }

    #[test]
    fn valid_form_is_trimmed() {
        let form = SignupForm {
            name: "  Ada ".into(),
            email: " ada@example.com ".into(),
            ..filled()
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.name, "Ada");
        assert_eq!(valid.email, "ada@example.com");
    }

    #[test]
    fn invalid_submit_shows_errors_and_keeps_button() {
        let (phase, payload) = FormPhase::Idle.on_submit(&SignupForm::default());
        assert!(payload.is_none());
        assert!(matches!(phase, FormPhase::Invalid(_)));
        assert_eq!(phase.error_messages().len(), 4);
        assert!(!phase.submit_disabled());

        // fixing the form and resubmitting goes through
        let (phase, payload) = phase.on_submit(&filled());
        assert_eq!(phase, FormPhase::Submitting);
        assert!(payload.is_some());
        assert!(phase.submit_disabled());
    }

    #[test]
    fn double_submit_is_ignored() {
        let (phase, payload) = FormPhase::Submitting.on_submit(&filled());
        assert_eq!(phase, FormPhase::Submitting);
        assert!(payload.is_none());
    }

    #[test]
    fn success_clears_fields_and_shows_only_confirmation() {
        let (phase, form) = FormPhase::on_sent::<()>(&Ok(()), filled());
        assert!(phase.show_success());
        assert!(phase.error_messages().is_empty());
        assert!(!phase.submit_disabled());
        assert_eq!(form, SignupForm::default());
        assert!(form.name.is_empty() && form.email.is_empty() && form.usecase.is_empty());
        assert!(!form.consent);
    }

    #[test]
    fn failure_keeps_values_and_reenables() {
        let (phase, form) = FormPhase::on_sent(&Err("offline"), filled());
        assert_eq!(phase, FormPhase::Failure);
        assert_eq!(phase.error_messages(), &[FAILURE_MESSAGE]);
        assert!(!phase.show_success());
        assert!(!phase.submit_disabled());
        assert_eq!(form, filled());
    }
}
