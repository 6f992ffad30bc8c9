//! Validation rules for staff-entered drafts
//!
//! Drafts are rejected here before any network call; violations carry the
//! offending field so the dashboard can surface them inline.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_APPOINTMENT_DURATION_MINUTES, MIN_APPOINTMENT_DURATION_MINUTES, MIN_CUSTOMER_NAME_LEN,
    MIN_PHONE_DIGITS,
};
use crate::errors::{FrontdeskError, Result};
use crate::types::{AppointmentDraft, CallDraft};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // Permissive shape check; deliverability is the auth/store side's problem.
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collection of field-level violations for one draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Convert into a `Result`, erroring when any violation was collected.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FrontdeskError::Validation(self))
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Shape check for an email address.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// Count of decimal digits in a phone string (separators are tolerated).
fn phone_digits(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}

/// Validate a new-appointment draft.
pub fn validate_appointment_draft(draft: &AppointmentDraft) -> Result<()> {
    let mut errors = ValidationErrors::default();

    if draft.customer_name.trim().len() < MIN_CUSTOMER_NAME_LEN {
        errors.push(
            "customer_name",
            format!("must be at least {MIN_CUSTOMER_NAME_LEN} characters"),
        );
    }

    if phone_digits(&draft.customer_phone) < MIN_PHONE_DIGITS {
        errors.push("customer_phone", format!("must contain at least {MIN_PHONE_DIGITS} digits"));
    }

    if let Some(email) = draft.customer_email.as_deref() {
        if !is_valid_email(email) {
            errors.push("customer_email", "invalid email address");
        }
    }

    if draft.duration_minutes < MIN_APPOINTMENT_DURATION_MINUTES {
        errors.push(
            "duration_minutes",
            format!("must be at least {MIN_APPOINTMENT_DURATION_MINUTES} minutes"),
        );
    } else if draft.duration_minutes > MAX_APPOINTMENT_DURATION_MINUTES {
        errors.push(
            "duration_minutes",
            format!("must be at most {MAX_APPOINTMENT_DURATION_MINUTES} minutes"),
        );
    }

    errors.into_result()
}

/// Validate a call-log draft.
pub fn validate_call_draft(draft: &CallDraft) -> Result<()> {
    let mut errors = ValidationErrors::default();

    if draft.caller_name.trim().is_empty() {
        errors.push("caller_name", "must not be empty");
    }

    if phone_digits(&draft.caller_phone) < MIN_PHONE_DIGITS {
        errors.push("caller_phone", format!("must contain at least {MIN_PHONE_DIGITS} digits"));
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::CallDirection;

    fn valid_draft() -> AppointmentDraft {
        AppointmentDraft {
            customer_name: "John Doe".to_string(),
            customer_phone: "1234567890".to_string(),
            customer_email: Some("john@example.com".to_string()),
            scheduled_at: Utc::now(),
            duration_minutes: 30,
            service_type: Some("consultation".to_string()),
            notes: Some("Follow-up appointment".to_string()),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_appointment_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn short_duration_cites_the_minimum() {
        let draft = AppointmentDraft { duration_minutes: 10, ..valid_draft() };
        let err = validate_appointment_draft(&draft).unwrap_err();
        match err {
            FrontdeskError::Validation(errors) => {
                let field = &errors.errors()[0];
                assert_eq!(field.field, "duration_minutes");
                assert!(field.message.contains("15"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let draft = AppointmentDraft {
            customer_email: Some("not-an-email".to_string()),
            ..valid_draft()
        };
        let err = validate_appointment_draft(&draft).unwrap_err();
        assert!(err.to_string().contains("customer_email"));
        assert!(err.to_string().contains("invalid email"));
    }

    #[test]
    fn missing_email_is_allowed() {
        let draft = AppointmentDraft { customer_email: None, ..valid_draft() };
        assert!(validate_appointment_draft(&draft).is_ok());
    }

    #[test]
    fn short_name_and_phone_collect_both_violations() {
        let draft = AppointmentDraft {
            customer_name: "J".to_string(),
            customer_phone: "555".to_string(),
            ..valid_draft()
        };
        match validate_appointment_draft(&draft).unwrap_err() {
            FrontdeskError::Validation(errors) => assert_eq!(errors.errors().len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn phone_separators_are_tolerated() {
        let draft = AppointmentDraft {
            customer_phone: "+1 (415) 555-0138".to_string(),
            ..valid_draft()
        };
        assert!(validate_appointment_draft(&draft).is_ok());
    }

    #[test]
    fn call_draft_requires_name_and_phone() {
        let draft = CallDraft {
            caller_name: "  ".to_string(),
            caller_phone: "12".to_string(),
            direction: CallDirection::Inbound,
            notes: None,
        };
        match validate_call_draft(&draft).unwrap_err() {
            FrontdeskError::Validation(errors) => assert_eq!(errors.errors().len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
