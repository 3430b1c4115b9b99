use serde::Serialize;
use thiserror::Error;

use crate::types::ApplicationForm;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 20;

/// Trimmed form values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_filename: Option<String>,
}

/// A rejected field and the message surfaced to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failure carrying per-field messages.
///
/// Raised before any I/O happens; a rejected form never reaches the
/// recruiting backend.
#[derive(Debug, Clone, Error)]
#[error("application form rejected ({} invalid field(s))", fields.len())]
pub struct InvalidApplication {
    pub fields: Vec<FieldError>,
}

/// Validates a raw application form, trimming whitespace from every field.
pub fn validate_application(
    form: &ApplicationForm,
) -> Result<ValidApplication, InvalidApplication> {
    let mut fields = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        fields.push(FieldError {
            field: "name",
            message: "Name is required".to_string(),
        });
    } else if name.chars().count() > MAX_NAME_LEN {
        fields.push(FieldError {
            field: "name",
            message: format!("Name must be at most {MAX_NAME_LEN} characters"),
        });
    }

    let email = form.email.trim();
    if email.is_empty() {
        fields.push(FieldError {
            field: "email",
            message: "Email is required".to_string(),
        });
    } else if email.chars().count() > MAX_EMAIL_LEN {
        fields.push(FieldError {
            field: "email",
            message: format!("Email must be at most {MAX_EMAIL_LEN} characters"),
        });
    } else if !is_well_formed_email(email) {
        fields.push(FieldError {
            field: "email",
            message: "Please enter a valid email".to_string(),
        });
    }

    let phone = form
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(value) = phone {
        if value.chars().count() > MAX_PHONE_LEN {
            fields.push(FieldError {
                field: "phone",
                message: format!("Phone must be at most {MAX_PHONE_LEN} characters"),
            });
        }
    }

    if !fields.is_empty() {
        return Err(InvalidApplication { fields });
    }

    Ok(ValidApplication {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        resume_filename: form
            .resume_filename
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    })
}

/// Structural email check: one `@`, non-empty local part, dot-separated
/// domain with non-empty labels, no whitespace.
fn is_well_formed_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
