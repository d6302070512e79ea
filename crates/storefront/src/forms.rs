//! Form validation for the page's contact and newsletter forms.
//!
//! Submission never leaves the page. Required fields must be non-blank and
//! email fields must look like `local@domain.tld`. A rejected form keeps what
//! the visitor typed and marks each offending field; an accepted form is reset.

use thiserror::Error;
use vitrina_core::{Email, EmailError};

use crate::notify::Notice;
use crate::render::{self, RenderError};

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The field {field} is required")]
    Required { field: String },

    #[error("The email format is not valid")]
    InvalidEmail {
        field: String,
        #[source]
        source: EmailError,
    },
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field } | Self::InvalidEmail { field, .. } => field,
        }
    }
}

/// Kind of input a field accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
}

/// One form field and its current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    /// Error marker from the last validation, if the field failed it.
    pub error: Option<String>,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn email(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Email,
            ..Self::text(name, value)
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
}

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Every field passed; the form was reset.
    Accepted,
    /// Submission aborted; offending fields are marked.
    Rejected(Vec<ValidationError>),
}

impl FormOutcome {
    /// The summary notification for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Accepted => Notice::success("Form submitted successfully"),
            Self::Rejected(_) => Notice::error("Please fix the errors in the form"),
        }
    }
}

impl Form {
    #[must_use]
    pub const fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// The field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Check every field without touching the form.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationError> {
        let required = self
            .fields
            .iter()
            .filter(|field| field.required && field.value.trim().is_empty())
            .map(|field| ValidationError::Required {
                field: field.name.clone(),
            });

        let emails = self
            .fields
            .iter()
            .filter(|field| field.kind == FieldKind::Email && !field.value.is_empty())
            .filter_map(|field| {
                Email::parse(&field.value)
                    .err()
                    .map(|source| ValidationError::InvalidEmail {
                        field: field.name.clone(),
                        source,
                    })
            });

        required.chain(emails).collect()
    }

    /// Submit the form: clear previous markers, validate, then either mark the
    /// offending fields or reset every value.
    pub fn submit(&mut self) -> FormOutcome {
        for field in &mut self.fields {
            field.error = None;
        }

        let errors = self.validate();
        if errors.is_empty() {
            for field in &mut self.fields {
                field.value.clear();
            }
            tracing::debug!(fields = self.fields.len(), "Form accepted");
            return FormOutcome::Accepted;
        }

        for error in &errors {
            if let Some(field) = self
                .fields
                .iter_mut()
                .find(|field| field.name == error.field())
                && field.error.is_none()
            {
                field.error = Some(error.to_string());
            }
        }
        tracing::debug!(errors = errors.len(), "Form rejected");
        FormOutcome::Rejected(errors)
    }

    /// Render the inline error shown after each marked field, in field order.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render_errors(&self) -> Result<Vec<(String, String)>, RenderError> {
        self.fields
            .iter()
            .filter_map(|field| field.error.as_deref().map(|message| (field, message)))
            .map(|(field, message)| {
                Ok((
                    field.name.clone(),
                    render::render_field_error(&field.name, message)?,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;

    fn contact_form(name: &str, email: &str, message: &str) -> Form {
        Form::new(vec![
            FormField::text("name", name).required(),
            FormField::email("email", email).required(),
            FormField::text("phone", ""),
            FormField::text("message", message).required(),
        ])
    }

    #[test]
    fn test_valid_form_is_accepted_and_reset() {
        let mut form = contact_form("Ana", "ana@example.com", "Hola");
        let outcome = form.submit();

        assert_eq!(outcome, FormOutcome::Accepted);
        assert_eq!(outcome.notice().kind, ToastKind::Success);
        assert!(form.fields.iter().all(|field| field.value.is_empty()));
        assert!(form.fields.iter().all(|field| field.error.is_none()));
    }

    #[test]
    fn test_required_fields_flagged() {
        let mut form = contact_form("  ", "ana@example.com", "");
        let FormOutcome::Rejected(errors) = form.submit() else {
            panic!("form should be rejected");
        };

        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["name", "message"]);
        assert_eq!(errors[0].to_string(), "The field name is required");

        // Values are retained so the visitor can fix them
        assert_eq!(form.field("email").unwrap().value, "ana@example.com");
        assert!(form.field("name").unwrap().error.is_some());
        assert!(form.field("email").unwrap().error.is_none());
    }

    #[test]
    fn test_invalid_email_flagged() {
        let mut form = contact_form("Ana", "ana@example", "Hola");
        let outcome = form.submit();

        assert!(matches!(
            &outcome,
            FormOutcome::Rejected(errors) if matches!(
                errors.as_slice(),
                [ValidationError::InvalidEmail { field, .. }] if field == "email"
            )
        ));
        assert_eq!(outcome.notice().kind, ToastKind::Error);
        assert_eq!(
            form.field("email").unwrap().error.as_deref(),
            Some("The email format is not valid")
        );
    }

    #[test]
    fn test_optional_empty_email_is_fine() {
        let form = Form::new(vec![FormField::email("newsletter", "")]);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_resubmit_clears_previous_markers() {
        let mut form = contact_form("", "ana@example.com", "Hola");
        form.submit();
        assert!(form.field("name").unwrap().error.is_some());

        form.fields[0].value = "Ana".to_string();
        assert_eq!(form.submit(), FormOutcome::Accepted);
        assert!(form.field("name").unwrap().error.is_none());
    }

    #[test]
    fn test_render_errors() {
        let mut form = contact_form("", "bad", "Hola");
        form.submit();

        let rendered = form.render_errors().unwrap();
        let names: Vec<_> = rendered.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["name", "email"]);
        assert!(rendered[1].1.contains("class=\"error-message\""));
        assert!(rendered[1].1.contains("The email format is not valid"));
    }
}
