use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::nutype_string;

/// Shape check for email addresses: dot separated local part that does not
/// end with an apostrophe, at least one domain label and an alphabetic top
/// level domain.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_'+-]+\.)*[A-Za-z0-9_'+-]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

nutype_string!(ContactName(
    sanitize(trim),
    validate(not_empty, len_char_max = 100)
));

nutype_string!(ContactEmail(
    sanitize(trim),
    validate(len_char_max = 255, regex = CONTACT_EMAIL_REGEX)
));

nutype_string!(ContactMessage(
    sanitize(trim),
    validate(not_empty, len_char_max = 1000)
));

/// A validated message that may be handed to the contact store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

/// The raw text of the contact form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

impl From<ContactSubmission> for ContactFormFields {
    fn from(value: ContactSubmission) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.into_inner(),
            message: value.message.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must contain at most 100 characters")]
    NameTooLong,
    #[error("Invalid email address")]
    EmailInvalid,
    #[error("Email must contain at most 255 characters")]
    EmailTooLong,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must contain at most 1000 characters")]
    MessageTooLong,
}

impl ContactFieldError {
    pub fn field(self) -> ContactField {
        match self {
            Self::NameRequired | Self::NameTooLong => ContactField::Name,
            Self::EmailInvalid | Self::EmailTooLong => ContactField::Email,
            Self::MessageRequired | Self::MessageTooLong => ContactField::Message,
        }
    }
}

impl From<ContactNameError> for ContactFieldError {
    fn from(value: ContactNameError) -> Self {
        match value {
            ContactNameError::NotEmptyViolated => Self::NameRequired,
            ContactNameError::LenCharMaxViolated => Self::NameTooLong,
        }
    }
}

impl From<ContactEmailError> for ContactFieldError {
    fn from(value: ContactEmailError) -> Self {
        match value {
            ContactEmailError::LenCharMaxViolated => Self::EmailTooLong,
            ContactEmailError::RegexViolated => Self::EmailInvalid,
        }
    }
}

impl From<ContactMessageError> for ContactFieldError {
    fn from(value: ContactMessageError) -> Self {
        match value {
            ContactMessageError::NotEmptyViolated => Self::MessageRequired,
            ContactMessageError::LenCharMaxViolated => Self::MessageTooLong,
        }
    }
}

/// Validation errors of the contact form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<ContactField, ContactFieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ContactField) -> Option<ContactFieldError> {
        self.0.get(&field).copied()
    }

    /// Returns the message to display next to `field`, or an empty string if
    /// the field is valid.
    pub fn message(&self, field: ContactField) -> String {
        self.get(field).map(|err| err.to_string()).unwrap_or_default()
    }

    pub fn insert(&mut self, error: ContactFieldError) {
        self.0.insert(error.field(), error);
    }

    /// Removes the error of `field` and returns whether there was one.
    pub fn clear(&mut self, field: ContactField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, ContactFieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl FromIterator<ContactFieldError> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = ContactFieldError>>(iter: T) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Trims and validates all fields of the contact form.
///
/// Every invalid field is reported, not just the first one.
pub fn validate(fields: &ContactFormFields) -> Result<ContactSubmission, FieldErrors> {
    let name = ContactName::try_new(fields.name.clone()).map_err(ContactFieldError::from);
    let email = ContactEmail::try_new(fields.email.clone()).map_err(ContactFieldError::from);
    let message =
        ContactMessage::try_new(fields.message.clone()).map_err(ContactFieldError::from);

    match (name, email, message) {
        (Ok(name), Ok(email), Ok(message)) => Ok(ContactSubmission {
            name,
            email,
            message,
        }),
        (name, email, message) => Err([name.err(), email.err(), message.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> ContactFormFields {
        ContactFormFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn errors(errors: &[ContactFieldError]) -> FieldErrors {
        errors.iter().copied().collect()
    }

    #[test]
    fn valid() {
        let result = validate(&fields("Jane Doe", "jane@example.com", "Hello there")).unwrap();

        assert_eq!(*result.name, "Jane Doe");
        assert_eq!(*result.email, "jane@example.com");
        assert_eq!(*result.message, "Hello there");
    }

    #[test]
    fn trims_whitespace() {
        let result = validate(&fields(" Jane ", "\tjane@example.com\n", "  Hi  ")).unwrap();

        assert_eq!(*result.name, "Jane");
        assert_eq!(*result.email, "jane@example.com");
        assert_eq!(*result.message, "Hi");
    }

    #[test]
    fn idempotent() {
        let first = validate(&fields("  Jane Doe ", "jane@example.com ", " Hello there")).unwrap();
        let second = validate(&first.clone().into()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn single_empty_field() {
        for (input, expected) in [
            (
                fields("   ", "jane@example.com", "Hello"),
                ContactFieldError::NameRequired,
            ),
            (
                fields("Jane", "", "Hello"),
                ContactFieldError::EmailInvalid,
            ),
            (
                fields("Jane", "jane@example.com", "\n\n"),
                ContactFieldError::MessageRequired,
            ),
        ] {
            assert_eq!(validate(&input).unwrap_err(), errors(&[expected]));
        }
    }

    #[test]
    fn reports_all_invalid_fields() {
        let result = validate(&fields("", "notanemail", " ")).unwrap_err();

        assert_eq!(
            result,
            errors(&[
                ContactFieldError::NameRequired,
                ContactFieldError::EmailInvalid,
                ContactFieldError::MessageRequired,
            ])
        );
        assert_eq!(result.message(ContactField::Name), "Name is required");
        assert_eq!(result.message(ContactField::Email), "Invalid email address");
        assert_eq!(result.message(ContactField::Message), "Message is required");
    }

    #[test]
    fn invalid_email_shape() {
        for email in [
            "notanemail",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@@example.com",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane doe@example.com",
            "jane@-example.com",
            "jane@example.c",
            "jane'@example.com",
            "jane.@example.com",
        ] {
            let result = validate(&fields("Jane", email, "Hello"));
            assert_matches!(result, Err(errors) if *errors == self::errors(&[ContactFieldError::EmailInvalid]));
        }
    }

    #[test]
    fn valid_email_shapes() {
        for email in [
            "jane@example.com",
            "jane.doe+portfolio@mail.example.co.uk",
            "o'brien@example.ie",
            "JANE_DOE-1@Example.COM",
            "jane@example-.com",
            "jane@my-.site.org",
            "j@example.com",
        ] {
            validate(&fields("Jane", email, "Hello")).unwrap();
        }
    }

    #[test]
    fn length_limits() {
        let name = "n".repeat(100);
        let local = "e".repeat(243);
        let email = format!("{local}@example.com");
        assert_eq!(email.chars().count(), 255);
        let message = "m".repeat(1000);
        validate(&fields(&name, &email, &message)).unwrap();

        let result = validate(&fields(
            &format!("{name}n"),
            &format!("e{email}"),
            &format!("{message}m"),
        ))
        .unwrap_err();
        assert_eq!(
            result,
            errors(&[
                ContactFieldError::NameTooLong,
                ContactFieldError::EmailTooLong,
                ContactFieldError::MessageTooLong,
            ])
        );
    }

    #[test]
    fn length_counts_characters() {
        let name = "ä".repeat(100);
        validate(&fields(&name, "jane@example.com", "Hello")).unwrap();
    }

    #[test]
    fn length_is_checked_after_trimming() {
        let name = format!("   {}   ", "n".repeat(100));
        validate(&fields(&name, "jane@example.com", "Hello")).unwrap();
    }

    #[test]
    fn clear_field_error() {
        let mut errors = errors(&[
            ContactFieldError::NameRequired,
            ContactFieldError::EmailInvalid,
        ]);

        assert!(errors.clear(ContactField::Name));
        assert!(!errors.clear(ContactField::Name));

        assert_eq!(errors.get(ContactField::Name), None);
        assert_eq!(errors.message(ContactField::Name), "");
        assert_eq!(
            errors.get(ContactField::Email),
            Some(ContactFieldError::EmailInvalid)
        );
    }

    #[test]
    fn display_field_errors() {
        let errors = errors(&[
            ContactFieldError::MessageTooLong,
            ContactFieldError::NameRequired,
        ]);

        assert_eq!(
            errors.to_string(),
            "name: Name is required, message: Message must contain at most 1000 characters"
        );
    }

    #[test]
    fn deserialize_submission_validates() {
        let ok = serde_json::json!({
            "name": " Jane ",
            "email": "jane@example.com",
            "message": "Hello",
        });
        let submission = serde_json::from_value::<ContactSubmission>(ok).unwrap();
        assert_eq!(*submission.name, "Jane");

        let invalid = serde_json::json!({
            "name": "Jane",
            "email": "notanemail",
            "message": "Hello",
        });
        serde_json::from_value::<ContactSubmission>(invalid).unwrap_err();
    }
}
