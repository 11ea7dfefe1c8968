use folio_core_contact_contracts::{ContactFormService, ContactFormSubmitError};
use folio_demo::{INVALID_FIELDS, JANE, JANE_FIELDS};
use folio_models::{
    contact::{ContactField, ContactFieldError},
    form::FormUiState,
};
use folio_notify_contracts::MockNotificationService;
use folio_persistence_contracts::{ContactRepoCreateError, MockContactRepository};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;

use crate::tests::{fill, make_sut, send_failed};

#[tokio::test]
async fn updates_field() {
    // Arrange
    let sut = make_sut(MockContactRepository::new(), MockNotificationService::new());

    // Act
    sut.edit(ContactField::Email, "jane@".into());
    sut.edit(ContactField::Email, "jane@example.com".into());

    // Assert
    let form = sut.form();
    assert_eq!(form.fields.email, "jane@example.com");
    assert_eq!(form.fields.name, "");
    assert_eq!(form.state, FormUiState::Idle);
}

#[tokio::test]
async fn clears_only_edited_error() {
    // Arrange
    let sut = make_sut(MockContactRepository::new(), MockNotificationService::new());
    fill(&sut, &INVALID_FIELDS);
    let result = sut.submit().await;
    assert_matches!(result, Err(ContactFormSubmitError::Invalid(errors)) if errors.len() == 3);

    // Act
    sut.edit(ContactField::Email, "still not an email".into());

    // Assert
    let form = sut.form();
    assert_eq!(form.errors.get(ContactField::Email), None);
    assert_eq!(
        form.errors.get(ContactField::Name),
        Some(ContactFieldError::NameRequired)
    );
    assert_eq!(
        form.errors.get(ContactField::Message),
        Some(ContactFieldError::MessageRequired)
    );
}

#[tokio::test]
async fn after_failure() {
    // Arrange
    let contact_repo = MockContactRepository::new().with_create(
        JANE.clone(),
        Err(ContactRepoCreateError::Rejected("Offline".into())),
    );
    let notify = MockNotificationService::new().with_notify(send_failed("Offline"));
    let sut = make_sut(contact_repo, notify);
    fill(&sut, &JANE_FIELDS);
    sut.submit().await.unwrap_err();
    assert_eq!(sut.form().state, FormUiState::Idle);

    // Act
    sut.edit(ContactField::Message, "Hello again".into());

    // Assert
    let form = sut.form();
    assert_eq!(form.state, FormUiState::Idle);
    assert_eq!(form.fields.name, JANE_FIELDS.name);
    assert_eq!(form.fields.message, "Hello again");
}

#[tokio::test]
async fn notifies_subscribers() {
    // Arrange
    let sut = make_sut(MockContactRepository::new(), MockNotificationService::new());
    let mut rx = sut.subscribe();
    assert!(!rx.has_changed().unwrap());

    // Act
    sut.edit(ContactField::Name, "Jane".into());

    // Assert
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().fields.name, "Jane");
}
