use folio_core_contact_contracts::ContactFormService;
use folio_models::{
    contact::{ContactField, ContactFormFields},
    notification::Notification,
};
use folio_notify_contracts::MockNotificationService;
use folio_persistence_contracts::MockContactRepository;

use crate::{
    ContactFeatureConfig, ContactFormServiceImpl, MESSAGE_SENT_DESCRIPTION, MESSAGE_SENT_TITLE,
    SEND_FAILED_TITLE,
};

mod edit;

type Sut = ContactFormServiceImpl<MockContactRepository, MockNotificationService>;

fn make_sut(contact_repo: MockContactRepository, notify: MockNotificationService) -> Sut {
    ContactFormServiceImpl::new(contact_repo, notify, ContactFeatureConfig::default())
}

fn fill(sut: &Sut, fields: &ContactFormFields) {
    for field in ContactField::ALL {
        sut.edit(field, fields.get(field).into());
    }
}

fn message_sent() -> Notification {
    Notification::new(MESSAGE_SENT_TITLE, MESSAGE_SENT_DESCRIPTION)
}

fn send_failed(description: &str) -> Notification {
    Notification::destructive(SEND_FAILED_TITLE, description)
}
