use std::future::Future;

use folio_models::{
    contact::{ContactField, ContactSubmission, FieldErrors},
    form::ContactForm,
};
use thiserror::Error;
use tokio::sync::watch;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns a snapshot of the contact form.
    fn form(&self) -> ContactForm;

    /// Returns a receiver that observes every change of the contact form.
    fn subscribe(&self) -> watch::Receiver<ContactForm>;

    /// Replaces the value of a single field and clears its validation error.
    fn edit(&self, field: ContactField, value: String);

    /// Validates the current fields and sends them to the contact store.
    ///
    /// Returns the stored submission. Validation errors are recorded on the
    /// form, store failures are shown to the visitor as a notification and
    /// never retried.
    fn submit(
        &self,
    ) -> impl Future<Output = Result<ContactSubmission, ContactFormSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("The contact form contains invalid fields: {0}")]
    Invalid(FieldErrors),
    #[error("A submission is already in progress.")]
    InProgress,
    #[error("Failed to send message: {0}")]
    Send(String),
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_edit(mut self, field: ContactField, value: String) -> Self {
        self.expect_edit()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_submit(
        mut self,
        result: Result<ContactSubmission, ContactFormSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
