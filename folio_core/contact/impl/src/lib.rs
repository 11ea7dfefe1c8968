use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use folio_core_contact_contracts::{ContactFormService, ContactFormSubmitError};
use folio_models::{
    contact::{ContactField, ContactSubmission},
    form::{BeginSubmitError, ContactForm, SubmissionRound},
    notification::Notification,
};
use folio_notify_contracts::NotificationService;
use folio_persistence_contracts::{ContactRepoCreateError, ContactRepository};
use folio_utils::trace_instrument;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

pub const MESSAGE_SENT_TITLE: &str = "Message sent!";
pub const MESSAGE_SENT_DESCRIPTION: &str = "Thanks for reaching out. I'll get back to you soon!";
pub const SEND_FAILED_TITLE: &str = "Error sending message";
pub const SEND_FAILED_FALLBACK: &str = "Please try again later.";

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<ContactRepo, Notify> {
    contact_repo: ContactRepo,
    notify: Notify,
    config: ContactFeatureConfig,
    form: Arc<watch::Sender<ContactForm>>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// How long the form stays in the success state before it becomes idle
    /// again.
    pub success_display_duration: Duration,
}

impl Default for ContactFeatureConfig {
    fn default() -> Self {
        Self {
            success_display_duration: Duration::from_secs(3),
        }
    }
}

impl<ContactRepo, Notify> ContactFormServiceImpl<ContactRepo, Notify> {
    pub fn new(contact_repo: ContactRepo, notify: Notify, config: ContactFeatureConfig) -> Self {
        let (form, _) = watch::channel(ContactForm::new());
        Self {
            contact_repo,
            notify,
            config,
            form: form.into(),
        }
    }
}

impl<ContactRepo, Notify> ContactFormService for ContactFormServiceImpl<ContactRepo, Notify>
where
    ContactRepo: ContactRepository,
    Notify: NotificationService,
{
    fn form(&self) -> ContactForm {
        self.form.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactForm> {
        self.form.subscribe()
    }

    #[trace_instrument(skip(self))]
    fn edit(&self, field: ContactField, value: String) {
        self.form.send_modify(|form| form.edit(field, value));
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<ContactSubmission, ContactFormSubmitError> {
        let mut begun = Err(BeginSubmitError::InProgress);
        self.form.send_if_modified(|form| {
            begun = form.begin_submit();
            !matches!(begun, Err(BeginSubmitError::InProgress))
        });

        let (round, submission) = begun.map_err(|err| match err {
            BeginSubmitError::InProgress => {
                debug!("rejecting submit while another one is in flight");
                ContactFormSubmitError::InProgress
            }
            BeginSubmitError::Invalid(errors) => {
                debug!(%errors, "contact form is invalid");
                ContactFormSubmitError::Invalid(errors)
            }
        })?;

        let _guard = InFlightGuard {
            form: &self.form,
            round,
        };

        let result = AssertUnwindSafe(async { self.contact_repo.create(&submission).await })
            .catch_unwind()
            .await;

        let description = match result {
            Ok(Ok(())) => {
                info!("contact message stored");
                self.form.send_modify(|form| {
                    form.finish_success(round);
                });
                self.notify.notify(Notification::new(
                    MESSAGE_SENT_TITLE,
                    MESSAGE_SENT_DESCRIPTION,
                ));
                self.schedule_success_expiry(round);
                return Ok(submission);
            }
            Ok(Err(ContactRepoCreateError::Rejected(message))) if !message.trim().is_empty() => {
                warn!(%message, "contact store rejected message");
                message
            }
            Ok(Err(ContactRepoCreateError::Rejected(_))) => {
                warn!("contact store rejected message without a reason");
                SEND_FAILED_FALLBACK.into()
            }
            Ok(Err(ContactRepoCreateError::Other(err))) => {
                error!("failed to store contact message: {err:#}");
                SEND_FAILED_FALLBACK.into()
            }
            Err(_) => {
                error!("contact store panicked while storing message");
                SEND_FAILED_FALLBACK.into()
            }
        };

        self.form.send_modify(|form| {
            form.finish_failure(round);
        });
        self.notify
            .notify(Notification::destructive(SEND_FAILED_TITLE, description.clone()));

        Err(ContactFormSubmitError::Send(description))
    }
}

impl<ContactRepo, Notify> ContactFormServiceImpl<ContactRepo, Notify> {
    fn schedule_success_expiry(&self, round: SubmissionRound) {
        let form = Arc::clone(&self.form);
        let duration = self.config.success_display_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if form.send_if_modified(|form| form.expire_success(round)) {
                debug!("contact form idle again");
            }
        });
    }
}

/// Returns the form to idle if the submit future is dropped before the store
/// answered.
struct InFlightGuard<'a> {
    form: &'a watch::Sender<ContactForm>,
    round: SubmissionRound,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self
            .form
            .send_if_modified(|form| form.finish_failure(self.round))
        {
            warn!("contact submission abandoned before the store answered");
        }
    }
}
