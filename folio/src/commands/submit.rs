use anyhow::bail;
use clap::Args;
use folio_config::Config;
use folio_core_contact_contracts::{ContactFormService, ContactFormSubmitError};
use folio_models::{
    contact::{ContactField, ContactFormFields, ContactSubmission},
    notification::Notification,
};

use crate::environment::Environment;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: String,
    /// Your email address
    #[arg(long)]
    email: String,
    /// The message to send
    #[arg(long)]
    message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let Environment {
            contact_form,
            mut notifications,
        } = Environment::new(&config)?;

        let result = submit(
            &contact_form,
            ContactFormFields {
                name: self.name,
                email: self.email,
                message: self.message,
            },
        )
        .await;

        for notification in notifications.drain() {
            print_notification(&notification);
        }

        result.map(|_| ())
    }
}

/// Fills the contact form with `fields` and submits it once.
pub async fn submit(
    service: &impl ContactFormService,
    fields: ContactFormFields,
) -> anyhow::Result<ContactSubmission> {
    for field in ContactField::ALL {
        service.edit(field, fields.get(field).into());
    }

    match service.submit().await {
        Ok(submission) => Ok(submission),
        Err(ContactFormSubmitError::Invalid(errors)) => {
            for (field, error) in errors.iter() {
                eprintln!("{field}: {error}");
            }
            bail!("The contact form contains {} invalid field(s)", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_notification(notification: &Notification) {
    let Notification {
        title, description, ..
    } = notification;
    if notification.is_destructive() {
        eprintln!("{title}: {description}");
    } else {
        println!("{title}: {description}");
    }
}
