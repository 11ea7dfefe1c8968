use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFormServiceImpl};
use folio_notify_impl::{NotificationFeed, NotificationServiceImpl};
use folio_persistence_postgrest::{PostgrestContactRepository, PostgrestContactRepositoryConfig};

pub type ContactForm = ContactFormServiceImpl<PostgrestContactRepository, NotificationServiceImpl>;

/// Everything needed to drive the contact form outside of a browser.
pub struct Environment {
    pub contact_form: ContactForm,
    pub notifications: NotificationFeed,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let contact_repo = PostgrestContactRepository::new(PostgrestContactRepositoryConfig::new(
            &config.store.url,
            &config.store.table,
            config.store.api_key.clone(),
        )?)?;

        let (notify, notifications) = NotificationServiceImpl::new();

        let contact_form = ContactFormServiceImpl::new(
            contact_repo,
            notify,
            ContactFeatureConfig {
                success_display_duration: config.contact.success_display_duration.into(),
            },
        );

        Ok(Self {
            contact_form,
            notifications,
        })
    }
}
