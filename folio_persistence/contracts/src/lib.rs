use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository: Send + Sync + 'static {
    /// Stores a new contact message.
    fn create(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactRepoCreateError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactRepoCreateError {
    /// The store refused the message and explained why.
    #[error("The contact store rejected the message: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactRepository {
    pub fn with_create(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactRepoCreateError>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
