use folio_models::notification::Notification;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Shows a transient notification to the visitor. Fire and forget.
    fn notify(&self, notification: Notification);
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify(mut self, notification: Notification) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(notification))
            .return_const(());
        self
    }
}
