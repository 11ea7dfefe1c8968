use folio_models::notification::Notification;
use folio_notify_contracts::NotificationService;
use folio_utils::trace_instrument;
use tokio::sync::mpsc;
use tracing::debug;

/// Hands notifications to the rendering layer through an unbounded channel.
#[derive(Debug, Clone)]
pub struct NotificationServiceImpl {
    sender: mpsc::UnboundedSender<Notification>,
}

/// Receiving half of [`NotificationServiceImpl`], owned by whatever displays
/// the notifications.
#[derive(Debug)]
pub struct NotificationFeed {
    receiver: mpsc::UnboundedReceiver<Notification>,
}

impl NotificationServiceImpl {
    pub fn new() -> (Self, NotificationFeed) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, NotificationFeed { receiver })
    }
}

impl NotificationService for NotificationServiceImpl {
    #[trace_instrument(skip(self))]
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            debug!("notification feed closed, dropping notification");
        }
    }
}

impl NotificationFeed {
    /// Waits for the next notification. Returns `None` once every
    /// [`NotificationServiceImpl`] is gone and the feed is drained.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.receiver.recv().await
    }

    /// Returns all notifications that are currently queued.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::iter::from_fn(|| self.receiver.try_recv().ok()).collect()
    }
}
