//! In-process fan-out of notifications to live subscribers.
//!
//! Each user with at least one open subscription owns a broadcast channel in
//! the hub. Emitting for a user without a channel drops the event; persisted
//! notifications remain readable through the notification queries.
//!
//! ```text
//! subscribe(u)            last Subscription for u dropped
//!   {no channel} ─────────────> {channel, 1..n receivers} ─────────────> {no channel}
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::ports::NotificationPublisher;
use super::{Notification, UserId};

/// Default per-user channel capacity.
pub const DEFAULT_NOTIFICATION_BUFFER: usize = 256;

type Channels = HashMap<UserId, broadcast::Sender<Notification>>;

/// Registry routing notifications to the subscribers of their target user.
///
/// Cloning is cheap and shares the registry.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use pmeet::domain::{Notification, NotificationHub, NotificationId, NotificationType, UserId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let hub = NotificationHub::new(8);
/// let user = UserId::random();
/// let mut subscription = hub.subscribe(user);
///
/// let note = Notification::new(
///     NotificationId::random(), NotificationType::TryoutAccepted, user, None, Utc::now(),
/// );
/// assert_eq!(hub.emit(&note), 1);
/// assert_eq!(subscription.recv().await, Some(note));
/// # });
/// ```
#[derive(Clone)]
pub struct NotificationHub {
    channels: Arc<Mutex<Channels>>,
    capacity: usize,
}

impl NotificationHub {
    /// Create an empty hub whose channels buffer up to `capacity` events per
    /// user. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Attach a subscriber for `user_id`, reusing the user's channel when one
    /// is open. The subscription sees events emitted after this call.
    pub fn subscribe(&self, user_id: UserId) -> Subscription {
        let mut channels = lock(&self.channels);
        let receiver = channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        debug!(%user_id, "notification subscriber attached");
        Subscription {
            user_id,
            receiver: Some(receiver),
            channels: Arc::clone(&self.channels),
        }
    }

    /// Deliver `notification` to every subscriber of its target user.
    ///
    /// Returns how many subscribers received it; zero when nobody listens.
    /// Never blocks: slow subscribers lose the oldest buffered events.
    pub fn emit(&self, notification: &Notification) -> usize {
        let target = *notification.target_user_id();
        let mut channels = lock(&self.channels);
        let Some(sender) = channels.get(&target) else {
            debug!(user_id = %target, "no live subscriber; notification not pushed");
            return 0;
        };
        match sender.send(notification.clone()) {
            Ok(delivered) => delivered,
            Err(_) => {
                channels.remove(&target);
                0
            }
        }
    }

    /// Whether `user_id` currently has a channel.
    pub fn is_subscribed(&self, user_id: &UserId) -> bool {
        lock(&self.channels).contains_key(user_id)
    }

    /// Number of users with an open channel.
    pub fn channel_count(&self) -> usize {
        lock(&self.channels).len()
    }

    /// Close every channel. Open subscriptions drain their buffered events
    /// and then end.
    pub fn shutdown(&self) {
        let closed = std::mem::take(&mut *lock(&self.channels));
        debug!(channels = closed.len(), "notification hub shut down");
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_BUFFER)
    }
}

impl NotificationPublisher for NotificationHub {
    fn publish(&self, notification: &Notification) {
        self.emit(notification);
    }
}

fn lock(channels: &Mutex<Channels>) -> MutexGuard<'_, Channels> {
    channels.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One subscriber's view of a user's notification channel.
///
/// Dropping the last subscription of a user removes the user's channel.
pub struct Subscription {
    user_id: UserId,
    receiver: Option<broadcast::Receiver<Notification>>,
    channels: Arc<Mutex<Channels>>,
}

impl Subscription {
    /// Wait for the next notification. Skips events lost to overflow and
    /// returns `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<Notification> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(notification) => return Some(notification),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(user_id = %self.user_id, skipped, "notification subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// User whose notifications this subscription receives.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut channels = lock(&self.channels);
        // Release our receiver under the lock so the count below is exact.
        drop(self.receiver.take());
        let idle = channels
            .get(&self.user_id)
            .is_some_and(|sender| sender.receiver_count() == 0);
        if idle {
            channels.remove(&self.user_id);
            debug!(user_id = %self.user_id, "notification channel evicted");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Fan-out isolation, cleanup and overflow behaviour.

    use std::time::Duration;

    use chrono::Utc;
    use rstest::rstest;
    use tokio::time::timeout;

    use super::*;
    use crate::domain::{NotificationId, NotificationType};

    fn note_for(user: UserId) -> Notification {
        Notification::new(
            NotificationId::random(),
            NotificationType::CommentAdded,
            user,
            None,
            Utc::now(),
        )
    }

    async fn nothing_pending(subscription: &mut Subscription) -> bool {
        timeout(Duration::from_millis(50), subscription.recv())
            .await
            .is_err()
    }

    #[rstest]
    #[tokio::test]
    async fn emit_without_subscriber_is_a_no_op() {
        let hub = NotificationHub::new(4);
        assert_eq!(hub.emit(&note_for(UserId::random())), 0);
        assert_eq!(hub.channel_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn events_for_one_user_never_reach_another() {
        let hub = NotificationHub::new(4);
        let alice = UserId::random();
        let bob = UserId::random();
        let mut bob_sub = hub.subscribe(bob);
        let _alice_sub = hub.subscribe(alice);

        hub.emit(&note_for(alice));

        assert!(nothing_pending(&mut bob_sub).await);
    }

    #[rstest]
    #[tokio::test]
    async fn simultaneous_subscribers_share_one_channel() {
        let hub = NotificationHub::new(4);
        let user = UserId::random();
        let mut first = hub.subscribe(user);
        let mut second = hub.subscribe(user);
        assert_eq!(hub.channel_count(), 1);

        let note = note_for(user);
        assert_eq!(hub.emit(&note), 2);
        assert_eq!(first.recv().await, Some(note.clone()));
        assert_eq!(second.recv().await, Some(note));
    }

    #[rstest]
    #[tokio::test]
    async fn last_disconnect_evicts_and_resubscribe_starts_empty() {
        let hub = NotificationHub::new(4);
        let user = UserId::random();
        let first = hub.subscribe(user);
        let second = hub.subscribe(user);

        drop(first);
        assert!(hub.is_subscribed(&user));
        drop(second);
        assert!(!hub.is_subscribed(&user));

        assert_eq!(hub.emit(&note_for(user)), 0);

        let mut fresh = hub.subscribe(user);
        assert!(nothing_pending(&mut fresh).await);
    }

    #[rstest]
    #[tokio::test]
    async fn lagging_subscriber_skips_to_retained_events() {
        let hub = NotificationHub::new(2);
        let user = UserId::random();
        let mut subscription = hub.subscribe(user);
        let notes: Vec<Notification> = (0..4).map(|_| note_for(user)).collect();
        for note in &notes {
            hub.emit(note);
        }

        assert_eq!(subscription.recv().await.as_ref(), notes.get(2));
        assert_eq!(subscription.recv().await.as_ref(), notes.get(3));
    }

    #[rstest]
    #[tokio::test]
    async fn shutdown_drains_then_closes_subscriptions() {
        let hub = NotificationHub::new(4);
        let user = UserId::random();
        let mut subscription = hub.subscribe(user);
        let note = note_for(user);
        hub.emit(&note);

        hub.shutdown();

        assert_eq!(hub.channel_count(), 0);
        assert_eq!(subscription.recv().await, Some(note));
        assert_eq!(subscription.recv().await, None);
    }

    #[rstest]
    fn publisher_port_forwards_to_emit() {
        let hub = NotificationHub::default();
        let user = UserId::random();
        let subscription = hub.subscribe(user);
        NotificationPublisher::publish(&hub, &note_for(user));
        drop(subscription);
        assert_eq!(hub.channel_count(), 0);
    }
}
