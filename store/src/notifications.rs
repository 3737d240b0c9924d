use serde::{Deserialize, Serialize};

use palmtrade_common::identity::UserId;
use palmtrade_common::notification::{Notification, NotificationId};

/// Notification feed for all users, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification to the front of the feed.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    /// Mark one notification read. Unknown ids are a no-op.
    pub fn mark_read(&mut self, id: &NotificationId) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == *id) {
            n.read = true;
        }
    }

    /// Mark everything addressed to `user` read.
    pub fn mark_all_read(&mut self, user: &UserId) {
        for n in self.notifications.iter_mut().filter(|n| n.user_id == *user) {
            n.read = true;
        }
    }

    /// Unread notifications addressed to `user`. Recomputed on each call.
    pub fn unread_count(&self, user: &UserId) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.user_id == *user && !n.read)
            .count()
    }

    /// Drop every notification addressed to `user`.
    pub fn clear(&mut self, user: &UserId) {
        self.notifications.retain(|n| n.user_id != *user);
    }

    /// `user`'s feed, newest first.
    pub fn for_user(&self, user: &UserId) -> impl Iterator<Item = &Notification> + '_ {
        let user = user.clone();
        self.notifications.iter().filter(move |n| n.user_id == user)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
