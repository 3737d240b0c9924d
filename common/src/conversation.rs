use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::listing::ListingId;
use crate::message::Message;

/// Identity of the unordered pair of users a conversation belongs to.
///
/// The two ids are stored sorted, so `new(a, b)` and `new(b, a)` compare
/// equal. Keying on the pair itself (rather than a joined string) means
/// ids containing a separator character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    first: UserId,
    second: UserId,
}

impl ConversationKey {
    /// Key for the pair `(a, b)`, independent of argument order.
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The key a message belongs to, derived from its own sender/receiver
    /// pair. This is the one derivation rule used everywhere messages are
    /// grouped or filtered by conversation.
    pub fn of_message(message: &Message) -> Self {
        Self::new(message.sender_id.clone(), message.receiver_id.clone())
    }

    /// The two participants, in sorted order.
    pub fn participants(&self) -> [&UserId; 2] {
        [&self.first, &self.second]
    }

    /// Whether `user` is one of the two participants.
    pub fn involves(&self, user: &UserId) -> bool {
        self.first == *user || self.second == *user
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted-join rendering, e.g. "u1-u2".
        write!(f, "{}-{}", self.first.0, self.second.0)
    }
}

/// The aggregate record of all messages exchanged between two users.
///
/// `last_message`, `last_message_time` and `unread_count` are denormalized
/// mirrors maintained by the message store on every append; they must stay
/// consistent with the tail of the message log for this key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub key: ConversationKey,
    /// Display name per participant, refreshed from every message
    /// (last writer wins).
    pub participant_names: BTreeMap<UserId, String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
    /// Listing carried from the first message that established the thread.
    pub listing_id: Option<ListingId>,
}
