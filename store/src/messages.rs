use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use palmtrade_common::conversation::{Conversation, ConversationKey};
use palmtrade_common::identity::UserId;
use palmtrade_common::message::Message;

/// The conversation store: an append-only message log plus a derived
/// per-pair conversation index.
///
/// Invariants maintained across every mutation:
/// - all messages between a pair map to exactly one conversation
/// - a conversation's `last_message`/`last_message_time` mirror the most
///   recently appended message for its pair (insertion order is trusted
///   as chronological)
/// - `unread_count` never goes negative
/// - a message's conversation membership is recomputed from its own
///   sender/receiver pair on read, never stored on the message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageStore {
    messages: Vec<Message>,
    // Keyed by a struct, so JSON needs a sequence form: serialize the
    // records and rebuild the index from each record's own key.
    #[serde(
        serialize_with = "conversations_as_seq",
        deserialize_with = "conversations_from_seq"
    )]
    conversations: BTreeMap<ConversationKey, Conversation>,
}

fn conversations_as_seq<S: serde::Serializer>(
    map: &BTreeMap<ConversationKey, Conversation>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(map.values())
}

fn conversations_from_seq<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<ConversationKey, Conversation>, D::Error> {
    let records: Vec<Conversation> = serde::Deserialize::deserialize(deserializer)?;
    Ok(records.into_iter().map(|c| (c.key.clone(), c)).collect())
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and fold it into the conversation index.
    ///
    /// The caller has already validated the body (see
    /// [`palmtrade_common::message::validate_text`]) and guarantees
    /// `sender_id != receiver_id`. After this call exactly one
    /// conversation exists for the pair, and it reflects this message as
    /// the latest.
    pub fn append(&mut self, message: Message) {
        let key = ConversationKey::of_message(&message);

        match self.conversations.get_mut(&key) {
            Some(conv) => {
                conv.last_message = message.text.clone();
                conv.last_message_time = message.timestamp;
                conv.unread_count += 1;
                conv.participant_names
                    .insert(message.sender_id.clone(), message.sender_name.clone());
                conv.participant_names
                    .insert(message.receiver_id.clone(), message.receiver_name.clone());
            }
            None => {
                let mut participant_names = BTreeMap::new();
                participant_names.insert(message.sender_id.clone(), message.sender_name.clone());
                participant_names.insert(message.receiver_id.clone(), message.receiver_name.clone());

                self.conversations.insert(
                    key.clone(),
                    Conversation {
                        key,
                        participant_names,
                        last_message: message.text.clone(),
                        last_message_time: message.timestamp,
                        unread_count: 1,
                        listing_id: message.listing_id.clone(),
                    },
                );
            }
        }

        self.messages.push(message);
    }

    /// The conversation between `a` and `b`, or `None` if the pair has
    /// never exchanged a message. Argument order does not matter.
    pub fn conversation(&self, a: &UserId, b: &UserId) -> Option<&Conversation> {
        self.conversations
            .get(&ConversationKey::new(a.clone(), b.clone()))
    }

    /// All conversations `user` participates in.
    pub fn conversations_with(&self, user: &UserId) -> impl Iterator<Item = &Conversation> + '_ {
        let user = user.clone();
        self.conversations
            .values()
            .filter(move |conv| conv.key.involves(&user))
    }

    /// All messages in the conversation `key`, in insertion order.
    ///
    /// A pure filter over the stored log: finite, restartable, no hidden
    /// cursor state.
    pub fn messages_in(&self, key: &ConversationKey) -> impl Iterator<Item = &Message> + '_ {
        let key = key.clone();
        self.messages
            .iter()
            .filter(move |msg| ConversationKey::of_message(msg) == key)
    }

    /// Mark the conversation read from `reader`'s side. Idempotent.
    ///
    /// Zeroes the conversation's unread counter and flags every message
    /// addressed to `reader` as read. The counter reset does not depend on
    /// `reader`; with two participants only the counterpart accumulates
    /// unread messages at a time.
    pub fn mark_read(&mut self, key: &ConversationKey, reader: &UserId) {
        if let Some(conv) = self.conversations.get_mut(key) {
            conv.unread_count = 0;
        }
        for msg in &mut self.messages {
            if msg.receiver_id == *reader && ConversationKey::of_message(msg) == *key {
                msg.read = true;
            }
        }
    }

    /// Total unread messages across every conversation involving `user`.
    /// Recomputed on each call; nothing is cached.
    pub fn unread_total(&self, user: &UserId) -> u32 {
        self.conversations
            .values()
            .filter(|conv| conv.key.involves(user))
            .map(|conv| conv.unread_count)
            .sum()
    }

    /// Number of messages ever appended.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of distinct conversations.
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }
}
