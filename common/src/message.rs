use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::UserId;
use crate::listing::ListingId;

/// Unique identifier for a message. Callers allocate these in creation
/// order; the store trusts insertion order for chronology.
pub type MessageId = u64;

/// Maximum message body length in characters, enforced at the call site.
pub const MAX_TEXT_LEN: usize = 500;

/// Why a message body failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("message text is empty after trimming")]
    Empty,
    #[error("message text exceeds {MAX_TEXT_LEN} characters")]
    TooLong,
}

/// Validate a message body before constructing a `Message`.
/// Returns the trimmed text on success.
pub fn validate_text(text: &str) -> Result<&str, MessageError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MessageError::Empty);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(MessageError::TooLong);
    }
    Ok(trimmed)
}

/// A direct message between two marketplace users.
///
/// Messages are append-only: once stored, only the `read` flag ever
/// changes, and nothing deletes them. Display names are captured at send
/// time and never looked up live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub sender_name: String,
    pub receiver_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    /// Listing this thread is about, if any.
    pub listing_id: Option<ListingId>,
}
