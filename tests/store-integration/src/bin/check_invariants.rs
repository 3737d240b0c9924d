//! Randomized invariant checker for the conversation store.
//!
//! Runs a seeded sequence of random appends and mark-reads against a
//! `MessageStore` while maintaining a naive mirror model, and asserts the
//! store's derived state matches the model: one conversation per pair,
//! last-message consistency, unread bookkeeping, and thread filtering.
//!
//! Usage: `check-invariants [SEED] [OPS]`

use std::collections::BTreeMap;
use std::env;

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use palmtrade_common::conversation::ConversationKey;
use palmtrade_common::identity::UserId;
use palmtrade_common::message::Message;
use palmtrade_store::messages::MessageStore;

#[derive(Default)]
struct PairModel {
    texts: Vec<String>,
    unread: u32,
}

fn main() {
    let mut args = env::args().skip(1);
    let seed: u64 = args
        .next()
        .map(|s| s.parse().expect("SEED must be a u64"))
        .unwrap_or(42);
    let ops: u64 = args
        .next()
        .map(|s| s.parse().expect("OPS must be a u64"))
        .unwrap_or(5_000);

    let users: Vec<UserId> = (1..=8).map(|i| UserId(format!("u{i}"))).collect();
    let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = MessageStore::new();
    let mut model: BTreeMap<ConversationKey, PairModel> = BTreeMap::new();
    let mut next_id = 1u64;

    for step in 0..ops {
        // Pick a distinct ordered pair.
        let a = rng.gen_range(0..users.len());
        let mut b = rng.gen_range(0..users.len() - 1);
        if b >= a {
            b += 1;
        }
        let sender = users[a].clone();
        let receiver = users[b].clone();
        let key = ConversationKey::new(sender.clone(), receiver.clone());

        if rng.gen_bool(0.75) {
            let text = format!("msg {next_id}");
            store.append(Message {
                id: next_id,
                sender_id: sender.clone(),
                receiver_id: receiver.clone(),
                sender_name: sender.0.to_uppercase(),
                receiver_name: receiver.0.to_uppercase(),
                text: text.clone(),
                timestamp: base + Duration::seconds(next_id as i64),
                read: false,
                listing_id: None,
            });
            next_id += 1;

            let entry = model.entry(key.clone()).or_default();
            entry.texts.push(text);
            entry.unread += 1;
        } else {
            // The reader is whichever side we picked as "sender".
            store.mark_read(&key, &sender);
            if let Some(entry) = model.get_mut(&key) {
                entry.unread = 0;
            }
        }

        check_pair(step, &store, &model, &key);
        if step % 1_000 == 0 {
            check_all(step, &store, &model, &users);
        }
    }

    check_all(ops, &store, &model, &users);
    println!(
        "ok: {} operations, {} conversations, {} messages, seed {}",
        ops,
        store.conversation_count(),
        store.message_count(),
        seed
    );
}

/// Check the touched conversation against the model.
fn check_pair(
    step: u64,
    store: &MessageStore,
    model: &BTreeMap<ConversationKey, PairModel>,
    key: &ConversationKey,
) {
    let [a, b] = key.participants();
    match model.get(key) {
        None => assert!(
            store.conversation(a, b).is_none(),
            "step {step}: {key} should not exist yet"
        ),
        Some(entry) => {
            let conv = store
                .conversation(a, b)
                .unwrap_or_else(|| panic!("step {step}: missing conversation {key}"));
            assert_eq!(conv.unread_count, entry.unread, "step {step}: unread for {key}");
            assert_eq!(
                conv.last_message,
                *entry.texts.last().expect("modelled conversations have messages"),
                "step {step}: last message for {key}"
            );
            let texts: Vec<String> = store.messages_in(key).map(|m| m.text.clone()).collect();
            assert_eq!(texts, entry.texts, "step {step}: thread for {key}");
        }
    }
}

/// Check every conversation and per-user unread totals.
fn check_all(
    step: u64,
    store: &MessageStore,
    model: &BTreeMap<ConversationKey, PairModel>,
    users: &[UserId],
) {
    assert_eq!(
        store.conversation_count(),
        model.len(),
        "step {step}: conversation count"
    );
    for key in model.keys() {
        check_pair(step, store, model, key);
    }
    for user in users {
        let expected: u32 = model
            .iter()
            .filter(|(key, _)| key.involves(user))
            .map(|(_, entry)| entry.unread)
            .sum();
        assert_eq!(
            store.unread_total(user),
            expected,
            "step {step}: unread total for {user}"
        );
    }
}
