//! Test factory for creating Serenity Message objects.
//!
//! Messages are keyed by their creation time during a backup, and that time is derived
//! from the message snowflake. Use [`snowflake`] to generate IDs with a known ordering.

use serde_json::Value;
use serenity::all::Message;

use super::user::user_json;

/// Builds a snowflake ID created `millis` milliseconds after the Discord epoch (2015-01-01).
///
/// # Examples
///
/// ```rust,ignore
/// let older = snowflake(1_000);
/// let newer = snowflake(2_000);
/// assert!(older < newer);
/// ```
pub fn snowflake(millis: u64) -> u64 {
    millis << 22
}

/// Builds the Discord payload of a plain text message without mentions or attachments.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake, use [`snowflake`] for ordering)
/// - `channel_id` - Channel the message was sent in
/// - `author_id` - Discord user ID of the author
/// - `author_name` - Username of the author
/// - `content` - Message text
pub fn message_json(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    author_name: &str,
    content: &str,
) -> Value {
    serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": user_json(author_id, author_name),
        "content": content,
        "timestamp": "2021-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "embeds": [],
        "reactions": [],
        "pinned": false,
        "type": 0,
        "flags": 0,
    })
}

/// Creates a test Serenity Message with default content.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(message_id: u64, channel_id: u64, content: &str) -> Message {
    create_test_message_with(message_id, channel_id, content, serde_json::json!({}))
}

/// Creates a test Serenity Message, overriding top-level payload fields.
///
/// Every key of `overrides` replaces the key of the same name in the default payload,
/// which makes it possible to attach mentions, reactions or references.
///
/// # Panics
/// - If `overrides` is not a JSON object or the merged JSON is not a valid Message
pub fn create_test_message_with(
    message_id: u64,
    channel_id: u64,
    content: &str,
    overrides: Value,
) -> Message {
    let mut json = message_json(message_id, channel_id, 100, "author", content);

    let Value::Object(overrides) = overrides else {
        panic!("Message overrides must be a JSON object");
    };
    for (key, value) in overrides {
        json[key] = value;
    }

    serde_json::from_value(json).expect("Failed to create test message - invalid JSON structure")
}
