//! Discord payloads of users, embedded in member and message payloads.

use serde_json::Value;

/// Builds the Discord payload of a non-bot user.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Username
pub fn user_json(user_id: u64, name: &str) -> Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": false,
        "system": false,
    })
}
