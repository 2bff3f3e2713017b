//! Test factory for creating Serenity Member objects.

use serde_json::Value;
use serenity::all::Member;

use super::user::user_json;

/// Builds the Discord payload of a guild member.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID of the member
/// - `name` - Username of the member
/// - `roles` - Role IDs assigned to the member (excluding @everyone)
pub fn member_json(guild_id: u64, user_id: u64, name: &str, roles: &[u64]) -> Value {
    let roles: Vec<String> = roles.iter().map(|id| id.to_string()).collect();

    serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": user_json(user_id, name),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2021-03-04T05:06:07.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
    })
}

/// Creates a test Serenity Member.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, name: &str, roles: &[u64]) -> Member {
    serde_json::from_value(member_json(guild_id, user_id, name, roles))
        .expect("Failed to create test member - invalid JSON structure")
}
