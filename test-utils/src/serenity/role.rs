//! Test factory for creating Serenity Role objects.
//!
//! This module provides factory functions for creating mock Serenity `Role` structs
//! for testing purposes. These factories create valid Role objects by deserializing
//! JSON, simulating what Discord's API would return.

use serde_json::Value;
use serenity::all::Role;

/// Builds the Discord payload of a role.
///
/// The role is not hoisted, not managed and not mentionable.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `guild_id` - Guild the role belongs to
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `permissions` - Permission bitmask granted by the role
pub fn role_json(role_id: u64, guild_id: u64, name: &str, color: u32, permissions: u64) -> Value {
    serde_json::json!({
        "id": role_id.to_string(),
        "guild_id": guild_id.to_string(),
        "name": name,
        "color": color,
        "colors": {
            "primary_color": color,
            "secondary_color": null,
            "tertiary_color": null,
        },
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": 1,
        "permissions": permissions.to_string(),
        "managed": false,
        "mentionable": false,
    })
}

/// Creates a test Serenity Role with customizable fields.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::role::create_test_role;
///
/// let role = create_test_role(123456789, "Admin", 0xFF0000, 10);
/// assert_eq!(role.name, "Admin");
/// assert_eq!(role.position, 10);
/// ```
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: i16) -> Role {
    let mut json = role_json(role_id, 1, name, color, 0);
    json["position"] = position.into();

    serde_json::from_value(json).expect("Failed to create test role - invalid JSON structure")
}
