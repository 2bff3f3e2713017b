//! Discord payloads of guild channels, composed into guild payloads.

use serde_json::Value;

/// Builds the Discord payload of a guild channel.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild owning the channel
/// - `name` - Channel name
/// - `kind` - Discord channel type number (0 text, 2 voice, 4 category, 5 news, 13 stage)
/// - `position` - Sorting position in the channel list
pub fn channel_json(channel_id: u64, guild_id: u64, name: &str, kind: u8, position: u16) -> Value {
    serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "permission_overwrites": [],
        "nsfw": false,
        "parent_id": null,
        "topic": null,
        "last_message_id": null,
        "rate_limit_per_user": 0,
        "flags": 0,
    })
}
