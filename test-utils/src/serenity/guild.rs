//! Test factory for creating Serenity Guild objects.
//!
//! This module provides factory functions for creating mock Serenity `Guild` structs
//! for testing purposes. These factories create valid Guild objects by deserializing
//! JSON, simulating what Discord's gateway sends when the bot joins a guild.

use serde_json::Value;
use serenity::all::Guild;

/// Builder for guild payloads holding channels, roles and members.
///
/// The @everyone role (whose ID equals the guild ID) is always present so that
/// permission resolution behaves like a real guild.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::serenity::{channel_json, member_json, TestGuildBuilder};
///
/// let guild = TestGuildBuilder::new(1, "Test Guild")
///     .owner(100)
///     .channel(channel_json(10, 1, "general", 0, 0))
///     .member(member_json(1, 100, "owner", &[]))
///     .build();
/// ```
pub struct TestGuildBuilder {
    guild_id: u64,
    name: String,
    icon_hash: Option<String>,
    owner_id: u64,
    channels: Vec<Value>,
    roles: Vec<Value>,
    members: Vec<Value>,
}

impl TestGuildBuilder {
    /// Creates a builder for a guild with no channels, no members and only @everyone.
    pub fn new(guild_id: u64, name: &str) -> Self {
        Self {
            guild_id,
            name: name.to_string(),
            icon_hash: None,
            owner_id: 100_000_000_000_000_000,
            channels: Vec::new(),
            roles: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Sets the icon hash, padded to 32 characters (Discord's icon hash format).
    pub fn icon(mut self, icon_hash: &str) -> Self {
        self.icon_hash = Some(format!("{:0<32}", icon_hash));
        self
    }

    /// Sets the guild owner.
    pub fn owner(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Adds a channel payload, see `channel_json`.
    pub fn channel(mut self, channel: Value) -> Self {
        self.channels.push(channel);
        self
    }

    /// Adds a role payload, see `role_json`.
    pub fn role(mut self, role: Value) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds a member payload, see `member_json`.
    pub fn member(mut self, member: Value) -> Self {
        self.members.push(member);
        self
    }

    /// Returns the raw guild payload.
    pub fn json(&self) -> Value {
        let mut roles = vec![super::role::role_json(
            self.guild_id,
            self.guild_id,
            "@everyone",
            0,
            0,
        )];
        roles.extend(self.roles.iter().cloned());

        serde_json::json!({
            "id": self.guild_id.to_string(),
            "name": self.name,
            "icon": self.icon_hash,
            "icon_hash": self.icon_hash,
            "owner_id": self.owner_id.to_string(),
            "afk_timeout": 300,
            "afk_channel_id": null,
            "system_channel_id": null,
            "rules_channel_id": null,
            "public_updates_channel_id": null,
            "verification_level": 0,
            "default_message_notifications": 0,
            "explicit_content_filter": 0,
            "roles": roles,
            "emojis": [],
            "stickers": [],
            "features": [],
            "mfa_level": 0,
            "system_channel_flags": 0,
            "premium_tier": 0,
            "premium_subscription_count": 0,
            "premium_progress_bar_enabled": false,
            "preferred_locale": "en-US",
            "nsfw_level": 0,
            "joined_at": "2020-01-01T00:00:00.000000+00:00",
            "large": false,
            "member_count": self.members.len(),
            "voice_states": [],
            "channels": self.channels,
            "threads": [],
            "presences": [],
            "max_presences": 25000,
            "max_members": 100000,
            "unavailable": false,
            "members": self.members,
            "stage_instances": [],
            "guild_scheduled_events": [],
        })
    }

    /// Builds the Serenity Guild.
    ///
    /// # Panics
    /// - If the JSON cannot be deserialized into a Guild (indicates invalid test data)
    pub fn build(&self) -> Guild {
        serde_json::from_value(self.json())
            .expect("Failed to create test guild - invalid JSON structure")
    }
}
