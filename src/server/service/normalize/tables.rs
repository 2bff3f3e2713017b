//! Field tables per object kind.
//!
//! Each entry maps a source key of the raw Discord payload to an output field and the
//! rule producing it. One source key may feed several outputs (a message `id` yields
//! `id`, `created_at` and `jump_url`). Keys without an entry are dropped.

use serenity::all::{
    DefaultMessageNotificationLevel, ExplicitContentFilter, MfaLevel, NsfwLevel,
    VerificationLevel,
};

use super::{rules::*, FieldRule};

const fn rule(source: &'static str, output: &'static str, rule: super::RuleFn) -> FieldRule {
    FieldRule {
        source,
        output,
        rule,
    }
}

/// Message payload keys that are never exported.
///
/// `call` is deprecated and `nonce` is almost always unset.
pub const IGNORED_MESSAGE_FIELDS: &[&str] = &["call", "nonce"];

pub static MESSAGE_FIELDS: &[FieldRule] = &[
    rule("id", "id", snowflake),
    rule("id", "created_at", created_at),
    rule("id", "jump_url", jump_url),
    rule("content", "content", passthrough),
    rule("tts", "tts", passthrough),
    rule("pinned", "pinned", passthrough),
    rule("mention_everyone", "mention_everyone", passthrough),
    rule("webhook_id", "webhook_id", snowflake),
    rule("activity", "activity", passthrough),
    rule("application", "application", passthrough),
    rule("author", "author", user_ref),
    rule("channel_id", "channel", channel_ref),
    rule("channel_id", "guild", guild_ref),
    rule("mentions", "mentions", user_ref_list),
    rule("mentions", "raw_mentions", snowflake_list),
    rule("mention_roles", "role_mentions", role_ref_list),
    rule("mention_roles", "raw_role_mentions", snowflake_list),
    rule("mention_channels", "channel_mentions", channel_ref_list),
    rule("mention_channels", "raw_channel_mentions", snowflake_list),
    rule("edited_timestamp", "edited_at", timestamp),
    rule("attachments", "attachments", attachments),
    rule("sticker_items", "stickers", message_stickers),
    rule("embeds", "embeds", embeds),
    rule("message_reference", "reference", reference),
    rule("reactions", "reactions", reactions),
    rule("flags", "flags", message_flags),
    rule("type", "type", message_type),
];

pub static GUILD_FIELDS: &[FieldRule] = &[
    rule("id", "id", snowflake),
    rule("id", "created_at", created_at),
    rule("id", "default_role", default_role),
    rule("id", "premium_subscriber_role", premium_subscriber_role),
    rule("id", "me", me),
    rule("name", "name", passthrough),
    rule("description", "description", passthrough),
    rule("icon", "icon", icon_url),
    rule("banner", "banner", passthrough),
    rule("splash", "splash", passthrough),
    rule("discovery_splash", "discovery_splash", passthrough),
    rule("features", "features", passthrough),
    rule("owner_id", "owner_id", snowflake),
    rule("owner_id", "owner", owner),
    rule("afk_channel_id", "afk_channel", channel_name),
    rule("afk_timeout", "afk_timeout", passthrough),
    rule("system_channel_id", "system_channel", channel_ref),
    rule("system_channel_flags", "system_channel_flags", system_channel_flags),
    rule("rules_channel_id", "rules_channel", channel_ref),
    rule("public_updates_channel_id", "public_updates_channel", channel_ref),
    rule("widget_enabled", "widget_enabled", passthrough),
    rule("widget_channel_id", "widget_channel_id", snowflake),
    rule("verification_level", "verification_level", level_name::<VerificationLevel>),
    rule(
        "default_message_notifications",
        "default_notifications",
        level_name::<DefaultMessageNotificationLevel>,
    ),
    rule(
        "explicit_content_filter",
        "explicit_content_filter",
        level_name::<ExplicitContentFilter>,
    ),
    rule("mfa_level", "mfa_level", level::<MfaLevel>),
    rule("nsfw_level", "nsfw_level", level::<NsfwLevel>),
    rule("preferred_locale", "preferred_locale", passthrough),
    rule("vanity_url_code", "vanity_url_code", passthrough),
    rule("premium_tier", "premium_tier", passthrough),
    rule("premium_subscription_count", "premium_subscription_count", passthrough),
    rule("premium_progress_bar_enabled", "premium_progress_bar_enabled", passthrough),
    rule("max_members", "max_members", passthrough),
    rule("max_presences", "max_presences", passthrough),
    rule("max_video_channel_users", "max_video_channel_users", passthrough),
    rule("member_count", "member_count", passthrough),
    rule("large", "large", passthrough),
    rule("unavailable", "unavailable", passthrough),
    rule("joined_at", "joined_at", timestamp),
    rule("roles", "roles", roles),
    rule("emojis", "emojis", emojis),
    rule("stickers", "stickers", guild_stickers),
    rule("channels", "channels", all_channels),
    rule("channels", "text_channels", text_channels),
    rule("channels", "voice_channels", voice_channels),
    rule("channels", "stage_channels", stage_channels),
    rule("channels", "categories", categories),
    rule("members", "members", member_refs),
    rule("members", "premium_subscribers", premium_subscribers),
];

pub static ROLE_FIELDS: &[FieldRule] = &[
    rule("id", "id", snowflake),
    rule("id", "created_at", created_at),
    rule("name", "name", passthrough),
    rule("color", "color", color_rgb),
    rule("hoist", "hoist", passthrough),
    rule("position", "position", passthrough),
    rule("managed", "managed", passthrough),
    rule("mentionable", "mentionable", passthrough),
    rule("permissions", "permissions", bitmask),
    rule("icon", "icon", passthrough),
    rule("unicode_emoji", "unicode_emoji", passthrough),
    rule("tags", "tags", role_tags),
];

pub static EMOJI_FIELDS: &[FieldRule] = &[
    rule("id", "id", snowflake),
    rule("id", "created_at", created_at),
    rule("name", "name", passthrough),
    rule("animated", "animated", passthrough),
    rule("available", "available", passthrough),
    rule("managed", "managed", passthrough),
    rule("require_colons", "require_colons", passthrough),
    rule("roles", "roles", snowflake_list),
    rule("user", "user", user_ref),
];

pub static STICKER_FIELDS: &[FieldRule] = &[
    rule("id", "id", snowflake),
    rule("id", "created_at", created_at),
    rule("id", "url", sticker_image_url),
    rule("name", "name", passthrough),
    rule("description", "description", passthrough),
    rule("tags", "tags", passthrough),
    rule("type", "type", passthrough),
    rule("format_type", "format_type", passthrough),
    rule("available", "available", passthrough),
    rule("pack_id", "pack_id", snowflake),
    rule("sort_value", "sort_value", passthrough),
    rule("user", "user", user_ref),
];

/// Member fields. Presence statuses are not exported; activities cover them.
pub static MEMBER_FIELDS: &[FieldRule] = &[
    rule("user", "id", user_id),
    rule("user", "name", user_username),
    rule("user", "discriminator", user_discriminator),
    rule("user", "display_name", display_name),
    rule("user", "mention", user_mention),
    rule("user", "bot", user_bot),
    rule("user", "system", user_system),
    rule("user", "activities", activities),
    rule("user", "mutual_guilds", mutual_guilds),
    rule("nick", "nick", passthrough),
    rule("pending", "pending", passthrough),
    rule("joined_at", "joined_at", timestamp),
    rule("premium_since", "premium_since", timestamp),
    rule("roles", "roles", role_ref_list),
    rule("roles", "guild_permissions", guild_permissions),
];
