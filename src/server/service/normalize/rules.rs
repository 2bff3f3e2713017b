//! Pure transformation rules applied to single raw fields.
//!
//! Every rule has the signature of [`RuleFn`](super::RuleFn): it receives the raw field
//! value (`null` when the field is absent), the raw object the field belongs to and the
//! normalization context, and returns the JSON-safe value or `None` to omit the field.
//! Rules never fail; a missing optional sub-attribute degrades to `null`.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use serenity::all::{MessageFlags, MessageType, Permissions, SystemChannelFlags};

use super::{context::NormalizeContext, normalize_object, ObjectKind};
use crate::server::model::snapshot::{EntityRef, Record};

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01T00:00:00Z).
const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

const CDN_URL: &str = "https://cdn.discordapp.com";
const MEDIA_URL: &str = "https://media.discordapp.net";

// Discord channel type numbers
const TEXT_CHANNEL: u64 = 0;
const VOICE_CHANNEL: u64 = 2;
const CATEGORY_CHANNEL: u64 = 4;
const NEWS_CHANNEL: u64 = 5;
const STAGE_CHANNEL: u64 = 13;

// ----------------------------------------------------------------------------------------
// Raw value helpers
// ----------------------------------------------------------------------------------------

/// Parses a snowflake sent either as a decimal string (Discord's wire format) or a number.
pub fn parse_snowflake(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

/// Parses a bitmask sent either as a decimal string or a number.
pub fn parse_bits(value: &Value) -> Option<u64> {
    parse_snowflake(value)
}

/// Returns the ID of an object carrying an `id` field, or the value itself if it is an ID.
pub fn item_id(value: &Value) -> Option<u64> {
    match value {
        Value::Object(object) => object.get("id").and_then(parse_snowflake),
        other => parse_snowflake(other),
    }
}

/// Returns the elements of a collection sent as an array or as an ID-keyed object.
pub fn items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Returns the username of a raw user.
pub fn user_name(user: &Value) -> Option<&str> {
    user.get("username")
        .or_else(|| user.get("name"))
        .and_then(Value::as_str)
}

/// Formats a timestamp with a fixed width, `YYYY-MM-DD HH:MM:SS.ffffff+00:00`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.6f+00:00").to_string()
}

/// Returns the creation time encoded in a snowflake.
pub fn snowflake_created_at(id: u64) -> Option<DateTime<Utc>> {
    let millis = (id >> 22).checked_add(DISCORD_EPOCH_MILLIS)?;
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

fn entity_ref(value: &Value) -> Option<Value> {
    let id = item_id(value)?;
    let name = value.get("name").and_then(Value::as_str).map(str::to_string);
    Some(EntityRef { id, name }.to_value())
}

fn optional_ref(reference: Option<EntityRef>) -> Option<Value> {
    Some(reference.map(|r| r.to_value()).unwrap_or(Value::Null))
}

fn id_or_null(id: Option<u64>) -> Value {
    id.map(Value::from).unwrap_or(Value::Null)
}

// ----------------------------------------------------------------------------------------
// Scalars
// ----------------------------------------------------------------------------------------

pub fn passthrough(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(raw.clone())
}

pub fn snowflake(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(id_or_null(parse_snowflake(raw)))
}

pub fn snowflake_list(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(items(raw).into_iter().filter_map(item_id).collect())
}

pub fn bitmask(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(id_or_null(parse_bits(raw)))
}

/// Stringifies an RFC 3339 timestamp, `null` when absent or unparsable.
pub fn timestamp(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let formatted = raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| format_timestamp(&t.with_timezone(&Utc)));
    Some(formatted.map(Value::String).unwrap_or(Value::Null))
}

/// Stringified creation time derived from the object's snowflake ID.
pub fn created_at(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let formatted = parse_snowflake(raw)
        .and_then(snowflake_created_at)
        .map(|t| format_timestamp(&t));
    Some(formatted.map(Value::String).unwrap_or(Value::Null))
}

// ----------------------------------------------------------------------------------------
// References
// ----------------------------------------------------------------------------------------

/// Collapses a raw user to `{id, name}`.
pub fn user_ref(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let Some(id) = item_id(raw) else {
        return Some(Value::Null);
    };
    let name = user_name(raw).map(str::to_string);
    Some(EntityRef { id, name }.to_value())
}

/// Collapses a list of raw users to a list of `{id, name}`.
pub fn user_ref_list(raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .filter_map(|user| user_ref(user, object, ctx))
            .filter(|v| !v.is_null())
            .collect(),
    )
}

/// Resolves a list of role IDs to a list of `{id, name}`.
pub fn role_ref_list(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .filter_map(item_id)
            .map(|id| ctx.role_ref(id).to_value())
            .collect(),
    )
}

/// Collapses channel mentions to a list of `{id, name}`, resolving names from the guild
/// when the mention carries none.
pub fn channel_ref_list(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .filter_map(|channel| {
                let id = item_id(channel)?;
                match channel.get("name").and_then(Value::as_str) {
                    Some(name) => Some(EntityRef::new(id, name).to_value()),
                    None => Some(ctx.channel_ref(id).to_value()),
                }
            })
            .collect(),
    )
}

/// Resolves a channel ID to `{id, name}`, `null` when absent.
pub fn channel_ref(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    optional_ref(parse_snowflake(raw).map(|id| ctx.channel_ref(id)))
}

/// Resolves a channel ID to the channel name, `null` when absent or unknown.
pub fn channel_name(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    let name = parse_snowflake(raw).and_then(|id| ctx.channel_ref(id).name);
    Some(name.map(Value::String).unwrap_or(Value::Null))
}

/// The guild the normalized object belongs to, as `{id, name}`.
pub fn guild_ref(_raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    match ctx.guild() {
        Some(guild) => Some(guild.to_value()),
        None => optional_ref(object.get("guild_id").and_then(parse_snowflake).map(|id| {
            EntityRef { id, name: None }
        })),
    }
}

// ----------------------------------------------------------------------------------------
// Messages
// ----------------------------------------------------------------------------------------

/// Link opening the message in the Discord client.
pub fn jump_url(raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    let message_id = parse_snowflake(raw)?;
    let channel_id = object.get("channel_id").and_then(parse_snowflake)?;
    let guild = match ctx.guild() {
        Some(guild) => guild.id.to_string(),
        None => match object.get("guild_id").and_then(parse_snowflake) {
            Some(id) => id.to_string(),
            None => "@me".to_string(),
        },
    };
    Some(Value::String(format!(
        "https://discord.com/channels/{guild}/{channel_id}/{message_id}"
    )))
}

/// Attachments as `{id, filename, url, data}`; `data` is filled by the binary fetch stage.
pub fn attachments(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .map(|attachment| {
                json!({
                    "id": id_or_null(item_id(attachment)),
                    "filename": attachment.get("filename").cloned().unwrap_or(Value::Null),
                    "url": attachment.get("url").cloned().unwrap_or(Value::Null),
                    "data": null,
                })
            })
            .collect(),
    )
}

/// Message stickers as `{id, name, url, data}`; `data` is filled by the binary fetch stage.
pub fn message_stickers(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .map(|sticker| {
                json!({
                    "id": id_or_null(item_id(sticker)),
                    "name": sticker.get("name").cloned().unwrap_or(Value::Null),
                    "url": sticker_url(sticker).map(Value::String).unwrap_or(Value::Null),
                    "data": null,
                })
            })
            .collect(),
    )
}

/// CDN URL of a sticker image, derived from its ID and format type.
fn sticker_url(sticker: &Value) -> Option<String> {
    let id = item_id(sticker)?;
    let extension = match sticker.get("format_type").and_then(Value::as_u64) {
        Some(3) => "json",
        Some(4) => "gif",
        _ => "png",
    };
    Some(format!("{MEDIA_URL}/stickers/{id}.{extension}"))
}

/// Embeds in their structured dictionary form.
pub fn embeds(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(Value::Array(items(raw).into_iter().cloned().collect()))
}

/// Reply pointer as `{message_id, channel_id, guild_id, cached_message}`, `null` if absent.
///
/// `cached_message` is the text of the referenced message when Discord delivered it
/// alongside the reply (`referenced_message`), otherwise `null`.
pub fn reference(raw: &Value, object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    if !raw.is_object() {
        return Some(Value::Null);
    }

    let cached_message = object
        .get("referenced_message")
        .and_then(|message| message.get("content"))
        .cloned()
        .unwrap_or(Value::Null);

    Some(json!({
        "message_id": id_or_null(raw.get("message_id").and_then(parse_snowflake)),
        "channel_id": id_or_null(raw.get("channel_id").and_then(parse_snowflake)),
        "guild_id": id_or_null(raw.get("guild_id").and_then(parse_snowflake)),
        "cached_message": cached_message,
    }))
}

/// Reactions as `{is_custom_emoji, me, count, emoji}`.
///
/// `emoji` is the emoji string for built-in emoji and `{id, name, animated, managed}` for
/// custom emoji. Reaction payloads do not always carry `managed`; it is `null` then.
pub fn reactions(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .map(|reaction| {
                let emoji = reaction.get("emoji").cloned().unwrap_or(Value::Null);
                let custom_id = emoji.get("id").and_then(parse_snowflake);

                let emoji_value = match custom_id {
                    Some(id) => json!({
                        "id": id,
                        "name": emoji.get("name").cloned().unwrap_or(Value::Null),
                        "animated": emoji.get("animated").cloned().unwrap_or(Value::Bool(false)),
                        "managed": emoji.get("managed").cloned().unwrap_or(Value::Null),
                    }),
                    None => match &emoji {
                        Value::String(name) => Value::String(name.clone()),
                        other => other.get("name").cloned().unwrap_or(Value::Null),
                    },
                };

                json!({
                    "is_custom_emoji": custom_id.is_some(),
                    "me": reaction.get("me").cloned().unwrap_or(Value::Bool(false)),
                    "count": reaction.get("count").cloned().unwrap_or(Value::from(0)),
                    "emoji": emoji_value,
                })
            })
            .collect(),
    )
}

/// Message flags expanded to a mapping of every named flag.
pub fn message_flags(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let flags = MessageFlags::from_bits_retain(parse_bits(raw).unwrap_or(0));
    Some(Value::Object(
        MessageFlags::all()
            .iter_names()
            .map(|(name, flag)| (name.to_ascii_lowercase(), Value::Bool(flags.contains(flag))))
            .collect(),
    ))
}

/// Message type as `{name, value}`.
pub fn message_type(raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    level::<MessageType>(raw, object, ctx)
}

// ----------------------------------------------------------------------------------------
// Flag and enum objects
// ----------------------------------------------------------------------------------------

/// Expands a permission bitmask to a mapping of every named permission.
pub fn permission_map(permissions: Permissions) -> Value {
    Value::Object(
        Permissions::all()
            .iter_names()
            .map(|(name, flag)| {
                (
                    name.to_ascii_lowercase(),
                    Value::Bool(permissions.contains(flag)),
                )
            })
            .collect(),
    )
}

/// Numbered enum as `{name, value}`, `null` when absent.
pub fn level<T>(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value>
where
    T: From<u8> + std::fmt::Debug,
{
    let Some(value) = raw.as_u64().and_then(|v| u8::try_from(v).ok()) else {
        return Some(Value::Null);
    };
    Some(json!({
        "name": format!("{:?}", T::from(value)),
        "value": value,
    }))
}

/// Numbered enum collapsed to its name, `null` when absent.
pub fn level_name<T>(raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value>
where
    T: From<u8> + std::fmt::Debug,
{
    let level = level::<T>(raw, object, ctx)?;
    Some(level.get("name").cloned().unwrap_or(Value::Null))
}

/// System channel flags expanded to a mapping of every named flag.
pub fn system_channel_flags(
    raw: &Value,
    _object: &Record,
    _ctx: &NormalizeContext,
) -> Option<Value> {
    let flags = SystemChannelFlags::from_bits_retain(parse_bits(raw).unwrap_or(0));
    Some(Value::Object(
        SystemChannelFlags::all()
            .iter_names()
            .map(|(name, flag)| (name.to_ascii_lowercase(), Value::Bool(flags.contains(flag))))
            .collect(),
    ))
}

// ----------------------------------------------------------------------------------------
// Guilds
// ----------------------------------------------------------------------------------------

/// Resolvable icon URL, `null` when the guild has no icon.
pub fn icon_url(raw: &Value, object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let (Some(hash), Some(id)) = (
        raw.as_str(),
        object.get("id").and_then(parse_snowflake),
    ) else {
        return Some(Value::Null);
    };
    let extension = if hash.starts_with("a_") { "gif" } else { "png" };
    Some(Value::String(format!(
        "{CDN_URL}/icons/{id}/{hash}.{extension}"
    )))
}

pub fn owner(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    optional_ref(parse_snowflake(raw).map(|id| ctx.member_ref(id)))
}

/// The @everyone role, whose ID equals the guild ID.
pub fn default_role(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    optional_ref(
        parse_snowflake(raw)
            .filter(|id| ctx.has_role(*id))
            .map(|id| ctx.role_ref(id)),
    )
}

pub fn premium_subscriber_role(
    _raw: &Value,
    _object: &Record,
    ctx: &NormalizeContext,
) -> Option<Value> {
    optional_ref(ctx.premium_subscriber_role())
}

/// The bot's own member reference.
pub fn me(_raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    optional_ref(ctx.me().cloned())
}

fn channels_of_kind(raw: &Value, kinds: &[u64]) -> Value {
    let mut channels: Vec<&Value> = items(raw)
        .into_iter()
        .filter(|channel| {
            kinds.is_empty()
                || channel
                    .get("type")
                    .and_then(Value::as_u64)
                    .is_some_and(|kind| kinds.contains(&kind))
        })
        .collect();
    channels.sort_by_key(|channel| {
        (
            channel.get("position").and_then(Value::as_u64).unwrap_or(0),
            item_id(channel).unwrap_or(0),
        )
    });
    channels.into_iter().filter_map(entity_ref).collect()
}

pub fn all_channels(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(channels_of_kind(raw, &[]))
}

pub fn text_channels(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(channels_of_kind(raw, &[TEXT_CHANNEL, NEWS_CHANNEL]))
}

pub fn voice_channels(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(channels_of_kind(raw, &[VOICE_CHANNEL]))
}

pub fn stage_channels(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(channels_of_kind(raw, &[STAGE_CHANNEL]))
}

pub fn categories(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(channels_of_kind(raw, &[CATEGORY_CHANNEL]))
}

fn member_entity_ref(member: &Value) -> Option<Value> {
    let user = member.get("user")?;
    Some(
        EntityRef {
            id: item_id(user)?,
            name: user_name(user).map(str::to_string),
        }
        .to_value(),
    )
}

pub fn member_refs(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(items(raw).into_iter().filter_map(member_entity_ref).collect())
}

/// Members currently boosting the guild.
pub fn premium_subscribers(
    raw: &Value,
    _object: &Record,
    _ctx: &NormalizeContext,
) -> Option<Value> {
    Some(
        items(raw)
            .into_iter()
            .filter(|member| member.get("premium_since").is_some_and(|v| !v.is_null()))
            .filter_map(member_entity_ref)
            .collect(),
    )
}

fn nested_list(raw: &Value, kind: ObjectKind, ctx: &NormalizeContext) -> Value {
    items(raw)
        .into_iter()
        .filter_map(Value::as_object)
        .map(|object| Value::Object(normalize_object(kind, object, ctx)))
        .collect()
}

pub fn roles(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    let mut roles = nested_list(raw, ObjectKind::Role, ctx);
    if let Value::Array(list) = &mut roles {
        list.sort_by_key(|role| {
            (
                role.get("position").and_then(Value::as_i64).unwrap_or(0),
                role.get("id").and_then(Value::as_u64).unwrap_or(0),
            )
        });
    }
    Some(roles)
}

pub fn emojis(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(nested_list(raw, ObjectKind::Emoji, ctx))
}

pub fn guild_stickers(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(nested_list(raw, ObjectKind::Sticker, ctx))
}

// ----------------------------------------------------------------------------------------
// Roles, emoji and stickers
// ----------------------------------------------------------------------------------------

/// Role colour as `[r, g, b]`.
pub fn color_rgb(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let colour = raw.as_u64().unwrap_or(0);
    Some(json!([(colour >> 16) & 0xFF, (colour >> 8) & 0xFF, colour & 0xFF]))
}

pub fn role_tags(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    if !raw.is_object() {
        return Some(Value::Null);
    }
    Some(json!({
        "bot_id": id_or_null(raw.get("bot_id").and_then(parse_snowflake)),
        "integration_id": id_or_null(raw.get("integration_id").and_then(parse_snowflake)),
        "premium_subscriber": super::context::premium_subscriber_tag(raw),
    }))
}

pub fn sticker_image_url(_raw: &Value, object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let sticker = Value::Object(object.clone());
    Some(sticker_url(&sticker).map(Value::String).unwrap_or(Value::Null))
}

// ----------------------------------------------------------------------------------------
// Members
// ----------------------------------------------------------------------------------------

fn user_field(raw: &Value, field: &str) -> Value {
    raw.get(field).cloned().unwrap_or(Value::Null)
}

pub fn user_id(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(id_or_null(item_id(raw)))
}

pub fn user_username(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(user_name(raw).map(|n| Value::String(n.to_string())).unwrap_or(Value::Null))
}

pub fn user_discriminator(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(user_field(raw, "discriminator"))
}

pub fn user_bot(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(Value::Bool(raw.get("bot").and_then(Value::as_bool).unwrap_or(false)))
}

pub fn user_system(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(Value::Bool(raw.get("system").and_then(Value::as_bool).unwrap_or(false)))
}

pub fn user_mention(raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(
        item_id(raw)
            .map(|id| Value::String(format!("<@{id}>")))
            .unwrap_or(Value::Null),
    )
}

/// Guild nickname, then global display name, then username.
pub fn display_name(raw: &Value, object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    let name = object
        .get("nick")
        .and_then(Value::as_str)
        .or_else(|| raw.get("global_name").and_then(Value::as_str))
        .or_else(|| user_name(raw));
    Some(name.map(|n| Value::String(n.to_string())).unwrap_or(Value::Null))
}

pub fn activities(raw: &Value, _object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    Some(item_id(raw).map(|id| ctx.activities(id)).unwrap_or(Value::Array(Vec::new())))
}

/// Bot accounts cannot list the guilds shared with another user.
pub fn mutual_guilds(_raw: &Value, _object: &Record, _ctx: &NormalizeContext) -> Option<Value> {
    Some(Value::Null)
}

/// Guild-wide permissions of the member expanded to named booleans.
pub fn guild_permissions(raw: &Value, object: &Record, ctx: &NormalizeContext) -> Option<Value> {
    let user_id = object.get("user").and_then(item_id)?;
    let role_ids: Vec<u64> = items(raw).into_iter().filter_map(item_id).collect();
    Some(permission_map(ctx.guild_permissions(user_id, &role_ids)))
}
