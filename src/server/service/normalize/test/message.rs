use super::*;

fn channel_context() -> NormalizeContext {
    context().for_channel(EntityRef::new(10, "general"))
}

fn message_field(source: &str, raw_value: Value, object: Value) -> Option<Value> {
    let object = raw(object);
    normalize_field(
        ObjectKind::Message,
        source,
        &raw_value,
        &object,
        &channel_context(),
    )
    .into_iter()
    .next()
    .map(|(_, value)| value)
}

/// Tests scalar fields are copied as-is.
///
/// Expected: content, tts and pinned unchanged
#[test]
fn passes_scalars_through() {
    let ctx = channel_context();
    let object = raw(json!({ "content": "hello", "tts": true, "pinned": false }));

    let record = normalize_object(ObjectKind::Message, &object, &ctx);

    assert_eq!(record["content"], json!("hello"));
    assert_eq!(record["tts"], json!(true));
    assert_eq!(record["pinned"], json!(false));
}

/// Tests the message ID yields the ID, creation time and jump URL.
///
/// Expected: numeric ID, fixed-width timestamp derived from the snowflake, jump URL
#[test]
fn derives_fields_from_id() {
    let ctx = channel_context();
    // 1000 ms after the Discord epoch
    let id = 1000u64 << 22;
    let object = raw(json!({ "id": id.to_string(), "channel_id": "10" }));

    let record = normalize_object(ObjectKind::Message, &object, &ctx);

    assert_eq!(record["id"], json!(id));
    assert_eq!(record["created_at"], json!("2015-01-01 00:00:01.000000+00:00"));
    assert_eq!(
        record["jump_url"],
        json!(format!("https://discord.com/channels/1/10/{id}"))
    );
}

/// Tests author, channel and guild collapse to `{id, name}`.
///
/// Expected: references resolved through the context
#[test]
fn collapses_single_references() {
    let ctx = channel_context();
    let object = raw(json!({
        "channel_id": "10",
        "author": { "id": "100", "username": "owner", "avatar": null }
    }));

    let record = normalize_object(ObjectKind::Message, &object, &ctx);

    assert_eq!(record["author"], json!({ "id": 100, "name": "owner" }));
    assert_eq!(record["channel"], json!({ "id": 10, "name": "general" }));
    assert_eq!(record["guild"], json!({ "id": 1, "name": "Test Guild" }));
}

/// Tests mention lists collapse to lists of `{id, name}` plus raw ID lists.
///
/// Expected: role names resolved from the guild, unknown roles with null name
#[test]
fn collapses_mention_lists() {
    let ctx = channel_context();
    let object = raw(json!({
        "mentions": [{ "id": "200", "username": "booster" }],
        "mention_roles": ["20", "77"],
        "mention_channels": [{ "id": "12", "guild_id": "1", "type": 5, "name": "announcements" }]
    }));

    let record = normalize_object(ObjectKind::Message, &object, &ctx);

    assert_eq!(record["mentions"], json!([{ "id": 200, "name": "booster" }]));
    assert_eq!(record["raw_mentions"], json!([200]));
    assert_eq!(
        record["role_mentions"],
        json!([{ "id": 20, "name": "Admin" }, { "id": 77, "name": null }])
    );
    assert_eq!(record["raw_role_mentions"], json!([20, 77]));
    assert_eq!(
        record["channel_mentions"],
        json!([{ "id": 12, "name": "announcements" }])
    );
}

/// Tests attachments keep `data` null until the binary fetch stage runs.
///
/// Expected: `{id, filename, url, data: null}`
#[test]
fn normalizes_attachments() {
    let value = message_field(
        "attachments",
        json!([{
            "id": "5",
            "filename": "cat.png",
            "url": "https://cdn.discordapp.com/attachments/10/5/cat.png",
            "size": 1024
        }]),
        json!({}),
    );

    assert_eq!(
        value,
        Some(json!([{
            "id": 5,
            "filename": "cat.png",
            "url": "https://cdn.discordapp.com/attachments/10/5/cat.png",
            "data": null
        }]))
    );
}

/// Tests message stickers resolve their CDN URL from the format type.
///
/// Expected: GIF stickers use the gif extension
#[test]
fn normalizes_stickers() {
    let value = message_field(
        "sticker_items",
        json!([{ "id": "6", "name": "wave", "format_type": 4 }]),
        json!({}),
    );

    assert_eq!(
        value,
        Some(json!([{
            "id": 6,
            "name": "wave",
            "url": "https://media.discordapp.net/stickers/6.gif",
            "data": null
        }]))
    );
}

/// Tests a missing reply pointer is null.
///
/// Expected: `reference: null`
#[test]
fn absent_reference_is_null() {
    assert_eq!(
        message_field("message_reference", Value::Null, json!({})),
        Some(Value::Null)
    );
}

/// Tests a reply pointer carries the referenced message text when delivered.
///
/// Expected: `cached_message` is the referenced content, or null when not delivered
#[test]
fn normalizes_reference() {
    let reference = json!({ "message_id": "7", "channel_id": "10", "guild_id": "1" });

    let cached = message_field(
        "message_reference",
        reference.clone(),
        json!({ "referenced_message": { "id": "7", "content": "original" } }),
    );
    assert_eq!(
        cached,
        Some(json!({
            "message_id": 7,
            "channel_id": 10,
            "guild_id": 1,
            "cached_message": "original"
        }))
    );

    let uncached = message_field("message_reference", reference, json!({}));
    assert_eq!(uncached.unwrap()["cached_message"], Value::Null);
}

/// Tests reactions distinguish built-in from custom emoji.
///
/// Expected: built-in emoji as string, custom emoji as object with `managed: null`
#[test]
fn normalizes_reactions() {
    let value = message_field(
        "reactions",
        json!([
            { "count": 3, "me": true, "emoji": { "id": null, "name": "👍" } },
            { "count": 1, "me": false, "emoji": { "id": "8", "name": "party", "animated": true } }
        ]),
        json!({}),
    );

    assert_eq!(
        value,
        Some(json!([
            { "is_custom_emoji": false, "me": true, "count": 3, "emoji": "👍" },
            {
                "is_custom_emoji": true,
                "me": false,
                "count": 1,
                "emoji": { "id": 8, "name": "party", "animated": true, "managed": null }
            }
        ]))
    );
}

/// Tests message flags expand to named booleans.
///
/// Expected: CROSSPOSTED (1 << 0) set, SUPPRESS_EMBEDS (1 << 2) unset
#[test]
fn expands_message_flags() {
    let value = message_field("flags", json!(1), json!({})).unwrap();

    assert_eq!(value["crossposted"], json!(true));
    assert_eq!(value["suppress_embeds"], json!(false));
}

/// Tests the message type becomes `{name, value}`.
///
/// Expected: value 0 is the regular message type
#[test]
fn normalizes_message_type() {
    let value = message_field("type", json!(0), json!({})).unwrap();

    assert_eq!(value["value"], json!(0));
    assert_eq!(value["name"], json!("Regular"));
}

/// Tests the edit timestamp is stringified, null when never edited.
///
/// Expected: fixed-width UTC string, or null
#[test]
fn stringifies_edit_timestamp() {
    assert_eq!(
        message_field("edited_timestamp", json!("2021-05-01T12:30:00.5+02:00"), json!({})),
        Some(json!("2021-05-01 10:30:00.500000+00:00"))
    );
    assert_eq!(
        message_field("edited_timestamp", Value::Null, json!({})),
        Some(Value::Null)
    );
}

/// Tests unmatched and deprecated fields are omitted.
///
/// Expected: no output for `components`, and `nonce` never enters the field set
#[test]
fn omits_unmatched_fields() {
    let object = raw(json!({ "components": [], "nonce": "abc", "content": "x" }));

    let record = normalize_object(ObjectKind::Message, &object, &channel_context());

    assert!(message_field("components", json!([]), json!({})).is_none());
    assert_eq!(record.len(), 1);
    assert!(record.contains_key("content"));
}
