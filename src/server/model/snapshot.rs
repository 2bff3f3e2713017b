use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A normalized object: field name to JSON-safe value.
pub type Record = Map<String, Value>;

/// Normalized guild metadata.
pub type GuildRecord = Record;

/// Normalized guild member.
pub type MemberRecord = Record;

/// Normalized message.
pub type MessageRecord = Record;

/// Messages of one channel keyed by their stringified creation timestamp.
///
/// Timestamps are rendered with a fixed width, so the map's lexical key order is the
/// chronological order of the messages.
pub type ChannelHistory = BTreeMap<String, MessageRecord>;

/// The complete normalized state of a guild at export time.
///
/// Built once per backup run and held in memory until it is packaged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuildSnapshot {
    pub guild: GuildRecord,
    /// Members keyed by user ID.
    pub members: BTreeMap<u64, MemberRecord>,
    /// Message histories keyed by channel ID.
    pub channels: BTreeMap<u64, ChannelHistory>,
}

/// Collapsed reference to another Discord entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: u64,
    /// `None` when the referenced entity is not known to the bot.
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Converts the reference to its `{id, name}` JSON form.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "id": self.id, "name": self.name })
    }
}
