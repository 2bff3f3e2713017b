use serde_json::Value;
use serenity::all::Permissions;
use std::{collections::HashMap, sync::Arc};

use super::rules::{item_id, items, parse_bits, parse_snowflake, user_name};
use crate::server::model::snapshot::{EntityRef, Record};

#[derive(Debug, Clone, Default)]
struct RoleInfo {
    name: String,
    permissions: u64,
    premium_subscriber: bool,
}

/// Lookups derived from the raw guild, shared by every object normalized in a run.
#[derive(Debug, Default)]
struct GuildLookup {
    guild: Option<EntityRef>,
    owner_id: Option<u64>,
    me: Option<EntityRef>,
    roles: HashMap<u64, RoleInfo>,
    channels: HashMap<u64, String>,
    members: HashMap<u64, String>,
    activities: HashMap<u64, Value>,
}

/// Everything a rule may need beyond the raw value itself.
///
/// Raw Discord payloads only carry IDs for most references (`channel_id`,
/// `mention_roles`, `owner_id`); the context resolves them to names. Cloning is cheap,
/// the guild lookups are shared.
#[derive(Debug, Clone, Default)]
pub struct NormalizeContext {
    lookup: Arc<GuildLookup>,
    channel: Option<EntityRef>,
}

impl NormalizeContext {
    /// Builds the context from a raw guild payload.
    ///
    /// Collections may be arrays or ID-keyed objects; both shapes are accepted.
    ///
    /// # Arguments
    /// - `guild` - Raw guild payload (the serialized Serenity `Guild`)
    /// - `me` - The bot's own member reference, if known
    pub fn from_guild(guild: &Record, me: Option<EntityRef>) -> Self {
        let null = Value::Null;
        let field = |name: &str| guild.get(name).unwrap_or(&null);

        let roles = items(field("roles"))
            .into_iter()
            .filter_map(|role| {
                let id = item_id(role)?;
                let premium_subscriber =
                    role.get("tags").map(premium_subscriber_tag).unwrap_or(false);
                Some((
                    id,
                    RoleInfo {
                        name: role
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        permissions: role.get("permissions").and_then(parse_bits).unwrap_or(0),
                        premium_subscriber,
                    },
                ))
            })
            .collect();

        let channels = items(field("channels"))
            .into_iter()
            .filter_map(|channel| {
                let id = item_id(channel)?;
                let name = channel.get("name").and_then(Value::as_str)?;
                Some((id, name.to_string()))
            })
            .collect();

        let members = items(field("members"))
            .into_iter()
            .filter_map(|member| {
                let user = member.get("user")?;
                Some((item_id(user)?, user_name(user)?.to_string()))
            })
            .collect();

        let activities = items(field("presences"))
            .into_iter()
            .filter_map(|presence| {
                let id = presence.get("user").and_then(item_id)?;
                let activities = presence
                    .get("activities")
                    .cloned()
                    .unwrap_or(Value::Array(Vec::new()));
                Some((id, activities))
            })
            .collect();

        let guild_ref = parse_snowflake(field("id")).map(|id| EntityRef {
            id,
            name: field("name").as_str().map(str::to_string),
        });

        Self {
            lookup: Arc::new(GuildLookup {
                guild: guild_ref,
                owner_id: parse_snowflake(field("owner_id")),
                me,
                roles,
                channels,
                members,
                activities,
            }),
            channel: None,
        }
    }

    /// Returns a context for normalizing the messages of one channel.
    pub fn for_channel(&self, channel: EntityRef) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            channel: Some(channel),
        }
    }

    pub fn guild(&self) -> Option<&EntityRef> {
        self.lookup.guild.as_ref()
    }

    pub fn channel(&self) -> Option<&EntityRef> {
        self.channel.as_ref()
    }

    pub fn me(&self) -> Option<&EntityRef> {
        self.lookup.me.as_ref()
    }

    pub fn owner_id(&self) -> Option<u64> {
        self.lookup.owner_id
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.lookup.roles.contains_key(&role_id)
    }

    pub fn role_ref(&self, role_id: u64) -> EntityRef {
        EntityRef {
            id: role_id,
            name: self.lookup.roles.get(&role_id).map(|r| r.name.clone()),
        }
    }

    pub fn channel_ref(&self, channel_id: u64) -> EntityRef {
        if let Some(channel) = self.channel.as_ref().filter(|c| c.id == channel_id) {
            return channel.clone();
        }
        EntityRef {
            id: channel_id,
            name: self.lookup.channels.get(&channel_id).cloned(),
        }
    }

    pub fn member_ref(&self, user_id: u64) -> EntityRef {
        EntityRef {
            id: user_id,
            name: self.lookup.members.get(&user_id).cloned(),
        }
    }

    /// The role granted to server boosters, if the guild has one.
    pub fn premium_subscriber_role(&self) -> Option<EntityRef> {
        let (id, _) = self
            .lookup
            .roles
            .iter()
            .filter(|(_, role)| role.premium_subscriber)
            .min_by_key(|(id, _)| **id)?;
        Some(self.role_ref(*id))
    }

    /// Activities of the member's cached presence, an empty list when none is cached.
    pub fn activities(&self, user_id: u64) -> Value {
        self.lookup
            .activities
            .get(&user_id)
            .cloned()
            .unwrap_or(Value::Array(Vec::new()))
    }

    /// Resolves a member's guild-wide permissions from their roles.
    ///
    /// The permissions of @everyone (the role whose ID equals the guild ID) and of every
    /// assigned role are combined. The owner and administrators hold every permission.
    /// Channel overwrites are not considered.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the member
    /// - `role_ids` - Roles assigned to the member
    pub fn guild_permissions(&self, user_id: u64, role_ids: &[u64]) -> Permissions {
        if self.lookup.owner_id == Some(user_id) {
            return Permissions::all();
        }

        let everyone = self.guild().map(|g| g.id);
        let bits = everyone
            .iter()
            .chain(role_ids)
            .filter_map(|id| self.lookup.roles.get(id))
            .fold(0u64, |acc, role| acc | role.permissions);

        let permissions = Permissions::from_bits_truncate(bits);
        if permissions.contains(Permissions::ADMINISTRATOR) {
            Permissions::all()
        } else {
            permissions
        }
    }
}

/// Discord marks the booster role by the presence of a `premium_subscriber: null` tag;
/// Serenity serializes it as a boolean. Both shapes are accepted.
pub(super) fn premium_subscriber_tag(tags: &Value) -> bool {
    match tags.get("premium_subscriber") {
        Some(Value::Bool(flag)) => *flag,
        Some(_) => true,
        None => false,
    }
}
