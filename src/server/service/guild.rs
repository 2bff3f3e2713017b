//! Guild metadata stage.
//!
//! The guild is read from the gateway cache, serialized to its wire form and normalized
//! with the guild field table. The same raw payload seeds the [`NormalizeContext`] used
//! by every later stage of the run.

use serenity::all::{ChannelType, Guild, Permissions, RoleId, UserId};

use crate::server::{
    error::AppError,
    model::{
        backup::BackupChannel,
        snapshot::{EntityRef, GuildRecord, Record},
    },
};

use super::normalize::{normalize_object, to_raw, NormalizeContext, ObjectKind};

pub struct GuildSnapshotBuilder {
    raw: Record,
    context: NormalizeContext,
    text_channels: Vec<BackupChannel>,
}

impl GuildSnapshotBuilder {
    /// Prepares the guild stage from a cached guild.
    ///
    /// # Arguments
    /// - `guild` - Guild as held in the gateway cache
    /// - `me` - The bot's own member reference
    ///
    /// # Returns
    /// - `Ok(GuildSnapshotBuilder)` - Builder holding the raw guild and its context
    /// - `Err(AppError::JsonErr)` - The guild could not be serialized
    pub fn new(guild: &Guild, me: Option<EntityRef>) -> Result<Self, AppError> {
        let raw = to_raw(guild)?;
        let context = NormalizeContext::from_guild(&raw, me);

        Ok(Self {
            raw,
            context,
            text_channels: text_channels(guild),
        })
    }

    /// Context resolving references against this guild.
    pub fn context(&self) -> &NormalizeContext {
        &self.context
    }

    /// Text and news channels ordered by position, then ID.
    pub fn text_channels(&self) -> &[BackupChannel] {
        &self.text_channels
    }

    /// Normalizes the guild metadata.
    pub fn build(&self) -> GuildRecord {
        normalize_object(ObjectKind::Guild, &self.raw, &self.context)
    }
}

/// Text and news channels of a guild ordered by position, then ID.
pub fn text_channels(guild: &Guild) -> Vec<BackupChannel> {
    let mut channels: Vec<_> = guild
        .channels
        .values()
        .filter(|channel| matches!(channel.kind, ChannelType::Text | ChannelType::News))
        .collect();
    channels.sort_by_key(|channel| (channel.position, channel.id));

    channels
        .into_iter()
        .map(|channel| BackupChannel::new(channel.id, channel.name.clone()))
        .collect()
}

/// Returns whether a member holds the administrator permission guild-wide.
///
/// The owner is always an administrator. Otherwise the permissions of @everyone and of
/// the member's roles are combined.
///
/// # Arguments
/// - `guild` - Guild as held in the gateway cache
/// - `user_id` - Discord user ID of the member
/// - `role_ids` - Roles assigned to the member
pub fn is_administrator(guild: &Guild, user_id: UserId, role_ids: &[RoleId]) -> bool {
    if guild.owner_id == user_id {
        return true;
    }

    let everyone = RoleId::new(guild.id.get());
    std::iter::once(&everyone)
        .chain(role_ids)
        .filter_map(|id| guild.roles.get(id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions)
        .contains(Permissions::ADMINISTRATOR)
}
