use serenity::all::ChannelId;
use std::time::Duration;

use crate::server::{
    config::Config,
    util::pacer::{SKIP_DELAY, START_DELAY},
};

/// Channels selected by the `backup` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTarget {
    /// Every text channel of the guild.
    AllChannels,
    /// A single channel.
    Channel(ChannelId),
}

impl BackupTarget {
    /// Returns whether the channel is part of the backup.
    pub fn includes(&self, channel_id: ChannelId) -> bool {
        match self {
            Self::AllChannels => true,
            Self::Channel(id) => *id == channel_id,
        }
    }

    /// Number of channels announced in the channel counter.
    pub fn announced_total(&self, text_channels: usize) -> usize {
        match self {
            Self::AllChannels => text_channels,
            Self::Channel(_) => 1,
        }
    }
}

/// A text channel selected for backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupChannel {
    pub id: ChannelId,
    pub name: String,
}

impl BackupChannel {
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Channel mention as rendered in the status display, e.g. `<#123>`.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id.get())
    }
}

/// Settings threaded through one backup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupOptions {
    /// Download attachment and sticker bytes into the snapshot.
    pub fetch_attachments: bool,
    /// Pause after the status message was posted.
    pub start_delay: Duration,
    /// Pause after an inaccessible channel was skipped.
    pub skip_delay: Duration,
}

impl BackupOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch_attachments: config.fetch_attachments,
            ..Self::default()
        }
    }
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            fetch_attachments: false,
            start_delay: START_DELAY,
            skip_delay: SKIP_DELAY,
        }
    }
}

/// Stages of a backup run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStage {
    Idle,
    ValidatingArgument,
    AnnouncingStart,
    FetchingGuildMetadata,
    FetchingMembers,
    FetchingHistory,
    Normalizing,
    Recording,
    Packaging,
    Uploading,
    Done,
}

/// Summary of a finished backup run.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupReport {
    /// Number of channels attempted.
    pub completed: usize,
    /// Number of channels announced.
    pub total: usize,
    /// Messages stored across all successful channels.
    pub messages: usize,
    /// Mentions of the channels that were backed up.
    pub succeeded: Vec<String>,
    /// Mentions of the channels the bot could not read.
    pub failed: Vec<String>,
    /// Name of the uploaded archive.
    pub archive_name: String,
    /// Share link, `None` when the upload produced no link.
    pub link: Option<String>,
    pub elapsed: Duration,
    /// Stages entered by the orchestrator, in order.
    pub stages: Vec<BackupStage>,
}
