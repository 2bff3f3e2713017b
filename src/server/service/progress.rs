//! Live status display of a backup run.
//!
//! The [`ProgressReporter`] owns the [`ProgressStatus`] of the run and republishes it
//! through a [`StatusSurface`] after every milestone. On Discord the surface is a single
//! bot message that is posted once and edited in place afterwards.

use serenity::{
    all::{ChannelId, CreateMessage, EditMessage, MessageId},
    async_trait,
    http::Http,
};
use std::{sync::Arc, time::Duration};

use crate::server::{
    error::AppError,
    model::{
        backup::{BackupChannel, BackupReport},
        progress::{ArchiveLink, ProgressStatus},
    },
};

pub const START_MESSAGE: &str = "Starting the backup process in 10 seconds... This might take \
several minutes/hours depending on how many messages are on the server/channel.";
pub const GUILD_MESSAGE: &str = "Getting guild data...";
pub const MEMBERS_MESSAGE: &str = "Getting members data...";

/// Where the status is displayed.
#[async_trait]
pub trait StatusSurface: Send {
    /// Displays the status, replacing the previously displayed one.
    async fn publish(&mut self, status: &ProgressStatus) -> Result<(), AppError>;
}

/// Status message in a Discord channel, edited in place after the first post.
pub struct DiscordStatusSurface {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: Option<MessageId>,
}

impl DiscordStatusSurface {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self {
            http,
            channel_id,
            message_id: None,
        }
    }
}

#[async_trait]
impl StatusSurface for DiscordStatusSurface {
    async fn publish(&mut self, status: &ProgressStatus) -> Result<(), AppError> {
        let embed = status.to_embed();

        match self.message_id {
            Some(message_id) => {
                let message = EditMessage::new().embed(embed);
                self.http
                    .edit_message(self.channel_id, message_id, &message, vec![])
                    .await?;
            }
            None => {
                let message = CreateMessage::new().embed(embed);
                let posted = self.channel_id.send_message(&self.http, message).await?;
                self.message_id = Some(posted.id);
            }
        }

        Ok(())
    }
}

/// Formats an elapsed time in seconds with two decimals, e.g. `1.25s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

pub struct ProgressReporter<'a> {
    surface: &'a mut dyn StatusSurface,
    status: ProgressStatus,
}

impl<'a> ProgressReporter<'a> {
    /// Creates a reporter for a run over `total_channels` channels.
    pub fn new(surface: &'a mut dyn StatusSurface, total_channels: usize) -> Self {
        Self {
            surface,
            status: ProgressStatus {
                total_channels,
                ..ProgressStatus::default()
            },
        }
    }

    pub fn status(&self) -> &ProgressStatus {
        &self.status
    }

    /// Posts the initial status.
    pub async fn announce_start(&mut self) -> Result<(), AppError> {
        self.update(START_MESSAGE).await
    }

    /// Replaces the latest update text and republishes.
    pub async fn update(&mut self, latest: impl Into<String>) -> Result<(), AppError> {
        self.status.latest = latest.into();
        self.surface.publish(&self.status).await
    }

    /// Records a channel that was backed up.
    pub async fn channel_finished(
        &mut self,
        channel: &BackupChannel,
        messages: usize,
        elapsed: Duration,
    ) -> Result<(), AppError> {
        self.status.completed_channels += 1;
        self.status.messages += messages;
        self.update(format!(
            "There were {} messages in {} (took {}).",
            messages,
            channel.mention(),
            format_elapsed(elapsed)
        ))
        .await
    }

    /// Records a channel the bot could not read. It still counts as attempted.
    pub async fn channel_forbidden(&mut self, channel: &BackupChannel) -> Result<(), AppError> {
        self.status.completed_channels += 1;
        self.update(format!(
            "Could not access channel: [ {} ]! Skipping!\nResuming in 5 seconds...",
            channel.name
        ))
        .await
    }

    /// Shows the archive link, then the completion summary.
    pub async fn finish(&mut self, report: &BackupReport) -> Result<(), AppError> {
        self.status.link = match &report.link {
            Some(link) => ArchiveLink::Shared(link.clone()),
            None => ArchiveLink::Unavailable,
        };
        self.surface.publish(&self.status).await?;

        self.update(completion_summary(report)).await
    }
}

/// Longest value Discord accepts for an embed field.
pub const FIELD_VALUE_LIMIT: usize = 1024;

const SUMMARY_HEAD: &str = "Backup finished!\nSuccessfully backed up: ";
const SUMMARY_FAILED: &str = "\nFailed to backup the following channels: ";

/// Final status text listing the backed up and failed channels.
///
/// An empty failure list is shown as `None`. Lists that would push the text past
/// [`FIELD_VALUE_LIMIT`] are cut short and end with the number of channels left out;
/// the failure list may take at most half of the available room.
pub fn completion_summary(report: &BackupReport) -> String {
    let took = format!("\nTook: {}", format_elapsed(report.elapsed));
    let budget = FIELD_VALUE_LIMIT
        .saturating_sub(SUMMARY_HEAD.len() + SUMMARY_FAILED.len() + took.len());

    let failed = if report.failed.is_empty() {
        "None".to_string()
    } else {
        mention_list(&report.failed, budget / 2)
    };
    let succeeded = mention_list(&report.succeeded, budget.saturating_sub(failed.len()));

    format!("{SUMMARY_HEAD}{succeeded}{SUMMARY_FAILED}{failed}{took}")
}

/// Joins channel mentions with commas, keeping within `budget` bytes.
fn mention_list(mentions: &[String], budget: usize) -> String {
    let joined = mentions.join(", ");
    if joined.len() <= budget {
        return joined;
    }

    let mut list = String::new();
    let mut shown = 0;
    for mention in mentions {
        let separator = if shown == 0 { "" } else { ", " };
        let left_out = more(mentions.len() - shown - 1);
        if list.len() + separator.len() + mention.len() + left_out.len() > budget {
            break;
        }
        list.push_str(separator);
        list.push_str(mention);
        shown += 1;
    }

    let hidden = mentions.len() - shown;
    if shown == 0 {
        format!("{} channels", hidden)
    } else {
        format!("{}{}", list, more(hidden))
    }
}

fn more(hidden: usize) -> String {
    if hidden == 0 {
        String::new()
    } else {
        format!(" and {} more", hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(succeeded: &[&str], failed: &[&str]) -> BackupReport {
        BackupReport {
            completed: succeeded.len() + failed.len(),
            total: succeeded.len() + failed.len(),
            messages: 0,
            succeeded: succeeded.iter().map(|s| s.to_string()).collect(),
            failed: failed.iter().map(|s| s.to_string()).collect(),
            archive_name: "guild_data.json.zip".to_string(),
            link: None,
            elapsed: Duration::from_millis(1250),
            stages: Vec::new(),
        }
    }

    #[test]
    fn formats_elapsed_with_two_decimals() {
        assert_eq!(format_elapsed(Duration::from_millis(1234)), "1.23s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00s");
    }

    /// Tests the summary lists `None` when no channel failed.
    ///
    /// Expected: success list joined with commas, failure list `None`
    #[test]
    fn summary_without_failures() {
        let summary = completion_summary(&report(&["<#1>", "<#2>"], &[]));

        assert_eq!(
            summary,
            "Backup finished!\nSuccessfully backed up: <#1>, <#2>\n\
             Failed to backup the following channels: None\nTook: 1.25s"
        );
    }

    #[test]
    fn summary_with_failures() {
        let summary = completion_summary(&report(&[], &["<#3>"]));

        assert!(summary.contains("Successfully backed up: \n"));
        assert!(summary.contains("Failed to backup the following channels: <#3>\n"));
    }

    /// Tests a summary of many channels stays within the embed field limit.
    ///
    /// Expected: the success list ends with the number left out, failures stay complete
    #[test]
    fn summary_of_many_channels_fits_field() {
        let succeeded: Vec<String> = (0..60)
            .map(|n| format!("<#{}>", 1_000_000_000_000_000_000u64 + n))
            .collect();
        let succeeded: Vec<&str> = succeeded.iter().map(String::as_str).collect();

        let summary = completion_summary(&report(&succeeded, &["<#3>", "<#4>"]));

        assert!(summary.len() <= FIELD_VALUE_LIMIT);
        assert!(summary.ends_with("\nFailed to backup the following channels: <#3>, <#4>\nTook: 1.25s"));

        let list = summary
            .split("Successfully backed up: ")
            .nth(1)
            .and_then(|rest| rest.split('\n').next())
            .unwrap();
        let (shown, hidden) = list.rsplit_once(" and ").unwrap();
        let hidden: usize = hidden.trim_end_matches(" more").parse().unwrap();
        assert_eq!(shown.split(", ").count() + hidden, 60);
        assert!(shown.starts_with("<#1000000000000000000>, <#1000000000000000001>"));
    }
}
