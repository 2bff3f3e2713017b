use serenity::all::ChannelId;

use crate::server::{error::argument::ArgumentError, model::backup::BackupTarget};

/// Name of the backup command.
pub const BACKUP_COMMAND: &str = "backup";

/// Matches a message against the `backup` command.
///
/// # Arguments
/// - `prefix` - Command prefix
/// - `content` - Message text
///
/// # Returns
/// - `Some(arg)` - The message invokes the command; `arg` is its first argument, if any
/// - `None` - The message is not the backup command
pub fn command_argument<'a>(prefix: &str, content: &'a str) -> Option<Option<&'a str>> {
    let mut words = content.strip_prefix(prefix)?.split_whitespace();

    if words.next()? != BACKUP_COMMAND {
        return None;
    }

    Some(words.next())
}

/// Parses the argument of the `backup` command.
///
/// Accepts the literal `all`, a bare channel ID or a channel mention (`<#id>`).
///
/// # Arguments
/// - `prefix` - Command prefix, used in the rejection text for a missing argument
/// - `arg` - First whitespace-separated word after the command name, if any
///
/// # Returns
/// - `Ok(BackupTarget::AllChannels)` - Argument was `all`
/// - `Ok(BackupTarget::Channel(id))` - Argument named a single channel
/// - `Err(ArgumentError::Missing)` - No argument was given
/// - `Err(ArgumentError::InvalidChannel)` - Argument is not a channel reference
pub fn parse_backup_argument(prefix: &str, arg: Option<&str>) -> Result<BackupTarget, ArgumentError> {
    let Some(arg) = arg.filter(|a| !a.is_empty()) else {
        return Err(ArgumentError::Missing(prefix.to_string()));
    };

    if arg == "all" {
        return Ok(BackupTarget::AllChannels);
    }

    let digits = arg
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(arg);

    parse_channel_id(digits)
        .map(BackupTarget::Channel)
        .ok_or_else(|| ArgumentError::InvalidChannel(arg.to_string()))
}

fn parse_channel_id(digits: &str) -> Option<ChannelId> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Snowflakes are never zero and ChannelId::new panics on it
    digits
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(ChannelId::new)
}
