use thiserror::Error;

/// Rejections of the `backup` command argument.
///
/// The display text of each variant is sent back to the invoking channel verbatim,
/// so it is written for the user rather than for the logs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// No argument was given after the command name.
    ///
    /// # Fields
    /// - Command prefix, used to show the correct invocation
    #[error("❌ Specify at least one channel, or `{0}backup all` to backup all channels.")]
    Missing(String),

    /// The argument is neither `all`, a channel ID nor a channel mention.
    ///
    /// # Fields
    /// - The argument as typed by the user
    #[error("❌ `{0}` is not a valid channel!")]
    InvalidChannel(String),
}
