//! Discord bot running the `backup` command.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents on top of the non-privileged ones:
//! - `GUILD_MEMBERS` - Enumerate the member list (privileged intent)
//! - `MESSAGE_CONTENT` - Read the command and message contents (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod handler;
pub mod start;
