//! Backup pipeline stages.
//!
//! Each stage of a backup run lives in its own module, leaves first:
//! - `normalize` - Field tables and pure rules turning raw Discord objects into records
//! - `guild` - Guild metadata and the channel selection
//! - `member` - Paginated member enumeration
//! - `history` - Paginated message history of one channel
//! - `fetch` - Optional download of attachment and sticker bytes
//! - `progress` - The live status message
//! - `package` - JSON serialization and in-memory zip archive
//! - `upload` - Delivery of the archive and share link resolution
//! - `backup` - The orchestrator running the stages in order
//!
//! Discord access goes through the [`source::PlatformSource`] trait so stages can be
//! exercised against in-memory fakes.

pub mod backup;
pub mod fetch;
pub mod guild;
pub mod history;
pub mod member;
pub mod normalize;
pub mod package;
pub mod progress;
pub mod source;
pub mod upload;

#[cfg(test)]
mod test;
