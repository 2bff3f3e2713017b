//! Guild Backup Test Utils
//!
//! Provides shared testing utilities for the guild backup bot. The crate offers factories
//! for Serenity model objects built by deserializing JSON, the same way Discord's API
//! payloads arrive at the client, and a one-shot local HTTP endpoint for code that talks
//! to external services.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{channel_json, TestGuildBuilder};
//!
//! #[tokio::test]
//! async fn backs_up_guild() {
//!     let guild = TestGuildBuilder::new(1, "Test Guild")
//!         .channel(channel_json(10, 1, "general", 0, 0))
//!         .build();
//!     // Use in your tests...
//! }
//! ```

pub mod http;
pub mod serenity;
