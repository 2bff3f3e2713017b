//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (Guild, Role, Member, Message) for testing purposes. The `*_json` functions return the
//! raw Discord payload and are used to compose nested objects such as a guild holding
//! channels and roles; the `create_test_*` functions deserialize a payload into the
//! Serenity type.
//!
//! # Available Factories
//!
//! - `guild::TestGuildBuilder` - Create Serenity Guild objects with nested collections
//! - `role::create_test_role` - Create Serenity Role objects
//! - `member::create_test_member` - Create Serenity Member objects
//! - `message::create_test_message` - Create Serenity Message objects

pub mod channel;
pub mod guild;
pub mod member;
pub mod message;
pub mod role;
pub mod user;

// Re-export commonly used functions for convenience
pub use channel::channel_json;
pub use guild::TestGuildBuilder;
pub use member::{create_test_member, member_json};
pub use message::{create_test_message, create_test_message_with, snowflake};
pub use role::{create_test_role, role_json};
