//! Guild backup bot.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Discord gateway client and event handlers
//! - **Service Layer** (`service/`) - The backup pipeline stages and their orchestration
//! - **Model Layer** (`model/`) - Snapshot records, command target and status display
//! - **Error Layer** (`error/`) - Application error types
//! - **Utilities** (`util/`) - Command parsing, archive naming and pacing delays
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - State shared by every backup run
//! - **Startup** (`startup`) - Logging and HTTP client setup

pub mod bot;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
