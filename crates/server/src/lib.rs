//! Server crate for the ReelFeed feed engine.
//!
//! This crate contains the selector that coordinates sources and filters,
//! and the session that owns one viewer's feed.
//!
//! - **selector**: one stateless selection pass (`FeedSelector`)
//! - **session**: preferences, cursor, likes and the stale load guard (`FeedSession`)
//! - **selection**: the ordered feed with its cursor (`FeedSelection`)
//! - **config**: feed sizing (`FeedConfig`)

pub mod config;
pub mod selection;
pub mod selector;
pub mod session;

pub use config::FeedConfig;
pub use selection::{FeedItem, FeedSelection};
pub use selector::FeedSelector;
pub use session::{FeedSession, LoadTicket};
