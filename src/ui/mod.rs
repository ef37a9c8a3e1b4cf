//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `events` - The `update` reducer: every state change goes through it
//! - `input` - Per-screen key handling, called by `update`
//! - `dispatch` - Runs the commands `update` returns as background tasks
//! - `loop_runner` - Main event loop and terminal management
//! - `render` - Frame layout and screen dispatch
//! - `menu`, `articles`, `reader`, `feeds`, `configure` - Screen bodies
//! - `status` - Status and key-hint rows
//! - `helpers` - Shared utility functions

mod articles;
mod configure;
mod dispatch;
mod events;
mod feeds;
mod helpers;
mod input;
mod loop_runner;
mod menu;
mod reader;
mod render;
mod status;

// Re-export the public API
pub use dispatch::Dispatcher;
pub use events::update;
pub use loop_runner::run;
