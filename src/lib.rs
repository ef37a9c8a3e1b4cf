//! feedwatch: a terminal feed reader.
//!
//! Polls RSS/Atom sources on an interval, merges them newest-first, tracks
//! which article links have already been shown, and notifies about new ones.
//! The interactive session is a pure reducer (`ui::update`) over `App`,
//! fed by an event loop that runs its commands as background tasks.

pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod feed;
pub mod notify;
pub mod novelty;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
