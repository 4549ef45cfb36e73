//! Coindrop - a tiny countdown coin game.
//!
//! A 10-second countdown runs; when it expires the player loses, collects a
//! consolation coin, and may watch a (simulated) rewarded video ad for more
//! coins before retrying. This module exposes the game logic for testing and
//! external use; the terminal front end lives in the binary.

pub mod ads;
pub mod build_info;
pub mod constants;
pub mod countdown;
pub mod game_session;
pub mod notices;
pub mod save_manager;
pub mod simulated_ads;
pub mod ui;

pub use constants::*;
pub use game_session::{GameSession, SessionRecord};
