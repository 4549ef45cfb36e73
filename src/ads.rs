//! Rewarded-ad provider contract.
//!
//! The game session never talks to an ad network directly; it only sees this
//! narrow interface plus the events the provider reports back. The host is
//! responsible for draining `poll_events` on the same loop that drives the
//! session, so everything stays on one logical thread.

use std::fmt;

/// Notifications reported by a rewarded-ad provider.
///
/// Only `Loaded`/`LoadFailed` (via the provider's load state) and `Rewarded`
/// affect game state; the rest exist so the host can surface them to the
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdEvent {
    Loaded,
    LoadFailed,
    Opened,
    Started,
    Closed,
    LeftApplication,
    Rewarded { amount: u32 },
}

impl fmt::Display for AdEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdEvent::Loaded => write!(f, "Ad loaded."),
            AdEvent::LoadFailed => write!(f, "Ad failed to load."),
            AdEvent::Opened => write!(f, "Ad opened."),
            AdEvent::Started => write!(f, "Ad started."),
            AdEvent::Closed => write!(f, "Ad closed."),
            AdEvent::LeftApplication => write!(f, "Ad left application."),
            AdEvent::Rewarded { amount } => write!(f, "Ad triggered reward: +{} coins.", amount),
        }
    }
}

/// A rewarded video ad source.
///
/// Loading and showing are fire-and-forget; outcomes arrive later through
/// `poll_events`. A load failure is a normal outcome: `is_loaded` simply
/// stays false.
pub trait RewardedAdProvider {
    /// Begin loading an ad. Does nothing if one is already loaded or loading.
    fn request_load(&mut self);

    /// True once a loaded ad is ready to show.
    fn is_loaded(&self) -> bool;

    /// Play the loaded ad. Only valid when `is_loaded` returns true;
    /// eventually reports `AdEvent::Rewarded` if the player watches through.
    fn show(&mut self);

    /// Host went to the background; halt any playback in progress.
    fn pause(&mut self);

    /// Host returned to the foreground.
    fn resume(&mut self);

    /// Permanent teardown; no further events will be delivered.
    fn dispose(&mut self);

    /// Drain pending notifications, oldest first.
    fn poll_events(&mut self) -> Vec<AdEvent>;
}
