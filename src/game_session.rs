//! The game-session state machine.
//!
//! One round is a 10-second countdown; when it expires the player loses and
//! is paid a small consolation reward, after which they may retry or watch a
//! rewarded ad for more coins. The session owns the countdown and the flags
//! the host persists across teardown; everything else (screen, ad network,
//! save file) stays behind narrow interfaces.
//!
//! All transitions are infallible and must be invoked from a single logical
//! thread; the host funnels timer, input and ad callbacks through one loop.

use crate::ads::RewardedAdProvider;
use crate::constants::{GAME_OVER_REWARD, ROUND_LENGTH_SECONDS};
use crate::countdown::{Countdown, CountdownEvent};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Flat snapshot of a session for host-triggered save/restore.
///
/// Restoring never restarts a timer; the host calls [`GameSession::resume`]
/// afterwards based on the restored flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub is_paused: bool,
    pub is_over: bool,
    pub time_remaining: u64,
    pub coin_count: u32,
}

/// Countdown/coin/pause/over state for one player, spanning many rounds.
#[derive(Debug)]
pub struct GameSession {
    coin_count: u32,
    /// Displayed whole seconds, biased up by one so the live timer never
    /// shows 0 before it actually expires.
    time_remaining: u64,
    paused: bool,
    over: bool,
    /// Whether the "watch ad" action is currently offered. Re-evaluated at
    /// game over and on foregrounding, like the ad button it models.
    watch_ad_available: bool,
    countdown: Option<Countdown>,
}

impl GameSession {
    /// Fresh session for a first-ever launch: zero coins, nothing running.
    pub fn new() -> Self {
        Self {
            coin_count: 0,
            time_remaining: 0,
            paused: false,
            over: false,
            watch_ad_available: false,
            countdown: None,
        }
    }

    pub fn coin_count(&self) -> u32 {
        self.coin_count
    }

    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// True while a countdown is live (started and neither paused nor over).
    pub fn is_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// The retry action is offered exactly while the round is over.
    pub fn retry_available(&self) -> bool {
        self.over
    }

    pub fn watch_ad_available(&self) -> bool {
        self.watch_ad_available
    }

    /// Start (or restart, after game over) a round: full-length countdown,
    /// flags cleared, and a fresh ad load kicked off for the upcoming
    /// game-over moment. Any previous countdown is cancelled by replacement.
    pub fn start_new_round(&mut self, ads: &mut dyn RewardedAdProvider) {
        self.countdown = Some(Countdown::new(Duration::from_secs(ROUND_LENGTH_SECONDS)));
        self.time_remaining = ROUND_LENGTH_SECONDS;
        self.paused = false;
        self.over = false;
        self.watch_ad_available = false;
        ads.request_load();
    }

    /// Host went to the background. Cancels the countdown, keeping the
    /// remaining seconds for a later `resume`. Idempotent.
    pub fn pause(&mut self, ads: &mut dyn RewardedAdProvider) {
        self.countdown = None;
        self.paused = true;
        ads.pause();
    }

    /// Host returned to the foreground. Restarts the countdown from the
    /// retained remaining time, unless the round is over, in which case game
    /// state is untouched (retry, not resume) and only the watch-ad offer is
    /// re-evaluated.
    pub fn resume(&mut self, ads: &mut dyn RewardedAdProvider) {
        ads.resume();
        if self.over {
            self.watch_ad_available = ads.is_loaded();
            return;
        }
        if self.paused {
            self.countdown = Some(Countdown::new(Duration::from_secs(self.time_remaining)));
            self.paused = false;
        }
    }

    /// Drive the owned countdown by `elapsed` wall-clock time. Does nothing
    /// while paused, over, or before the first round.
    pub fn advance(&mut self, elapsed: Duration, ads: &mut dyn RewardedAdProvider) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        let events = countdown.advance(elapsed);
        for event in events {
            match event {
                CountdownEvent::Tick { remaining } => self.on_tick(remaining),
                CountdownEvent::Finished => {
                    self.countdown = None;
                    self.on_timer_expired(ads);
                }
            }
        }
    }

    /// Countdown tick: update the displayed whole seconds. The `+ 1` biases
    /// the display up by one second so it never reads 0 while the timer is
    /// still live; kept for parity with the display this reimplements.
    pub fn on_tick(&mut self, remaining: Duration) {
        self.time_remaining = remaining.as_millis() as u64 / 1000 + 1;
    }

    /// Countdown expired: the round is lost. Pays the consolation reward and
    /// offers the watch-ad action if the provider already has an ad ready.
    pub fn on_timer_expired(&mut self, ads: &dyn RewardedAdProvider) {
        self.countdown = None;
        self.over = true;
        self.time_remaining = 0;
        self.add_coins(GAME_OVER_REWARD);
        self.watch_ad_available = ads.is_loaded();
    }

    /// Credit coins. Zero is a legal no-op; amounts are trusted.
    pub fn add_coins(&mut self, amount: u32) {
        self.coin_count = self.coin_count.saturating_add(amount);
    }

    /// The ad provider reported a completed rewarded view. Valid in any
    /// state, including mid-round.
    pub fn on_ad_reward(&mut self, amount: u32) {
        self.add_coins(amount);
    }

    /// Player chose to watch the ad. Withdraws the offer and hands off to
    /// the provider if it still has the ad.
    pub fn show_rewarded_ad(&mut self, ads: &mut dyn RewardedAdProvider) {
        self.watch_ad_available = false;
        if ads.is_loaded() {
            ads.show();
        }
    }

    /// Permanent teardown when the screen closes for good.
    pub fn dispose(&mut self, ads: &mut dyn RewardedAdProvider) {
        self.countdown = None;
        ads.dispose();
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            is_paused: self.paused,
            is_over: self.over,
            time_remaining: self.time_remaining,
            coin_count: self.coin_count,
        }
    }

    /// Rebuild a session from a saved record. No countdown is started; the
    /// host decides whether to `resume` based on the restored flags.
    pub fn from_record(record: SessionRecord) -> Self {
        Self {
            coin_count: record.coin_count,
            time_remaining: record.time_remaining,
            paused: record.is_paused,
            over: record.is_over,
            watch_ad_available: false,
            countdown: None,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::AdEvent;

    /// Scriptable stand-in for the ad network.
    #[derive(Default)]
    struct FakeAds {
        loaded: bool,
        load_requests: u32,
        shows: u32,
        pauses: u32,
        resumes: u32,
        disposed: bool,
    }

    impl RewardedAdProvider for FakeAds {
        fn request_load(&mut self) {
            self.load_requests += 1;
        }
        fn is_loaded(&self) -> bool {
            self.loaded
        }
        fn show(&mut self) {
            self.shows += 1;
        }
        fn pause(&mut self) {
            self.pauses += 1;
        }
        fn resume(&mut self) {
            self.resumes += 1;
        }
        fn dispose(&mut self) {
            self.disposed = true;
        }
        fn poll_events(&mut self) -> Vec<AdEvent> {
            Vec::new()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new();
        assert_eq!(session.coin_count(), 0);
        assert_eq!(session.time_remaining(), 0);
        assert!(!session.is_paused());
        assert!(!session.is_over());
        assert!(!session.is_running());
        assert!(!session.retry_available());
    }

    #[test]
    fn test_start_new_round_requests_ad_load() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();

        session.start_new_round(&mut ads);

        assert!(session.is_running());
        assert_eq!(session.time_remaining(), 10);
        assert_eq!(ads.load_requests, 1);
    }

    #[test]
    fn test_tick_display_is_biased_up_one_second() {
        let mut session = GameSession::new();

        session.on_tick(ms(9_950));
        assert_eq!(session.time_remaining(), 10);

        session.on_tick(ms(4_000));
        assert_eq!(session.time_remaining(), 5);

        // Even in the final subsecond the display holds at 1, never 0.
        session.on_tick(ms(120));
        assert_eq!(session.time_remaining(), 1);
    }

    #[test]
    fn test_expiry_pays_game_over_reward() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);

        session.on_timer_expired(&ads);

        assert!(session.is_over());
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.coin_count(), GAME_OVER_REWARD);
        assert!(session.retry_available());
        assert!(!session.watch_ad_available());
    }

    #[test]
    fn test_expiry_offers_watch_when_ad_is_loaded() {
        let mut ads = FakeAds {
            loaded: true,
            ..FakeAds::default()
        };
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);

        session.on_timer_expired(&ads);

        assert!(session.watch_ad_available());
    }

    #[test]
    fn test_pause_retains_remaining_time() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(6_000), &mut ads);
        let before = session.time_remaining();

        session.pause(&mut ads);

        assert!(session.is_paused());
        assert!(!session.is_running());
        assert_eq!(session.time_remaining(), before);
        assert_eq!(ads.pauses, 1);
    }

    #[test]
    fn test_resume_restarts_from_retained_time() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(6_050), &mut ads);
        assert_eq!(session.time_remaining(), 4);

        session.pause(&mut ads);
        session.resume(&mut ads);

        assert!(!session.is_paused());
        assert!(session.is_running());
        assert_eq!(session.time_remaining(), 4);
        assert_eq!(ads.resumes, 1);

        // The restarted countdown runs from 4 seconds, not from 10: after
        // 4 more seconds it must expire.
        session.advance(ms(4_000), &mut ads);
        assert!(session.is_over());
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);

        session.pause(&mut ads);
        let remaining = session.time_remaining();
        session.pause(&mut ads);

        assert!(session.is_paused());
        assert_eq!(session.time_remaining(), remaining);
    }

    #[test]
    fn test_resume_after_game_over_is_a_no_op() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(10_000), &mut ads);
        assert!(session.is_over());
        let coins = session.coin_count();

        session.resume(&mut ads);

        assert!(session.is_over());
        assert!(!session.is_running());
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.coin_count(), coins);
        // The ad collaborator still gets its lifecycle hook.
        assert_eq!(ads.resumes, 1);
    }

    #[test]
    fn test_resume_after_game_over_reevaluates_watch_offer() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(10_000), &mut ads);
        assert!(!session.watch_ad_available());

        // The ad finished loading while the screen was backgrounded.
        ads.loaded = true;
        session.resume(&mut ads);

        assert!(session.watch_ad_available());
    }

    #[test]
    fn test_add_coins_accumulates_and_zero_is_noop() {
        let mut session = GameSession::new();
        session.add_coins(3);
        session.add_coins(0);
        session.add_coins(4);
        assert_eq!(session.coin_count(), 7);
    }

    #[test]
    fn test_add_coins_saturates() {
        let mut session = GameSession::new();
        session.add_coins(u32::MAX);
        session.add_coins(10);
        assert_eq!(session.coin_count(), u32::MAX);
    }

    #[test]
    fn test_ad_reward_lands_regardless_of_round_state() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(10_000), &mut ads);
        session.pause(&mut ads);

        session.on_ad_reward(5);

        assert_eq!(session.coin_count(), GAME_OVER_REWARD + 5);
    }

    #[test]
    fn test_show_rewarded_ad_withdraws_offer_and_shows() {
        let mut ads = FakeAds {
            loaded: true,
            ..FakeAds::default()
        };
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(10_000), &mut ads);
        assert!(session.watch_ad_available());

        session.show_rewarded_ad(&mut ads);

        assert!(!session.watch_ad_available());
        assert_eq!(ads.shows, 1);
    }

    #[test]
    fn test_show_rewarded_ad_without_loaded_ad_does_not_show() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();

        session.show_rewarded_ad(&mut ads);

        assert_eq!(ads.shows, 0);
    }

    #[test]
    fn test_retry_after_game_over_starts_fresh_round_keeping_coins() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(10_000), &mut ads);
        assert_eq!(session.coin_count(), GAME_OVER_REWARD);

        session.start_new_round(&mut ads);

        assert!(!session.is_over());
        assert!(session.is_running());
        assert_eq!(session.time_remaining(), 10);
        // Coins survive the retry; only a fresh launch starts from zero.
        assert_eq!(session.coin_count(), GAME_OVER_REWARD);
        assert_eq!(ads.load_requests, 2);
    }

    #[test]
    fn test_start_new_round_replaces_running_countdown() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(7_000), &mut ads);

        session.start_new_round(&mut ads);

        assert_eq!(session.time_remaining(), 10);
        // The old countdown is gone: only ten fresh seconds remain.
        session.advance(ms(9_000), &mut ads);
        assert!(!session.is_over());
        session.advance(ms(1_000), &mut ads);
        assert!(session.is_over());
    }

    #[test]
    fn test_dispose_cancels_countdown_and_forwards() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);

        session.dispose(&mut ads);

        assert!(!session.is_running());
        assert!(ads.disposed);
    }

    #[test]
    fn test_record_round_trip() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);
        session.advance(ms(3_050), &mut ads);
        session.pause(&mut ads);
        session.add_coins(12);

        let record = session.to_record();
        let restored = GameSession::from_record(record.clone());

        assert_eq!(restored.to_record(), record);
        assert_eq!(restored.coin_count(), 12);
        assert_eq!(restored.time_remaining(), session.time_remaining());
        assert!(restored.is_paused());
        assert!(!restored.is_over());
        // Restore never restarts the countdown.
        assert!(!restored.is_running());
    }

    #[test]
    fn test_expiry_fires_exactly_once_over_long_advance() {
        let mut ads = FakeAds::default();
        let mut session = GameSession::new();
        session.start_new_round(&mut ads);

        // Well past the round length in one go, then keep advancing.
        session.advance(ms(60_000), &mut ads);
        session.advance(ms(60_000), &mut ads);

        assert!(session.is_over());
        assert_eq!(session.coin_count(), GAME_OVER_REWARD);
    }
}
