//! Simulated rewarded-ad network.
//!
//! Stands in for a real ad SDK so the game is playable offline: loading takes
//! a randomized moment and can fail, playback takes a few seconds and then
//! pays out. Work happens on background threads; results come back over a
//! channel that the host drains on its own loop via `poll_events`, so the
//! game session itself never sees another thread.

use crate::ads::{AdEvent, RewardedAdProvider};
use crate::constants::{
    AD_LOAD_FAILURE_CHANCE, AD_LOAD_MAX_MS, AD_LOAD_MIN_MS, AD_PLAYBACK_MS, AD_REWARD_COINS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often playback threads check the pause/dispose flags.
const PLAYBACK_POLL_MS: u64 = 25;

/// Tunable behavior of the simulated network.
#[derive(Debug, Clone)]
pub struct AdNetworkConfig {
    pub load_min: Duration,
    pub load_max: Duration,
    pub failure_chance: f64,
    pub playback: Duration,
    pub reward: u32,
}

impl Default for AdNetworkConfig {
    fn default() -> Self {
        Self {
            load_min: Duration::from_millis(AD_LOAD_MIN_MS),
            load_max: Duration::from_millis(AD_LOAD_MAX_MS),
            failure_chance: AD_LOAD_FAILURE_CHANCE,
            playback: Duration::from_millis(AD_PLAYBACK_MS),
            reward: AD_REWARD_COINS,
        }
    }
}

/// A [`RewardedAdProvider`] backed by background threads and a channel.
pub struct SimulatedAdNetwork<R: Rng = StdRng> {
    config: AdNetworkConfig,
    rng: R,
    events_tx: Sender<AdEvent>,
    events_rx: Receiver<AdEvent>,
    loaded: bool,
    loading: bool,
    paused: Arc<AtomicBool>,
    disposed: Arc<AtomicBool>,
}

impl SimulatedAdNetwork<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(AdNetworkConfig::default(), StdRng::from_entropy())
    }
}

impl Default for SimulatedAdNetwork<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SimulatedAdNetwork<R> {
    /// Build with explicit tuning and RNG; outcomes are deterministic for a
    /// given seeded RNG because all sampling happens on the caller's thread.
    pub fn with_rng(config: AdNetworkConfig, rng: R) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            config,
            rng,
            events_tx,
            events_rx,
            loaded: false,
            loading: false,
            paused: Arc::new(AtomicBool::new(false)),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<R: Rng> RewardedAdProvider for SimulatedAdNetwork<R> {
    fn request_load(&mut self) {
        if self.loaded || self.loading || self.disposed.load(Ordering::SeqCst) {
            return;
        }
        self.loading = true;

        let latency = if self.config.load_max > self.config.load_min {
            let span = (self.config.load_max - self.config.load_min).as_millis() as u64;
            self.config.load_min + Duration::from_millis(self.rng.gen_range(0..=span))
        } else {
            self.config.load_min
        };
        let fails = self.rng.gen_bool(self.config.failure_chance);

        let tx = self.events_tx.clone();
        let disposed = Arc::clone(&self.disposed);
        thread::spawn(move || {
            thread::sleep(latency);
            if disposed.load(Ordering::SeqCst) {
                return;
            }
            let event = if fails {
                AdEvent::LoadFailed
            } else {
                AdEvent::Loaded
            };
            let _ = tx.send(event);
        });
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn show(&mut self) {
        if !self.loaded || self.disposed.load(Ordering::SeqCst) {
            return;
        }
        // The loaded ad is consumed whether or not playback completes.
        self.loaded = false;

        let playback = self.config.playback;
        let reward = self.config.reward;
        let tx = self.events_tx.clone();
        let paused = Arc::clone(&self.paused);
        let disposed = Arc::clone(&self.disposed);
        thread::spawn(move || {
            let _ = tx.send(AdEvent::Opened);
            let _ = tx.send(AdEvent::Started);

            let step = Duration::from_millis(PLAYBACK_POLL_MS);
            let mut watched = Duration::ZERO;
            while watched < playback {
                if disposed.load(Ordering::SeqCst) {
                    return;
                }
                if !paused.load(Ordering::SeqCst) {
                    watched += step;
                }
                thread::sleep(step);
            }

            let _ = tx.send(AdEvent::Closed);
            let _ = tx.send(AdEvent::Rewarded { amount: reward });
        });
    }

    fn pause(&mut self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn dispose(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.loaded = false;
        self.loading = false;
    }

    fn poll_events(&mut self) -> Vec<AdEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AdEvent::Loaded => {
                    self.loading = false;
                    self.loaded = true;
                }
                AdEvent::LoadFailed => {
                    self.loading = false;
                }
                _ => {}
            }
            events.push(event);
        }
        events
    }
}
