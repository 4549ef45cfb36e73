// Round timing constants
pub const ROUND_LENGTH_SECONDS: u64 = 10;
pub const TIMER_TICK_MS: u64 = 50;

// Coin reward constants
pub const GAME_OVER_REWARD: u32 = 1;

// Simulated ad network constants
pub const AD_LOAD_MIN_MS: u64 = 1_000;
pub const AD_LOAD_MAX_MS: u64 = 3_000;
pub const AD_LOAD_FAILURE_CHANCE: f64 = 0.1;
pub const AD_PLAYBACK_MS: u64 = 3_000;
pub const AD_REWARD_COINS: u32 = 5;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x434F_494E_4452_5000; // "COINDRP\0" in hex

// Notice panel constants
pub const MAX_NOTICES: usize = 6;
