//! Runtime tuning via environment variables, in lieu of a config file.

const DEFAULT_TICK_MS: u64 = 70;
const DEFAULT_RENDER_FPS: u64 = 120;

pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    /// Fixed RNG seed for replayable runs; fresh entropy when unset.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            tick_ms: read_var("PACMAZE_TICK_MS")
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_TICK_MS),
            render_fps: read_var("PACMAZE_FPS")
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_RENDER_FPS),
            seed: read_var("PACMAZE_SEED"),
        }
    }
}

fn read_var(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse::<u64>().ok())
}
