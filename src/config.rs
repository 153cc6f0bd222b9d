use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timings and thresholds shared by the page controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub loader_delay_ms: u32,
    pub hero_delays_ms: [u32; 3],
    pub hero_transition_s: f64,
    pub scrolled_threshold_px: f64,
    pub nav_lookahead_px: f64,
    pub reveal_threshold: f64,
    pub stagger_step_s: f64,
    pub message_lifetime_ms: u32,
    pub slideshow_interval_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub magnetic_strength: f64,
    pub parallax_factor: f64,
    pub parallax_throttle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader_delay_ms: 1800,
            hero_delays_ms: [100, 300, 500],
            hero_transition_s: 0.8,
            scrolled_threshold_px: 50.0,
            nav_lookahead_px: 200.0,
            reveal_threshold: 0.1,
            stagger_step_s: 0.1,
            message_lifetime_ms: 3000,
            slideshow_interval_ms: 5000,
            mobile_breakpoint_px: 768.0,
            magnetic_strength: 0.1,
            parallax_factor: 0.1,
            parallax_throttle_ms: 16,
        }
    }
}
