use std::time::Duration;

/// Tunable thresholds shared by every effect.
///
/// Built once at startup and handed to each component by reference. Nothing
/// mutates it afterwards.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use vitrine_core::Config;
///
/// let config = Config::default().with_scroll_duration(Duration::from_millis(600));
/// assert_eq!(config.scroll_threshold, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Scroll position (px) past which the header switches to its scrolled state.
    pub scroll_threshold: f64,
    /// Extra distance (px) below the viewport at which fade elements are revealed.
    pub animation_offset: f64,
    /// Duration of animated scrolling (anchor links, back-to-top).
    pub scroll_duration: Duration,
    /// Hero slider autoplay interval.
    pub autoplay_timeout: Duration,
    /// Hide the header while scrolling down. Off unless explicitly enabled.
    pub header_autohide: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scroll_threshold: 100.0,
            animation_offset: 100.0,
            scroll_duration: Duration::from_millis(800),
            autoplay_timeout: Duration::from_millis(5000),
            header_autohide: false,
        }
    }
}

impl Config {
    pub fn with_scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    pub fn with_animation_offset(mut self, offset: f64) -> Self {
        self.animation_offset = offset;
        self
    }

    pub fn with_scroll_duration(mut self, duration: Duration) -> Self {
        self.scroll_duration = duration;
        self
    }

    pub fn with_autoplay_timeout(mut self, timeout: Duration) -> Self {
        self.autoplay_timeout = timeout;
        self
    }

    pub fn with_header_autohide(mut self, enabled: bool) -> Self {
        self.header_autohide = enabled;
        self
    }
}
