use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Game state fetched once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasState {
    pub active: bool,
    pub delay: Duration, // server timer + 1 second
    pub width: u32,
    pub height: u32,
}

impl CanvasState {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Body of a `write_pixel.php` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelRequest {
    pub x: u32,
    pub y: u32,
    pub color: String,
}

/// Format a duration in seconds as `{m}min {s}s`, minutes are not capped at 60
pub fn format_duration(seconds: u64) -> String {
    format!("{}min {}s", seconds / 60, seconds % 60)
}

/// Total time needed to place `pixel_count` pixels at one per `delay`
pub fn estimate_duration(delay: Duration, pixel_count: usize) -> Duration {
    delay.saturating_mul(u32::try_from(pixel_count).unwrap_or(u32::MAX))
}
