//! Platform abstraction layer
//!
//! Handles the desktop window side of things:
//! - Key codes to ride keys
//! - Cursor pixels to world coordinates
//! - Frame pacing
//! - The custom cursor image

use std::path::Path;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CustomCursor, CustomCursorSource};

use crate::consts::MAX_FRAME_DT;
use crate::error::AssetError;
use crate::input::RideKey;
use crate::renderer::load_rgba;

/// Translate a physical key to a ride key
pub fn ride_key(key: PhysicalKey) -> Option<RideKey> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let key = match code {
        KeyCode::Space => RideKey::Board,
        KeyCode::Enter | KeyCode::NumpadEnter => RideKey::Depart,
        KeyCode::Escape => RideKey::Exit,
        KeyCode::Digit1 | KeyCode::Numpad1 => RideKey::Seat(0),
        KeyCode::Digit2 | KeyCode::Numpad2 => RideKey::Seat(1),
        KeyCode::Digit3 | KeyCode::Numpad3 => RideKey::Seat(2),
        KeyCode::Digit4 | KeyCode::Numpad4 => RideKey::Seat(3),
        KeyCode::Digit5 | KeyCode::Numpad5 => RideKey::Seat(4),
        KeyCode::Digit6 | KeyCode::Numpad6 => RideKey::Seat(5),
        KeyCode::Digit7 | KeyCode::Numpad7 => RideKey::Seat(6),
        KeyCode::Digit8 | KeyCode::Numpad8 => RideKey::Seat(7),
        _ => return None,
    };
    Some(key)
}

/// Convert a cursor position in physical pixels to world coordinates
///
/// World y spans [-1, 1] bottom to top; x is scaled by the aspect ratio.
pub fn cursor_to_world(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::ZERO;
    }
    let aspect = width as f32 / height as f32;
    let nx = (x / width as f64) as f32 * 2.0 - 1.0;
    let ny = 1.0 - (y / height as f64) as f32 * 2.0;
    Vec2::new(nx * aspect, ny)
}

/// Build a cursor from an image file, hotspot at the top-left pixel
pub fn cursor_source(path: &Path) -> Result<CustomCursorSource, AssetError> {
    let image = load_rgba(path)?;
    let rejected = |reason: String| AssetError::Cursor {
        path: path.to_path_buf(),
        reason,
    };
    let (width, height) = image.dimensions();
    let width = u16::try_from(width).map_err(|_| rejected(format!("width {} too large", width)))?;
    let height =
        u16::try_from(height).map_err(|_| rejected(format!("height {} too large", height)))?;
    CustomCursor::from_rgba(image.into_raw(), width, height, 0, 0)
        .map_err(|e| rejected(e.to_string()))
}

/// Fixed-cadence frame limiter
///
/// The loop sleeps until `next_deadline` and asks `tick` whether a frame is
/// due. Steps handed out are capped at `MAX_FRAME_DT`.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(fps: f32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f32(1.0 / fps.max(1.0)),
            last: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Elapsed seconds since the last frame, if a frame is due
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let elapsed = now.checked_duration_since(self.last)?;
        if elapsed < self.interval {
            return None;
        }
        self.last = now;
        Some(elapsed.as_secs_f32().min(MAX_FRAME_DT))
    }

    /// When the next frame becomes due
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval
    }
}
