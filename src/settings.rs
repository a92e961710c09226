//! Display settings
//!
//! Loaded once at startup from an optional `coaster.json` in the working
//! directory. Settings only affect presentation; ride physics are fixed.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default settings file name
pub const SETTINGS_FILE: &str = "coaster.json";

/// Track tessellation detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum TrackDetail {
    Low,
    Medium,
    #[default]
    High,
}

impl TrackDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackDetail::Low => "Low",
            TrackDetail::Medium => "Medium",
            TrackDetail::High => "High",
        }
    }

    /// Line segments per rail
    pub fn rail_segments(&self) -> usize {
        match self {
            TrackDetail::Low => 60,
            TrackDetail::Medium => 120,
            TrackDetail::High => 200,
        }
    }

    /// Ties drawn across the rails
    pub fn tie_count(&self) -> usize {
        match self {
            TrackDetail::Low => 24,
            TrackDetail::Medium => 48,
            TrackDetail::High => 80,
        }
    }

    /// Segments per circle (clouds, lamps, seat dots)
    pub fn circle_segments(&self) -> u32 {
        match self {
            TrackDetail::Low => 12,
            TrackDetail::Medium => 20,
            TrackDetail::High => 32,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Borderless fullscreen on the current monitor
    pub fullscreen: bool,
    /// Windowed size in physical pixels
    pub window_width: u32,
    pub window_height: u32,

    // === Assets ===
    /// Directory holding the sprite and cursor images
    pub resource_dir: PathBuf,
    /// Use `cursor.png` as the mouse pointer
    pub custom_cursor: bool,

    // === Scene ===
    pub track_detail: TrackDetail,
    /// Phase lamp, speed bar, grade lamp and legend
    pub show_hud: bool,
    /// Row of seat status dots under the car
    pub show_seat_indicators: bool,
    /// Info panel in the lower right corner
    pub show_info_panel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fullscreen: true,
            window_width: 1920,
            window_height: 1080,

            resource_dir: PathBuf::from("Resources"),
            custom_cursor: true,

            track_detail: TrackDetail::High,
            show_hud: true,
            show_seat_indicators: true,
            show_info_panel: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from `SETTINGS_FILE` in the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Full path of a resource file
    pub fn resource_path(&self, file: &str) -> PathBuf {
        self.resource_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_scales_geometry() {
        assert!(TrackDetail::Low.rail_segments() < TrackDetail::High.rail_segments());
        assert!(TrackDetail::Low.tie_count() < TrackDetail::High.tie_count());
        assert_eq!(TrackDetail::High.rail_segments(), 200);
        assert_eq!(TrackDetail::High.tie_count(), 80);
        assert_eq!(TrackDetail::default().as_str(), "High");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "fullscreen": false, "track_detail": "Low" }"#).unwrap();
        assert!(!settings.fullscreen);
        assert_eq!(settings.track_detail, TrackDetail::Low);
        assert_eq!(settings.window_width, 1920);
        assert_eq!(settings.resource_dir, PathBuf::from("Resources"));
        assert!(settings.show_hud);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Settings::from_json("{ fullscreen: nope").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("definitely/not/here/coaster.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = std::env::temp_dir();
        for (name, body) in [
            ("coaster_ride_bad_syntax.json", "{ not json"),
            ("coaster_ride_bad_detail.json", r#"{ "track_detail": "Ultra" }"#),
        ] {
            let path = dir.join(name);
            std::fs::write(&path, body).unwrap();
            assert_eq!(Settings::load_from(&path), Settings::default(), "{name}");
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join("coaster_ride_windowed.json");
        std::fs::write(&path, r#"{ "fullscreen": false, "show_hud": false }"#).unwrap();
        let settings = Settings::load_from(&path);
        assert!(!settings.fullscreen);
        assert!(!settings.show_hud);
        assert_eq!(settings.track_detail, TrackDetail::High);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_resource_path() {
        let settings = Settings::default();
        assert_eq!(
            settings.resource_path("cart.png"),
            PathBuf::from("Resources").join("cart.png")
        );
    }
}
