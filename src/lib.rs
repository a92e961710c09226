//! Coaster Ride - a 2D roller-coaster ride simulation
//!
//! Core modules:
//! - `sim`: Ride simulation (track geometry, roster, ride state machine)
//! - `input`: Maps key/pointer events to ride intents
//! - `renderer`: Scene building and the WebGPU backend
//! - `platform`: winit adapters and frame pacing
//! - `settings`: Display settings

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, RenderError};
pub use settings::{Settings, TrackDetail};

/// Ride configuration constants
pub mod consts {
    /// Target frame cadence (frames per second)
    pub const TARGET_FPS: f32 = 75.0;
    /// Largest elapsed step fed to the simulation in one frame
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Seats in the car (two rows of four)
    pub const SEAT_COUNT: usize = 8;

    /// Track shape: x spans [TRACK_X_START, TRACK_X_START + TRACK_SPAN]
    pub const TRACK_X_START: f32 = -1.6;
    pub const TRACK_SPAN: f32 = 3.2;
    pub const TRACK_BASE_Y: f32 = -0.5;
    pub const TRACK_AMPLITUDE: f32 = 0.4;
    /// Number of humps between platform and far end
    pub const TRACK_HUMPS: f32 = 3.0;
    /// Slope beyond which a section counts as steep (uphill/downhill)
    pub const STEEP_GRADE: f32 = 0.5;

    /// Top running speed (track parameter per second)
    pub const MAX_SPEED: f32 = 0.25;
    pub const ACCELERATION: f32 = 0.15;
    pub const DECELERATION: f32 = 0.1;
    /// Slope-to-acceleration factor while running
    pub const GRAVITY_FACTOR: f32 = 0.15;
    /// Slope that selects the downhill/uphill target speed
    pub const GRADE_THRESHOLD: f32 = 0.3;
    /// Target speed on climbs
    pub const UPHILL_SPEED: f32 = 0.08;
    /// Target speed on level sections, as a fraction of MAX_SPEED
    pub const CRUISE_FRACTION: f32 = 0.6;
    /// Rate the speed is nudged up toward the target
    pub const SPEED_UP_RATE: f32 = ACCELERATION * 0.2;
    /// Rate the speed is nudged down toward the target
    pub const SLOW_DOWN_RATE: f32 = DECELERATION * 0.15;
    /// Floor of the running speed band
    pub const MIN_RUNNING_SPEED: f32 = 0.06;
    /// Braking rate after a passenger reports sick
    pub const EMERGENCY_DECELERATION: f32 = DECELERATION * 2.0;
    /// Fixed speed while the car rolls back to the platform
    pub const SLOW_RETURN_SPEED: f32 = 0.08;
    /// Dwell time in Stopped before returning (seconds)
    pub const STOP_DURATION: f32 = 10.0;

    /// Car frame sits this far above the track point
    pub const CAR_LIFT: f32 = 0.04;
    /// Click radius for selecting a seat (world units)
    pub const PICK_RADIUS: f32 = 0.05;
}
