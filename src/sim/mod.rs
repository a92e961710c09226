//! Ride simulation module
//!
//! All ride logic lives here. This module has no rendering or platform
//! dependencies:
//! - Track geometry is a pure function of the track parameter
//! - The roster and ride state are plain owned values
//! - Time only advances through `tick`

pub mod roster;
pub mod seats;
pub mod state;
pub mod tick;
pub mod track;

pub use roster::{Roster, Seat};
pub use seats::{car_transform, pick_seat, seat_local, seat_world};
pub use state::{Intent, RideEvent, RidePhase, RideState};
pub use tick::{target_speed, tick};
