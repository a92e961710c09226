//! Input-to-intent mapping
//!
//! Pure dispatch table from (ride phase, input event) to a command. Holds no
//! state; platform code turns raw window events into `InputEvent`s first.

use glam::Vec2;

use crate::consts::SEAT_COUNT;
use crate::sim::{Intent, RidePhase, RideState, Seat, pick_seat};

/// Keys the ride responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideKey {
    /// Put a passenger in the next free seat
    Board,
    /// Send the car off
    Depart,
    /// Seat number key (0-based index)
    Seat(usize),
    /// Quit the program
    Exit,
}

/// Input surfaced by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(RideKey),
    /// Primary pointer click in world coordinates
    Click(Vec2),
    /// Window close button
    CloseRequested,
}

/// What the main loop should do with an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ride(Intent),
    Exit,
}

/// Map an input event to a command given the current ride
///
/// Returns `None` when the event means nothing in the current phase.
pub fn map_input(state: &RideState, event: InputEvent) -> Option<Command> {
    match (state.phase, event) {
        (_, InputEvent::Key(RideKey::Exit) | InputEvent::CloseRequested) => Some(Command::Exit),

        (RidePhase::Loading, InputEvent::Key(RideKey::Board)) => Some(Command::Ride(Intent::Board)),
        (RidePhase::Loading, InputEvent::Key(RideKey::Depart)) => {
            Some(Command::Ride(Intent::Depart))
        }
        (RidePhase::Running, InputEvent::Key(RideKey::Seat(seat))) if seat < SEAT_COUNT => {
            Some(Command::Ride(Intent::ReportSick(seat)))
        }

        (RidePhase::Loading, InputEvent::Click(point)) => {
            pick_seat(state.track_pos, &state.roster, point, Seat::needs_belt)
                .map(|seat| Command::Ride(Intent::Belt(seat)))
        }
        (RidePhase::Unloading, InputEvent::Click(point)) => {
            pick_seat(state.track_pos, &state.roster, point, |s| s.occupied)
                .map(|seat| Command::Ride(Intent::Disembark(seat)))
        }

        _ => None,
    }
}
