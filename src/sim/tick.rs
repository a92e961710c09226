//! Time step for the ride
//!
//! Advances car kinematics by the elapsed time and fires the automatic phase
//! transitions. Intents are handled by `RideState::apply`.

use super::state::{RidePhase, RideState};
use super::track;
use crate::consts::*;

/// Advance the ride by `dt` seconds
pub fn tick(state: &mut RideState, dt: f32) {
    let dt = dt.max(0.0);

    match state.phase {
        RidePhase::Loading => {}
        RidePhase::Running => run_forward(state, dt),
        RidePhase::Stopping => brake(state, dt),
        RidePhase::Stopped => dwell(state, dt),
        RidePhase::Returning => roll_back(state, dt),
        RidePhase::Unloading => {
            if state.roster.is_empty() {
                state.set_phase(RidePhase::Loading);
            }
        }
    }
}

/// Speed the car aims for on a section with the given slope
pub fn target_speed(slope: f32) -> f32 {
    if slope < -GRADE_THRESHOLD {
        MAX_SPEED
    } else if slope > GRADE_THRESHOLD {
        UPHILL_SPEED
    } else {
        MAX_SPEED * CRUISE_FRACTION
    }
}

fn run_forward(state: &mut RideState, dt: f32) {
    let slope = track::slope(state.track_pos);

    // Gravity pulls the car down the grade
    state.speed += -slope * GRAVITY_FACTOR * dt;

    let target = target_speed(slope);
    if state.speed < target {
        state.speed += SPEED_UP_RATE * dt;
    } else if state.speed > target {
        state.speed -= SLOW_DOWN_RATE * dt;
    }
    state.speed = state.speed.clamp(MIN_RUNNING_SPEED, MAX_SPEED);

    state.track_pos += state.speed * dt;
    if state.track_pos >= 1.0 {
        state.track_pos = 1.0;
        state.set_phase(RidePhase::Returning);
    }
}

fn brake(state: &mut RideState, dt: f32) {
    state.speed -= EMERGENCY_DECELERATION * dt;
    if state.speed <= 0.0 {
        state.speed = 0.0;
        state.stop_timer = 0.0;
        state.set_phase(RidePhase::Stopped);
    }
    // The car coasts while braking
    state.track_pos = (state.track_pos + state.speed * dt).clamp(0.0, 1.0);
}

fn dwell(state: &mut RideState, dt: f32) {
    state.stop_timer += dt;
    if state.stop_timer >= STOP_DURATION {
        state.set_phase(RidePhase::Returning);
    }
}

fn roll_back(state: &mut RideState, dt: f32) {
    state.speed = SLOW_RETURN_SPEED;
    state.track_pos -= state.speed * dt;

    if state.track_pos <= 0.0 {
        state.track_pos = 0.0;
        state.speed = 0.0;
        state.roster.unbelt_all();
        state.set_phase(RidePhase::Unloading);
    }
}
