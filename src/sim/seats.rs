//! Seat layout and pointer hit-testing
//!
//! The car frame is the track point lifted by `CAR_LIFT` and rotated to the
//! track angle. Seats sit at fixed car-local offsets: front row (0-3) lower,
//! back row (4-7) higher. Rendering places the passenger sprites with the same
//! layout, so a click on a sprite lands on its seat.

use glam::{Affine2, Vec2};

use super::roster::{Roster, Seat};
use super::track;
use crate::consts::{CAR_LIFT, PICK_RADIUS};

/// Seats per row
const ROW_LEN: usize = 4;
/// Car-local x of the first seat in a row
const SEAT_X0: f32 = -0.065;
/// Horizontal spacing between seats
const SEAT_PITCH: f32 = 0.042;
const FRONT_ROW_Y: f32 = 0.035;
const BACK_ROW_Y: f32 = 0.07;

/// Transform from car-local to world coordinates at track parameter `t`
pub fn car_transform(t: f32) -> Affine2 {
    let origin = track::position(t) + Vec2::new(0.0, CAR_LIFT);
    Affine2::from_angle_translation(track::angle(t), origin)
}

/// Centre of seat `index` in car-local coordinates
pub fn seat_local(index: usize) -> Vec2 {
    let x = SEAT_X0 + (index % ROW_LEN) as f32 * SEAT_PITCH;
    let y = if index < ROW_LEN { FRONT_ROW_Y } else { BACK_ROW_Y };
    Vec2::new(x, y)
}

/// Centre of seat `index` in world coordinates with the car at `t`
pub fn seat_world(t: f32, index: usize) -> Vec2 {
    car_transform(t).transform_point2(seat_local(index))
}

/// Pick the seat under `point`
///
/// Only seats accepted by `eligible` are considered. Returns the eligible
/// seat nearest to the point within `PICK_RADIUS`; equal distances go to the
/// lower index.
pub fn pick_seat<F>(t: f32, roster: &Roster, point: Vec2, eligible: F) -> Option<usize>
where
    F: Fn(&Seat) -> bool,
{
    let car = car_transform(t);
    let mut best: Option<(usize, f32)> = None;

    for (index, seat) in roster.seats().iter().enumerate() {
        if !eligible(seat) {
            continue;
        }
        let dist = car.transform_point2(seat_local(index)).distance(point);
        if dist >= PICK_RADIUS {
            continue;
        }
        // Strict comparison keeps the lower index on ties
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((index, dist));
        }
    }

    best.map(|(index, _)| index)
}
