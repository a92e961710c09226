//! Track geometry
//!
//! The ride runs over a fixed analytic curve: x sweeps linearly across the
//! scene while y follows a raised sine with three humps. Every function takes
//! the normalized track parameter `t` in [0, 1]; callers clamp.

use std::f32::consts::PI;

use glam::Vec2;

use crate::consts::*;

/// Angular frequency of the hump sine (three full periods over [0, 1])
const WAVE_FREQ: f32 = TRACK_HUMPS * 2.0 * PI;

#[inline]
pub fn track_x(t: f32) -> f32 {
    TRACK_X_START + t * TRACK_SPAN
}

#[inline]
pub fn track_y(t: f32) -> f32 {
    let wave = (t * WAVE_FREQ).sin();
    TRACK_BASE_Y + TRACK_AMPLITUDE * (1.0 + wave) * 0.5
}

/// World position of the track at `t`
#[inline]
pub fn position(t: f32) -> Vec2 {
    Vec2::new(track_x(t), track_y(t))
}

/// Derivative of the track height with respect to `t`
///
/// Physics grades and the steepness predicates are expressed in this unit.
#[inline]
pub fn slope(t: f32) -> f32 {
    TRACK_AMPLITUDE * 0.5 * WAVE_FREQ * (t * WAVE_FREQ).cos()
}

/// Orientation of the track (radians), i.e. the angle of dy/dx
///
/// Uses the exact run dx/dt = `TRACK_SPAN`, so steep sections sit a few
/// degrees flatter than with a rounded run of 3.0.
#[inline]
pub fn angle(t: f32) -> f32 {
    slope(t).atan2(TRACK_SPAN)
}

#[inline]
pub fn is_uphill(t: f32) -> bool {
    slope(t) > STEEP_GRADE
}

#[inline]
pub fn is_downhill(t: f32) -> bool {
    slope(t) < -STEEP_GRADE
}

/// Sample `count + 1` evenly spaced parameters covering [0, 1]
pub fn samples(count: usize) -> impl Iterator<Item = f32> {
    let count = count.max(1);
    (0..=count).map(move |i| i as f32 / count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_endpoints() {
        let start = position(0.0);
        let end = position(1.0);
        assert!((start.x - TRACK_X_START).abs() < EPS);
        assert!((end.x - (TRACK_X_START + TRACK_SPAN)).abs() < EPS);
        // sin(0) = 0 puts both ends at mid height
        let mid = TRACK_BASE_Y + TRACK_AMPLITUDE * 0.5;
        assert!((start.y - mid).abs() < EPS);
        assert!((end.y - mid).abs() < 1e-3);
    }

    #[test]
    fn test_three_humps() {
        // Peaks at t = 1/12, 5/12, 9/12
        for k in 0..3 {
            let t = (1.0 + 4.0 * k as f32) / 12.0;
            let peak = TRACK_BASE_Y + TRACK_AMPLITUDE;
            assert!((track_y(t) - peak).abs() < EPS, "hump {k} at t={t}");
            assert!(slope(t).abs() < 1e-3);
        }
        // Humps are identical
        assert!((track_y(1.0 / 12.0) - track_y(9.0 / 12.0)).abs() < EPS);
    }

    #[test]
    fn test_slope_matches_finite_difference() {
        let h = 1e-3;
        for t in samples(20).filter(|t| *t > h && *t < 1.0 - h) {
            let numeric = (track_y(t + h) - track_y(t - h)) / (2.0 * h);
            assert!(
                (numeric - slope(t)).abs() < 0.01,
                "t={t} numeric={numeric} analytic={}",
                slope(t)
            );
        }
    }

    #[test]
    fn test_grade_predicates() {
        // Start of the ride climbs the first hump
        assert!(is_uphill(0.0));
        assert!(!is_downhill(0.0));
        // Steepest descent after the first peak
        assert!(is_downhill(1.0 / 6.0));
        assert!(!is_uphill(1.0 / 6.0));
        // At a peak neither applies
        assert!(!is_uphill(1.0 / 12.0));
        assert!(!is_downhill(1.0 / 12.0));
    }

    #[test]
    fn test_angle_follows_slope_sign() {
        assert!(angle(0.0) > 0.0);
        assert!(angle(1.0 / 6.0) < 0.0);
        assert!(angle(1.0 / 12.0).abs() < 1e-3);
        // Steepest climb is about 50 degrees
        assert!(angle(0.0) > PI / 4.0 && angle(0.0) < PI / 3.0);
    }

    #[test]
    fn test_samples_cover_range() {
        let ts: Vec<f32> = samples(4).collect();
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
