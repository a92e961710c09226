//! Ride state and intents
//!
//! `RideState` is the whole simulation context: phase, car kinematics and
//! the passenger roster. Intents are applied here; time-driven transitions
//! live in `tick`.

use std::fmt;

use super::roster::Roster;

/// Phase of the ride cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RidePhase {
    /// Car at the platform, passengers boarding and belting up
    #[default]
    Loading,
    /// Forward run over the humps
    Running,
    /// Emergency braking after a passenger reported sick
    Stopping,
    /// Standing still on the track for the dwell period
    Stopped,
    /// Rolling back to the platform at walking pace
    Returning,
    /// At the platform, passengers getting off
    Unloading,
}

impl RidePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RidePhase::Loading => "Loading",
            RidePhase::Running => "Running",
            RidePhase::Stopping => "Stopping",
            RidePhase::Stopped => "Stopped",
            RidePhase::Returning => "Returning",
            RidePhase::Unloading => "Unloading",
        }
    }
}

impl fmt::Display for RidePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change the ride, produced by the input mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Board,
    Belt(usize),
    Depart,
    ReportSick(usize),
    Disembark(usize),
}

/// Notification of an accepted intent or a phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideEvent {
    PhaseChanged { from: RidePhase, to: RidePhase },
    Boarded { seat: usize },
    Belted { seat: usize },
    ReportedSick { seat: usize },
    Disembarked { seat: usize },
}

/// Complete ride simulation state
#[derive(Debug, Clone, Default)]
pub struct RideState {
    /// Current phase
    pub phase: RidePhase,
    /// Car position along the track, [0, 1]
    pub track_pos: f32,
    /// Car speed along the track parameter (per second)
    pub speed: f32,
    /// Seconds spent in `Stopped`
    pub stop_timer: f32,
    /// Passengers
    pub roster: Roster,
    /// Events since the last drain
    events: Vec<RideEvent>,
}

impl RideState {
    /// Fresh ride: empty car at the platform, loading
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an intent; returns whether it changed anything
    ///
    /// Intents that are not valid in the current phase, or that fail their
    /// gate, are ignored.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match (self.phase, intent) {
            (RidePhase::Loading, Intent::Board) => match self.roster.board() {
                Some(seat) => {
                    self.events.push(RideEvent::Boarded { seat });
                    true
                }
                None => false,
            },
            (RidePhase::Loading, Intent::Belt(seat)) => {
                let belted = self.roster.belt(seat);
                if belted {
                    self.events.push(RideEvent::Belted { seat });
                }
                belted
            }
            (RidePhase::Loading, Intent::Depart) => {
                if !self.roster.all_belted_and_non_empty() {
                    return false;
                }
                self.speed = 0.0;
                self.set_phase(RidePhase::Running);
                true
            }
            (RidePhase::Running, Intent::ReportSick(seat)) => {
                if !self.roster.mark_distressed(seat) {
                    return false;
                }
                self.events.push(RideEvent::ReportedSick { seat });
                self.set_phase(RidePhase::Stopping);
                true
            }
            (RidePhase::Unloading, Intent::Disembark(seat)) => {
                if !self.roster.disembark(seat) {
                    return false;
                }
                self.events.push(RideEvent::Disembarked { seat });
                if self.roster.is_empty() {
                    self.set_phase(RidePhase::Loading);
                }
                true
            }
            _ => false,
        }
    }

    /// Switch phase, recording the change
    pub(crate) fn set_phase(&mut self, to: RidePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.events.push(RideEvent::PhaseChanged { from, to });
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> impl Iterator<Item = RideEvent> + '_ {
        self.events.drain(..)
    }

    /// Speed as a fraction of the top speed, for gauges
    pub fn speed_ratio(&self) -> f32 {
        (self.speed / crate::consts::MAX_SPEED).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(passengers: usize) -> RideState {
        let mut state = RideState::new();
        for _ in 0..passengers {
            assert!(state.apply(Intent::Board));
        }
        for seat in 0..passengers {
            assert!(state.apply(Intent::Belt(seat)));
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = RideState::new();
        assert_eq!(state.phase, RidePhase::Loading);
        assert_eq!(state.track_pos, 0.0);
        assert_eq!(state.speed, 0.0);
        assert!(state.roster.is_empty());
    }

    #[test]
    fn test_board_and_belt_scenario() {
        let mut state = RideState::new();
        for _ in 0..4 {
            assert!(state.apply(Intent::Board));
        }
        assert_eq!(state.roster.occupancy(), 4);
        for (i, seat) in state.roster.seats().iter().enumerate() {
            assert_eq!(seat.occupied, i < 4);
            assert!(!seat.belted);
        }
        for seat in 0..4 {
            assert!(state.apply(Intent::Belt(seat)));
        }
        assert!(state.roster.all_belted_and_non_empty());

        state.speed = 0.3;
        assert!(state.apply(Intent::Depart));
        assert_eq!(state.phase, RidePhase::Running);
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn test_depart_gate() {
        let mut state = RideState::new();
        // Empty car
        assert!(!state.apply(Intent::Depart));
        assert_eq!(state.phase, RidePhase::Loading);

        state.apply(Intent::Board);
        state.apply(Intent::Board);
        state.apply(Intent::Belt(0));
        // Seat 1 still unbelted
        assert!(!state.apply(Intent::Depart));
        assert_eq!(state.phase, RidePhase::Loading);

        state.apply(Intent::Belt(1));
        assert!(state.apply(Intent::Depart));
        assert_eq!(state.phase, RidePhase::Running);
    }

    #[test]
    fn test_report_sick_stops_immediately() {
        let mut state = loaded(3);
        state.apply(Intent::Depart);
        state.track_pos = 0.42;
        state.speed = 0.2;

        assert!(state.apply(Intent::ReportSick(2)));
        assert!(state.roster.seats()[2].distressed);
        assert_eq!(state.phase, RidePhase::Stopping);
        // Kinematics untouched by the intent itself
        assert_eq!(state.track_pos, 0.42);
        assert_eq!(state.speed, 0.2);
    }

    #[test]
    fn test_report_sick_on_empty_seat_ignored() {
        let mut state = loaded(2);
        state.apply(Intent::Depart);
        assert!(!state.apply(Intent::ReportSick(5)));
        assert_eq!(state.phase, RidePhase::Running);
    }

    #[test]
    fn test_intents_gated_by_phase() {
        let mut state = loaded(1);
        // Not valid while loading
        assert!(!state.apply(Intent::ReportSick(0)));
        assert!(!state.apply(Intent::Disembark(0)));

        state.apply(Intent::Depart);
        // Not valid while running
        assert!(!state.apply(Intent::Board));
        assert!(!state.apply(Intent::Belt(0)));
        assert!(!state.apply(Intent::Disembark(0)));
        assert_eq!(state.roster.occupancy(), 1);
    }

    #[test]
    fn test_last_disembark_returns_to_loading() {
        let mut state = loaded(2);
        state.phase = RidePhase::Unloading;
        state.roster.unbelt_all();

        assert!(state.apply(Intent::Disembark(1)));
        assert_eq!(state.phase, RidePhase::Unloading);
        assert!(!state.apply(Intent::Disembark(1)));
        assert!(state.apply(Intent::Disembark(0)));
        assert_eq!(state.phase, RidePhase::Loading);
    }

    #[test]
    fn test_events_recorded() {
        let mut state = RideState::new();
        state.apply(Intent::Board);
        state.apply(Intent::Belt(0));
        state.apply(Intent::Depart);
        state.apply(Intent::ReportSick(0));

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![
                RideEvent::Boarded { seat: 0 },
                RideEvent::Belted { seat: 0 },
                RideEvent::PhaseChanged {
                    from: RidePhase::Loading,
                    to: RidePhase::Running
                },
                RideEvent::ReportedSick { seat: 0 },
                RideEvent::PhaseChanged {
                    from: RidePhase::Running,
                    to: RidePhase::Stopping
                },
            ]
        );
        assert_eq!(state.drain_events().count(), 0);
    }

    #[test]
    fn test_speed_ratio_clamped() {
        let mut state = RideState::new();
        state.speed = crate::consts::MAX_SPEED * 0.5;
        assert!((state.speed_ratio() - 0.5).abs() < 1e-6);
        state.speed = 10.0;
        assert_eq!(state.speed_ratio(), 1.0);
    }
}
