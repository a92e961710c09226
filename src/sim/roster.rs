//! Passenger roster
//!
//! Eight fixed seats. The roster only knows about seat contents; which
//! operations are allowed in which ride phase is decided by `RideState`.

use crate::consts::SEAT_COUNT;

/// One boarding slot in the car
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Seat {
    pub occupied: bool,
    pub belted: bool,
    pub distressed: bool,
}

impl Seat {
    /// Occupied and still waiting for a belt
    pub fn needs_belt(&self) -> bool {
        self.occupied && !self.belted
    }

    fn vacate(&mut self) {
        *self = Seat::default();
    }
}

/// Fixed-capacity passenger roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    seats: [Seat; SEAT_COUNT],
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seats(&self) -> &[Seat; SEAT_COUNT] {
        &self.seats
    }

    #[cfg(test)]
    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }

    /// Number of occupied seats
    pub fn occupancy(&self) -> usize {
        self.seats.iter().filter(|s| s.occupied).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupancy() == SEAT_COUNT
    }

    /// Seat a passenger in the lowest empty seat; returns its index, or
    /// `None` when the car is full
    pub fn board(&mut self) -> Option<usize> {
        let index = self.seats.iter().position(|s| !s.occupied)?;
        self.seats[index] = Seat {
            occupied: true,
            belted: false,
            distressed: false,
        };
        Some(index)
    }

    /// Fasten the belt of an occupied, unbelted seat
    pub fn belt(&mut self, index: usize) -> bool {
        match self.seats.get_mut(index) {
            Some(seat) if seat.needs_belt() => {
                seat.belted = true;
                true
            }
            _ => false,
        }
    }

    /// Flag an occupied passenger as sick (once)
    pub fn mark_distressed(&mut self, index: usize) -> bool {
        match self.seats.get_mut(index) {
            Some(seat) if seat.occupied && !seat.distressed => {
                seat.distressed = true;
                true
            }
            _ => false,
        }
    }

    /// Empty an occupied seat, clearing its flags
    pub fn disembark(&mut self, index: usize) -> bool {
        match self.seats.get_mut(index) {
            Some(seat) if seat.occupied => {
                seat.vacate();
                true
            }
            _ => false,
        }
    }

    /// Release every belt (passengers get up on arrival)
    pub fn unbelt_all(&mut self) {
        for seat in &mut self.seats {
            seat.belted = false;
        }
    }

    /// Departure gate: someone is aboard and everyone aboard is belted
    pub fn all_belted_and_non_empty(&self) -> bool {
        let mut aboard = self.seats.iter().filter(|s| s.occupied).peekable();
        aboard.peek().is_some() && aboard.all(|s| s.belted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_board_fills_lowest_seat_first() {
        let mut roster = Roster::new();
        assert_eq!(roster.board(), Some(0));
        assert_eq!(roster.board(), Some(1));
        assert!(roster.disembark(0));
        // Freed seat is reused before later ones
        assert_eq!(roster.board(), Some(0));
        assert_eq!(roster.board(), Some(2));
        assert_eq!(roster.occupancy(), 3);
    }

    #[test]
    fn test_board_when_full() {
        let mut roster = Roster::new();
        for i in 0..SEAT_COUNT {
            assert_eq!(roster.board(), Some(i));
        }
        assert!(roster.is_full());
        assert_eq!(roster.board(), None);
        assert_eq!(roster.occupancy(), SEAT_COUNT);
    }

    #[test]
    fn test_belt_rules() {
        let mut roster = Roster::new();
        // Empty seat cannot be belted
        assert!(!roster.belt(0));
        roster.board();
        assert!(roster.belt(0));
        // Already belted
        assert!(!roster.belt(0));
        // Out of range
        assert!(!roster.belt(SEAT_COUNT));
    }

    #[test]
    fn test_mark_distressed_once() {
        let mut roster = Roster::new();
        assert!(!roster.mark_distressed(3));
        roster.board();
        assert!(roster.mark_distressed(0));
        assert!(!roster.mark_distressed(0));
        assert!(roster.seat(0).is_some_and(|s| s.distressed));
    }

    #[test]
    fn test_disembark_clears_flags() {
        let mut roster = Roster::new();
        roster.board();
        roster.belt(0);
        roster.mark_distressed(0);
        assert!(roster.disembark(0));
        assert_eq!(roster.seats()[0], Seat::default());
        assert!(!roster.disembark(0));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_unbelt_all_keeps_passengers() {
        let mut roster = Roster::new();
        roster.board();
        roster.board();
        roster.belt(0);
        roster.belt(1);
        roster.mark_distressed(1);
        roster.unbelt_all();
        assert_eq!(roster.occupancy(), 2);
        assert!(roster.seats().iter().all(|s| !s.belted));
        assert!(roster.seats()[1].distressed);
    }

    #[test]
    fn test_all_belted_gate() {
        let mut roster = Roster::new();
        assert!(!roster.all_belted_and_non_empty());
        roster.board();
        roster.board();
        assert!(!roster.all_belted_and_non_empty());
        roster.belt(0);
        assert!(!roster.all_belted_and_non_empty());
        roster.belt(1);
        assert!(roster.all_belted_and_non_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Board,
        Belt(usize),
        Sick(usize),
        Leave(usize),
        Unbelt,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Board),
            (0..SEAT_COUNT + 2).prop_map(Op::Belt),
            (0..SEAT_COUNT + 2).prop_map(Op::Sick),
            (0..SEAT_COUNT + 2).prop_map(Op::Leave),
            Just(Op::Unbelt),
        ]
    }

    proptest! {
        #[test]
        fn prop_occupancy_bounded_and_only_grows_on_success(ops in prop::collection::vec(op(), 0..64)) {
            let mut roster = Roster::new();
            for op in ops {
                let before = roster.occupancy();
                match op {
                    Op::Board => {
                        let seated = roster.board();
                        if seated.is_some() {
                            prop_assert_eq!(roster.occupancy(), before + 1);
                        } else {
                            prop_assert_eq!(before, SEAT_COUNT);
                            prop_assert_eq!(roster.occupancy(), before);
                        }
                    }
                    Op::Belt(i) => { roster.belt(i); prop_assert_eq!(roster.occupancy(), before); }
                    Op::Sick(i) => { roster.mark_distressed(i); prop_assert_eq!(roster.occupancy(), before); }
                    Op::Leave(i) => {
                        let left = roster.disembark(i);
                        prop_assert_eq!(roster.occupancy(), if left { before - 1 } else { before });
                    }
                    Op::Unbelt => roster.unbelt_all(),
                }
                prop_assert!(roster.occupancy() <= SEAT_COUNT);
                // Vacant seats never carry stale flags
                for seat in roster.seats().iter().filter(|s| !s.occupied) {
                    prop_assert!(!seat.belted && !seat.distressed);
                }
                if roster.is_empty() {
                    prop_assert!(!roster.all_belted_and_non_empty());
                }
            }
        }
    }
}
