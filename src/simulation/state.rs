use crate::ant::{AntId, Move};
use std::collections::{BTreeMap, BTreeSet};

/// Logical replay state: where each tracked ant is and which ones are moving.
///
/// Only ants that appear in the move list are tracked; they all begin in the
/// start room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    start_room: String,
    current_turn: usize,
    positions: BTreeMap<AntId, String>,
    moving: BTreeSet<AntId>,
}

impl SimulationState {
    /// Seed every ant in `ants` at `start_room`, turn 0
    pub fn new(start_room: impl Into<String>, ants: impl IntoIterator<Item = AntId>) -> Self {
        let start_room = start_room.into();
        let positions = ants
            .into_iter()
            .map(|ant| (ant, start_room.clone()))
            .collect();
        Self {
            start_room,
            current_turn: 0,
            positions,
            moving: BTreeSet::new(),
        }
    }

    /// Back to turn 0 with every tracked ant in the start room
    pub fn reset(&mut self) {
        self.current_turn = 0;
        self.moving.clear();
        for room in self.positions.values_mut() {
            room.clone_from(&self.start_room);
        }
    }

    #[inline]
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Room the ant currently occupies
    pub fn position(&self, ant: AntId) -> Option<&str> {
        self.positions.get(&ant).map(String::as_str)
    }

    pub fn positions(&self) -> &BTreeMap<AntId, String> {
        &self.positions
    }

    pub fn moving(&self) -> &BTreeSet<AntId> {
        &self.moving
    }

    /// Number of tracked ants
    pub fn total_ants(&self) -> usize {
        self.positions.len()
    }

    pub fn mark_moving(&mut self, ant: AntId) {
        self.moving.insert(ant);
    }

    pub fn clear_moving(&mut self, ant: AntId) {
        self.moving.remove(&ant);
    }

    /// Put the ant in the move's destination
    pub fn apply(&mut self, mv: &Move) {
        self.positions.insert(mv.ant, mv.room.clone());
    }

    /// Advance the turn pointer by one
    pub fn advance(&mut self) {
        self.current_turn += 1;
    }

    /// Set the turn pointer; ignored past `turn_count`
    pub fn set_turn(&mut self, turn: usize, turn_count: usize) {
        if turn <= turn_count {
            self.current_turn = turn;
        }
    }

    /// Whether the pointer has reached the end of the replay
    #[inline]
    pub fn is_complete(&self, turn_count: usize) -> bool {
        self.current_turn >= turn_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_at_start() {
        let state = SimulationState::new("S", [3, 1, 2]);

        assert_eq!(state.current_turn(), 0);
        assert_eq!(state.total_ants(), 3);
        for ant in [1, 2, 3] {
            assert_eq!(state.position(ant), Some("S"));
        }
        assert_eq!(state.position(4), None);
        assert!(state.moving().is_empty());
    }

    #[test]
    fn test_apply_and_reset() {
        let mut state = SimulationState::new("S", [1, 2]);

        state.mark_moving(1);
        assert!(state.moving().contains(&1));
        state.apply(&Move::new(1, "M", 1));
        state.clear_moving(1);
        state.advance();

        assert_eq!(state.position(1), Some("M"));
        assert_eq!(state.position(2), Some("S"));
        assert_eq!(state.current_turn(), 1);
        assert!(state.moving().is_empty());

        state.mark_moving(2);
        state.reset();

        assert_eq!(state, SimulationState::new("S", [1, 2]));
    }

    #[test]
    fn test_turn_pointer_bounds() {
        let mut state = SimulationState::new("S", [1]);

        state.set_turn(2, 2);
        assert_eq!(state.current_turn(), 2);
        assert!(state.is_complete(2));

        state.set_turn(5, 2);
        assert_eq!(state.current_turn(), 2);

        state.set_turn(1, 2);
        assert!(!state.is_complete(2));
    }
}
