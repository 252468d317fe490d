use crate::ant::{AntId, Move};
use std::collections::{BTreeMap, BTreeSet};

/// Moves grouped by turn, addressed by 0-based turn position.
///
/// Position `i` is the `i`-th distinct turn number in ascending order, which
/// is what the controller's turn pointer counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnIndex {
    turn_numbers: Vec<u32>,
    moves_by_turn: BTreeMap<u32, Vec<Move>>,
}

impl TurnIndex {
    /// Group `moves` by turn, preserving input order within each turn
    pub fn build(moves: &[Move]) -> Self {
        let mut moves_by_turn: BTreeMap<u32, Vec<Move>> = BTreeMap::new();
        for mv in moves {
            moves_by_turn.entry(mv.turn).or_default().push(mv.clone());
        }
        // BTreeMap keys come out sorted whatever order the input had
        let turn_numbers = moves_by_turn.keys().copied().collect();

        Self {
            turn_numbers,
            moves_by_turn,
        }
    }

    /// Number of distinct turns
    #[inline]
    pub fn turn_count(&self) -> usize {
        self.turn_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_numbers.is_empty()
    }

    /// Turn number at position `index`
    pub fn turn_number(&self, index: usize) -> Option<u32> {
        self.turn_numbers.get(index).copied()
    }

    /// Moves of the turn at position `index`; empty past the end
    pub fn moves_at(&self, index: usize) -> &[Move] {
        self.turn_number(index)
            .map(|turn| self.moves_for_turn(turn))
            .unwrap_or_default()
    }

    /// Moves carrying the given turn number
    pub fn moves_for_turn(&self, turn: u32) -> &[Move] {
        self.moves_by_turn
            .get(&turn)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every ant that moves at least once, ascending
    pub fn ants(&self) -> BTreeSet<AntId> {
        self.moves_by_turn
            .values()
            .flatten()
            .map(|mv| mv.ant)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_turn() {
        let moves = vec![
            Move::new(1, "M", 1),
            Move::new(2, "N", 1),
            Move::new(1, "E", 2),
            Move::new(2, "E", 3),
        ];
        let index = TurnIndex::build(&moves);

        assert_eq!(index.turn_count(), 3);
        assert_eq!(index.turn_number(2), Some(3));
        assert_eq!(index.moves_at(0), &moves[0..2]);
        assert_eq!(index.moves_at(1), &moves[2..3]);
        assert_eq!(index.moves_for_turn(3), &moves[3..4]);
    }

    #[test]
    fn test_sorts_out_of_order_turns() {
        let moves = vec![
            Move::new(3, "E", 5),
            Move::new(1, "M", 2),
            Move::new(2, "M", 5),
            Move::new(4, "E", 2),
        ];
        let index = TurnIndex::build(&moves);

        assert_eq!(index.turn_count(), 2);
        assert_eq!((index.turn_number(0), index.turn_number(1)), (Some(2), Some(5)));
        // input order is kept inside a turn
        assert_eq!(index.moves_at(0), &[Move::new(1, "M", 2), Move::new(4, "E", 2)]);
        assert_eq!(index.moves_at(1), &[Move::new(3, "E", 5), Move::new(2, "M", 5)]);
    }

    #[test]
    fn test_out_of_range_lookups() {
        let index = TurnIndex::build(&[Move::new(1, "E", 1)]);

        assert_eq!(index.turn_number(1), None);
        assert!(index.moves_at(1).is_empty());
        assert!(index.moves_for_turn(9).is_empty());
    }

    #[test]
    fn test_empty_and_ants() {
        assert!(TurnIndex::build(&[]).is_empty());

        let index = TurnIndex::build(&[
            Move::new(7, "A", 1),
            Move::new(2, "A", 2),
            Move::new(7, "B", 2),
        ]);
        assert_eq!(index.ants().into_iter().collect::<Vec<_>>(), vec![2, 7]);
    }
}
