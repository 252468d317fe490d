use crate::ant::{AntId, Move};
use crate::role::RoomRole;
use crate::world::room::{Room, Tunnel};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Validated ant farm: rooms, tunnels and the replayed moves.
///
/// Only the parser builds one, so a `ParsedGraph` always has exactly one
/// start room, one end room, and no dangling references.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedGraph {
    rooms: Vec<Room>,
    tunnels: Vec<Tunnel>,
    ant_count: u32,
    moves: Vec<Move>,
    by_id: HashMap<String, usize>,
    start: usize,
    end: usize,
}

impl ParsedGraph {
    /// Assemble a graph whose invariants the caller has already checked
    pub(crate) fn from_parts(
        rooms: Vec<Room>,
        tunnels: Vec<Tunnel>,
        ant_count: u32,
        moves: Vec<Move>,
        start: usize,
        end: usize,
    ) -> Self {
        let by_id = rooms
            .iter()
            .enumerate()
            .map(|(i, room)| (room.id.clone(), i))
            .collect();
        Self {
            rooms,
            tunnels,
            ant_count,
            moves,
            by_id,
            start,
            end,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn tunnels(&self) -> &[Tunnel] {
        &self.tunnels
    }

    /// Number of ants declared on the first line
    pub fn ant_count(&self) -> u32 {
        self.ant_count
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Look up a room by id
    #[inline]
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.by_id.get(id).map(|&i| &self.rooms[i])
    }

    pub fn start_room(&self) -> &Room {
        &self.rooms[self.start]
    }

    pub fn end_room(&self) -> &Room {
        &self.rooms[self.end]
    }

    /// Summary numbers for reports
    pub fn stats(&self) -> GraphStats {
        let mut roles = [0usize; RoomRole::ALL.len()];
        for room in &self.rooms {
            roles[room.role.index()] += 1;
        }

        let turns: BTreeSet<u32> = self.moves.iter().map(|m| m.turn).collect();

        GraphStats {
            rooms: self.rooms.len(),
            tunnels: self.tunnels.len(),
            ants: self.ant_count,
            turns: turns.len(),
            moves: self.moves.len(),
            start_rooms: roles[RoomRole::Start.index()],
            end_rooms: roles[RoomRole::End.index()],
            normal_rooms: roles[RoomRole::Normal.index()],
            paths: PathStats::from_moves(&self.moves),
        }
    }
}

/// Aggregate numbers describing a parsed ant farm
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStats {
    pub rooms: usize,
    pub tunnels: usize,
    pub ants: u32,
    pub turns: usize,
    pub moves: usize,
    pub start_rooms: usize,
    pub end_rooms: usize,
    pub normal_rooms: usize,
    /// `None` when the file has no moves
    pub paths: Option<PathStats>,
}

/// Per-ant path lengths, counted in moves
#[derive(Clone, Debug, PartialEq)]
pub struct PathStats {
    pub average: f64,
    pub shortest: usize,
    pub longest: usize,
    pub total: usize,
}

impl PathStats {
    fn from_moves(moves: &[Move]) -> Option<Self> {
        let mut lengths: BTreeMap<AntId, usize> = BTreeMap::new();
        for mv in moves {
            *lengths.entry(mv.ant).or_default() += 1;
        }

        let shortest = lengths.values().copied().min()?;
        let longest = lengths.values().copied().max()?;
        let total: usize = lengths.values().sum();

        Some(Self {
            average: total as f64 / lengths.len() as f64,
            shortest,
            longest,
            total,
        })
    }
}
