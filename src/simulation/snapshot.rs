use crate::ant::AntId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where playback stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Turn 0, nothing has moved
    #[default]
    Idle,
    /// Turns advance on their own
    Playing,
    /// Frozen on a turn other than 0 or the last
    Paused,
    /// A single requested turn is in flight
    Stepping,
    /// Every turn has been applied
    Complete,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stepping => "stepping",
            PlaybackStatus::Complete => "complete",
        })
    }
}

/// Counters shown by a UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub total_turns: usize,
    pub current_turn: usize,
    pub total_agents: usize,
    pub moving_agents: usize,
    pub is_complete: bool,
}

impl SimStats {
    /// Share of turns applied, in percent
    pub fn progress(&self) -> f64 {
        if self.total_turns == 0 {
            return 0.0;
        }
        self.current_turn as f64 / self.total_turns as f64 * 100.0
    }
}

/// Read-only picture of the replay, published after every controller event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub status: PlaybackStatus,
    /// Number of turns applied so far
    pub current_turn: usize,
    pub total_turns: usize,
    /// Turn number of the last applied turn, as written in the input
    pub last_turn_number: Option<u32>,
    pub positions: BTreeMap<AntId, String>,
    pub moving: BTreeSet<AntId>,
    /// A turn's animations are in flight
    pub animating: bool,
    /// Playback restarts from turn 0 after the last turn
    pub looping: bool,
}

impl Snapshot {
    pub fn stats(&self) -> SimStats {
        SimStats {
            total_turns: self.total_turns,
            current_turn: self.current_turn,
            total_agents: self.positions.len(),
            moving_agents: self.moving.len(),
            is_complete: self.is_complete(),
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_turn >= self.total_turns
    }

    /// Room the ant occupies in this snapshot
    pub fn position(&self, ant: AntId) -> Option<&str> {
        self.positions.get(&ant).map(String::as_str)
    }

    /// "Start", the last applied turn number, or "Complete"
    pub fn turn_label(&self) -> String {
        if self.current_turn == 0 {
            return "Start".to_string();
        }
        if self.is_complete() {
            return "Complete".to_string();
        }
        self.last_turn_number.unwrap_or_default().to_string()
    }

    /// Whether `play` would start something; a finished replay can still
    /// loop
    pub fn can_play(&self) -> bool {
        !self.animating && self.total_turns > 0 && (self.looping || !self.is_complete())
    }

    pub fn can_step(&self) -> bool {
        !self.animating
    }

    pub fn can_stop(&self) -> bool {
        self.current_turn > 0 || self.animating
    }
}
