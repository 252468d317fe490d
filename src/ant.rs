/// Ant identifier as written in `L<id>-<room>` tokens (always positive)
pub type AntId = u32;

/// One ant entering one room during one turn
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub ant: AntId,
    pub room: String,
    pub turn: u32,
}

impl Move {
    /// Create a new move
    pub fn new(ant: AntId, room: impl Into<String>, turn: u32) -> Self {
        Self {
            ant,
            room: room.into(),
            turn,
        }
    }

    /// Render the move back in input notation
    pub fn token(&self) -> String {
        format!("L{}-{}", self.ant, self.room)
    }
}
