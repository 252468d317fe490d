use crate::role::RoomRole;

/// A room of the ant farm, as declared by an `id x y [z]` line
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>, // absent in the classic 2D format
    pub role: RoomRole,
}

impl Room {
    /// Create a new room
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: Option<f64>, role: RoomRole) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z,
            role,
        }
    }
}

/// Undirected tunnel between two rooms
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tunnel {
    pub from: String,
    pub to: String,
}

impl Tunnel {
    /// Create a new tunnel
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_creation() {
        let room = Room::new("A", 1.0, 2.0, None, RoomRole::Start);

        assert_eq!(room.id, "A");
        assert_eq!((room.x, room.y, room.z), (1.0, 2.0, None));
        assert_eq!(room.role, RoomRole::Start);
    }

    #[test]
    fn test_tunnel_creation() {
        let tunnel = Tunnel::new("A", "B");

        assert_eq!((tunnel.from.as_str(), tunnel.to.as_str()), ("A", "B"));
    }
}
