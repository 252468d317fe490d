use std::fmt;

/// What a room means for the colony
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoomRole {
    Start = 0,
    End = 1,
    #[default]
    Normal = 2,
}

impl RoomRole {
    /// All possible roles
    pub const ALL: [RoomRole; 3] = [RoomRole::Start, RoomRole::End, RoomRole::Normal];

    /// Map a sentinel comment (`##start` / `##end`) to the role it announces
    #[inline]
    pub fn from_marker(line: &str) -> Option<Self> {
        match line.as_bytes() {
            b"##start" => Some(RoomRole::Start),
            b"##end" => Some(RoomRole::End),
            _ => None,
        }
    }

    /// Get role index for array indexing
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get role name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            RoomRole::Start => "start",
            RoomRole::End => "end",
            RoomRole::Normal => "normal",
        }
    }
}

impl fmt::Display for RoomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(RoomRole::from_marker("##start"), Some(RoomRole::Start));
        assert_eq!(RoomRole::from_marker("##end"), Some(RoomRole::End));
        assert_eq!(RoomRole::from_marker("#start"), None);
        assert_eq!(RoomRole::from_marker("## end"), None);
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; 3];
        for role in RoomRole::ALL {
            assert!(!seen[role.index()]);
            seen[role.index()] = true;
        }
        assert_eq!(RoomRole::default(), RoomRole::Normal);
        assert_eq!(RoomRole::End.to_string(), "end");
    }
}
