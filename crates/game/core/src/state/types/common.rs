use core::fmt;

/// Identifier of one of the (up to four) seated players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Champion identifier, unique only within its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChampionId(pub u8);

impl fmt::Display for ChampionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "champion {}", self.0)
    }
}

/// Boat identifier, unique only within its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BoatId(pub u8);

/// Discrete board position, 1-based `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four ocean quadrants boats sail in.
///
/// Zones form a ring: NW → NE → SE → SW → NW.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OceanZone {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl OceanZone {
    /// Next zone going clockwise around the ring.
    pub const fn clockwise(self) -> Self {
        match self {
            Self::NorthWest => Self::NorthEast,
            Self::NorthEast => Self::SouthEast,
            Self::SouthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthWest,
        }
    }

    /// Zone bordering the quadrant of the board that contains `position`.
    pub fn nearest_to(position: Position, board_size: u8) -> Self {
        let north = position.row <= board_size / 2;
        let west = position.col <= board_size / 2;
        match (north, west) {
            (true, true) => Self::NorthWest,
            (true, false) => Self::NorthEast,
            (false, false) => Self::SouthEast,
            (false, true) => Self::SouthWest,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NorthWest => "north-west",
            Self::NorthEast => "north-east",
            Self::SouthEast => "south-east",
            Self::SouthWest => "south-west",
        }
    }
}

impl fmt::Display for OceanZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
