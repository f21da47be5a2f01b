//! The D2Q8 velocity set.
//!
//! Eight unit offsets, four axis-aligned and four diagonal, indexed so
//! that the reverse of direction `i` is always `(i + 4) % 8`. There is
//! no rest channel.
//!
//! ```text
//!     5 NW   6 N   7 NE
//!         \   |   /
//!     4 W --  .  -- 0 E
//!         /   |   \
//!     3 SW   2 S   1 SE
//! ```
//!
//! `y` grows downward (screen space), so "N" is `(0, -1)`.

use std::fmt;

/// Number of velocity channels per cell.
pub const VELOCITY_COUNT: usize = 8;

/// Offsets for each direction index, `(dx, dy)`.
const OFFSETS: [(i32, i32); VELOCITY_COUNT] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const NAMES: [&str; VELOCITY_COUNT] = ["E", "SE", "S", "SW", "W", "NW", "N", "NE"];

/// One of the eight D2Q8 lattice directions.
///
/// A thin `u8` newtype; construction through [`Direction::new`] or
/// [`Direction::from_offset`] guarantees the index is in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    /// East, `(1, 0)`.
    pub const E: Self = Self(0);
    /// South-east, `(1, 1)`.
    pub const SE: Self = Self(1);
    /// South, `(0, 1)`.
    pub const S: Self = Self(2);
    /// South-west, `(-1, 1)`.
    pub const SW: Self = Self(3);
    /// West, `(-1, 0)`.
    pub const W: Self = Self(4);
    /// North-west, `(-1, -1)`.
    pub const NW: Self = Self(5);
    /// North, `(0, -1)`.
    pub const N: Self = Self(6);
    /// North-east, `(1, -1)`.
    pub const NE: Self = Self(7);

    /// All eight directions in index order.
    pub const ALL: [Self; VELOCITY_COUNT] = [
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
        Self::N,
        Self::NE,
    ];

    /// Direction for `index`, or `None` if `index >= 8`.
    pub fn new(index: usize) -> Option<Self> {
        if index < VELOCITY_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Direction whose offset is exactly `(dx, dy)`.
    ///
    /// Returns `None` for `(0, 0)` and for any component outside `[-1, 1]`.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        OFFSETS
            .iter()
            .position(|&o| o == (dx, dy))
            .map(|i| Self(i as u8))
    }

    /// Index in `0..8`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Integer offset `(dx, dy)`.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        OFFSETS[self.0 as usize]
    }

    /// Offset as floating-point components, for momentum sums.
    #[inline]
    pub fn vector(self) -> (f64, f64) {
        let (dx, dy) = self.offset();
        (dx as f64, dy as f64)
    }

    /// The reversed direction, `(i + 4) % 8`.
    #[inline]
    pub fn opposite(self) -> Self {
        Self((self.0 + 4) % VELOCITY_COUNT as u8)
    }

    /// Negate the x and/or y component of the offset.
    ///
    /// Used by reflective edges, which flip only the violated axis.
    pub fn flip_axes(self, flip_x: bool, flip_y: bool) -> Self {
        let (dx, dy) = self.offset();
        let dx = if flip_x { -dx } else { dx };
        let dy = if flip_y { -dy } else { dy };
        // Negating components of a non-zero unit offset stays in the set.
        Self::from_offset(dx, dy).unwrap_or(self)
    }

    /// Short compass name (`"E"`, `"NW"`, ...).
    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of directions packed into one byte.
///
/// Bit `i` is set when channel `i` is occupied. This is the storage
/// format of a particle cell and the return type of occupation queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every direction.
    pub const FULL: Self = Self(0xFF);

    /// Build a set from its raw bitmask.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether `dir` is in the set.
    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & (1 << dir.0) != 0
    }

    /// Add `dir`. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, dir: Direction) -> bool {
        let had = self.contains(dir);
        self.0 |= 1 << dir.0;
        !had
    }

    /// Remove `dir`. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, dir: Direction) -> bool {
        let had = self.contains(dir);
        self.0 &= !(1 << dir.0);
        had
    }

    /// Number of occupied channels.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no channel is occupied.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the members in index order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "}}")
    }
}
