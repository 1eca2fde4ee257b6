use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,  // 0-based
}

impl Row {
    pub fn from_zero_based(idx: u8) -> Option<Self> {
        (idx < NUM_ROWS).then_some(Self { idx })
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).checked_sub('1' as u32)?;
        Self::from_zero_based(u8::try_from(idx).ok()?)
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(|idx| Self { idx })
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,  // 0-based
}

impl Col {
    pub fn from_zero_based(idx: u8) -> Option<Self> {
        (idx < NUM_COLS).then_some(Self { idx })
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).checked_sub('a' as u32)?;
        Self::from_zero_based(u8::try_from(idx).ok()?)
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(|idx| Self { idx })
    }
}


// A board square, written as file + rank ("e4"). This is the key space shared by the render
// board, legal move hints and square highlights.
//
// Ordered rank-major so that iterating a `BTreeMap<Coord, _>` walks the board row by row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SquareShade {
    Light,
    Dark,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::from_algebraic(rank)?,
            col: Col::from_algebraic(file.to_ascii_lowercase())?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }

    // a1 is dark; shades alternate along both files and ranks.
    pub fn shade(self) -> SquareShade {
        if (self.row.to_zero_based() + self.col.to_zero_based()) % 2 == 0 {
            SquareShade::Dark
        } else {
            SquareShade::Light
        }
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl FromStr for Coord {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::from_algebraic(s).ok_or_else(|| format!("invalid square: \"{}\"", s))
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
