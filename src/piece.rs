use std::fmt;
use std::str::FromStr;

use enum_map::Enum;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use strum::EnumIter;

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// A piece as the render board describes it. The wire form is a two-letter code: force
// prefix and piece letter, e.g. "wK" or "bP".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl PieceOnBoard {
    pub fn new(force: Force, kind: PieceKind) -> Self { PieceOnBoard { kind, force } }

    pub fn from_code(code: &str) -> Option<Self> {
        let (prefix, letter) = code.chars().collect_tuple()?;
        Some(PieceOnBoard {
            force: Force::from_piece_prefix(prefix)?,
            kind: PieceKind::from_algebraic_char(letter)?,
        })
    }
    pub fn to_code(self) -> String {
        format!("{}{}", self.force.to_piece_prefix(), self.kind.to_full_algebraic())
    }

    // FEN letter: uppercase for white, lowercase for black.
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_algebraic_char(ch.to_ascii_uppercase())?;
        let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
        Some(PieceOnBoard { kind, force })
    }
    pub fn to_fen_char(self) -> char {
        let ch = self.kind.to_full_algebraic();
        match self.force {
            Force::White => ch,
            Force::Black => ch.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for PieceOnBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.force.to_piece_prefix(), self.kind.to_full_algebraic())
    }
}

impl FromStr for PieceOnBoard {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceOnBoard::from_code(s).ok_or_else(|| format!("invalid piece code: \"{}\"", s))
    }
}

impl Serialize for PieceOnBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceOnBoard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

pub fn piece_to_pictogram(piece: PieceOnBoard) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (piece.force, piece.kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
    }
}
