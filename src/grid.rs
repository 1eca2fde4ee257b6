use std::collections::BTreeMap;
use std::ops;

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::fen;
use crate::piece::{PieceKind, PieceOnBoard};
use crate::force::Force;


// Square -> piece mapping, the sole input of the board widget's `position()`.
//
// The remote authority sends it either as an object keyed by square (`{"e2": "wP", "e4": null}`)
// or as a FEN piece-placement string. Both decode into the same grid; squares that are not
// mentioned are empty.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "BTreeMap<Coord, Option<PieceOnBoard>>")]
pub struct Grid {
    data: [[Option<PieceOnBoard>; NUM_COLS as usize]; NUM_ROWS as usize],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGrid {
    Squares(BTreeMap<String, Option<String>>),
    Placement(String),
}

impl Grid {
    pub fn new() -> Self { Grid::default() }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        Coord::all().filter_map(|coord| self[coord].map(|piece| (coord, piece)))
    }

    pub fn is_empty(&self) -> bool { self.iter().next().is_none() }

    pub fn find_king(&self, force: Force) -> Option<Coord> {
        let king = PieceOnBoard::new(force, PieceKind::King);
        self.iter().find(|&(_, piece)| piece == king).map(|(coord, _)| coord)
    }

    pub fn from_squares<'a>(
        squares: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    ) -> Result<Self, String> {
        let mut grid = Grid::new();
        for (square, code) in squares {
            let coord: Coord = square.parse()?;
            grid[coord] = code.map(str::parse).transpose()?;
        }
        Ok(grid)
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    fn index(&self, pos: Coord) -> &Self::Output {
        &self.data[pos.row.to_zero_based() as usize][pos.col.to_zero_based() as usize]
    }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[pos.row.to_zero_based() as usize][pos.col.to_zero_based() as usize]
    }
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;
    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        match raw {
            RawGrid::Squares(squares) => Grid::from_squares(
                squares.iter().map(|(square, code)| (square.as_str(), code.as_deref())),
            ),
            RawGrid::Placement(placement) => fen::placement_to_grid(&placement),
        }
    }
}

impl From<Grid> for BTreeMap<Coord, Option<PieceOnBoard>> {
    fn from(grid: Grid) -> Self { Coord::all().map(|coord| (coord, grid[coord])).collect() }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn decode_square_map() {
        let grid: Grid = serde_json::from_str(r#"{"e2": "wP", "e4": null, "e8": "bK"}"#).unwrap();
        assert_eq!(grid[sq("e2")], Some(PieceOnBoard::new(Force::White, PieceKind::Pawn)));
        assert_eq!(grid[sq("e4")], None);
        assert_eq!(grid.find_king(Force::Black), Some(sq("e8")));
        assert_eq!(grid.find_king(Force::White), None);
        assert_eq!(grid.iter().count(), 2);
    }

    #[test]
    fn decode_placement_string() {
        let grid: Grid = serde_json::from_str(r#""4k3/8/8/8/4P3/8/8/4K3""#).unwrap();
        assert_eq!(grid[sq("e4")], Some(PieceOnBoard::new(Force::White, PieceKind::Pawn)));
        assert_eq!(grid.find_king(Force::White), Some(sq("e1")));
    }

    #[test]
    fn decode_rejects_bad_entries() {
        assert!(serde_json::from_str::<Grid>(r#"{"z9": "wP"}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"e2": "wX"}"#).is_err());
        assert!(serde_json::from_str::<Grid>("42").is_err());
    }
}
