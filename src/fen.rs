// Only the piece-placement field of FEN is handled here: it is what the remote authority uses
// as the render board. Full FEN strings (side to move, castling etc.) are passed to the server
// verbatim and never parsed by the client.

use itertools::Itertools;

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::grid::Grid;
use crate::piece::PieceOnBoard;


pub fn placement_to_grid(placement: &str) -> Result<Grid, String> {
    // Tolerate full FEN: the placement is always the first field.
    let placement = placement.split_whitespace().next().unwrap_or("");
    let rows = placement.split('/').collect_vec();
    if rows.len() != NUM_ROWS as usize {
        return Err(format!("expected {} ranks in \"{}\", got {}", NUM_ROWS, placement, rows.len()));
    }
    let mut grid = Grid::new();
    for (row_text, row) in rows.into_iter().zip(Row::all().rev()) {
        let mut col_idx: u8 = 0;
        for ch in row_text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if skip == 0 {
                    return Err(format!("invalid empty-square count in rank \"{}\"", row_text));
                }
                col_idx += skip as u8;
            } else {
                let piece = PieceOnBoard::from_fen_char(ch)
                    .ok_or_else(|| format!("invalid piece: '{}'", ch))?;
                let col = Col::from_zero_based(col_idx)
                    .ok_or_else(|| format!("rank \"{}\" is too long", row_text))?;
                grid[Coord::new(row, col)] = Some(piece);
                col_idx += 1;
            }
            if col_idx > NUM_COLS {
                return Err(format!("rank \"{}\" is too long", row_text));
            }
        }
        if col_idx != NUM_COLS {
            return Err(format!("rank \"{}\" is too short", row_text));
        }
    }
    Ok(grid)
}

pub fn grid_to_placement(grid: &Grid) -> String {
    Row::all()
        .rev()
        .map(|row| {
            let mut s = String::new();
            let mut empty_squares = 0;
            for col in Col::all() {
                match grid[Coord::new(row, col)] {
                    Some(piece) => {
                        if empty_squares > 0 {
                            s.push_str(&empty_squares.to_string());
                            empty_squares = 0;
                        }
                        s.push(piece.to_fen_char());
                    }
                    None => empty_squares += 1,
                }
            }
            if empty_squares > 0 {
                s.push_str(&empty_squares.to_string());
            }
            s
        })
        .join("/")
}
